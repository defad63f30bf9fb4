use anyhow::{Context, Result};
use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use diesel::{ExpressionMethods, QueryDsl, QueryResult, SelectableHelper};
use diesel::result::Error as DieselError;
use diesel_async::RunQueryDsl;
use utoipa_axum::router::OpenApiRouter;
use uuid::Uuid;

use crate::{
    app_error::{AppError, StdResponse},
    app_state::AppState,
    domain::validation,
    models::{CategoryEntity, CategoryPayload},
    schema::categories,
};

pub fn routes_with_openapi() -> OpenApiRouter<AppState> {
    utoipa_axum::router::OpenApiRouter::new().nest(
        "/categories",
        OpenApiRouter::new()
            .routes(utoipa_axum::routes!(get_categories))
            .routes(utoipa_axum::routes!(get_category))
            .routes(utoipa_axum::routes!(create_category))
            .routes(utoipa_axum::routes!(update_category))
            .routes(utoipa_axum::routes!(delete_category)),
    )
}

/// Fetch all categories, sorted for menu display.
#[utoipa::path(
    get,
    path = "/",
    tags = ["Categories"],
    responses(
        (status = 200, description = "List all categories", body = StdResponse<Vec<CategoryEntity>, String>)
    )
)]
async fn get_categories(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let conn = &mut state
        .db_pool
        .get()
        .await
        .context("Failed to obtain a DB connection pool")?;

    // display_order is the sort key; creation order breaks ties.
    let categories: Vec<CategoryEntity> = categories::table
        .order((
            categories::display_order.asc(),
            categories::created_at.asc(),
            categories::id.asc(),
        ))
        .get_results(conn)
        .await
        .context("Failed to get categories")?;

    Ok(StdResponse {
        data: Some(categories),
        message: Some("Get categories successfully"),
    })
}

/// Fetch a specific category.
#[utoipa::path(
    get,
    path = "/{id}",
    tags = ["Categories"],
    params(
        ("id" = Uuid, Path, description = "Category ID to fetch")
    ),
    responses(
        (status = 200, description = "Get category successfully", body = StdResponse<CategoryEntity, String>),
        (status = 404, description = "Category not found")
    )
)]
async fn get_category(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let conn = &mut state
        .db_pool
        .get()
        .await
        .context("Failed to obtain a DB connection pool")?;

    let category: QueryResult<CategoryEntity> =
        categories::table.find(id).get_result(conn).await;

    match category {
        Ok(category) => Ok(StdResponse {
            data: Some(category),
            message: Some("Get category successfully"),
        }),
        Err(DieselError::NotFound) => Err(AppError::NotFound),
        Err(err) => Err(AppError::Other(err.into())),
    }
}

/// Create a new category.
#[utoipa::path(
    post,
    path = "/",
    tags = ["Categories"],
    request_body = CategoryPayload,
    responses(
        (status = 200, description = "Created category successfully", body = StdResponse<CategoryEntity, String>),
        (status = 422, description = "Validation failed")
    )
)]
async fn create_category(
    State(state): State<AppState>,
    Json(body): Json<CategoryPayload>,
) -> Result<impl IntoResponse, AppError> {
    let errors = validation::validate_category(&body);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let conn = &mut state
        .db_pool
        .get()
        .await
        .context("Failed to obtain a DB connection pool")?;

    let category: CategoryEntity = diesel::insert_into(categories::table)
        .values(&body)
        .returning(CategoryEntity::as_returning())
        .get_result(conn)
        .await
        .context("Failed to create category")?;

    Ok(StdResponse {
        data: Some(category),
        message: Some("Created category successfully"),
    })
}

/// Replace an existing category.
#[utoipa::path(
    put,
    path = "/{id}",
    tags = ["Categories"],
    params(
        ("id" = Uuid, Path, description = "Category ID to update")
    ),
    request_body = CategoryPayload,
    responses(
        (status = 200, description = "Updated category successfully", body = StdResponse<CategoryEntity, String>),
        (status = 404, description = "Category not found"),
        (status = 422, description = "Validation failed")
    )
)]
async fn update_category(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(body): Json<CategoryPayload>,
) -> Result<impl IntoResponse, AppError> {
    let errors = validation::validate_category(&body);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let conn = &mut state
        .db_pool
        .get()
        .await
        .context("Failed to obtain a DB connection pool")?;

    let category: QueryResult<CategoryEntity> = diesel::update(categories::table.find(id))
        .set(&body)
        .returning(CategoryEntity::as_returning())
        .get_result(conn)
        .await;

    match category {
        Ok(category) => Ok(StdResponse {
            data: Some(category),
            message: Some("Updated category successfully"),
        }),
        Err(DieselError::NotFound) => Err(AppError::NotFound),
        Err(err) => Err(AppError::Other(err.into())),
    }
}

/// Hard-delete a category. Products referencing it are left in place.
#[utoipa::path(
    delete,
    path = "/{id}",
    tags = ["Categories"],
    params(
        ("id" = Uuid, Path, description = "Category ID to delete")
    ),
    responses(
        (status = 200, description = "Deleted category successfully", body = StdResponse<CategoryEntity, String>),
        (status = 404, description = "Category not found")
    )
)]
async fn delete_category(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let conn = &mut state
        .db_pool
        .get()
        .await
        .context("Failed to obtain a DB connection pool")?;

    let category: QueryResult<CategoryEntity> = diesel::delete(categories::table.find(id))
        .returning(CategoryEntity::as_returning())
        .get_result(conn)
        .await;

    match category {
        Ok(category) => Ok(StdResponse {
            data: Some(category),
            message: Some("Deleted category successfully"),
        }),
        Err(DieselError::NotFound) => Err(AppError::NotFound),
        Err(err) => Err(AppError::Other(err.into())),
    }
}

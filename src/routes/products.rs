use anyhow::{Context, Result};
use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use diesel::result::Error as DieselError;
use diesel::{QueryDsl, QueryResult, SelectableHelper};
use diesel_async::RunQueryDsl;
use utoipa_axum::router::OpenApiRouter;
use uuid::Uuid;

use crate::{
    app_error::{AppError, StdResponse},
    app_state::AppState,
    domain::validation,
    models::{ProductEntity, ProductPayload},
    schema::products,
};

pub fn routes_with_openapi() -> OpenApiRouter<AppState> {
    utoipa_axum::router::OpenApiRouter::new().nest(
        "/products",
        OpenApiRouter::new()
            .routes(utoipa_axum::routes!(get_products))
            .routes(utoipa_axum::routes!(get_product))
            .routes(utoipa_axum::routes!(create_product))
            .routes(utoipa_axum::routes!(update_product))
            .routes(utoipa_axum::routes!(delete_product)),
    )
}

/// Fetch all products, promotions and inactive ones included. The admin
/// panel needs the full list; the menu view applies its own filters.
#[utoipa::path(
    get,
    path = "/",
    tags = ["Products"],
    responses(
        (status = 200, description = "List all products", body = StdResponse<Vec<ProductEntity>, String>)
    )
)]
async fn get_products(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let conn = &mut state
        .db_pool
        .get()
        .await
        .context("Failed to obtain a DB connection pool")?;

    let products: Vec<ProductEntity> = products::table
        .get_results(conn)
        .await
        .context("Failed to get products")?;

    Ok(StdResponse {
        data: Some(products),
        message: Some("Get products successfully"),
    })
}

/// Fetch a specific product.
#[utoipa::path(
    get,
    path = "/{id}",
    tags = ["Products"],
    params(
        ("id" = Uuid, Path, description = "Product ID to fetch")
    ),
    responses(
        (status = 200, description = "Get product successfully", body = StdResponse<ProductEntity, String>),
        (status = 404, description = "Product not found")
    )
)]
async fn get_product(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let conn = &mut state
        .db_pool
        .get()
        .await
        .context("Failed to obtain a DB connection pool")?;

    let product: QueryResult<ProductEntity> = products::table.find(id).get_result(conn).await;

    match product {
        Ok(product) => Ok(StdResponse {
            data: Some(product),
            message: Some("Get product successfully"),
        }),
        Err(DieselError::NotFound) => Err(AppError::NotFound),
        Err(err) => Err(AppError::Other(err.into())),
    }
}

/// Create a new product.
#[utoipa::path(
    post,
    path = "/",
    tags = ["Products"],
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Created product successfully", body = StdResponse<ProductEntity, String>),
        (status = 422, description = "Validation failed")
    )
)]
async fn create_product(
    State(state): State<AppState>,
    Json(body): Json<ProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    let errors = validation::validate_product(&body);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let conn = &mut state
        .db_pool
        .get()
        .await
        .context("Failed to obtain a DB connection pool")?;

    let product: ProductEntity = diesel::insert_into(products::table)
        .values(&body)
        .returning(ProductEntity::as_returning())
        .get_result(conn)
        .await
        .context("Failed to create product")?;

    Ok(StdResponse {
        data: Some(product),
        message: Some("Created product successfully"),
    })
}

/// Replace an existing product.
#[utoipa::path(
    put,
    path = "/{id}",
    tags = ["Products"],
    params(
        ("id" = Uuid, Path, description = "Product ID to update")
    ),
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Updated product successfully", body = StdResponse<ProductEntity, String>),
        (status = 404, description = "Product not found"),
        (status = 422, description = "Validation failed")
    )
)]
async fn update_product(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(body): Json<ProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    let errors = validation::validate_product(&body);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let conn = &mut state
        .db_pool
        .get()
        .await
        .context("Failed to obtain a DB connection pool")?;

    let product: QueryResult<ProductEntity> = diesel::update(products::table.find(id))
        .set(&body)
        .returning(ProductEntity::as_returning())
        .get_result(conn)
        .await;

    match product {
        Ok(product) => Ok(StdResponse {
            data: Some(product),
            message: Some("Updated product successfully"),
        }),
        Err(DieselError::NotFound) => Err(AppError::NotFound),
        Err(err) => Err(AppError::Other(err.into())),
    }
}

/// Hard-delete a product.
#[utoipa::path(
    delete,
    path = "/{id}",
    tags = ["Products"],
    params(
        ("id" = Uuid, Path, description = "Product ID to delete")
    ),
    responses(
        (status = 200, description = "Deleted product successfully", body = StdResponse<ProductEntity, String>),
        (status = 404, description = "Product not found")
    )
)]
async fn delete_product(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let conn = &mut state
        .db_pool
        .get()
        .await
        .context("Failed to obtain a DB connection pool")?;

    let product: QueryResult<ProductEntity> = diesel::delete(products::table.find(id))
        .returning(ProductEntity::as_returning())
        .get_result(conn)
        .await;

    match product {
        Ok(product) => Ok(StdResponse {
            data: Some(product),
            message: Some("Deleted product successfully"),
        }),
        Err(DieselError::NotFound) => Err(AppError::NotFound),
        Err(err) => Err(AppError::Other(err.into())),
    }
}

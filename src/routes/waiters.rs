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
    models::{WaiterEntity, WaiterPayload},
    schema::waiters,
};

pub fn routes_with_openapi() -> OpenApiRouter<AppState> {
    utoipa_axum::router::OpenApiRouter::new().nest(
        "/waiters",
        OpenApiRouter::new()
            .routes(utoipa_axum::routes!(get_waiters))
            .routes(utoipa_axum::routes!(get_waiter))
            .routes(utoipa_axum::routes!(create_waiter))
            .routes(utoipa_axum::routes!(update_waiter))
            .routes(utoipa_axum::routes!(delete_waiter)),
    )
}

/// Fetch all waiters. Checkout offers only the active ones; the admin
/// panel sees everybody.
#[utoipa::path(
    get,
    path = "/",
    tags = ["Waiters"],
    responses(
        (status = 200, description = "List all waiters", body = StdResponse<Vec<WaiterEntity>, String>)
    )
)]
async fn get_waiters(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let conn = &mut state
        .db_pool
        .get()
        .await
        .context("Failed to obtain a DB connection pool")?;

    let waiters: Vec<WaiterEntity> = waiters::table
        .get_results(conn)
        .await
        .context("Failed to get waiters")?;

    Ok(StdResponse {
        data: Some(waiters),
        message: Some("Get waiters successfully"),
    })
}

/// Fetch a specific waiter.
#[utoipa::path(
    get,
    path = "/{id}",
    tags = ["Waiters"],
    params(
        ("id" = Uuid, Path, description = "Waiter ID to fetch")
    ),
    responses(
        (status = 200, description = "Get waiter successfully", body = StdResponse<WaiterEntity, String>),
        (status = 404, description = "Waiter not found")
    )
)]
async fn get_waiter(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let conn = &mut state
        .db_pool
        .get()
        .await
        .context("Failed to obtain a DB connection pool")?;

    let waiter: QueryResult<WaiterEntity> = waiters::table.find(id).get_result(conn).await;

    match waiter {
        Ok(waiter) => Ok(StdResponse {
            data: Some(waiter),
            message: Some("Get waiter successfully"),
        }),
        Err(DieselError::NotFound) => Err(AppError::NotFound),
        Err(err) => Err(AppError::Other(err.into())),
    }
}

/// Create a new waiter.
#[utoipa::path(
    post,
    path = "/",
    tags = ["Waiters"],
    request_body = WaiterPayload,
    responses(
        (status = 200, description = "Created waiter successfully", body = StdResponse<WaiterEntity, String>),
        (status = 422, description = "Validation failed")
    )
)]
async fn create_waiter(
    State(state): State<AppState>,
    Json(body): Json<WaiterPayload>,
) -> Result<impl IntoResponse, AppError> {
    let errors = validation::validate_waiter(&body);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let conn = &mut state
        .db_pool
        .get()
        .await
        .context("Failed to obtain a DB connection pool")?;

    let waiter: WaiterEntity = diesel::insert_into(waiters::table)
        .values(&body)
        .returning(WaiterEntity::as_returning())
        .get_result(conn)
        .await
        .context("Failed to create waiter")?;

    Ok(StdResponse {
        data: Some(waiter),
        message: Some("Created waiter successfully"),
    })
}

/// Replace an existing waiter.
#[utoipa::path(
    put,
    path = "/{id}",
    tags = ["Waiters"],
    params(
        ("id" = Uuid, Path, description = "Waiter ID to update")
    ),
    request_body = WaiterPayload,
    responses(
        (status = 200, description = "Updated waiter successfully", body = StdResponse<WaiterEntity, String>),
        (status = 404, description = "Waiter not found"),
        (status = 422, description = "Validation failed")
    )
)]
async fn update_waiter(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(body): Json<WaiterPayload>,
) -> Result<impl IntoResponse, AppError> {
    let errors = validation::validate_waiter(&body);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let conn = &mut state
        .db_pool
        .get()
        .await
        .context("Failed to obtain a DB connection pool")?;

    let waiter: QueryResult<WaiterEntity> = diesel::update(waiters::table.find(id))
        .set(&body)
        .returning(WaiterEntity::as_returning())
        .get_result(conn)
        .await;

    match waiter {
        Ok(waiter) => Ok(StdResponse {
            data: Some(waiter),
            message: Some("Updated waiter successfully"),
        }),
        Err(DieselError::NotFound) => Err(AppError::NotFound),
        Err(err) => Err(AppError::Other(err.into())),
    }
}

/// Hard-delete a waiter. Past orders keep their frozen waiter_name.
#[utoipa::path(
    delete,
    path = "/{id}",
    tags = ["Waiters"],
    params(
        ("id" = Uuid, Path, description = "Waiter ID to delete")
    ),
    responses(
        (status = 200, description = "Deleted waiter successfully", body = StdResponse<WaiterEntity, String>),
        (status = 404, description = "Waiter not found")
    )
)]
async fn delete_waiter(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let conn = &mut state
        .db_pool
        .get()
        .await
        .context("Failed to obtain a DB connection pool")?;

    let waiter: QueryResult<WaiterEntity> = diesel::delete(waiters::table.find(id))
        .returning(WaiterEntity::as_returning())
        .get_result(conn)
        .await;

    match waiter {
        Ok(waiter) => Ok(StdResponse {
            data: Some(waiter),
            message: Some("Deleted waiter successfully"),
        }),
        Err(DieselError::NotFound) => Err(AppError::NotFound),
        Err(err) => Err(AppError::Other(err.into())),
    }
}

use std::collections::HashMap;

use anyhow::{Context, Result};
use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::Utc;
use diesel::result::Error as DieselError;
use diesel::{ExpressionMethods, OptionalExtension, QueryDsl, QueryResult, SelectableHelper};
use diesel_async::RunQueryDsl;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;
use uuid::Uuid;

use crate::{
    app_error::{AppError, StdResponse},
    app_state::AppState,
    domain::cart::Cart,
    domain::checkout::{CheckoutInfo, DerivedOrder, OrderStatus, PaymentMethod, derive_order},
    domain::notification,
    models::{CreateOrderEntity, OrderEntity, ProductEntity, WaiterEntity},
    schema::{orders, products, waiters},
};

pub fn routes_with_openapi() -> OpenApiRouter<AppState> {
    utoipa_axum::router::OpenApiRouter::new().nest(
        "/orders",
        OpenApiRouter::new()
            .routes(utoipa_axum::routes!(get_orders))
            .routes(utoipa_axum::routes!(get_order))
            .routes(utoipa_axum::routes!(create_order))
            .routes(utoipa_axum::routes!(update_order_status)),
    )
}

/// Fetch all orders, newest first.
#[utoipa::path(
    get,
    path = "/",
    tags = ["Orders"],
    responses(
        (status = 200, description = "List all orders", body = StdResponse<Vec<OrderEntity>, String>)
    )
)]
async fn get_orders(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let conn = &mut state
        .db_pool
        .get()
        .await
        .context("Failed to obtain a DB connection pool")?;

    let orders: Vec<OrderEntity> = orders::table
        .order_by(orders::created_at.desc())
        .get_results(conn)
        .await
        .context("Failed to get orders")?;

    Ok(StdResponse {
        data: Some(orders),
        message: Some("Get orders successfully"),
    })
}

/// Fetch a specific order.
#[utoipa::path(
    get,
    path = "/{id}",
    tags = ["Orders"],
    params(
        ("id" = Uuid, Path, description = "Order ID to fetch")
    ),
    responses(
        (status = 200, description = "Get order successfully", body = StdResponse<OrderEntity, String>),
        (status = 404, description = "Order not found")
    )
)]
async fn get_order(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let conn = &mut state
        .db_pool
        .get()
        .await
        .context("Failed to obtain a DB connection pool")?;

    let order: QueryResult<OrderEntity> = orders::table.find(id).get_result(conn).await;

    match order {
        Ok(order) => Ok(StdResponse {
            data: Some(order),
            message: Some("Get order successfully"),
        }),
        Err(DieselError::NotFound) => Err(AppError::NotFound),
        Err(err) => Err(AppError::Other(err.into())),
    }
}

#[derive(Deserialize, ToSchema)]
struct CreateOrderReqItem {
    pub product_id: Uuid,
    /// Zero-quantity lines are dropped before derivation.
    pub quantity: u32,
}

#[derive(Deserialize, ToSchema)]
struct CreateOrderReq {
    pub customer_name: String,
    pub table_number: String,
    pub waiter_id: Uuid,
    pub payment_method: PaymentMethod,
    pub observation: Option<String>,
    pub items: Vec<CreateOrderReqItem>,
}

#[derive(Serialize, ToSchema)]
struct NotificationPayload {
    /// Digits-only destination number.
    pub target: String,
    pub message: String,
    /// Prefilled wa.me deep link the client should open.
    pub link: String,
}

#[derive(Serialize, ToSchema)]
struct CreateOrderRes {
    pub order: OrderEntity,
    pub notification: NotificationPayload,
}

/// Submit an order: freezes prices from the current catalog, persists the
/// order, and returns the waiter notification payload. The caller opens
/// the link; no delivery confirmation comes back.
#[utoipa::path(
    post,
    path = "/",
    tags = ["Orders"],
    request_body = CreateOrderReq,
    responses(
        (status = 200, description = "Order submitted successfully", body = StdResponse<CreateOrderRes, String>),
        (status = 400, description = "Empty cart or invalid waiter"),
        (status = 422, description = "Validation failed")
    )
)]
async fn create_order(
    State(state): State<AppState>,
    Json(body): Json<CreateOrderReq>,
) -> Result<impl IntoResponse, AppError> {
    let conn = &mut state
        .db_pool
        .get()
        .await
        .context("Failed to obtain a DB connection pool")?;

    let waiter: Option<WaiterEntity> = waiters::table
        .find(body.waiter_id)
        .get_result(conn)
        .await
        .optional()
        .context("Failed to get waiter")?;

    let product_ids: Vec<Uuid> = body.items.iter().map(|item| item.product_id).collect();
    let snapshots: Vec<ProductEntity> = products::table
        .filter(products::id.eq_any(&product_ids))
        .get_results(conn)
        .await
        .context("Failed to get products")?;
    let by_id: HashMap<Uuid, ProductEntity> = snapshots
        .into_iter()
        .map(|product| (product.id, product))
        .collect();

    let mut cart = Cart::new();
    for item in &body.items {
        if item.quantity == 0 {
            continue;
        }
        let Some(product) = by_id.get(&item.product_id).cloned() else {
            return Err(AppError::BadRequest(format!(
                "{} is not a valid product",
                item.product_id
            )));
        };
        cart.add_or_increment(product);
        cart.set_quantity(item.product_id, item.quantity);
    }

    let info = CheckoutInfo {
        customer_name: body.customer_name,
        table_number: body.table_number,
        payment_method: body.payment_method,
        observation: body.observation,
    };
    let today = Utc::now().date_naive();

    let DerivedOrder {
        order: draft,
        message,
        target,
    } = derive_order(
        &cart,
        &info,
        waiter.as_ref(),
        today,
        &state.config.fallback_whatsapp_number,
    )?;

    let order: OrderEntity = diesel::insert_into(orders::table)
        .values(CreateOrderEntity {
            customer_name: draft.customer_name,
            table_number: draft.table_number,
            waiter_id: draft.waiter_id,
            waiter_name: draft.waiter_name,
            items: serde_json::to_value(&draft.items).context("Failed to serialize order items")?,
            payment_method: draft.payment_method.as_str().to_string(),
            observation: draft.observation,
            total_amount: draft.total_amount,
            status: draft.status.as_str().to_string(),
        })
        .returning(OrderEntity::as_returning())
        .get_result(conn)
        .await
        .context("Failed to create order")?;

    tracing::info!(
        "Order {} submitted for table {}",
        order.id,
        order.table_number
    );

    let link = notification::whatsapp_link(&target, &message);

    Ok(StdResponse {
        data: Some(CreateOrderRes {
            order,
            notification: NotificationPayload {
                target,
                message,
                link,
            },
        }),
        message: Some("Order submitted successfully"),
    })
}

#[derive(Deserialize, ToSchema)]
struct UpdateOrderStatusReq {
    pub status: OrderStatus,
}

/// Advance an order's status (admin action).
#[utoipa::path(
    patch,
    path = "/{id}/status",
    tags = ["Orders"],
    params(
        ("id" = Uuid, Path, description = "Order ID to update")
    ),
    request_body = UpdateOrderStatusReq,
    responses(
        (status = 200, description = "Updated order status successfully", body = StdResponse<OrderEntity, String>),
        (status = 404, description = "Order not found")
    )
)]
async fn update_order_status(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(body): Json<UpdateOrderStatusReq>,
) -> Result<impl IntoResponse, AppError> {
    let conn = &mut state
        .db_pool
        .get()
        .await
        .context("Failed to obtain a DB connection pool")?;

    let order: QueryResult<OrderEntity> = diesel::update(orders::table.find(id))
        .set(orders::status.eq(body.status.as_str()))
        .returning(OrderEntity::as_returning())
        .get_result(conn)
        .await;

    match order {
        Ok(order) => Ok(StdResponse {
            data: Some(order),
            message: Some("Updated order status successfully"),
        }),
        Err(DieselError::NotFound) => Err(AppError::NotFound),
        Err(err) => Err(AppError::Other(err.into())),
    }
}

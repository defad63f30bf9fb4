use std::collections::HashMap;

use anyhow::{Context, Result};
use axum::{extract::State, response::IntoResponse};
use chrono::Utc;
use diesel::{ExpressionMethods, QueryDsl};
use diesel_async::RunQueryDsl;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;
use utoipa_axum::router::OpenApiRouter;

use crate::{
    app_error::{AppError, StdResponse},
    app_state::AppState,
    domain::pricing::resolve_display_price,
    models::{CategoryEntity, ProductEntity},
    schema::{categories, products},
};

pub fn routes_with_openapi() -> OpenApiRouter<AppState> {
    utoipa_axum::router::OpenApiRouter::new().nest(
        "/menu",
        OpenApiRouter::new().routes(utoipa_axum::routes!(get_menu)),
    )
}

#[derive(Serialize, ToSchema)]
struct MenuProduct {
    pub product: ProductEntity,
    /// Price after promotion resolution at today's date.
    pub effective_price: Decimal,
    pub is_discounted: bool,
}

#[derive(Serialize, ToSchema)]
struct MenuCategory {
    pub category: CategoryEntity,
    pub products: Vec<MenuProduct>,
}

/// The customer-facing menu: active categories in display order, each
/// with its active products annotated with the resolved display price.
#[utoipa::path(
    get,
    path = "/",
    tags = ["Menu"],
    responses(
        (status = 200, description = "Get menu successfully", body = StdResponse<Vec<MenuCategory>, String>)
    )
)]
async fn get_menu(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let conn = &mut state
        .db_pool
        .get()
        .await
        .context("Failed to obtain a DB connection pool")?;

    let active_categories: Vec<CategoryEntity> = categories::table
        .filter(categories::active.eq(true))
        .order((
            categories::display_order.asc(),
            categories::created_at.asc(),
            categories::id.asc(),
        ))
        .get_results(conn)
        .await
        .context("Failed to get categories")?;

    let active_products: Vec<ProductEntity> = products::table
        .filter(products::active.eq(true))
        .get_results(conn)
        .await
        .context("Failed to get products")?;

    let today = Utc::now().date_naive();

    let mut group: HashMap<Uuid, Vec<MenuProduct>> = HashMap::new();
    for product in active_products {
        let resolved = resolve_display_price(&product, today)?;
        group.entry(product.category_id).or_default().push(MenuProduct {
            product,
            effective_price: resolved.effective_price,
            is_discounted: resolved.is_discounted,
        });
    }

    let menu: Vec<MenuCategory> = active_categories
        .into_iter()
        .map(|category| {
            let products = group.remove(&category.id).unwrap_or_default();
            MenuCategory { category, products }
        })
        .collect();

    Ok(StdResponse {
        data: Some(menu),
        message: Some("Get menu successfully"),
    })
}

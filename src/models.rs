use chrono::{DateTime, NaiveDate, Utc};
use diesel::{
    Selectable,
    prelude::{AsChangeset, Identifiable, Insertable, Queryable},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

// Categories

#[derive(Queryable, Selectable, Identifiable, Serialize, Debug, Clone, ToSchema)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CategoryEntity {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub display_order: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Create/replace payload for a category. Serves both POST bodies and full
/// PUT replacement, mirroring the single insert schema the admin panel uses.
#[derive(Insertable, AsChangeset, Deserialize, Debug, ToSchema)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(treat_none_as_null = true)]
pub struct CategoryPayload {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_true")]
    pub active: bool,
}

// Products

#[derive(Queryable, Selectable, Identifiable, Serialize, Debug, Clone, ToSchema)]
#[diesel(table_name = crate::schema::products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductEntity {
    pub id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub is_promotion: bool,
    pub promotion_price: Option<Decimal>,
    /// Inclusive promotion window bounds, day granularity.
    pub promotion_start: Option<NaiveDate>,
    pub promotion_end: Option<NaiveDate>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, AsChangeset, Deserialize, Debug, ToSchema)]
#[diesel(table_name = crate::schema::products)]
#[diesel(treat_none_as_null = true)]
pub struct ProductPayload {
    pub category_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_promotion: bool,
    pub promotion_price: Option<Decimal>,
    pub promotion_start: Option<NaiveDate>,
    pub promotion_end: Option<NaiveDate>,
    #[serde(default = "default_true")]
    pub active: bool,
}

// Waiters

#[derive(Queryable, Selectable, Identifiable, Serialize, Debug, Clone, ToSchema)]
#[diesel(table_name = crate::schema::waiters)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WaiterEntity {
    pub id: Uuid,
    pub name: String,
    pub photo_url: Option<String>,
    /// Free-form digits used for the WhatsApp deep link.
    pub phone: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, AsChangeset, Deserialize, Debug, ToSchema)]
#[diesel(table_name = crate::schema::waiters)]
#[diesel(treat_none_as_null = true)]
pub struct WaiterPayload {
    pub name: String,
    pub photo_url: Option<String>,
    pub phone: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}

// Orders

#[derive(Queryable, Selectable, Identifiable, Serialize, Debug, Clone, ToSchema)]
#[diesel(table_name = crate::schema::orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderEntity {
    pub id: Uuid,
    pub customer_name: String,
    pub table_number: String,
    pub waiter_id: Uuid,
    /// Denormalized copy, frozen at submission time.
    pub waiter_name: String,
    /// Frozen line items as a JSON array of `OrderItem`.
    pub items: Value,
    pub payment_method: String,
    pub observation: Option<String>,
    pub total_amount: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::orders)]
pub struct CreateOrderEntity {
    pub customer_name: String,
    pub table_number: String,
    pub waiter_id: Uuid,
    pub waiter_name: String,
    pub items: Value,
    pub payment_method: String,
    pub observation: Option<String>,
    pub total_amount: Decimal,
    pub status: String,
}

fn default_true() -> bool {
    true
}

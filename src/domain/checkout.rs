//! Order derivation: turns a cart plus checkout details into a frozen
//! order draft and its waiter notification. Pure; persistence and link
//! opening stay with the caller.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::app_error::{AppError, FieldError};
use crate::domain::cart::Cart;
use crate::domain::notification;
use crate::domain::pricing::resolve_display_price;
use crate::models::WaiterEntity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Debit,
    Credit,
    Pix,
    Cash,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Debit => "debit",
            PaymentMethod::Credit => "credit",
            PaymentMethod::Pix => "pix",
            PaymentMethod::Cash => "cash",
        }
    }

    /// Customer-facing label used in the notification message.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Debit => "Débito",
            PaymentMethod::Credit => "Crédito",
            PaymentMethod::Pix => "PIX",
            PaymentMethod::Cash => "Dinheiro",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

/// A line item frozen at submission time: the unit price is a copy, not a
/// live reference to the product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

/// Checkout details captured from the customer.
#[derive(Debug, Clone)]
pub struct CheckoutInfo {
    pub customer_name: String,
    pub table_number: String,
    pub payment_method: PaymentMethod,
    pub observation: Option<String>,
}

/// The order as derived, before the datastore assigns id/created_at.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub customer_name: String,
    pub table_number: String,
    pub waiter_id: Uuid,
    pub waiter_name: String,
    pub items: Vec<OrderItem>,
    pub payment_method: PaymentMethod,
    pub observation: Option<String>,
    pub total_amount: Decimal,
    pub status: OrderStatus,
}

#[derive(Debug, Clone)]
pub struct DerivedOrder {
    pub order: OrderDraft,
    /// Plain-text notification, safe to URL-encode.
    pub message: String,
    /// Digits-only destination for the messaging deep link.
    pub target: String,
}

/// Derives an immutable order from the cart: validates the checkout
/// details, freezes every unit price as of `today`, and computes the
/// total once from the frozen items.
pub fn derive_order(
    cart: &Cart,
    info: &CheckoutInfo,
    waiter: Option<&WaiterEntity>,
    today: NaiveDate,
    fallback_phone: &str,
) -> Result<DerivedOrder, AppError> {
    if cart.is_empty() {
        return Err(AppError::EmptyCart);
    }

    let waiter = match waiter {
        Some(waiter) if waiter.active => waiter,
        _ => return Err(AppError::InvalidWaiter),
    };

    let mut field_errors = Vec::new();
    if info.customer_name.trim().is_empty() {
        field_errors.push(FieldError::new("customer_name", "Nome é obrigatório"));
    }
    if info.table_number.trim().is_empty() {
        field_errors.push(FieldError::new(
            "table_number",
            "Número da mesa é obrigatório",
        ));
    }
    if !field_errors.is_empty() {
        return Err(AppError::Validation(field_errors));
    }

    let mut items = Vec::with_capacity(cart.lines().len());
    for line in cart.lines() {
        let unit_price = resolve_display_price(&line.product, today)?.effective_price;
        items.push(OrderItem {
            product_id: line.product.id,
            product_name: line.product.name.clone(),
            quantity: line.quantity,
            unit_price,
            total_price: unit_price * Decimal::from(line.quantity),
        });
    }

    let total_amount: Decimal = items.iter().map(|item| item.total_price).sum();

    let observation = info
        .observation
        .as_deref()
        .map(str::trim)
        .filter(|obs| !obs.is_empty())
        .map(str::to_string);

    let order = OrderDraft {
        customer_name: info.customer_name.trim().to_string(),
        table_number: info.table_number.trim().to_string(),
        waiter_id: waiter.id,
        waiter_name: waiter.name.clone(),
        items,
        payment_method: info.payment_method,
        observation,
        total_amount,
        status: OrderStatus::Pending,
    };

    let message = notification::format_order_message(&order);
    let target = notification::notification_target(waiter.phone.as_deref(), fallback_phone);

    Ok(DerivedOrder {
        order,
        message,
        target,
    })
}

//! Catalog entity validation: explicit, pure checks returning the full
//! list of field errors instead of failing on the first one.

use rust_decimal::Decimal;
use url::Url;

use crate::app_error::FieldError;
use crate::models::{CategoryPayload, ProductPayload, WaiterPayload};

pub fn validate_category(payload: &CategoryPayload) -> Vec<FieldError> {
    let mut errors = Vec::new();
    check_required(&mut errors, "name", &payload.name);
    errors
}

pub fn validate_product(payload: &ProductPayload) -> Vec<FieldError> {
    let mut errors = Vec::new();
    check_required(&mut errors, "name", &payload.name);

    if payload.price <= Decimal::ZERO {
        errors.push(FieldError::new("price", "Preço deve ser positivo"));
    }
    if let Some(promotion_price) = payload.promotion_price
        && promotion_price <= Decimal::ZERO
    {
        errors.push(FieldError::new(
            "promotion_price",
            "Preço promocional deve ser positivo",
        ));
    }
    check_optional_url(&mut errors, "image_url", payload.image_url.as_deref());
    errors
}

pub fn validate_waiter(payload: &WaiterPayload) -> Vec<FieldError> {
    let mut errors = Vec::new();
    check_required(&mut errors, "name", &payload.name);
    check_optional_url(&mut errors, "photo_url", payload.photo_url.as_deref());
    errors
}

fn check_required(errors: &mut Vec<FieldError>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, "Nome é obrigatório"));
    }
}

fn check_optional_url(errors: &mut Vec<FieldError>, field: &str, value: Option<&str>) {
    if let Some(raw) = value
        && Url::parse(raw).is_err()
    {
        errors.push(FieldError::new(field, "URL inválida"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn product_payload() -> ProductPayload {
        ProductPayload {
            category_id: Uuid::new_v4(),
            name: "Produto".to_string(),
            description: None,
            price: dec!(10.00),
            image_url: None,
            is_promotion: false,
            promotion_price: None,
            promotion_start: None,
            promotion_end: None,
            active: true,
        }
    }

    #[test]
    fn valid_product_has_no_errors() {
        assert!(validate_product(&product_payload()).is_empty());
    }

    #[test]
    fn product_errors_are_aggregated() {
        let payload = ProductPayload {
            name: " ".to_string(),
            price: Decimal::ZERO,
            promotion_price: Some(dec!(-2.00)),
            image_url: Some("not a url".to_string()),
            ..product_payload()
        };

        let errors = validate_product(&payload);
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["name", "price", "promotion_price", "image_url"]);
    }

    #[test]
    fn well_formed_image_url_is_accepted() {
        let payload = ProductPayload {
            image_url: Some("https://cdn.example.com/picanha.jpg".to_string()),
            ..product_payload()
        };
        assert!(validate_product(&payload).is_empty());
    }

    #[test]
    fn category_requires_a_name() {
        let payload = CategoryPayload {
            name: String::new(),
            description: None,
            display_order: 0,
            active: true,
        };
        let errors = validate_category(&payload);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "name");
    }

    #[test]
    fn waiter_photo_url_is_checked_when_present() {
        let payload = WaiterPayload {
            name: "Carlos".to_string(),
            photo_url: Some("://broken".to_string()),
            phone: None,
            active: true,
        };
        let errors = validate_waiter(&payload);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "photo_url");
    }
}

pub mod cart;
pub mod checkout;
pub mod notification;
pub mod pricing;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_fixtures {
    use chrono::Utc;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use crate::models::{ProductEntity, WaiterEntity};

    pub fn make_product(name: &str, price: Decimal) -> ProductEntity {
        ProductEntity {
            id: Uuid::new_v4(),
            category_id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            price,
            image_url: None,
            is_promotion: false,
            promotion_price: None,
            promotion_start: None,
            promotion_end: None,
            active: true,
            created_at: Utc::now(),
        }
    }

    pub fn make_waiter(name: &str, phone: Option<&str>) -> WaiterEntity {
        WaiterEntity {
            id: Uuid::new_v4(),
            name: name.to_string(),
            photo_url: None,
            phone: phone.map(str::to_string),
            active: true,
            created_at: Utc::now(),
        }
    }
}

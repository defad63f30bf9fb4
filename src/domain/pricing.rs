//! Effective-price resolution for catalog products.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::app_error::AppError;
use crate::models::ProductEntity;

/// The price actually charged for a product at a given day, after
/// promotion resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPrice {
    pub effective_price: Decimal,
    /// True only when an active promotion undercuts the base price.
    pub is_discounted: bool,
}

/// Resolves the display price of `product` as of `today`.
///
/// A promotion applies when the product is flagged, carries a promotion
/// price, and `today` falls inside the inclusive date window (an absent
/// bound is open). The promotion price applies even when it is not lower
/// than the base price; the discount flag requires a strict undercut.
///
/// `today` is always passed in by the caller so the resolution is
/// deterministic.
pub fn resolve_display_price(
    product: &ProductEntity,
    today: NaiveDate,
) -> Result<ResolvedPrice, AppError> {
    if product.price <= Decimal::ZERO {
        return Err(AppError::PriceInvariant(format!(
            "product {} has non-positive price {}",
            product.id, product.price
        )));
    }
    if let Some(promotion_price) = product.promotion_price
        && promotion_price <= Decimal::ZERO
    {
        return Err(AppError::PriceInvariant(format!(
            "product {} has non-positive promotion price {}",
            product.id, promotion_price
        )));
    }

    let promotion_active = product.is_promotion
        && product.promotion_price.is_some()
        && product.promotion_start.is_none_or(|start| start <= today)
        && product.promotion_end.is_none_or(|end| end >= today);

    let effective_price = if promotion_active {
        product.promotion_price.unwrap_or(product.price)
    } else {
        product.price
    };

    Ok(ResolvedPrice {
        effective_price,
        is_discounted: promotion_active && effective_price < product.price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_fixtures::make_product;
    use chrono::Datelike;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 15).unwrap()
    }

    #[test]
    fn base_price_when_not_flagged_regardless_of_promotion_fields() {
        let mut product = make_product("Picanha", dec!(89.90));
        product.promotion_price = Some(dec!(59.90));
        product.promotion_start = Some(today().with_day(1).unwrap());

        let resolved = resolve_display_price(&product, today()).unwrap();
        assert_eq!(resolved.effective_price, dec!(89.90));
        assert!(!resolved.is_discounted);
    }

    #[test]
    fn promotion_applies_inside_window() {
        let mut product = make_product("Caipirinha", dec!(25.00));
        product.is_promotion = true;
        product.promotion_price = Some(dec!(18.00));
        product.promotion_start = Some(NaiveDate::from_ymd_opt(2025, 7, 10).unwrap());
        product.promotion_end = Some(NaiveDate::from_ymd_opt(2025, 7, 20).unwrap());

        let resolved = resolve_display_price(&product, today()).unwrap();
        assert_eq!(resolved.effective_price, dec!(18.00));
        assert!(resolved.is_discounted);
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let mut product = make_product("Feijoada", dec!(42.00));
        product.is_promotion = true;
        product.promotion_price = Some(dec!(35.00));
        product.promotion_start = Some(today());
        product.promotion_end = Some(today());

        let resolved = resolve_display_price(&product, today()).unwrap();
        assert_eq!(resolved.effective_price, dec!(35.00));
    }

    #[test]
    fn promotion_not_yet_started_uses_base_price() {
        let mut product = make_product("Moqueca", dec!(55.00));
        product.is_promotion = true;
        product.promotion_price = Some(dec!(40.00));
        product.promotion_start = Some(NaiveDate::from_ymd_opt(2025, 7, 16).unwrap());

        let resolved = resolve_display_price(&product, today()).unwrap();
        assert_eq!(resolved.effective_price, dec!(55.00));
        assert!(!resolved.is_discounted);
    }

    #[test]
    fn promotion_already_ended_uses_base_price() {
        let mut product = make_product("Pastel", dec!(12.00));
        product.is_promotion = true;
        product.promotion_price = Some(dec!(8.00));
        product.promotion_end = Some(NaiveDate::from_ymd_opt(2025, 7, 14).unwrap());

        let resolved = resolve_display_price(&product, today()).unwrap();
        assert_eq!(resolved.effective_price, dec!(12.00));
    }

    #[test]
    fn promotion_without_price_never_applies() {
        let mut product = make_product("Coxinha", dec!(9.00));
        product.is_promotion = true;

        let resolved = resolve_display_price(&product, today()).unwrap();
        assert_eq!(resolved.effective_price, dec!(9.00));
        assert!(!resolved.is_discounted);
    }

    #[test]
    fn equal_promotion_price_applies_but_is_not_discounted() {
        let mut product = make_product("Guaraná", dec!(7.50));
        product.is_promotion = true;
        product.promotion_price = Some(dec!(7.50));

        let resolved = resolve_display_price(&product, today()).unwrap();
        assert_eq!(resolved.effective_price, dec!(7.50));
        assert!(!resolved.is_discounted);
    }

    #[test]
    fn non_positive_price_is_an_invariant_violation() {
        let product = make_product("Broken", Decimal::ZERO);
        assert!(matches!(
            resolve_display_price(&product, today()),
            Err(AppError::PriceInvariant(_))
        ));

        let mut product = make_product("Also broken", dec!(10.00));
        product.promotion_price = Some(dec!(-1.00));
        assert!(matches!(
            resolve_display_price(&product, today()),
            Err(AppError::PriceInvariant(_))
        ));
    }
}

//! The customer cart: an ordered collection of product snapshots with
//! quantities. Carts are never persisted server-side; the submission
//! handler reconstitutes one from the request before deriving an order.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::app_error::AppError;
use crate::domain::pricing::resolve_display_price;
use crate::models::ProductEntity;

#[derive(Debug, Clone)]
pub struct CartLine {
    pub product: ProductEntity,
    pub quantity: u32,
}

/// Insertion-ordered, with at most one line per product id.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Adds one unit of `product`, merging into the existing line if the
    /// product is already in the cart.
    pub fn add_or_increment(&mut self, product: ProductEntity) {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product.id == product.id)
        {
            line.quantity += 1;
            return;
        }
        self.lines.push(CartLine {
            product,
            quantity: 1,
        });
    }

    /// Replaces the quantity of an existing line. Zero removes the line;
    /// a product not in the cart is left untouched.
    pub fn set_quantity(&mut self, product_id: Uuid, quantity: u32) {
        if quantity == 0 {
            self.remove_item(product_id);
            return;
        }
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product.id == product_id)
        {
            line.quantity = quantity;
        }
    }

    pub fn remove_item(&mut self, product_id: Uuid) {
        self.lines.retain(|line| line.product.id != product_id);
    }

    pub fn total_item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Sum of all line totals at `today`'s resolved prices.
    pub fn total(&self, today: NaiveDate) -> Result<Decimal, AppError> {
        let mut total = Decimal::ZERO;
        for line in &self.lines {
            total += line_total(line, today)?;
        }
        Ok(total)
    }
}

pub fn line_total(line: &CartLine, today: NaiveDate) -> Result<Decimal, AppError> {
    let resolved = resolve_display_price(&line.product, today)?;
    Ok(resolved.effective_price * Decimal::from(line.quantity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_fixtures::make_product;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 15).unwrap()
    }

    #[test]
    fn add_or_increment_merges_into_one_line() {
        let product = make_product("Pão de queijo", dec!(6.00));
        let mut cart = Cart::new();
        cart.add_or_increment(product.clone());
        cart.add_or_increment(product.clone());
        cart.add_or_increment(product);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 3);
        assert_eq!(cart.total_item_count(), 3);
    }

    #[test]
    fn total_is_invariant_under_add_order() {
        let a = make_product("A", dec!(10.00));
        let b = make_product("B", dec!(20.00));

        let mut forward = Cart::new();
        forward.add_or_increment(a.clone());
        forward.add_or_increment(a.clone());
        forward.add_or_increment(b.clone());

        let mut shuffled = Cart::new();
        shuffled.add_or_increment(b);
        shuffled.add_or_increment(a.clone());
        shuffled.add_or_increment(a);

        assert_eq!(
            forward.total(today()).unwrap(),
            shuffled.total(today()).unwrap()
        );
        assert_eq!(forward.total(today()).unwrap(), dec!(40.00));
    }

    #[test]
    fn set_quantity_zero_removes_and_is_idempotent() {
        let a = make_product("A", dec!(10.00));
        let b = make_product("B", dec!(5.00));
        let a_id = a.id;

        let mut cart = Cart::new();
        cart.add_or_increment(a);
        cart.add_or_increment(b);

        cart.set_quantity(a_id, 0);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.total(today()).unwrap(), dec!(5.00));

        cart.set_quantity(a_id, 0);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.total(today()).unwrap(), dec!(5.00));
    }

    #[test]
    fn set_quantity_replaces_existing_line() {
        let a = make_product("A", dec!(3.50));
        let a_id = a.id;
        let mut cart = Cart::new();
        cart.add_or_increment(a);

        cart.set_quantity(a_id, 4);
        assert_eq!(cart.lines()[0].quantity, 4);
        assert_eq!(cart.total(today()).unwrap(), dec!(14.00));
    }

    #[test]
    fn set_quantity_on_absent_product_is_a_no_op() {
        let mut cart = Cart::new();
        cart.add_or_increment(make_product("A", dec!(1.00)));
        cart.set_quantity(Uuid::new_v4(), 7);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.total_item_count(), 1);
    }

    #[test]
    fn remove_item_is_unconditional() {
        let a = make_product("A", dec!(2.00));
        let a_id = a.id;
        let mut cart = Cart::new();
        cart.add_or_increment(a);

        cart.remove_item(a_id);
        assert!(cart.is_empty());

        // Absent id: no-op.
        cart.remove_item(a_id);
        assert!(cart.is_empty());
    }

    #[test]
    fn line_totals_use_the_resolved_promotion_price() {
        let mut promo = make_product("Promo", dec!(20.00));
        promo.is_promotion = true;
        promo.promotion_price = Some(dec!(15.00));

        let mut cart = Cart::new();
        cart.add_or_increment(promo.clone());
        cart.add_or_increment(promo);

        assert_eq!(cart.total(today()).unwrap(), dec!(30.00));
    }
}

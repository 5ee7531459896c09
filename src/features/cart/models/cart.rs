use rust_decimal::Decimal;
use thiserror::Error;

use crate::core::error::AppError;
use crate::shared::constants::{MAX_ITEM_WEIGHT_KG, MAX_LINE_QUANTITY, MAX_UNIT_PRICE};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("Quantity for '{0}' must be at least 1")]
    InvalidQuantity(String),

    #[error("Quantity for '{0}' must not exceed {max}", max = MAX_LINE_QUANTITY)]
    QuantityTooLarge(String),

    #[error("Price for '{0}' must not be negative")]
    NegativePrice(String),

    #[error("Price for '{0}' must not exceed {max}", max = MAX_UNIT_PRICE)]
    PriceTooLarge(String),

    #[error("Weight for '{0}' must not be negative")]
    NegativeWeight(String),

    #[error("Weight for '{0}' must not exceed {max} kg", max = MAX_ITEM_WEIGHT_KG)]
    WeightTooLarge(String),

    #[error("Order amount is too large")]
    AmountOverflow,
}

impl From<CartError> for AppError {
    fn from(err: CartError) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// One product in the cart
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product_id: String,
    pub name: Option<String>,
    pub unit_price: Decimal,
    pub quantity: u32,
    /// Per-item shipping weight; the item estimate is used when absent
    pub weight_kg: Option<Decimal>,
}

impl CartLine {
    /// Price times quantity; `None` if the product does not fit a `Decimal`
    pub fn line_total(&self) -> Option<Decimal> {
        self.unit_price.checked_mul(Decimal::from(self.quantity))
    }

    fn validate(&self) -> Result<(), CartError> {
        let id = || self.product_id.clone();

        if self.quantity == 0 {
            return Err(CartError::InvalidQuantity(id()));
        }
        if self.quantity > MAX_LINE_QUANTITY {
            return Err(CartError::QuantityTooLarge(id()));
        }
        if self.unit_price < Decimal::ZERO {
            return Err(CartError::NegativePrice(id()));
        }
        if self.unit_price > MAX_UNIT_PRICE {
            return Err(CartError::PriceTooLarge(id()));
        }
        match self.weight_kg {
            Some(w) if w < Decimal::ZERO => Err(CartError::NegativeWeight(id())),
            Some(w) if w > MAX_ITEM_WEIGHT_KG => Err(CartError::WeightTooLarge(id())),
            _ => Ok(()),
        }
    }
}

/// Cart lines in insertion order, one line per product.
///
/// Every line stays within the cart limits, so subtotals and weights of a
/// cart built through [`Cart::add`] cannot overflow.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from request lines, merging repeated products
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Result<Self, CartError> {
        let mut cart = Self::new();
        for line in lines {
            cart.add(line)?;
        }
        Ok(cart)
    }

    /// Add a line. Adding a product already in the cart increases its
    /// quantity and keeps the original line's price and weight.
    pub fn add(&mut self, line: CartLine) -> Result<(), CartError> {
        line.validate()?;

        match self
            .lines
            .iter_mut()
            .find(|l| l.product_id == line.product_id)
        {
            Some(existing) => {
                existing.quantity = existing
                    .quantity
                    .checked_add(line.quantity)
                    .filter(|q| *q <= MAX_LINE_QUANTITY)
                    .ok_or_else(|| CartError::QuantityTooLarge(line.product_id.clone()))?;
            }
            None => self.lines.push(line),
        }
        Ok(())
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    pub fn subtotal(&self) -> Decimal {
        self.lines
            .iter()
            .map(|l| l.unit_price * Decimal::from(l.quantity))
            .sum()
    }

    /// Shipping weight, using `default_item_weight` for lines without one
    pub fn total_weight(&self, default_item_weight: Decimal) -> Decimal {
        self.lines
            .iter()
            .map(|l| l.weight_kg.unwrap_or(default_item_weight) * Decimal::from(l.quantity))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::dec;

    fn line(id: &str, price: &str, quantity: u32) -> CartLine {
        CartLine {
            product_id: id.to_string(),
            name: None,
            unit_price: dec(price),
            quantity,
            weight_kg: None,
        }
    }

    #[test]
    fn test_add_merges_same_product() {
        let mut cart = Cart::new();
        cart.add(line("p1", "10", 1)).unwrap();
        cart.add(line("p2", "5", 2)).unwrap();
        cart.add(line("p1", "10", 3)).unwrap();

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.lines()[0].product_id, "p1");
        assert_eq!(cart.lines()[0].quantity, 4);
        assert_eq!(cart.item_count(), 6);
        assert_eq!(cart.subtotal(), dec("50"));
    }

    #[test]
    fn test_rejects_invalid_lines() {
        let mut cart = Cart::new();
        assert_eq!(
            cart.add(line("p1", "10", 0)),
            Err(CartError::InvalidQuantity("p1".to_string()))
        );
        assert_eq!(
            cart.add(line("p1", "-1", 1)),
            Err(CartError::NegativePrice("p1".to_string()))
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total_weight_uses_default_for_missing_weight() {
        let mut heavy = line("p1", "10", 2);
        heavy.weight_kg = Some(dec("1.25"));
        let cart = Cart::from_lines(vec![heavy, line("p2", "5", 3)]).unwrap();

        assert_eq!(cart.total_weight(dec("0.5")), dec("4"));
    }

    #[test]
    fn test_merge_past_quantity_limit_is_rejected() {
        let mut cart = Cart::new();
        cart.add(line("p1", "10", MAX_LINE_QUANTITY)).unwrap();

        assert_eq!(
            cart.add(line("p1", "10", 2)),
            Err(CartError::QuantityTooLarge("p1".to_string()))
        );
        assert_eq!(cart.lines()[0].quantity, MAX_LINE_QUANTITY);
    }

    #[test]
    fn test_merge_does_not_wrap_quantity() {
        let mut cart = Cart::new();
        cart.add(line("p1", "10", 5)).unwrap();

        assert_eq!(
            cart.add(line("p1", "10", u32::MAX)),
            Err(CartError::QuantityTooLarge("p1".to_string()))
        );
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_rejects_out_of_range_price_and_weight() {
        let mut cart = Cart::new();
        assert_eq!(
            cart.add(line("p1", &Decimal::MAX.to_string(), 2)),
            Err(CartError::PriceTooLarge("p1".to_string()))
        );

        let mut heavy = line("p2", "10", 1);
        heavy.weight_kg = Some(dec("1000.01"));
        assert_eq!(
            cart.add(heavy),
            Err(CartError::WeightTooLarge("p2".to_string()))
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_line_total_reports_overflow() {
        let huge = CartLine {
            unit_price: Decimal::MAX,
            ..line("p1", "1", 2)
        };
        assert_eq!(huge.line_total(), None);
        assert_eq!(line("p1", "2.5", 4).line_total(), Some(dec("10")));
    }
}

use rust_decimal::Decimal;

/// Store-wide pricing rules applied to every order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderPricing {
    pub tax_rate: Decimal,
    /// Subtotal at or above which shipping is free
    pub free_shipping_threshold: Decimal,
    /// Shipping charged when there is no quote for the cart
    pub flat_shipping_rate: Decimal,
}

impl Default for OrderPricing {
    fn default() -> Self {
        Self {
            tax_rate: Decimal::new(6, 2),
            free_shipping_threshold: Decimal::ONE_HUNDRED,
            flat_shipping_rate: Decimal::TEN,
        }
    }
}

/// Payable breakdown for a cart, at full precision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
}

use rust_decimal::Decimal;

use crate::features::cart::models::{CartError, CartLine, OrderPricing, OrderTotals};
use crate::features::freight::models::ShippingQuote;

/// Compute the payable totals for a cart.
///
/// Shipping is free once the subtotal reaches the threshold; otherwise it is
/// the quote's total, or the flat rate when no quote is available. Pure, so
/// repeated calls on the same cart give the same result. Amounts that do not
/// fit a `Decimal` yield [`CartError::AmountOverflow`].
pub fn compute_totals(
    lines: &[CartLine],
    pricing: &OrderPricing,
    quote: Option<&ShippingQuote>,
) -> Result<OrderTotals, CartError> {
    let subtotal = lines.iter().try_fold(Decimal::ZERO, |acc, line| {
        line.line_total().and_then(|t| acc.checked_add(t))
    });
    let subtotal = subtotal.ok_or(CartError::AmountOverflow)?;
    let tax = subtotal
        .checked_mul(pricing.tax_rate)
        .ok_or(CartError::AmountOverflow)?;

    let shipping = if subtotal >= pricing.free_shipping_threshold {
        Decimal::ZERO
    } else {
        quote
            .map(|q| q.total)
            .unwrap_or(pricing.flat_shipping_rate)
    };

    let total = subtotal
        .checked_add(tax)
        .and_then(|t| t.checked_add(shipping))
        .ok_or(CartError::AmountOverflow)?;

    Ok(OrderTotals {
        subtotal,
        tax,
        shipping,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::freight::models::{ShippingMethod, Zone};
    use crate::shared::test_helpers::dec;

    fn line(price: &str, quantity: u32) -> CartLine {
        CartLine {
            product_id: format!("p-{}", price),
            name: None,
            unit_price: dec(price),
            quantity,
            weight_kg: None,
        }
    }

    fn quote_of(total: &str) -> ShippingQuote {
        ShippingQuote {
            zone: Zone::Local,
            method: ShippingMethod::Standard,
            base_rate: dec(total),
            weight_charge: Decimal::ZERO,
            method_multiplier: Decimal::ONE,
            insurance_fee: Decimal::ZERO,
            total: dec(total),
            delivery_time_label: "1-3 days".to_string(),
        }
    }

    #[test]
    fn test_below_threshold_uses_quote() {
        let lines = vec![line("40", 1), line("25", 2)];
        let quote = quote_of("7");

        let totals = compute_totals(&lines, &OrderPricing::default(), Some(&quote)).unwrap();

        assert_eq!(totals.subtotal, dec("90"));
        assert_eq!(totals.tax, dec("5.4"));
        assert_eq!(totals.shipping, dec("7"));
        assert_eq!(totals.total, dec("102.4"));
    }

    #[test]
    fn test_free_shipping_at_exact_threshold() {
        let lines = vec![line("100.00", 1)];
        let quote = quote_of("7");

        let totals = compute_totals(&lines, &OrderPricing::default(), Some(&quote)).unwrap();

        assert_eq!(totals.shipping, Decimal::ZERO);
        assert_eq!(totals.total, dec("106"));
    }

    #[test]
    fn test_just_below_threshold_pays_shipping() {
        let lines = vec![line("99.99", 1)];
        let quote = quote_of("7");

        let with_quote = compute_totals(&lines, &OrderPricing::default(), Some(&quote)).unwrap();
        assert_eq!(with_quote.shipping, dec("7"));

        let without_quote = compute_totals(&lines, &OrderPricing::default(), None).unwrap();
        assert_eq!(without_quote.shipping, dec("10"));
    }

    #[test]
    fn test_empty_cart_pays_flat_rate() {
        let totals = compute_totals(&[], &OrderPricing::default(), None).unwrap();

        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.tax, Decimal::ZERO);
        assert_eq!(totals.total, dec("10"));
    }

    #[test]
    fn test_idempotent() {
        let lines = vec![line("12.34", 3)];
        let pricing = OrderPricing::default();
        let first = compute_totals(&lines, &pricing, None).unwrap();
        let second = compute_totals(&lines, &pricing, None).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_single_item_over_threshold_ships_free() {
        let lines = vec![line("150", 1)];

        let totals = compute_totals(&lines, &OrderPricing::default(), None).unwrap();

        assert_eq!(totals.subtotal, dec("150"));
        assert_eq!(totals.tax, dec("9"));
        assert_eq!(totals.shipping, Decimal::ZERO);
        assert_eq!(totals.total, dec("159"));
    }

    #[test]
    fn test_overflowing_subtotal_is_an_error() {
        let lines = vec![CartLine {
            unit_price: Decimal::MAX,
            ..line("1", 2)
        }];

        let result = compute_totals(&lines, &OrderPricing::default(), None);

        assert_eq!(result, Err(CartError::AmountOverflow));
    }

    #[test]
    fn test_overflowing_total_is_an_error() {
        let lines = vec![CartLine {
            unit_price: Decimal::MAX,
            ..line("1", 1)
        }];

        let result = compute_totals(&lines, &OrderPricing::default(), None);

        assert_eq!(result, Err(CartError::AmountOverflow));
    }
}

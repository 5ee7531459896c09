use rust_decimal::{Decimal, RoundingStrategy};

/// Round a monetary amount to two decimal places for display.
///
/// Calculations keep full precision; this is applied only when a value leaves
/// the service (response DTOs, receipts, remote order records).
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount as "<currency> <amount>" with two decimals, e.g. "RM 22.50"
pub fn format_money(currency: &str, amount: Decimal) -> String {
    format!("{} {:.2}", currency, round_money(amount))
}

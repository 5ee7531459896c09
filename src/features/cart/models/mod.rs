mod cart;
mod totals;

pub use cart::{Cart, CartError, CartLine};
pub use totals::{OrderPricing, OrderTotals};

mod order;

pub use order::{generate_order_number, CheckoutRequest, Order};

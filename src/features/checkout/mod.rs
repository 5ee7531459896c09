//! Checkout: turns a cart, address and payment method into a charged order.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::CheckoutService;

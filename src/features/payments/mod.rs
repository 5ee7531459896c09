//! Payment methods, card checks and the payment gateway capability.

pub mod models;
pub mod services;

pub use services::{PaymentGateway, SimulatedGateway};

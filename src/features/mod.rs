pub mod auth;
pub mod cart;
pub mod checkout;
pub mod couriers;
pub mod freight;
pub mod payments;
pub mod shipments;

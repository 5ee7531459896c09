pub mod shipment_handler;

pub use shipment_handler::*;

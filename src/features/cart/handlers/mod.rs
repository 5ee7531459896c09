pub mod cart_handler;

pub use cart_handler::*;

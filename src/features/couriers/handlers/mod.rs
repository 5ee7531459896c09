pub mod courier_handler;

pub use courier_handler::*;

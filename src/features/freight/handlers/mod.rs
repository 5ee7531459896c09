pub mod freight_handler;
pub mod rate_admin_handler;

pub use freight_handler::*;
pub use rate_admin_handler::*;

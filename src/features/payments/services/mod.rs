pub mod card;
pub mod gateway;

pub use card::validate_card;
pub use gateway::{PaymentGateway, SimulatedGateway};

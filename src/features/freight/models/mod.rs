mod address;
mod error;
mod rate;
mod shipment;
mod zone;

pub use address::ShippingAddress;
pub use error::FreightError;
pub use rate::{default_rate_table, DeliveryTimes, RateEntry, RateRecord};
pub use shipment::{ShipmentRequest, ShippingMethod, ShippingOption, ShippingQuote};
pub use zone::Zone;

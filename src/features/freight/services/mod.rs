mod calculator;
mod freight_service;
mod policy;
mod rate_table_service;
mod shipping_options;
mod zone_resolver;

pub use calculator::quote;
pub use freight_service::FreightService;
pub use policy::ShippingPolicy;
pub use rate_table_service::{RateExport, RateSource, RateTableService, RateUpdate};
pub use shipping_options::{shipping_options, OptionsContext};
pub use zone_resolver::resolve_zone;

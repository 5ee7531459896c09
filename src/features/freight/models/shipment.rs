use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Zone;

/// Service-speed class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ShippingMethod {
    #[default]
    Standard,
    Express,
    Priority,
}

impl ShippingMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShippingMethod::Standard => "standard",
            ShippingMethod::Express => "express",
            ShippingMethod::Priority => "priority",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ShippingMethod::Standard => "Standard Shipping",
            ShippingMethod::Express => "Express Shipping",
            ShippingMethod::Priority => "Priority Shipping",
        }
    }
}

/// A validated request for a shipping quote. Country codes are already
/// normalized and the weight coerced by the boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct ShipmentRequest {
    pub origin_country: String,
    pub destination_country: String,
    pub weight_kg: Decimal,
    pub method: ShippingMethod,
    pub insured: bool,
    pub declared_value: Decimal,
}

/// Cost breakdown for one shipment. A snapshot: later rate edits do not
/// change an issued quote.
#[derive(Debug, Clone, PartialEq)]
pub struct ShippingQuote {
    pub zone: Zone,
    pub method: ShippingMethod,
    pub base_rate: Decimal,
    pub weight_charge: Decimal,
    pub method_multiplier: Decimal,
    pub insurance_fee: Decimal,
    pub total: Decimal,
    pub delivery_time_label: String,
}

impl ShippingQuote {
    /// Extra charged for express/priority over the standard price
    pub fn method_surcharge(&self) -> Decimal {
        self.total - self.insurance_fee - self.base_rate - self.weight_charge
    }
}

/// One selectable option on the checkout page
#[derive(Debug, Clone, PartialEq)]
pub struct ShippingOption {
    pub method: ShippingMethod,
    pub name: String,
    pub description: String,
    pub cost: Decimal,
    pub estimated_days: String,
    pub quote: ShippingQuote,
}

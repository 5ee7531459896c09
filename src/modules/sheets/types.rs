use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Freight settings for one zone as stored in the settings sheet.
///
/// Every field is optional: the sheet historically held only `baseRate` and
/// `ratePerKg`, and missing values keep whatever the rate table already has.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteRateSettings {
    pub base_rate: Option<Decimal>,
    #[serde(alias = "ratePerKg")]
    pub per_kg: Option<Decimal>,
    pub express_multiplier: Option<Decimal>,
    pub priority_multiplier: Option<Decimal>,
    pub delivery_time: Option<RemoteDeliveryTimes>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteDeliveryTimes {
    pub standard: Option<String>,
    pub express: Option<String>,
    pub priority: Option<String>,
}

/// Body of `POST /saveFreightSettings`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FreightSettingsPayload {
    /// Zone key
    #[serde(rename = "type")]
    pub zone_type: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub base_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub rate_per_kg: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub express_multiplier: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub priority_multiplier: Decimal,
    pub delivery_time: RemoteDeliveryTimesPayload,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RemoteDeliveryTimesPayload {
    pub standard: String,
    pub express: String,
    pub priority: String,
}

/// Order row appended to the orders sheet after checkout
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub order_number: String,
    pub items: Vec<OrderRecordLine>,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub shipping: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub shipping_method: String,
    pub destination_country: String,
    pub shipping_address: String,
    pub payment_method: String,
    pub payment_status: String,
    pub payment_reference: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecordLine {
    pub product_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
}

/// Shipment row appended to the shipments sheet when a parcel is booked
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentRecord {
    pub tracking_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,
    pub courier: String,
    pub origin_country: String,
    pub destination_country: String,
    pub destination: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub weight_kg: Decimal,
    pub shipping_method: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub cost: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Envelope for Apps Script `doPost` actions
#[derive(Debug, Serialize)]
pub(super) struct ActionEnvelope<'a, T: Serialize> {
    pub action: &'a str,
    pub data: &'a T,
}

/// Acknowledgement returned by write endpoints
#[derive(Debug, Deserialize)]
pub(super) struct WriteAck {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

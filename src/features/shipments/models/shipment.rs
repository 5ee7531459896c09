use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::core::error::AppError;
use crate::features::couriers::models::CourierQuote;
use crate::features::freight::models::ShippingMethod;
use crate::modules::sheets::ShipmentRecord;
use crate::shared::constants::TRACKING_NUMBER_PREFIX;
use crate::shared::money::round_money;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShipmentError {
    #[error("No tracking information found for {0}")]
    NotFound(String),

    /// Status change that does not move the shipment forward
    #[error("{0}")]
    Conflict(String),
}

impl From<ShipmentError> for AppError {
    fn from(err: ShipmentError) -> Self {
        match err {
            ShipmentError::NotFound(_) => AppError::NotFound(err.to_string()),
            ShipmentError::Conflict(msg) => AppError::Conflict(msg),
        }
    }
}

/// Where a parcel is, in delivery order
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentStatus {
    Processing,
    InTransit,
    OutForDelivery,
    Delivered,
}

impl ShipmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShipmentStatus::Processing => "processing",
            ShipmentStatus::InTransit => "in_transit",
            ShipmentStatus::OutForDelivery => "out_for_delivery",
            ShipmentStatus::Delivered => "delivered",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ShipmentStatus::Processing => "Package received at origin facility",
            ShipmentStatus::InTransit => "Package in transit",
            ShipmentStatus::OutForDelivery => "Out for delivery",
            ShipmentStatus::Delivered => "Delivered successfully",
        }
    }

    /// Location recorded when an update does not name one
    pub fn default_location(&self) -> &'static str {
        match self {
            ShipmentStatus::Processing => "Kuala Lumpur Hub",
            ShipmentStatus::InTransit => "In Transit",
            ShipmentStatus::OutForDelivery => "Local Delivery Center",
            ShipmentStatus::Delivered => "Customer Location",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackingEvent {
    pub status: ShipmentStatus,
    pub description: String,
    pub location: String,
    pub timestamp: DateTime<Utc>,
}

impl TrackingEvent {
    pub fn new(status: ShipmentStatus, location: Option<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            status,
            description: status.description().to_string(),
            location: location.unwrap_or_else(|| status.default_location().to_string()),
            timestamp,
        }
    }
}

/// A parcel booked with a courier
#[derive(Debug, Clone, PartialEq)]
pub struct NewShipment {
    pub order_number: Option<String>,
    pub courier_id: u32,
    pub destination_country: String,
    /// Free-form destination, e.g. "Singapore" or "Tokyo, Japan"
    pub destination: String,
    pub weight_kg: Decimal,
    pub method: ShippingMethod,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shipment {
    pub tracking_number: String,
    pub order_number: Option<String>,
    pub courier: CourierQuote,
    pub origin_country: String,
    pub destination_country: String,
    pub destination: String,
    pub weight_kg: Decimal,
    pub method: ShippingMethod,
    pub delivery_time_label: String,
    /// Oldest first; never empty
    pub events: Vec<TrackingEvent>,
    pub created_at: DateTime<Utc>,
}

impl Shipment {
    pub fn status(&self) -> ShipmentStatus {
        self.events
            .last()
            .map(|e| e.status)
            .unwrap_or(ShipmentStatus::Processing)
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.events
            .last()
            .map(|e| e.timestamp)
            .unwrap_or(self.created_at)
    }

    pub fn to_record(&self) -> ShipmentRecord {
        ShipmentRecord {
            tracking_number: self.tracking_number.clone(),
            order_number: self.order_number.clone(),
            courier: self.courier.courier_name.clone(),
            origin_country: self.origin_country.clone(),
            destination_country: self.destination_country.clone(),
            destination: self.destination.clone(),
            weight_kg: self.weight_kg,
            shipping_method: self.method.as_str().to_string(),
            cost: round_money(self.courier.total),
            status: self.status().as_str().to_string(),
            created_at: self.created_at,
        }
    }
}

/// Tracking number of the form `GM-<year>-<6-digit sequence>`
pub fn format_tracking_number(year: i32, sequence: u64) -> String {
    format!("{}{}-{:06}", TRACKING_NUMBER_PREFIX, year, sequence)
}

/// Trim and upper-case a tracking number typed by a customer
pub fn normalize_tracking_number(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::freight::models::Zone;
    use crate::shared::test_helpers::dec;
    use chrono::TimeZone;

    fn shipment() -> Shipment {
        let created_at = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
        Shipment {
            tracking_number: "GM-2026-000007".to_string(),
            order_number: Some("ORD-1-2".to_string()),
            courier: CourierQuote {
                courier_id: 1,
                courier_name: "Pos Malaysia".to_string(),
                zone: Zone::Local,
                base_rate: dec("6"),
                weight_charge: dec("3.333"),
                total: dec("9.333"),
                tracking_url: None,
            },
            origin_country: "MY".to_string(),
            destination_country: "MY".to_string(),
            destination: "Penang".to_string(),
            weight_kg: dec("2.222"),
            method: ShippingMethod::Standard,
            delivery_time_label: "1-3 days".to_string(),
            events: vec![TrackingEvent::new(
                ShipmentStatus::Processing,
                None,
                created_at,
            )],
            created_at,
        }
    }

    #[test]
    fn test_tracking_number_format() {
        assert_eq!(format_tracking_number(2026, 42), "GM-2026-000042");
        assert_eq!(format_tracking_number(2026, 1_234_567), "GM-2026-1234567");
        assert_eq!(normalize_tracking_number(" gm-2026-000042 "), "GM-2026-000042");
    }

    #[test]
    fn test_status_follows_delivery_order() {
        assert!(ShipmentStatus::Processing < ShipmentStatus::InTransit);
        assert!(ShipmentStatus::InTransit < ShipmentStatus::OutForDelivery);
        assert!(ShipmentStatus::OutForDelivery < ShipmentStatus::Delivered);
    }

    #[test]
    fn test_event_defaults_location() {
        let now = Utc::now();
        let event = TrackingEvent::new(ShipmentStatus::OutForDelivery, None, now);
        assert_eq!(event.location, "Local Delivery Center");
        assert_eq!(event.description, "Out for delivery");

        let event = TrackingEvent::new(ShipmentStatus::InTransit, Some("Johor Bahru".into()), now);
        assert_eq!(event.location, "Johor Bahru");
    }

    #[test]
    fn test_status_is_latest_event() {
        let mut shipment = shipment();
        assert_eq!(shipment.status(), ShipmentStatus::Processing);
        assert_eq!(shipment.updated_at(), shipment.created_at);

        let later = shipment.created_at + chrono::Duration::hours(3);
        shipment
            .events
            .push(TrackingEvent::new(ShipmentStatus::InTransit, None, later));
        assert_eq!(shipment.status(), ShipmentStatus::InTransit);
        assert_eq!(shipment.updated_at(), later);
    }

    #[test]
    fn test_record_rounds_cost() {
        let record = shipment().to_record();
        assert_eq!(record.cost, dec("9.33"));
        assert_eq!(record.courier, "Pos Malaysia");
        assert_eq!(record.status, "processing");
        assert_eq!(record.shipping_method, "standard");
    }
}

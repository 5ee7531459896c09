use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::couriers::dtos::CourierQuoteDto;
use crate::features::freight::dtos::lenient_decimal;
use crate::features::freight::models::ShippingMethod;
use crate::features::shipments::models::{NewShipment, Shipment, ShipmentStatus, TrackingEvent};
use crate::shared::constants::{DEFAULT_RECENT_SHIPMENTS, DEFAULT_SHIPMENT_WEIGHT_KG};
use crate::shared::validation::normalize_country_code;

/// Book a parcel with a courier
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateShipmentDto {
    #[validate(length(max = 64))]
    pub order_number: Option<String>,
    pub courier_id: u32,
    #[validate(length(min = 1, message = "destinationCountry is required"))]
    pub destination_country: String,
    #[validate(length(min = 1, max = 200, message = "destination must be 1-200 characters"))]
    pub destination: String,
    /// Missing, zero or unparseable weights are billed as 1 kg
    #[serde(default, deserialize_with = "lenient_decimal")]
    #[schema(value_type = Option<f64>, example = 2.5)]
    pub weight_kg: Option<Decimal>,
    #[serde(default)]
    pub method: ShippingMethod,
}

impl CreateShipmentDto {
    pub fn into_new_shipment(self) -> NewShipment {
        let weight_kg = match self.weight_kg {
            Some(w) if !w.is_zero() => w,
            _ => DEFAULT_SHIPMENT_WEIGHT_KG,
        };

        NewShipment {
            order_number: self
                .order_number
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            courier_id: self.courier_id,
            destination_country: normalize_country_code(&self.destination_country),
            destination: self.destination.trim().to_string(),
            weight_kg,
            method: self.method,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShipmentStatusDto {
    pub status: ShipmentStatus,
    /// Defaults to the usual location for the status
    #[validate(length(max = 200))]
    pub location: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct RecentShipmentsQuery {
    /// Number of shipments to return, newest first (1-100, default 20)
    pub limit: Option<usize>,
}

impl RecentShipmentsQuery {
    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_RECENT_SHIPMENTS)
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrackingEventDto {
    pub status: ShipmentStatus,
    pub description: String,
    pub location: String,
    pub timestamp: DateTime<Utc>,
}

impl From<&TrackingEvent> for TrackingEventDto {
    fn from(event: &TrackingEvent) -> Self {
        Self {
            status: event.status,
            description: event.description.clone(),
            location: event.location.clone(),
            timestamp: event.timestamp,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentResponseDto {
    pub tracking_number: String,
    pub order_number: Option<String>,
    pub status: ShipmentStatus,
    pub courier: CourierQuoteDto,
    pub origin_country: String,
    pub destination_country: String,
    pub destination: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub weight_kg: Decimal,
    pub method: ShippingMethod,
    pub estimated_delivery: String,
    /// Oldest first
    pub events: Vec<TrackingEventDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ShipmentResponseDto {
    pub fn from_shipment(shipment: &Shipment, currency: &str) -> Self {
        Self {
            tracking_number: shipment.tracking_number.clone(),
            order_number: shipment.order_number.clone(),
            status: shipment.status(),
            courier: CourierQuoteDto::from_quote(&shipment.courier, currency),
            origin_country: shipment.origin_country.clone(),
            destination_country: shipment.destination_country.clone(),
            destination: shipment.destination.clone(),
            weight_kg: shipment.weight_kg,
            method: shipment.method,
            estimated_delivery: shipment.delivery_time_label.clone(),
            events: shipment.events.iter().map(Into::into).collect(),
            created_at: shipment.created_at,
            updated_at: shipment.updated_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentCreatedDto {
    pub shipment: ShipmentResponseDto,
    /// Whether the shipment sheet accepted the record
    pub recorded: bool,
}

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::freight::models::{
    ShipmentRequest, ShippingMethod, ShippingOption, ShippingQuote,
};
use crate::shared::constants::{DEFAULT_DECLARED_VALUE, DEFAULT_SHIPMENT_WEIGHT_KG};
use crate::shared::money::{format_money, round_money};
use crate::shared::validation::normalize_country_code;

/// Query params for zone lookup
#[derive(Debug, Deserialize, IntoParams)]
pub struct ZoneQuery {
    /// Origin country code, defaults to the store's country
    pub origin: Option<String>,
    /// Destination country code
    pub destination: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ZoneResponseDto {
    pub origin: String,
    pub destination: String,
    pub zone: String,
}

/// Request DTO for the shipping calculator.
///
/// Numeric fields accept numbers or numeric strings. A missing, zero or
/// unparseable weight is billed as 1 kg; a missing or unparseable declared
/// value counts as 100.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequestDto {
    /// Defaults to the store's country
    pub origin_country: Option<String>,
    #[validate(length(min = 1, message = "destinationCountry is required"))]
    pub destination_country: String,
    #[serde(default, deserialize_with = "lenient_decimal")]
    #[schema(value_type = Option<f64>, example = 2.5)]
    pub weight_kg: Option<Decimal>,
    #[serde(default)]
    pub method: ShippingMethod,
    #[serde(default)]
    pub insured: bool,
    #[serde(default, deserialize_with = "lenient_decimal")]
    #[schema(value_type = Option<f64>, example = 100)]
    pub declared_value: Option<Decimal>,
}

impl QuoteRequestDto {
    pub fn into_request(self, store_origin: &str) -> ShipmentRequest {
        let origin_country = self
            .origin_country
            .as_deref()
            .map(normalize_country_code)
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| store_origin.to_string());

        let weight_kg = match self.weight_kg {
            Some(w) if !w.is_zero() => w,
            _ => DEFAULT_SHIPMENT_WEIGHT_KG,
        };

        ShipmentRequest {
            origin_country,
            destination_country: normalize_country_code(&self.destination_country),
            weight_kg,
            method: self.method,
            insured: self.insured,
            declared_value: self.declared_value.unwrap_or(DEFAULT_DECLARED_VALUE),
        }
    }
}

/// Accept a JSON number or numeric string; anything else reads as absent
pub fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .ok(),
        Some(serde_json::Value::String(s)) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    })
}

/// Shipping quote breakdown, rounded to cents
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponseDto {
    pub zone: String,
    pub method: ShippingMethod,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub base_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub weight_charge: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub method_multiplier: Decimal,
    /// Extra charged for express/priority over standard
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub method_surcharge: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub insurance_fee: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total: Decimal,
    /// Total formatted for display, e.g. "RM 22.50"
    pub formatted_total: String,
    pub delivery_time: String,
}

impl QuoteResponseDto {
    pub fn from_quote(quote: &ShippingQuote, currency: &str) -> Self {
        Self {
            zone: quote.zone.key().to_string(),
            method: quote.method,
            base_rate: round_money(quote.base_rate),
            weight_charge: round_money(quote.weight_charge),
            method_multiplier: quote.method_multiplier,
            method_surcharge: round_money(quote.method_surcharge()),
            insurance_fee: round_money(quote.insurance_fee),
            total: round_money(quote.total),
            formatted_total: format_money(currency, quote.total),
            delivery_time: quote.delivery_time_label.clone(),
        }
    }
}

/// One selectable shipping option
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShippingOptionDto {
    /// Option id, same as the shipping method
    pub id: ShippingMethod,
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub cost: Decimal,
    pub estimated_days: String,
    pub zone: String,
}

impl From<&ShippingOption> for ShippingOptionDto {
    fn from(option: &ShippingOption) -> Self {
        Self {
            id: option.method,
            name: option.name.clone(),
            description: option.description.clone(),
            cost: round_money(option.cost),
            estimated_days: option.estimated_days.clone(),
            zone: option.quote.zone.key().to_string(),
        }
    }
}

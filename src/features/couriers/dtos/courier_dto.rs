use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::couriers::models::{
    Courier, CourierError, CourierProfile, CourierQuote, CourierRate, CourierStatus,
};
use crate::features::freight::dtos::lenient_decimal;
use crate::features::freight::models::Zone;
use crate::shared::constants::DEFAULT_SHIPMENT_WEIGHT_KG;
use crate::shared::money::{format_money, round_money};

/// Zone rate as sent by the admin panel
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourierRateInputDto {
    #[serde(alias = "baseRate")]
    #[schema(value_type = f64, example = 6.0)]
    pub base: Decimal,
    #[serde(alias = "ratePerKg")]
    #[schema(value_type = f64, example = 1.5)]
    pub per_kg: Decimal,
}

/// Create or replace a courier
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourierRequestDto {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[validate(length(max = 100))]
    pub logo: Option<String>,
    #[serde(default, alias = "serviceType")]
    pub service_types: Vec<String>,
    #[serde(default)]
    pub coverage: Vec<String>,
    #[validate(length(max = 500))]
    pub tracking_url: Option<String>,
    #[serde(default)]
    pub status: CourierStatus,
    /// Rates keyed by zone. When omitted an update keeps the current rates
    /// and a new courier starts with local at 5.00 + 2.00/kg.
    pub rates: Option<HashMap<String, CourierRateInputDto>>,
}

impl CourierRequestDto {
    pub fn into_profile(
        self,
        current: Option<&CourierProfile>,
    ) -> Result<CourierProfile, CourierError> {
        let rates = match self.rates {
            Some(rates) => rates
                .into_iter()
                .map(|(key, rate)| {
                    let zone =
                        Zone::parse(&key).map_err(|e| CourierError::Validation(e.to_string()))?;
                    Ok((zone, CourierRate::new(rate.base, rate.per_kg)))
                })
                .collect::<Result<HashMap<_, _>, CourierError>>()?,
            None => match current {
                Some(profile) => profile.rates.clone(),
                None => [CourierRate::starter()].into_iter().collect(),
            },
        };

        Ok(CourierProfile {
            name: self.name.trim().to_string(),
            logo: non_blank(self.logo),
            service_types: trimmed(self.service_types),
            coverage: trimmed(self.coverage),
            tracking_url: non_blank(self.tracking_url),
            status: self.status,
            rates,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn trimmed(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .filter_map(|v| non_blank(Some(v)))
        .collect()
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourierRateDto {
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub base: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub per_kg: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourierResponseDto {
    pub id: u32,
    pub name: String,
    pub logo: Option<String>,
    pub service_types: Vec<String>,
    pub coverage: Vec<String>,
    pub tracking_url: Option<String>,
    pub status: CourierStatus,
    /// Rates keyed by zone
    pub rates: BTreeMap<String, CourierRateDto>,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<String>,
}

impl From<Courier> for CourierResponseDto {
    fn from(courier: Courier) -> Self {
        let profile = courier.profile;
        let rates = profile
            .rates
            .into_iter()
            .map(|(zone, rate)| {
                let dto = CourierRateDto {
                    base: rate.base,
                    per_kg: rate.per_kg,
                };
                (zone.key().to_string(), dto)
            })
            .collect();

        Self {
            id: courier.id,
            name: profile.name,
            logo: profile.logo,
            service_types: profile.service_types,
            coverage: profile.coverage,
            tracking_url: profile.tracking_url,
            status: profile.status,
            rates,
            updated_at: courier.updated_at,
            updated_by: courier.updated_by,
        }
    }
}

/// Shipment to compare courier prices for
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourierQuoteRequestDto {
    /// Defaults to the store's country
    pub origin_country: Option<String>,
    #[validate(length(min = 1, message = "destinationCountry is required"))]
    pub destination_country: String,
    /// Missing, zero or unparseable weights are billed as 1 kg
    #[serde(default, deserialize_with = "lenient_decimal")]
    #[schema(value_type = Option<f64>, example = 2.5)]
    pub weight_kg: Option<Decimal>,
}

impl CourierQuoteRequestDto {
    pub fn weight(&self) -> Decimal {
        match self.weight_kg {
            Some(w) if !w.is_zero() => w,
            _ => DEFAULT_SHIPMENT_WEIGHT_KG,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourierQuoteDto {
    pub courier_id: u32,
    pub courier_name: String,
    pub zone: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub base_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub weight_charge: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total: Decimal,
    pub formatted_total: String,
    pub tracking_url: Option<String>,
}

impl CourierQuoteDto {
    pub fn from_quote(quote: &CourierQuote, currency: &str) -> Self {
        Self {
            courier_id: quote.courier_id,
            courier_name: quote.courier_name.clone(),
            zone: quote.zone.key().to_string(),
            base_rate: round_money(quote.base_rate),
            weight_charge: round_money(quote.weight_charge),
            total: round_money(quote.total),
            formatted_total: format_money(currency, quote.total),
            tracking_url: quote.tracking_url.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourierQuotesResponseDto {
    pub origin_country: String,
    pub destination_country: String,
    pub zone: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub weight_kg: Decimal,
    /// Cheapest first; empty when no active courier delivers to the zone
    pub quotes: Vec<CourierQuoteDto>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::dec;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> CourierRequestDto {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_new_courier_without_rates_gets_starter_rate() {
        let dto = parse(json!({
            "name": "  J&T Express ",
            "serviceType": ["Local", " "],
            "trackingUrl": ""
        }));

        let profile = dto.into_profile(None).unwrap();

        assert_eq!(profile.name, "J&T Express");
        assert_eq!(profile.service_types, vec!["Local"]);
        assert_eq!(profile.tracking_url, None);
        assert_eq!(profile.status, CourierStatus::Active);
        assert_eq!(
            profile.rates[&Zone::Local],
            CourierRate::new(dec("5"), dec("2"))
        );
    }

    #[test]
    fn test_update_without_rates_keeps_current() {
        let current = parse(json!({
            "name": "City-Link",
            "rates": { "intl": { "baseRate": 40, "ratePerKg": 7 } }
        }))
        .into_profile(None)
        .unwrap();

        let profile = parse(json!({ "name": "City-Link", "status": "inactive" }))
            .into_profile(Some(&current))
            .unwrap();

        assert_eq!(profile.status, CourierStatus::Inactive);
        assert_eq!(
            profile.rates[&Zone::International],
            CourierRate::new(dec("40"), dec("7"))
        );
    }

    #[test]
    fn test_bad_zone_key_is_rejected() {
        let dto = parse(json!({
            "name": "City-Link",
            "rates": { "zone-9": { "base": 1, "perKg": 1 } }
        }));

        assert!(matches!(
            dto.into_profile(None),
            Err(CourierError::Validation(_))
        ));
    }

    #[test]
    fn test_quote_request_weight_defaults() {
        let dto: CourierQuoteRequestDto =
            serde_json::from_value(json!({ "destinationCountry": "MY", "weightKg": "0" })).unwrap();
        assert_eq!(dto.weight(), dec("1"));

        let dto: CourierQuoteRequestDto =
            serde_json::from_value(json!({ "destinationCountry": "MY", "weightKg": 3.5 })).unwrap();
        assert_eq!(dto.weight(), dec("3.5"));
    }
}

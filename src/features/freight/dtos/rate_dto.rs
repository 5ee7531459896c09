use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::freight::models::{DeliveryTimes, RateEntry, RateRecord};
use crate::features::freight::services::{RateExport, RateSource, RateUpdate};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct DeliveryTimesDto {
    #[validate(length(min = 1, max = 50, message = "standard delivery time is required"))]
    pub standard: String,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub express: String,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub priority: String,
}

impl From<DeliveryTimes> for DeliveryTimesDto {
    fn from(times: DeliveryTimes) -> Self {
        Self {
            standard: times.standard,
            express: times.express,
            priority: times.priority,
        }
    }
}

impl From<DeliveryTimesDto> for DeliveryTimes {
    fn from(dto: DeliveryTimesDto) -> Self {
        Self {
            standard: dto.standard,
            express: dto.express,
            priority: dto.priority,
        }
    }
}

/// Rate entry fields as exported for backup
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RateEntryDto {
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub base_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub per_kg: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub express_multiplier: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub priority_multiplier: Decimal,
    pub delivery_time: DeliveryTimesDto,
}

impl From<RateEntry> for RateEntryDto {
    fn from(entry: RateEntry) -> Self {
        Self {
            base_rate: entry.base_rate,
            per_kg: entry.per_kg,
            express_multiplier: entry.express_multiplier,
            priority_multiplier: entry.priority_multiplier,
            delivery_time: entry.delivery_time.into(),
        }
    }
}

/// Response DTO for a zone's rate entry
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RateResponseDto {
    pub zone: String,
    pub built_in: bool,
    #[serde(flatten)]
    pub rate: RateEntryDto,
    /// Pass back as `expectedVersion` to update this entry safely
    pub version: u64,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<String>,
}

impl From<RateRecord> for RateResponseDto {
    fn from(record: RateRecord) -> Self {
        Self {
            zone: record.zone.key().to_string(),
            built_in: record.zone.is_built_in(),
            rate: record.entry.into(),
            version: record.version,
            updated_at: record.updated_at,
            updated_by: record.updated_by,
        }
    }
}

/// Request DTO for replacing a zone's rate entry
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRateDto {
    #[schema(value_type = f64, example = 5.0)]
    pub base_rate: Decimal,
    #[serde(alias = "ratePerKg")]
    #[schema(value_type = f64, example = 2.0)]
    pub per_kg: Decimal,
    #[schema(value_type = f64, example = 1.5)]
    pub express_multiplier: Decimal,
    #[schema(value_type = f64, example = 2.0)]
    pub priority_multiplier: Decimal,
    /// Keeps the current labels when omitted
    #[validate(nested)]
    pub delivery_time: Option<DeliveryTimesDto>,
    /// Version the edit was based on; stale writes are rejected
    pub expected_version: Option<u64>,
}

impl UpdateRateDto {
    /// Build the new entry, taking delivery times from `current` when omitted
    pub fn into_entry(self, current: &RateEntry) -> RateEntry {
        RateEntry {
            base_rate: self.base_rate,
            per_kg: self.per_kg,
            express_multiplier: self.express_multiplier,
            priority_multiplier: self.priority_multiplier,
            delivery_time: self
                .delivery_time
                .map(DeliveryTimes::from)
                .unwrap_or_else(|| current.delivery_time.clone()),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRateResponseDto {
    pub rate: RateResponseDto,
    /// Whether the settings sheet stored the new entry
    pub persisted: bool,
}

impl From<RateUpdate> for UpdateRateResponseDto {
    fn from(update: RateUpdate) -> Self {
        Self {
            rate: update.record.into(),
            persisted: update.persisted,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RateReloadResponseDto {
    /// "remote" when the settings sheet answered, otherwise "local"
    pub source: String,
    pub zones_loaded: usize,
    pub rates: Vec<RateResponseDto>,
}

impl RateReloadResponseDto {
    pub fn new(source: RateSource, rates: Vec<RateRecord>) -> Self {
        let (source, zones_loaded) = match source {
            RateSource::Remote(count) => ("remote", count),
            RateSource::Local => ("local", 0),
        };
        Self {
            source: source.to_string(),
            zones_loaded,
            rates: rates.into_iter().map(RateResponseDto::from).collect(),
        }
    }
}

/// Freight data backup
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RateExportDto {
    pub shipping_rates: BTreeMap<String, RateEntryDto>,
    pub timestamp: DateTime<Utc>,
}

impl From<RateExport> for RateExportDto {
    fn from(export: RateExport) -> Self {
        Self {
            shipping_rates: export
                .shipping_rates
                .into_iter()
                .map(|r| (r.zone.key().to_string(), r.entry.into()))
                .collect(),
            timestamp: export.timestamp,
        }
    }
}

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::core::error::{AppError, VALIDATION_SEPARATOR};
use crate::features::freight::models::Zone;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CourierError {
    #[error("{0}")]
    Validation(String),

    #[error("Courier {0} not found")]
    NotFound(u32),

    /// Another courier already uses the name
    #[error("{0}")]
    Conflict(String),
}

impl From<CourierError> for AppError {
    fn from(err: CourierError) -> Self {
        match err {
            CourierError::Validation(msg) => AppError::Validation(msg),
            CourierError::NotFound(_) => AppError::NotFound(err.to_string()),
            CourierError::Conflict(msg) => AppError::Conflict(msg),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CourierStatus {
    #[default]
    Active,
    Inactive,
}

/// A courier's price for one zone: `base + weightKg * perKg`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourierRate {
    pub base: Decimal,
    pub per_kg: Decimal,
}

impl CourierRate {
    pub fn new(base: Decimal, per_kg: Decimal) -> Self {
        Self { base, per_kg }
    }

    /// Rate given to a new courier registered without any
    pub fn starter() -> (Zone, Self) {
        (Zone::Local, Self::new(Decimal::from(5), Decimal::from(2)))
    }
}

/// The admin-editable part of a courier
#[derive(Debug, Clone, PartialEq)]
pub struct CourierProfile {
    pub name: String,
    /// Icon name shown in the admin panel
    pub logo: Option<String>,
    pub service_types: Vec<String>,
    pub coverage: Vec<String>,
    pub tracking_url: Option<String>,
    pub status: CourierStatus,
    pub rates: HashMap<Zone, CourierRate>,
}

impl CourierProfile {
    /// Check every field and report all problems at once
    pub fn validate(&self) -> Result<(), CourierError> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push("Courier name is required".to_string());
        }

        if let Some(url) = &self.tracking_url {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                errors.push("Tracking URL must start with http:// or https://".to_string());
            }
        }

        if self.rates.is_empty() {
            errors.push("At least one zone rate is required".to_string());
        }

        let mut zones: Vec<&Zone> = self.rates.keys().collect();
        zones.sort_by_key(|z| z.key());
        for zone in zones {
            let rate = &self.rates[zone];
            if rate.base < Decimal::ZERO || rate.per_kg < Decimal::ZERO {
                errors.push(format!("Rates for zone '{}' must not be negative", zone));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(CourierError::Validation(errors.join(VALIDATION_SEPARATOR)))
        }
    }
}

/// A courier partner in the registry
#[derive(Debug, Clone, PartialEq)]
pub struct Courier {
    pub id: u32,
    pub profile: CourierProfile,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<String>,
}

impl Courier {
    pub fn name(&self) -> &str {
        &self.profile.name
    }

    pub fn is_active(&self) -> bool {
        self.profile.status == CourierStatus::Active
    }

    pub fn rate_for(&self, zone: &Zone) -> Option<&CourierRate> {
        self.profile.rates.get(zone)
    }
}

/// Price a courier charges for one shipment
#[derive(Debug, Clone, PartialEq)]
pub struct CourierQuote {
    pub courier_id: u32,
    pub courier_name: String,
    pub zone: Zone,
    pub base_rate: Decimal,
    pub weight_charge: Decimal,
    pub total: Decimal,
    pub tracking_url: Option<String>,
}

/// Courier partners the registry starts with
pub fn default_couriers() -> Vec<CourierProfile> {
    fn profile(
        name: &str,
        logo: &str,
        service_types: &[&str],
        coverage: &[&str],
        tracking_url: &str,
        rates: Vec<(Zone, CourierRate)>,
    ) -> CourierProfile {
        CourierProfile {
            name: name.to_string(),
            logo: Some(logo.to_string()),
            service_types: service_types.iter().map(|s| s.to_string()).collect(),
            coverage: coverage.iter().map(|s| s.to_string()).collect(),
            tracking_url: Some(tracking_url.to_string()),
            status: CourierStatus::Active,
            rates: rates.into_iter().collect(),
        }
    }

    let rate = |base: i64, per_kg: i64| CourierRate::new(Decimal::new(base, 2), Decimal::new(per_kg, 2));

    vec![
        profile(
            "Pos Malaysia",
            "fas fa-mail-bulk",
            &["Local", "International"],
            &["Malaysia", "Worldwide"],
            "https://www.pos.com.my/tracking",
            vec![
                (Zone::Local, rate(600, 150)),
                (Zone::International, rate(4500, 800)),
            ],
        ),
        profile(
            "DHL Express",
            "fas fa-shipping-fast",
            &["Express", "International"],
            &["Worldwide"],
            "https://www.dhl.com/tracking",
            vec![(Zone::International, rate(6000, 1200))],
        ),
        profile(
            "Ninja Van",
            "fas fa-truck",
            &["Local", "Express"],
            &["Malaysia", "Singapore", "Indonesia"],
            "https://www.ninjavan.co/tracking",
            vec![(Zone::Local, rate(550, 180))],
        ),
        profile(
            "Lalamove",
            "fas fa-motorcycle",
            &["Same Day", "Local"],
            &["Malaysia"],
            "https://www.lalamove.com/tracking",
            vec![(Zone::Local, rate(800, 250))],
        ),
    ]
}

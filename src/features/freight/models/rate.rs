use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{FreightError, ShippingMethod, Zone};
use crate::core::error::VALIDATION_SEPARATOR;

/// Delivery-time labels shown for each shipping method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryTimes {
    pub standard: String,
    pub express: String,
    pub priority: String,
}

impl DeliveryTimes {
    /// Label for a method, falling back to the standard label when blank
    pub fn label_for(&self, method: ShippingMethod) -> &str {
        let label = match method {
            ShippingMethod::Standard => &self.standard,
            ShippingMethod::Express => &self.express,
            ShippingMethod::Priority => &self.priority,
        };
        if label.trim().is_empty() {
            &self.standard
        } else {
            label
        }
    }
}

/// Pricing parameters for one shipping zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateEntry {
    pub base_rate: Decimal,
    pub per_kg: Decimal,
    pub express_multiplier: Decimal,
    pub priority_multiplier: Decimal,
    pub delivery_time: DeliveryTimes,
}

impl RateEntry {
    /// Check the admin-editable invariants: non-negative charges and
    /// multipliers of at least 1.
    pub fn validate(&self) -> Result<(), FreightError> {
        let mut errors = Vec::new();

        if self.base_rate < Decimal::ZERO {
            errors.push("baseRate must not be negative");
        }
        if self.per_kg < Decimal::ZERO {
            errors.push("perKg must not be negative");
        }
        if self.express_multiplier < Decimal::ONE {
            errors.push("expressMultiplier must be at least 1");
        }
        if self.priority_multiplier < Decimal::ONE {
            errors.push("priorityMultiplier must be at least 1");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(FreightError::Validation(errors.join(VALIDATION_SEPARATOR)))
        }
    }

    pub fn multiplier_for(&self, method: ShippingMethod) -> Decimal {
        match method {
            ShippingMethod::Standard => Decimal::ONE,
            ShippingMethod::Express => self.express_multiplier,
            ShippingMethod::Priority => self.priority_multiplier,
        }
    }

    /// Built-in defaults for a zone. Custom zones start from the admin
    /// panel's "new zone" template.
    pub fn default_for(zone: &Zone) -> Self {
        match zone {
            Zone::Local => Self::new(
                Decimal::new(500, 2),
                Decimal::new(200, 2),
                Decimal::new(15, 1),
                Decimal::new(20, 1),
                ["1-3 days", "1-2 days", "Same day"],
            ),
            Zone::Asean => Self::new(
                Decimal::new(2500, 2),
                Decimal::new(500, 2),
                Decimal::new(18, 1),
                Decimal::new(25, 1),
                ["3-7 days", "2-4 days", "1-2 days"],
            ),
            Zone::International => Self::new(
                Decimal::new(5000, 2),
                Decimal::new(1000, 2),
                Decimal::new(20, 1),
                Decimal::new(30, 1),
                ["7-14 days", "3-7 days", "2-4 days"],
            ),
            Zone::Custom(_) => Self::new(
                Decimal::ZERO,
                Decimal::ZERO,
                Decimal::new(15, 1),
                Decimal::new(20, 1),
                ["1-3 days", "1-2 days", "Same day"],
            ),
        }
    }

    fn new(
        base_rate: Decimal,
        per_kg: Decimal,
        express_multiplier: Decimal,
        priority_multiplier: Decimal,
        [standard, express, priority]: [&str; 3],
    ) -> Self {
        Self {
            base_rate,
            per_kg,
            express_multiplier,
            priority_multiplier,
            delivery_time: DeliveryTimes {
                standard: standard.to_string(),
                express: express.to_string(),
                priority: priority.to_string(),
            },
        }
    }
}

/// The hardcoded table used at startup and whenever remote settings are unavailable
pub fn default_rate_table() -> Vec<(Zone, RateEntry)> {
    Zone::BUILT_IN
        .into_iter()
        .map(|zone| {
            let entry = RateEntry::default_for(&zone);
            (zone, entry)
        })
        .collect()
}

/// A rate entry as held by the rate table, with write bookkeeping
#[derive(Debug, Clone)]
pub struct RateRecord {
    pub zone: Zone,
    pub entry: RateEntry,
    /// Starts at 1 and increases with every write
    pub version: u64,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<String>,
}

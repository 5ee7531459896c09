use std::fmt;

use super::FreightError;
use crate::shared::validation::ZONE_KEY_REGEX;

/// Shipping-distance tier that selects a rate entry.
///
/// The three built-in tiers are always present in the rate table; admins may
/// register additional custom zones by key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Zone {
    Local,
    Asean,
    International,
    Custom(String),
}

impl Zone {
    pub const BUILT_IN: [Zone; 3] = [Zone::Local, Zone::Asean, Zone::International];

    pub fn key(&self) -> &str {
        match self {
            Zone::Local => "local",
            Zone::Asean => "asean",
            Zone::International => "international",
            Zone::Custom(key) => key,
        }
    }

    pub fn is_built_in(&self) -> bool {
        !matches!(self, Zone::Custom(_))
    }

    /// Parse a zone key as typed by an admin or stored remotely.
    ///
    /// Keys are lower-cased and spaces become underscores, so "East Malaysia"
    /// registers as `east_malaysia`. `intl` and `regional` are accepted as the
    /// names the settings sheet and admin panel use for the built-in tiers.
    pub fn parse(raw: &str) -> Result<Self, FreightError> {
        let key = raw.trim().to_lowercase().replace(' ', "_");

        match key.as_str() {
            "local" => Ok(Zone::Local),
            "asean" | "regional" => Ok(Zone::Asean),
            "international" | "intl" => Ok(Zone::International),
            _ if ZONE_KEY_REGEX.is_match(&key) => Ok(Zone::Custom(key)),
            _ => Err(FreightError::Validation(format!(
                "Invalid zone key '{}'",
                raw.trim()
            ))),
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

use rust_decimal::Decimal;

use crate::core::error::VALIDATION_SEPARATOR;
use crate::features::freight::models::{FreightError, ShippingAddress};
use crate::shared::constants::RESTRICTED_DESTINATIONS;

/// Where and how much the store is willing to ship
#[derive(Debug, Clone)]
pub struct ShippingPolicy {
    max_cart_weight_kg: Decimal,
}

impl ShippingPolicy {
    pub fn new(max_cart_weight_kg: Decimal) -> Self {
        Self { max_cart_weight_kg }
    }

    pub fn check_destination(&self, country: &str) -> Result<(), FreightError> {
        if RESTRICTED_DESTINATIONS.contains(&country) {
            return Err(FreightError::Validation(
                "Shipping to this country is not available".to_string(),
            ));
        }
        Ok(())
    }

    pub fn check_weight(&self, weight_kg: Decimal) -> Result<(), FreightError> {
        if weight_kg > self.max_cart_weight_kg {
            return Err(FreightError::Validation(format!(
                "Shipment weight {} kg exceeds the {} kg limit",
                weight_kg.normalize(),
                self.max_cart_weight_kg.normalize()
            )));
        }
        Ok(())
    }

    /// Check the required address fields and the destination, reporting
    /// every problem at once.
    pub fn validate_address(&self, address: &ShippingAddress) -> Result<(), FreightError> {
        let required = [
            (&address.country, "Country is required"),
            (&address.state, "State/Province is required"),
            (&address.city, "City is required"),
            (&address.postal_code, "Postal code is required"),
            (&address.address_line1, "Address line 1 is required"),
        ];

        let mut errors: Vec<String> = required
            .iter()
            .filter(|(value, _)| value.trim().is_empty())
            .map(|(_, message)| message.to_string())
            .collect();

        if let Err(FreightError::Validation(msg)) = self.check_destination(&address.country) {
            errors.push(msg);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(FreightError::Validation(errors.join(VALIDATION_SEPARATOR)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::dec;

    fn address(country: &str) -> ShippingAddress {
        ShippingAddress {
            country: country.to_string(),
            state: "Selangor".to_string(),
            city: "Shah Alam".to_string(),
            postal_code: "40000".to_string(),
            address_line1: "1 Jalan Plumbum".to_string(),
            address_line2: None,
        }
    }

    #[test]
    fn test_valid_address_passes() {
        let policy = ShippingPolicy::new(dec("30"));
        assert!(policy.validate_address(&address("MY")).is_ok());
    }

    #[test]
    fn test_missing_fields_are_all_reported() {
        let policy = ShippingPolicy::new(dec("30"));
        let mut addr = address("MY");
        addr.city = " ".to_string();
        addr.postal_code.clear();

        let Err(FreightError::Validation(msg)) = policy.validate_address(&addr) else {
            panic!("expected validation error");
        };
        assert!(msg.contains("City is required"));
        assert!(msg.contains("Postal code is required"));
        assert!(!msg.contains("Country"));
    }

    #[test]
    fn test_restricted_destination_rejected() {
        let policy = ShippingPolicy::new(dec("30"));
        for country in RESTRICTED_DESTINATIONS {
            assert!(policy.validate_address(&address(country)).is_err());
        }
        assert!(policy.check_destination("SG").is_ok());
    }

    #[test]
    fn test_weight_limit_is_inclusive() {
        let policy = ShippingPolicy::new(dec("30"));
        assert!(policy.check_weight(dec("30")).is_ok());
        assert!(policy.check_weight(dec("30.01")).is_err());
    }
}

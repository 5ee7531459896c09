use rust_decimal::Decimal;

use super::resolve_zone;
use crate::features::freight::models::{FreightError, RateEntry, ShipmentRequest, ShippingQuote};
use crate::shared::constants::INSURANCE_RATE;

/// Price a shipment against a snapshot of its zone's rate entry.
///
/// `total = (baseRate + weightKg * perKg) * methodMultiplier + insuranceFee`,
/// computed at full precision. Rounding happens only when the quote is
/// rendered.
pub fn quote(request: &ShipmentRequest, rate: &RateEntry) -> Result<ShippingQuote, FreightError> {
    if request.weight_kg < Decimal::ZERO {
        return Err(FreightError::Validation(
            "weightKg must not be negative".to_string(),
        ));
    }
    if request.declared_value < Decimal::ZERO {
        return Err(FreightError::Validation(
            "declaredValue must not be negative".to_string(),
        ));
    }

    let zone = resolve_zone(&request.origin_country, &request.destination_country);

    let too_large = || FreightError::Validation("Shipment is too large to quote".to_string());

    let weight_charge = request
        .weight_kg
        .checked_mul(rate.per_kg)
        .ok_or_else(too_large)?;
    let method_multiplier = rate.multiplier_for(request.method);
    let insurance_fee = if request.insured {
        request
            .declared_value
            .checked_mul(INSURANCE_RATE)
            .ok_or_else(too_large)?
    } else {
        Decimal::ZERO
    };
    let total = rate
        .base_rate
        .checked_add(weight_charge)
        .and_then(|v| v.checked_mul(method_multiplier))
        .and_then(|v| v.checked_add(insurance_fee))
        .ok_or_else(too_large)?;

    Ok(ShippingQuote {
        zone,
        method: request.method,
        base_rate: rate.base_rate,
        weight_charge,
        method_multiplier,
        insurance_fee,
        total,
        delivery_time_label: rate.delivery_time.label_for(request.method).to_string(),
    })
}

use rust_decimal::Decimal;

use super::{quote, resolve_zone};
use crate::features::cart::models::Cart;
use crate::features::freight::models::{
    FreightError, RateEntry, ShipmentRequest, ShippingMethod, ShippingOption, Zone,
};
use crate::shared::constants::DEFAULT_ITEM_WEIGHT_KG;
use crate::shared::money::format_money;

/// Inputs that come from store configuration rather than the cart
#[derive(Debug, Clone)]
pub struct OptionsContext<'a> {
    pub origin_country: &'a str,
    pub currency: &'a str,
    pub free_shipping_threshold: Decimal,
}

/// Build the shipping options offered at checkout.
///
/// `rate` must be the entry for the zone of (origin, destination). Standard
/// and express are always offered, priority only within the local zone. A
/// local cart at or above the free-shipping threshold gets its standard
/// option for free; express and priority keep their price.
pub fn shipping_options(
    cart: &Cart,
    destination: &str,
    rate: &RateEntry,
    ctx: &OptionsContext<'_>,
) -> Result<Vec<ShippingOption>, FreightError> {
    let zone = resolve_zone(ctx.origin_country, destination);
    let weight_kg = cart.total_weight(DEFAULT_ITEM_WEIGHT_KG);

    let mut methods = vec![ShippingMethod::Standard, ShippingMethod::Express];
    if zone == Zone::Local {
        methods.push(ShippingMethod::Priority);
    }

    let free_standard = zone == Zone::Local && cart.subtotal() >= ctx.free_shipping_threshold;

    methods
        .into_iter()
        .map(|method| {
            let request = ShipmentRequest {
                origin_country: ctx.origin_country.to_string(),
                destination_country: destination.to_string(),
                weight_kg,
                method,
                insured: false,
                declared_value: Decimal::ZERO,
            };
            let quote = quote(&request, rate)?;
            let estimated_days = quote.delivery_time_label.clone();

            let option = if free_standard && method == ShippingMethod::Standard {
                ShippingOption {
                    method,
                    name: "Free Standard Shipping".to_string(),
                    description: format!(
                        "Free shipping for orders over {}",
                        format_money(ctx.currency, ctx.free_shipping_threshold)
                    ),
                    cost: Decimal::ZERO,
                    estimated_days,
                    quote,
                }
            } else {
                ShippingOption {
                    method,
                    name: method.display_name().to_string(),
                    description: format!("{} delivery", estimated_days),
                    cost: quote.total,
                    estimated_days,
                    quote,
                }
            };
            Ok(option)
        })
        .collect()
}

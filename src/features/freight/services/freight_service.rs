use std::sync::Arc;

use super::{
    quote, resolve_zone, shipping_options, OptionsContext, RateTableService, ShippingPolicy,
};
use crate::core::config::StoreConfig;
use crate::features::cart::models::Cart;
use crate::features::freight::models::{
    FreightError, ShipmentRequest, ShippingMethod, ShippingOption, ShippingQuote, Zone,
};
use crate::shared::constants::DEFAULT_ITEM_WEIGHT_KG;

/// Prices shipments against the live rate table and the store's policy
pub struct FreightService {
    rate_table: Arc<RateTableService>,
    store: StoreConfig,
    policy: ShippingPolicy,
}

impl FreightService {
    pub fn new(rate_table: Arc<RateTableService>, store: StoreConfig) -> Self {
        let policy = ShippingPolicy::new(store.max_cart_weight_kg);
        Self {
            rate_table,
            store,
            policy,
        }
    }

    pub fn store(&self) -> &StoreConfig {
        &self.store
    }

    pub fn policy(&self) -> &ShippingPolicy {
        &self.policy
    }

    /// Quote a single shipment from the shipping calculator.
    ///
    /// The rate entry is snapshotted before pricing, so an admin write that
    /// lands meanwhile does not change this quote.
    pub async fn quote(&self, request: &ShipmentRequest) -> Result<ShippingQuote, FreightError> {
        let zone = resolve_zone(&request.origin_country, &request.destination_country);
        let rate = self.rate_table.get_rate(&zone).await?;
        quote(request, &rate)
    }

    /// Delivery estimate the rate table gives `method` in `zone`
    pub async fn delivery_time(
        &self,
        zone: &Zone,
        method: ShippingMethod,
    ) -> Result<String, FreightError> {
        let rate = self.rate_table.get_rate(zone).await?;
        Ok(rate.delivery_time.label_for(method).to_string())
    }

    /// Checkout options for a cart shipped from the store to `destination`
    pub async fn options(
        &self,
        cart: &Cart,
        destination: &str,
    ) -> Result<Vec<ShippingOption>, FreightError> {
        self.policy.check_destination(destination)?;
        self.policy.check_weight(cart.total_weight(DEFAULT_ITEM_WEIGHT_KG))?;

        let zone = resolve_zone(&self.store.origin_country, destination);
        let rate = self.rate_table.get_rate(&zone).await?;

        let ctx = OptionsContext {
            origin_country: &self.store.origin_country,
            currency: &self.store.currency,
            free_shipping_threshold: self.store.free_shipping_threshold,
        };
        shipping_options(cart, destination, &rate, &ctx)
    }

    /// The checkout option for `method`, if the destination offers it
    pub async fn select_option(
        &self,
        cart: &Cart,
        destination: &str,
        method: ShippingMethod,
    ) -> Result<ShippingOption, FreightError> {
        self.options(cart, destination)
            .await?
            .into_iter()
            .find(|o| o.method == method)
            .ok_or_else(|| {
                FreightError::Validation(format!(
                    "{} is not available for {}",
                    method.display_name(),
                    destination
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::cart::models::CartLine;
    use crate::features::freight::models::RateEntry;
    use crate::shared::test_helpers::dec;

    fn service() -> (Arc<RateTableService>, FreightService) {
        let rates = Arc::new(RateTableService::new(None));
        let service = FreightService::new(rates.clone(), StoreConfig::default());
        (rates, service)
    }

    fn cart(quantity: u32, weight: Option<&str>) -> Cart {
        Cart::from_lines(vec![CartLine {
            product_id: "p1".to_string(),
            name: Some("Wireless Headphones".to_string()),
            unit_price: dec("10"),
            quantity,
            weight_kg: weight.map(dec),
        }])
        .unwrap()
    }

    #[tokio::test]
    async fn test_quote_uses_current_rates() {
        let (rates, service) = service();
        let request = ShipmentRequest {
            origin_country: "MY".to_string(),
            destination_country: "MY".to_string(),
            weight_kg: dec("5"),
            method: ShippingMethod::Express,
            insured: false,
            declared_value: dec("100"),
        };

        assert_eq!(service.quote(&request).await.unwrap().total, dec("22.5"));

        let mut entry = RateEntry::default_for(&Zone::Local);
        entry.base_rate = dec("10");
        rates.set_rate(Zone::Local, entry, None, None).await.unwrap();

        assert_eq!(service.quote(&request).await.unwrap().total, dec("30"));
    }

    #[tokio::test]
    async fn test_options_reject_restricted_destination() {
        let (_, service) = service();
        let result = service.options(&cart(1, None), "KP").await;
        assert!(matches!(result, Err(FreightError::Validation(_))));
    }

    #[tokio::test]
    async fn test_options_reject_overweight_cart() {
        let (_, service) = service();
        let result = service.options(&cart(4, Some("8")), "MY").await;
        assert!(matches!(result, Err(FreightError::Validation(_))));
    }

    #[tokio::test]
    async fn test_options_for_asean_destination() {
        let (_, service) = service();
        let options = service.options(&cart(2, None), "TH").await.unwrap();

        assert_eq!(options.len(), 2);
        // 25 + 1 kg * 5
        assert_eq!(options[0].cost, dec("30"));
    }

    #[tokio::test]
    async fn test_select_option_by_method() {
        let (_, service) = service();

        let express = service
            .select_option(&cart(1, None), "MY", ShippingMethod::Express)
            .await
            .unwrap();
        assert_eq!(express.method, ShippingMethod::Express);

        let priority = service
            .select_option(&cart(1, None), "SG", ShippingMethod::Priority)
            .await;
        assert!(matches!(priority, Err(FreightError::Validation(msg)) if msg.contains("Priority")));
    }

    #[tokio::test]
    async fn test_delivery_time_for_method() {
        let (_, service) = service();

        let label = service
            .delivery_time(&Zone::International, ShippingMethod::Express)
            .await
            .unwrap();
        assert_eq!(label, "3-7 days");

        let missing = service
            .delivery_time(&Zone::Custom("mars".to_string()), ShippingMethod::Standard)
            .await;
        assert!(matches!(missing, Err(FreightError::NotFound(_))));
    }
}

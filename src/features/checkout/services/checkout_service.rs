use std::sync::Arc;

use chrono::Utc;

use crate::core::error::{AppError, Result};
use crate::features::cart::services::compute_totals;
use crate::features::checkout::models::{generate_order_number, CheckoutRequest, Order};
use crate::features::freight::services::FreightService;
use crate::features::payments::PaymentGateway;
use crate::modules::sheets::SheetsClient;

/// Places orders: prices shipping, charges the customer and records the order
pub struct CheckoutService {
    freight: Arc<FreightService>,
    gateway: Arc<dyn PaymentGateway>,
    sheets: Option<Arc<SheetsClient>>,
}

impl CheckoutService {
    pub fn new(
        freight: Arc<FreightService>,
        gateway: Arc<dyn PaymentGateway>,
        sheets: Option<Arc<SheetsClient>>,
    ) -> Self {
        Self {
            freight,
            gateway,
            sheets,
        }
    }

    pub fn currency(&self) -> &str {
        &self.freight.store().currency
    }

    /// Validate, price, charge and record an order.
    ///
    /// Nothing is charged unless the address, cart and shipping method are
    /// all acceptable. Recording in the order sheet is best-effort and never
    /// fails a charged order.
    pub async fn checkout(&self, request: CheckoutRequest) -> Result<Order> {
        let CheckoutRequest {
            cart,
            address,
            shipping_method,
            payment,
        } = request;

        if cart.is_empty() {
            return Err(AppError::Validation("Cart is empty".to_string()));
        }

        self.freight.policy().validate_address(&address)?;

        let shipping = self
            .freight
            .select_option(&cart, &address.country, shipping_method)
            .await?;

        let store = self.freight.store();
        let totals = compute_totals(cart.lines(), &store.pricing(), Some(&shipping.quote))?;

        let receipt = self
            .gateway
            .charge(totals.total, &store.currency, &payment)
            .await?;

        let created_at = Utc::now();
        let mut order = Order {
            order_number: generate_order_number(created_at),
            cart,
            address,
            totals,
            shipping,
            receipt,
            recorded: false,
            created_at,
        };

        tracing::info!(
            "Order {} placed: {} {} via {} ({})",
            order.order_number,
            store.currency,
            order.totals.total,
            order.receipt.method,
            order.receipt.status.as_str()
        );

        order.recorded = self.record(&order).await;
        Ok(order)
    }

    async fn record(&self, order: &Order) -> bool {
        let Some(sheets) = &self.sheets else {
            return false;
        };

        match sheets.record_order(&order.to_record()).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Failed to record order {}: {}", order.order_number, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::core::config::StoreConfig;
    use crate::features::cart::models::{Cart, CartLine};
    use crate::features::freight::models::{ShippingAddress, ShippingMethod};
    use crate::features::freight::services::RateTableService;
    use crate::features::payments::models::{CardDetails, PaymentMethod, PaymentStatus};
    use crate::features::payments::services::gateway::DECLINED_TEST_CARD;
    use crate::features::payments::SimulatedGateway;
    use crate::shared::test_helpers::dec;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service(sheets: Option<Arc<SheetsClient>>) -> CheckoutService {
        let rates = Arc::new(RateTableService::new(None));
        let freight = Arc::new(FreightService::new(rates, StoreConfig::default()));
        CheckoutService::new(freight, Arc::new(SimulatedGateway::new()), sheets)
    }

    fn sheets(server: &MockServer) -> Option<Arc<SheetsClient>> {
        Some(Arc::new(
            SheetsClient::new(&server.uri(), Duration::from_secs(5)).unwrap(),
        ))
    }

    fn address(country: &str) -> ShippingAddress {
        ShippingAddress {
            country: country.to_string(),
            state: "Selangor".to_string(),
            city: "Petaling Jaya".to_string(),
            postal_code: "46000".to_string(),
            address_line1: "12 Jalan SS2/24".to_string(),
            address_line2: None,
        }
    }

    fn request(payment: PaymentMethod) -> CheckoutRequest {
        let cart = Cart::from_lines(vec![CartLine {
            product_id: "p1".to_string(),
            name: Some("Smart Watch".to_string()),
            unit_price: dec("20"),
            quantity: 2,
            weight_kg: None,
        }])
        .unwrap();

        CheckoutRequest {
            cart,
            address: address("MY"),
            shipping_method: ShippingMethod::Standard,
            payment,
        }
    }

    fn card(number: &str) -> PaymentMethod {
        PaymentMethod::Card(CardDetails {
            number: number.to_string(),
            expiry: "12/99".to_string(),
            cvc: "123".to_string(),
            holder_name: "Aisyah Rahman".to_string(),
        })
    }

    #[tokio::test]
    async fn test_cash_on_delivery_order() {
        let order = service(None)
            .checkout(request(PaymentMethod::CashOnDelivery))
            .await
            .unwrap();

        // 40 + 6% tax + (5 + 1 kg * 2) standard local shipping
        assert_eq!(order.totals.subtotal, dec("40"));
        assert_eq!(order.totals.shipping, dec("7"));
        assert_eq!(order.totals.total, dec("49.4"));
        assert_eq!(order.receipt.amount, order.totals.total);
        assert_eq!(order.receipt.status, PaymentStatus::Pending);
        assert!(order.order_number.starts_with("ORD-"));
        assert!(!order.recorded);
    }

    #[tokio::test]
    async fn test_card_order_is_recorded() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .and(body_partial_json(json!({
                "action": "order",
                "data": {
                    "shippingMethod": "express",
                    "destinationCountry": "MY",
                    "paymentMethod": "card",
                    "paymentStatus": "paid"
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
            .expect(1)
            .mount(&server)
            .await;

        let mut req = request(card("4242424242424242"));
        req.shipping_method = ShippingMethod::Express;

        let order = service(sheets(&server)).checkout(req).await.unwrap();

        assert_eq!(order.receipt.status, PaymentStatus::Paid);
        assert!(order.recorded);
    }

    #[tokio::test]
    async fn test_recording_failure_keeps_order() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let order = service(sheets(&server))
            .checkout(request(PaymentMethod::BankTransfer))
            .await
            .unwrap();

        assert!(order.receipt.reference.starts_with("BT-"));
        assert!(!order.recorded);
    }

    #[tokio::test]
    async fn test_declined_card_is_not_recorded() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
            .expect(0)
            .mount(&server)
            .await;

        let result = service(sheets(&server))
            .checkout(request(card(DECLINED_TEST_CARD)))
            .await;

        assert!(matches!(result, Err(AppError::PaymentFailed(_))));
    }

    #[tokio::test]
    async fn test_invalid_address_is_rejected() {
        let mut req = request(PaymentMethod::CashOnDelivery);
        req.address.city = String::new();
        req.address.postal_code = "  ".to_string();

        let Err(AppError::Validation(msg)) = service(None).checkout(req).await else {
            panic!("expected validation error");
        };
        assert!(msg.contains("City is required"));
        assert!(msg.contains("Postal code is required"));
    }

    #[tokio::test]
    async fn test_priority_outside_local_zone_is_rejected() {
        let mut req = request(PaymentMethod::CashOnDelivery);
        req.address = address("SG");
        req.shipping_method = ShippingMethod::Priority;

        let result = service(None).checkout(req).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::cart::dtos::cart_from_items;
use crate::features::checkout::dtos::{CheckoutRequestDto, CheckoutResponseDto};
use crate::features::checkout::models::CheckoutRequest;
use crate::features::checkout::CheckoutService;
use crate::shared::types::ApiResponse;

/// Place an order
///
/// Prices shipping for the selected method, charges the order total and
/// records the order. Card payments are captured immediately; bank transfer
/// and cash on delivery orders are left pending.
#[utoipa::path(
    post,
    path = "/api/checkout",
    request_body = CheckoutRequestDto,
    responses(
        (status = 201, description = "Order placed", body = ApiResponse<CheckoutResponseDto>),
        (status = 400, description = "Invalid cart, address, shipping method or card"),
        (status = 402, description = "Payment declined")
    ),
    tag = "checkout"
)]
pub async fn checkout(
    State(service): State<Arc<CheckoutService>>,
    AppJson(dto): AppJson<CheckoutRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<CheckoutResponseDto>>)> {
    dto.validate()?;

    let request = CheckoutRequest {
        cart: cart_from_items(dto.items)?,
        address: dto.shipping_address.into(),
        shipping_method: dto.shipping_method,
        payment: dto.payment,
    };

    let order = service.checkout(request).await?;
    let response = CheckoutResponseDto::from_order(&order, service.currency());

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(response),
            Some("Order placed successfully".to_string()),
            None,
        )),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::StoreConfig;
    use crate::features::checkout::routes;
    use crate::features::freight::services::{FreightService, RateTableService};
    use crate::features::payments::SimulatedGateway;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn server() -> TestServer {
        let rates = Arc::new(RateTableService::new(None));
        let freight = Arc::new(FreightService::new(rates, StoreConfig::default()));
        let service = Arc::new(CheckoutService::new(
            freight,
            Arc::new(SimulatedGateway::new()),
            None,
        ));
        TestServer::new(routes::routes(service)).unwrap()
    }

    fn address() -> Value {
        json!({
            "country": "my",
            "state": "Penang",
            "city": "George Town",
            "postalCode": "10200",
            "addressLine1": "8 Lebuh Armenian"
        })
    }

    #[tokio::test]
    async fn test_card_checkout() {
        let server = server();

        let response = server
            .post("/api/checkout")
            .json(&json!({
                "items": [{ "productId": "p1", "unitPrice": 60, "quantity": 2, "weightKg": 1 }],
                "shippingAddress": address(),
                "shippingMethod": "express",
                "payment": {
                    "type": "card",
                    "number": "4242 4242 4242 4242",
                    "expiry": "12/99",
                    "cvc": "123",
                    "holderName": "Lim Wei Ling"
                }
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        let data = &body["data"];
        assert!(data["orderNumber"].as_str().unwrap().starts_with("ORD-"));
        // Subtotal 120 is over the free-shipping threshold
        assert_eq!(data["totals"]["shipping"], json!(0.0));
        assert_eq!(data["totals"]["total"], json!(127.2));
        assert_eq!(data["shipping"]["id"], "express");
        assert_eq!(data["payment"]["status"], "paid");
        assert_eq!(data["payment"]["cardBrand"], "visa");
        assert_eq!(data["payment"]["cardLast4"], "4242");
        assert_eq!(data["payment"]["amount"], json!(127.2));
        assert_eq!(data["recorded"], false);
    }

    #[tokio::test]
    async fn test_cash_on_delivery_checkout() {
        let server = server();

        let response = server
            .post("/api/checkout")
            .json(&json!({
                "items": [{ "productId": "p1", "unitPrice": 20, "quantity": 1 }],
                "shippingAddress": address(),
                "payment": { "type": "cash_on_delivery" }
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["data"]["shipping"]["id"], "standard");
        assert_eq!(body["data"]["payment"]["status"], "pending");
        assert!(body["data"]["payment"].get("cardBrand").is_none());
    }

    #[tokio::test]
    async fn test_declined_card_returns_payment_required() {
        let server = server();

        let response = server
            .post("/api/checkout")
            .json(&json!({
                "items": [{ "productId": "p1", "unitPrice": 20, "quantity": 1 }],
                "shippingAddress": address(),
                "payment": {
                    "type": "card",
                    "number": "4000000000000002",
                    "expiry": "12/99",
                    "cvc": "123",
                    "holderName": "Lim Wei Ling"
                }
            }))
            .await;

        response.assert_status(StatusCode::PAYMENT_REQUIRED);
    }

    #[tokio::test]
    async fn test_incomplete_address_is_rejected() {
        let server = server();

        let response = server
            .post("/api/checkout")
            .json(&json!({
                "items": [{ "productId": "p1", "unitPrice": 20, "quantity": 1 }],
                "shippingAddress": { "country": "MY" },
                "payment": { "type": "bank_transfer" }
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        let errors = body["errors"].as_array().unwrap();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors[0], "State/Province is required");
    }

    #[tokio::test]
    async fn test_empty_cart_is_rejected() {
        let server = server();

        let response = server
            .post("/api/checkout")
            .json(&json!({
                "items": [],
                "shippingAddress": address(),
                "payment": { "type": "bank_transfer" }
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}

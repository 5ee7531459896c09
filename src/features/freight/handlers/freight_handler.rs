use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::cart::dtos::cart_from_items;
use crate::features::freight::dtos::{
    QuoteRequestDto, QuoteResponseDto, ShippingOptionDto, ShippingOptionsRequestDto,
    ShippingOptionsResponseDto, ZoneQuery, ZoneResponseDto,
};
use crate::features::freight::services::{resolve_zone, FreightService};
use crate::shared::constants::DEFAULT_ITEM_WEIGHT_KG;
use crate::shared::types::ApiResponse;
use crate::shared::validation::normalize_country_code;

/// Resolve the shipping zone for a country pair
#[utoipa::path(
    get,
    path = "/api/freight/zone",
    params(ZoneQuery),
    responses(
        (status = 200, description = "Resolved zone", body = ApiResponse<ZoneResponseDto>),
    ),
    tag = "freight"
)]
pub async fn get_zone(
    State(service): State<Arc<FreightService>>,
    AppQuery(query): AppQuery<ZoneQuery>,
) -> Result<Json<ApiResponse<ZoneResponseDto>>> {
    let origin = query
        .origin
        .as_deref()
        .map(normalize_country_code)
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| service.store().origin_country.clone());
    let destination = normalize_country_code(&query.destination);
    let zone = resolve_zone(&origin, &destination);

    let response = ZoneResponseDto {
        origin,
        destination,
        zone: zone.key().to_string(),
    };
    Ok(Json(ApiResponse::success(Some(response), None, None)))
}

/// Calculate a shipping quote
#[utoipa::path(
    post,
    path = "/api/freight/quote",
    request_body = QuoteRequestDto,
    responses(
        (status = 200, description = "Quote breakdown", body = ApiResponse<QuoteResponseDto>),
        (status = 400, description = "Invalid shipment")
    ),
    tag = "freight"
)]
pub async fn create_quote(
    State(service): State<Arc<FreightService>>,
    AppJson(dto): AppJson<QuoteRequestDto>,
) -> Result<Json<ApiResponse<QuoteResponseDto>>> {
    dto.validate()?;

    let request = dto.into_request(&service.store().origin_country);
    let quote = service.quote(&request).await?;

    let response = QuoteResponseDto::from_quote(&quote, &service.store().currency);
    Ok(Json(ApiResponse::success(Some(response), None, None)))
}

/// List checkout shipping options for a cart
#[utoipa::path(
    post,
    path = "/api/freight/options",
    request_body = ShippingOptionsRequestDto,
    responses(
        (status = 200, description = "Available shipping options", body = ApiResponse<ShippingOptionsResponseDto>),
        (status = 400, description = "Invalid cart or restricted destination")
    ),
    tag = "freight"
)]
pub async fn list_shipping_options(
    State(service): State<Arc<FreightService>>,
    AppJson(dto): AppJson<ShippingOptionsRequestDto>,
) -> Result<Json<ApiResponse<ShippingOptionsResponseDto>>> {
    dto.validate()?;

    let destination = normalize_country_code(&dto.destination_country);
    let cart = cart_from_items(dto.items)?;
    let options = service.options(&cart, &destination).await?;

    let zone = resolve_zone(&service.store().origin_country, &destination);
    let response = ShippingOptionsResponseDto {
        destination_country: destination,
        zone: zone.key().to_string(),
        weight_kg: cart.total_weight(DEFAULT_ITEM_WEIGHT_KG),
        options: options.iter().map(ShippingOptionDto::from).collect(),
    };
    Ok(Json(ApiResponse::success(Some(response), None, None)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::StoreConfig;
    use crate::features::freight::routes;
    use crate::features::freight::services::RateTableService;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn server() -> TestServer {
        let rates = Arc::new(RateTableService::new(None));
        let service = Arc::new(FreightService::new(rates, StoreConfig::default()));
        TestServer::new(routes::routes(service)).unwrap()
    }

    #[tokio::test]
    async fn test_zone_lookup_normalizes_codes() {
        let server = server();

        let response = server
            .get("/api/freight/zone")
            .add_query_param("origin", " my ")
            .add_query_param("destination", "sg")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["zone"], "asean");
        assert_eq!(body["data"]["origin"], "MY");
        assert_eq!(body["data"]["destination"], "SG");
    }

    #[tokio::test]
    async fn test_zone_lookup_requires_destination() {
        let server = server();

        let response = server
            .get("/api/freight/zone")
            .add_query_param("origin", "MY")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_quote_express_local() {
        let server = server();

        let response = server
            .post("/api/freight/quote")
            .json(&json!({
                "originCountry": "MY",
                "destinationCountry": "MY",
                "weightKg": 5,
                "method": "express"
            }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["zone"], "local");
        assert_eq!(body["data"]["total"], json!(22.5));
        assert_eq!(body["data"]["methodSurcharge"], json!(7.5));
        assert_eq!(body["data"]["formattedTotal"], "RM 22.50");
        assert_eq!(body["data"]["deliveryTime"], "1-2 days");
    }

    #[tokio::test]
    async fn test_quote_negative_weight_is_rejected() {
        let server = server();

        let response = server
            .post("/api/freight/quote")
            .json(&json!({ "destinationCountry": "US", "weightKg": -2 }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_quote_with_oversized_weight_is_rejected() {
        let server = server();

        let response = server
            .post("/api/freight/quote")
            .json(&json!({
                "destinationCountry": "US",
                "weightKg": "79228162514264337593543950335"
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], "Shipment is too large to quote");
    }

    #[tokio::test]
    async fn test_quote_rejects_malformed_json() {
        let server = server();

        let response = server
            .post("/api/freight/quote")
            .json(&json!({ "destinationCountry": 42 }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_options_free_standard_for_local_cart() {
        let server = server();

        let response = server
            .post("/api/freight/options")
            .json(&json!({
                "destinationCountry": "MY",
                "items": [{ "productId": "p1", "unitPrice": 60, "quantity": 2 }]
            }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        let options = body["data"]["options"].as_array().unwrap();
        assert_eq!(options.len(), 3);
        assert_eq!(options[0]["id"], "standard");
        assert_eq!(options[0]["name"], "Free Standard Shipping");
        assert_eq!(options[0]["cost"], json!(0.0));
        assert_eq!(options[2]["id"], "priority");
        assert_eq!(body["data"]["weightKg"], json!(1.0));
    }

    #[tokio::test]
    async fn test_options_restricted_destination() {
        let server = server();

        let response = server
            .post("/api/freight/options")
            .json(&json!({
                "destinationCountry": "IR",
                "items": [{ "productId": "p1", "unitPrice": 10, "quantity": 1 }]
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_options_require_items() {
        let server = server();

        let response = server
            .post("/api/freight/options")
            .json(&json!({ "destinationCountry": "MY", "items": [] }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}

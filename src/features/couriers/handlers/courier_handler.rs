use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::couriers::dtos::{
    CourierQuoteDto, CourierQuoteRequestDto, CourierQuotesResponseDto, CourierRequestDto,
    CourierResponseDto,
};
use crate::features::couriers::CourierService;
use crate::features::freight::services::resolve_zone;
use crate::shared::types::{ApiResponse, Meta};
use crate::shared::validation::normalize_country_code;

/// Compare courier prices for a shipment
#[utoipa::path(
    post,
    path = "/api/freight/couriers/quote",
    request_body = CourierQuoteRequestDto,
    responses(
        (status = 200, description = "Courier quotes, cheapest first", body = ApiResponse<CourierQuotesResponseDto>),
        (status = 400, description = "Invalid shipment")
    ),
    tag = "freight"
)]
pub async fn compare_courier_quotes(
    State(service): State<Arc<CourierService>>,
    AppJson(dto): AppJson<CourierQuoteRequestDto>,
) -> Result<Json<ApiResponse<CourierQuotesResponseDto>>> {
    dto.validate()?;

    let store = service.store();
    let origin = dto
        .origin_country
        .as_deref()
        .map(normalize_country_code)
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| store.origin_country.clone());
    let destination = normalize_country_code(&dto.destination_country);
    let weight_kg = dto.weight();

    let zone = resolve_zone(&origin, &destination);
    let quotes = service.compare(&zone, weight_kg).await?;

    let response = CourierQuotesResponseDto {
        origin_country: origin,
        destination_country: destination,
        zone: zone.key().to_string(),
        weight_kg,
        quotes: quotes
            .iter()
            .map(|q| CourierQuoteDto::from_quote(q, &store.currency))
            .collect(),
    };
    Ok(Json(ApiResponse::success(Some(response), None, None)))
}

/// List courier partners
#[utoipa::path(
    get,
    path = "/api/admin/couriers",
    responses(
        (status = 200, description = "All couriers", body = ApiResponse<Vec<CourierResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required")
    ),
    tag = "freight-admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_couriers(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<CourierService>>,
) -> Result<Json<ApiResponse<Vec<CourierResponseDto>>>> {
    let couriers = service.list().await;
    let total = couriers.len() as i64;
    let response: Vec<CourierResponseDto> = couriers.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::success(
        Some(response),
        None,
        Some(Meta { total }),
    )))
}

/// Get a courier by id
#[utoipa::path(
    get,
    path = "/api/admin/couriers/{id}",
    params(
        ("id" = u32, Path, description = "Courier id")
    ),
    responses(
        (status = 200, description = "Courier", body = ApiResponse<CourierResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required"),
        (status = 404, description = "Courier not found")
    ),
    tag = "freight-admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_courier(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<CourierService>>,
    Path(id): Path<u32>,
) -> Result<Json<ApiResponse<CourierResponseDto>>> {
    let courier = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(courier.into()), None, None)))
}

/// Add a courier partner
#[utoipa::path(
    post,
    path = "/api/admin/couriers",
    request_body = CourierRequestDto,
    responses(
        (status = 201, description = "Courier added", body = ApiResponse<CourierResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required"),
        (status = 409, description = "Courier name already in use")
    ),
    tag = "freight-admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_courier(
    RequireAdmin(user): RequireAdmin,
    State(service): State<Arc<CourierService>>,
    AppJson(dto): AppJson<CourierRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<CourierResponseDto>>)> {
    dto.validate()?;

    let profile = dto.into_profile(None)?;
    let courier = service.create(profile, user.display_name()).await?;
    let message = format!("Courier \"{}\" added successfully", courier.name());

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(courier.into()),
            Some(message),
            None,
        )),
    ))
}

/// Replace a courier's details
///
/// Rates are kept when the request omits them.
#[utoipa::path(
    put,
    path = "/api/admin/couriers/{id}",
    params(
        ("id" = u32, Path, description = "Courier id")
    ),
    request_body = CourierRequestDto,
    responses(
        (status = 200, description = "Courier updated", body = ApiResponse<CourierResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required"),
        (status = 404, description = "Courier not found"),
        (status = 409, description = "Courier name already in use")
    ),
    tag = "freight-admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_courier(
    RequireAdmin(user): RequireAdmin,
    State(service): State<Arc<CourierService>>,
    Path(id): Path<u32>,
    AppJson(dto): AppJson<CourierRequestDto>,
) -> Result<Json<ApiResponse<CourierResponseDto>>> {
    dto.validate()?;

    let current = service.get(id).await?;
    let profile = dto.into_profile(Some(&current.profile))?;
    let courier = service.update(id, profile, user.display_name()).await?;

    Ok(Json(ApiResponse::success(
        Some(courier.into()),
        Some("Courier updated successfully".to_string()),
        None,
    )))
}

/// Remove a courier partner
#[utoipa::path(
    delete,
    path = "/api/admin/couriers/{id}",
    params(
        ("id" = u32, Path, description = "Courier id")
    ),
    responses(
        (status = 200, description = "Courier deleted", body = ApiResponse<CourierResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required"),
        (status = 404, description = "Courier not found")
    ),
    tag = "freight-admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_courier(
    RequireAdmin(user): RequireAdmin,
    State(service): State<Arc<CourierService>>,
    Path(id): Path<u32>,
) -> Result<Json<ApiResponse<CourierResponseDto>>> {
    let courier = service.delete(id, user.display_name()).await?;
    let message = format!("Courier \"{}\" deleted successfully", courier.name());

    Ok(Json(ApiResponse::success(
        Some(courier.into()),
        Some(message),
        None,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::StoreConfig;
    use crate::features::couriers::routes;
    use crate::shared::test_helpers::{with_admin_auth, with_customer_auth};
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn service() -> Arc<CourierService> {
        Arc::new(CourierService::new(StoreConfig::default()))
    }

    fn admin_server() -> TestServer {
        TestServer::new(with_admin_auth(routes::admin_routes(service()))).unwrap()
    }

    #[tokio::test]
    async fn test_compare_local_quotes() {
        let server = TestServer::new(routes::routes(service())).unwrap();

        let response = server
            .post("/api/freight/couriers/quote")
            .json(&json!({ "destinationCountry": "my", "weightKg": 2 }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["zone"], "local");
        assert_eq!(body["data"]["originCountry"], "MY");
        let quotes = body["data"]["quotes"].as_array().unwrap();
        assert_eq!(quotes.len(), 3);
        assert_eq!(quotes[0]["courierName"], "Pos Malaysia");
        assert_eq!(quotes[0]["total"], json!(9.0));
        assert_eq!(quotes[0]["formattedTotal"], "RM 9.00");
        assert_eq!(quotes[2]["courierName"], "Lalamove");
    }

    #[tokio::test]
    async fn test_compare_international_quotes() {
        let server = TestServer::new(routes::routes(service())).unwrap();

        let response = server
            .post("/api/freight/couriers/quote")
            .json(&json!({ "destinationCountry": "US" }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        let quotes = body["data"]["quotes"].as_array().unwrap();
        // 1 kg: Pos 45 + 8, DHL 60 + 12
        assert_eq!(quotes[0]["total"], json!(53.0));
        assert_eq!(quotes[1]["courierName"], "DHL Express");
        assert_eq!(quotes[1]["total"], json!(72.0));
    }

    #[tokio::test]
    async fn test_compare_rejects_negative_weight() {
        let server = TestServer::new(routes::routes(service())).unwrap();

        let response = server
            .post("/api/freight/couriers/quote")
            .json(&json!({ "destinationCountry": "MY", "weightKg": -1 }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_then_get_courier() {
        let server = admin_server();

        let response = server
            .post("/api/admin/couriers")
            .json(&json!({
                "name": "J&T Express",
                "serviceType": ["Local", "Express"],
                "trackingUrl": "https://www.jtexpress.my/tracking",
                "rates": { "local": { "base": 4.5, "perKg": 1.2 } }
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["data"]["id"], 5);
        assert_eq!(body["data"]["updatedBy"], "Test Admin");
        assert_eq!(body["data"]["rates"]["local"]["perKg"], json!(1.2));

        let response = server.get("/api/admin/couriers/5").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["name"], "J&T Express");
    }

    #[tokio::test]
    async fn test_create_duplicate_name_conflicts() {
        let server = admin_server();

        let response = server
            .post("/api/admin/couriers")
            .json(&json!({ "name": "DHL EXPRESS" }))
            .await;

        response.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_create_rejects_bad_tracking_url() {
        let server = admin_server();

        let response = server
            .post("/api/admin/couriers")
            .json(&json!({ "name": "City-Link", "trackingUrl": "citylink.com.my" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_keeps_rates() {
        let server = admin_server();

        let response = server
            .put("/api/admin/couriers/1")
            .json(&json!({ "name": "Pos Malaysia", "status": "inactive" }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["status"], "inactive");
        assert_eq!(body["data"]["rates"]["international"]["base"], json!(45.0));
    }

    #[tokio::test]
    async fn test_delete_courier() {
        let server = admin_server();

        let response = server.delete("/api/admin/couriers/2").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["message"], "Courier \"DHL Express\" deleted successfully");

        let response = server.get("/api/admin/couriers/2").await;
        response.assert_status(StatusCode::NOT_FOUND);

        let response = server.get("/api/admin/couriers").await;
        let body: Value = response.json();
        assert_eq!(body["meta"]["total"], 3);
    }

    #[tokio::test]
    async fn test_customer_is_forbidden() {
        let server =
            TestServer::new(with_customer_auth(routes::admin_routes(service()))).unwrap();

        let response = server.delete("/api/admin/couriers/1").await;

        response.assert_status(StatusCode::FORBIDDEN);
    }
}

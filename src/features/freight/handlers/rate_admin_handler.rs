use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::freight::dtos::{
    RateExportDto, RateReloadResponseDto, RateResponseDto, UpdateRateDto, UpdateRateResponseDto,
};
use crate::features::freight::models::{RateEntry, Zone};
use crate::features::freight::services::RateTableService;
use crate::shared::types::{ApiResponse, Meta};

/// List all freight rates
#[utoipa::path(
    get,
    path = "/api/admin/freight/rates",
    responses(
        (status = 200, description = "All zone rates", body = ApiResponse<Vec<RateResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required")
    ),
    tag = "freight-admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_rates(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<RateTableService>>,
) -> Result<Json<ApiResponse<Vec<RateResponseDto>>>> {
    let records = service.list_rates().await;
    let total = records.len() as i64;
    let response: Vec<RateResponseDto> = records.into_iter().map(|r| r.into()).collect();

    Ok(Json(ApiResponse::success(
        Some(response),
        None,
        Some(Meta { total }),
    )))
}

/// Get the rate entry for one zone
#[utoipa::path(
    get,
    path = "/api/admin/freight/rates/{zone}",
    params(
        ("zone" = String, Path, description = "Zone key, e.g. local, asean, international")
    ),
    responses(
        (status = 200, description = "Zone rate", body = ApiResponse<RateResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required"),
        (status = 404, description = "Zone not found")
    ),
    tag = "freight-admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_rate(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<RateTableService>>,
    Path(zone): Path<String>,
) -> Result<Json<ApiResponse<RateResponseDto>>> {
    let zone = Zone::parse(&zone)?;
    let record = service.get_record(&zone).await?;

    Ok(Json(ApiResponse::success(Some(record.into()), None, None)))
}

/// Replace the rate entry for a zone
///
/// Unknown zone keys register a new custom zone.
#[utoipa::path(
    put,
    path = "/api/admin/freight/rates/{zone}",
    params(
        ("zone" = String, Path, description = "Zone key")
    ),
    request_body = UpdateRateDto,
    responses(
        (status = 200, description = "Updated zone rate", body = ApiResponse<UpdateRateResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required"),
        (status = 409, description = "Rate was changed by someone else")
    ),
    tag = "freight-admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_rate(
    RequireAdmin(user): RequireAdmin,
    State(service): State<Arc<RateTableService>>,
    Path(zone): Path<String>,
    AppJson(dto): AppJson<UpdateRateDto>,
) -> Result<Json<ApiResponse<UpdateRateResponseDto>>> {
    dto.validate()?;

    let zone = Zone::parse(&zone)?;
    let current = service
        .get_rate(&zone)
        .await
        .unwrap_or_else(|_| RateEntry::default_for(&zone));

    let expected_version = dto.expected_version;
    let entry = dto.into_entry(&current);
    let update = service
        .update_rate(zone, entry, expected_version, user.display_name())
        .await?;

    let message = if update.persisted {
        "Freight rate updated"
    } else {
        "Freight rate updated locally; settings sheet not updated"
    };

    Ok(Json(ApiResponse::success(
        Some(update.into()),
        Some(message.to_string()),
        None,
    )))
}

/// Reload freight rates from the settings sheet
#[utoipa::path(
    post,
    path = "/api/admin/freight/rates/reload",
    responses(
        (status = 200, description = "Rates after reload", body = ApiResponse<RateReloadResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required")
    ),
    tag = "freight-admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn reload_rates(
    RequireAdmin(user): RequireAdmin,
    State(service): State<Arc<RateTableService>>,
) -> Result<Json<ApiResponse<RateReloadResponseDto>>> {
    tracing::info!("Freight rate reload requested by {}", user.display_name());

    let source = service.load_from_remote().await;
    let rates = service.list_rates().await;

    Ok(Json(ApiResponse::success(
        Some(RateReloadResponseDto::new(source, rates)),
        None,
        None,
    )))
}

/// Export freight data for backup
#[utoipa::path(
    get,
    path = "/api/admin/freight/export",
    responses(
        (status = 200, description = "Freight data export", body = ApiResponse<RateExportDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required")
    ),
    tag = "freight-admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn export_rates(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<RateTableService>>,
) -> Result<Json<ApiResponse<RateExportDto>>> {
    let export = service.export().await;
    Ok(Json(ApiResponse::success(Some(export.into()), None, None)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::freight::routes;
    use crate::shared::test_helpers::{with_admin_auth, with_customer_auth};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn admin_server() -> TestServer {
        let service = Arc::new(RateTableService::new(None));
        TestServer::new(with_admin_auth(routes::admin_routes(service))).unwrap()
    }

    #[tokio::test]
    async fn test_list_rates_sorted() {
        let server = admin_server();

        let response = server.get("/api/admin/freight/rates").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["meta"]["total"], 3);
        assert_eq!(body["data"][0]["zone"], "asean");
        assert_eq!(body["data"][2]["zone"], "local");
    }

    #[tokio::test]
    async fn test_get_rate_accepts_alias() {
        let server = admin_server();

        let response = server.get("/api/admin/freight/rates/intl").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["zone"], "international");
        assert_eq!(body["data"]["baseRate"], json!(50.0));
    }

    #[tokio::test]
    async fn test_get_unknown_zone_is_not_found() {
        let server = admin_server();
        let response = server.get("/api/admin/freight/rates/mars").await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_rate_then_stale_write_conflicts() {
        let server = admin_server();
        let body = json!({
            "baseRate": 6,
            "perKg": 2.5,
            "expressMultiplier": 1.5,
            "priorityMultiplier": 2,
            "expectedVersion": 1
        });

        let response = server
            .put("/api/admin/freight/rates/local")
            .json(&body)
            .await;
        response.assert_status_ok();
        let json: Value = response.json();
        assert_eq!(json["data"]["rate"]["version"], 2);
        assert_eq!(json["data"]["rate"]["baseRate"], json!(6.0));
        assert_eq!(json["data"]["rate"]["updatedBy"], "Test Admin");
        assert_eq!(json["data"]["persisted"], false);

        let response = server
            .put("/api/admin/freight/rates/local")
            .json(&body)
            .await;
        response.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_update_rate_rejects_bad_multiplier() {
        let server = admin_server();

        let response = server
            .put("/api/admin/freight/rates/asean")
            .json(&json!({
                "baseRate": 25,
                "perKg": 5,
                "expressMultiplier": 0.8,
                "priorityMultiplier": 2.5
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_creates_custom_zone() {
        let server = admin_server();

        let response = server
            .put("/api/admin/freight/rates/East%20Malaysia")
            .json(&json!({
                "baseRate": 12,
                "perKg": 3,
                "expressMultiplier": 1.5,
                "priorityMultiplier": 2,
                "deliveryTime": { "standard": "2-4 days", "express": "1-2 days", "priority": "" }
            }))
            .await;

        response.assert_status_ok();
        let json: Value = response.json();
        assert_eq!(json["data"]["rate"]["zone"], "east_malaysia");
        assert_eq!(json["data"]["rate"]["builtIn"], false);
        assert_eq!(json["data"]["rate"]["version"], 1);
    }

    #[tokio::test]
    async fn test_reload_without_remote_keeps_local_rates() {
        let server = admin_server();

        let response = server.post("/api/admin/freight/rates/reload").await;

        response.assert_status_ok();
        let json: Value = response.json();
        assert_eq!(json["data"]["source"], "local");
        assert_eq!(json["data"]["rates"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_export_keyed_by_zone() {
        let server = admin_server();

        let response = server.get("/api/admin/freight/export").await;

        response.assert_status_ok();
        let json: Value = response.json();
        assert_eq!(
            json["data"]["shippingRates"]["local"]["perKg"],
            json!(2.0)
        );
        assert!(json["data"]["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_customer_is_forbidden() {
        let service = Arc::new(RateTableService::new(None));
        let server = TestServer::new(with_customer_auth(routes::admin_routes(service))).unwrap();

        let response = server.get("/api/admin/freight/rates").await;

        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_anonymous_is_unauthorized() {
        let service = Arc::new(RateTableService::new(None));
        let server = TestServer::new(routes::admin_routes(service)).unwrap();

        let response = server.get("/api/admin/freight/export").await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }
}

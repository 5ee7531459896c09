use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::auth::guards::RequireAdmin;
use crate::features::shipments::dtos::{
    CreateShipmentDto, RecentShipmentsQuery, ShipmentCreatedDto, ShipmentResponseDto,
    UpdateShipmentStatusDto,
};
use crate::features::shipments::ShipmentService;
use crate::shared::types::{ApiResponse, Meta};

/// Track a shipment
#[utoipa::path(
    get,
    path = "/api/freight/track/{tracking_number}",
    params(
        ("tracking_number" = String, Path, description = "Tracking number, e.g. GM-2026-000001")
    ),
    responses(
        (status = 200, description = "Shipment and its tracking history", body = ApiResponse<ShipmentResponseDto>),
        (status = 404, description = "No tracking information found")
    ),
    tag = "shipments"
)]
pub async fn track_shipment(
    State(service): State<Arc<ShipmentService>>,
    Path(tracking_number): Path<String>,
) -> Result<Json<ApiResponse<ShipmentResponseDto>>> {
    let shipment = service.track(&tracking_number).await?;
    let response = ShipmentResponseDto::from_shipment(&shipment, service.currency());
    Ok(Json(ApiResponse::success(Some(response), None, None)))
}

/// List recent shipments
#[utoipa::path(
    get,
    path = "/api/admin/shipments",
    params(RecentShipmentsQuery),
    responses(
        (status = 200, description = "Shipments, newest first", body = ApiResponse<Vec<ShipmentResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required")
    ),
    tag = "shipments",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_shipments(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ShipmentService>>,
    AppQuery(query): AppQuery<RecentShipmentsQuery>,
) -> Result<Json<ApiResponse<Vec<ShipmentResponseDto>>>> {
    let shipments = service.recent(query.limit()).await;
    let total = shipments.len() as i64;
    let response: Vec<ShipmentResponseDto> = shipments
        .iter()
        .map(|s| ShipmentResponseDto::from_shipment(s, service.currency()))
        .collect();

    Ok(Json(ApiResponse::success(
        Some(response),
        None,
        Some(Meta { total }),
    )))
}

/// Book a shipment with a courier
#[utoipa::path(
    post,
    path = "/api/admin/shipments",
    request_body = CreateShipmentDto,
    responses(
        (status = 201, description = "Shipment booked", body = ApiResponse<ShipmentCreatedDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required"),
        (status = 404, description = "Courier not found")
    ),
    tag = "shipments",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_shipment(
    RequireAdmin(user): RequireAdmin,
    State(service): State<Arc<ShipmentService>>,
    AppJson(dto): AppJson<CreateShipmentDto>,
) -> Result<(StatusCode, Json<ApiResponse<ShipmentCreatedDto>>)> {
    dto.validate()?;

    let created = service
        .create(dto.into_new_shipment(), user.display_name())
        .await?;
    let message = format!(
        "Shipment {} booked with {}",
        created.shipment.tracking_number, created.shipment.courier.courier_name
    );
    let response = ShipmentCreatedDto {
        shipment: ShipmentResponseDto::from_shipment(&created.shipment, service.currency()),
        recorded: created.recorded,
    };

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(response), Some(message), None)),
    ))
}

/// Move a shipment to its next status
#[utoipa::path(
    post,
    path = "/api/admin/shipments/{tracking_number}/status",
    params(
        ("tracking_number" = String, Path, description = "Tracking number")
    ),
    request_body = UpdateShipmentStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<ShipmentResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required"),
        (status = 404, description = "Shipment not found"),
        (status = 409, description = "Shipment already has this or a later status")
    ),
    tag = "shipments",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_shipment_status(
    RequireAdmin(user): RequireAdmin,
    State(service): State<Arc<ShipmentService>>,
    Path(tracking_number): Path<String>,
    AppJson(dto): AppJson<UpdateShipmentStatusDto>,
) -> Result<Json<ApiResponse<ShipmentResponseDto>>> {
    dto.validate()?;

    let shipment = service
        .update_status(&tracking_number, dto.status, dto.location, user.display_name())
        .await?;
    let response = ShipmentResponseDto::from_shipment(&shipment, service.currency());

    Ok(Json(ApiResponse::success(
        Some(response),
        Some("Shipment status updated".to_string()),
        None,
    )))
}

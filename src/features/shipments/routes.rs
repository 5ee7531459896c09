use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::shipments::handlers;
use crate::features::shipments::ShipmentService;

/// Create public routes for shipment tracking
pub fn routes(service: Arc<ShipmentService>) -> Router {
    Router::new()
        .route(
            "/api/freight/track/{tracking_number}",
            get(handlers::track_shipment),
        )
        .with_state(service)
}

/// Create admin routes for booking and updating shipments (admin only)
pub fn admin_routes(service: Arc<ShipmentService>) -> Router {
    Router::new()
        .route(
            "/api/admin/shipments",
            get(handlers::list_shipments).post(handlers::create_shipment),
        )
        .route(
            "/api/admin/shipments/{tracking_number}/status",
            post(handlers::update_shipment_status),
        )
        .with_state(service)
}

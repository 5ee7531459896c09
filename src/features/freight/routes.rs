use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::freight::handlers;
use crate::features::freight::services::{FreightService, RateTableService};

/// Create public routes for the freight feature
pub fn routes(service: Arc<FreightService>) -> Router {
    Router::new()
        .route("/api/freight/zone", get(handlers::get_zone))
        .route("/api/freight/quote", post(handlers::create_quote))
        .route("/api/freight/options", post(handlers::list_shipping_options))
        .with_state(service)
}

/// Create admin routes for freight rate management (admin only)
pub fn admin_routes(rate_table: Arc<RateTableService>) -> Router {
    Router::new()
        .route("/api/admin/freight/rates", get(handlers::list_rates))
        .route(
            "/api/admin/freight/rates/reload",
            post(handlers::reload_rates),
        )
        .route(
            "/api/admin/freight/rates/{zone}",
            get(handlers::get_rate).put(handlers::update_rate),
        )
        .route("/api/admin/freight/export", get(handlers::export_rates))
        .with_state(rate_table)
}

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::couriers::handlers;
use crate::features::couriers::CourierService;

/// Create public routes for courier price comparison
pub fn routes(service: Arc<CourierService>) -> Router {
    Router::new()
        .route(
            "/api/freight/couriers/quote",
            post(handlers::compare_courier_quotes),
        )
        .with_state(service)
}

/// Create admin routes for the courier registry (admin only)
pub fn admin_routes(service: Arc<CourierService>) -> Router {
    Router::new()
        .route(
            "/api/admin/couriers",
            get(handlers::list_couriers).post(handlers::create_courier),
        )
        .route(
            "/api/admin/couriers/{id}",
            get(handlers::get_courier)
                .put(handlers::update_courier)
                .delete(handlers::delete_courier),
        )
        .with_state(service)
}

use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::cart::handlers;
use crate::features::freight::services::FreightService;

/// Create routes for the cart feature
///
/// Note: This feature is public (no authentication required)
pub fn routes(service: Arc<FreightService>) -> Router {
    Router::new()
        .route("/api/cart/totals", post(handlers::calculate_totals))
        .with_state(service)
}

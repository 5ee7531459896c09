use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::checkout::handlers;
use crate::features::checkout::CheckoutService;

/// Create routes for the checkout feature
///
/// Note: This feature is public (no authentication required)
pub fn routes(service: Arc<CheckoutService>) -> Router {
    Router::new()
        .route("/api/checkout", post(handlers::checkout))
        .with_state(service)
}

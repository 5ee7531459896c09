//! Courier shipments, their tracking numbers and status history.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/freight/track/{tracking_number}` | Track a shipment |
//! | GET/POST | `/api/admin/shipments` | List recent or book shipments (admin) |
//! | POST | `/api/admin/shipments/{tracking_number}/status` | Advance a shipment's status (admin) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ShipmentService;

//! Courier partners, their per-zone rates and price comparison.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/freight/couriers/quote` | Compare courier prices for a shipment |
//! | GET/POST | `/api/admin/couriers` | List or add couriers (admin) |
//! | GET/PUT/DELETE | `/api/admin/couriers/{id}` | Read, replace or remove a courier (admin) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::CourierService;

//! Shipping zones, the admin-editable rate table and shipping quotes.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/freight/zone` | Resolve the zone for a country pair |
//! | POST | `/api/freight/quote` | Shipping calculator quote |
//! | POST | `/api/freight/options` | Checkout shipping options for a cart |
//! | GET | `/api/admin/freight/rates` | List zone rates (admin) |
//! | GET/PUT | `/api/admin/freight/rates/{zone}` | Read or replace a zone rate (admin) |
//! | POST | `/api/admin/freight/rates/reload` | Reload rates from the settings sheet (admin) |
//! | GET | `/api/admin/freight/export` | Export freight data (admin) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{FreightService, RateTableService};

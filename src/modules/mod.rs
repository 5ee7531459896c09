//! Modules layer - Infrastructure components for external integrations
//!
//! Contains clients for the spreadsheet-backed settings and order API.

pub mod sheets;

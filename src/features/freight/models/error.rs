use thiserror::Error;

use crate::core::error::AppError;

/// Errors raised by the freight calculation core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FreightError {
    /// Malformed numeric input (negative weight, declared value or rate field)
    #[error("{0}")]
    Validation(String),

    /// Lookup of a zone that was never registered in the rate table
    #[error("{0}")]
    NotFound(String),

    /// Rate write based on a stale version of the entry
    #[error("{0}")]
    Conflict(String),
}

impl From<FreightError> for AppError {
    fn from(err: FreightError) -> Self {
        match err {
            FreightError::Validation(msg) => AppError::Validation(msg),
            FreightError::NotFound(msg) => AppError::NotFound(msg),
            FreightError::Conflict(msg) => AppError::Conflict(msg),
        }
    }
}

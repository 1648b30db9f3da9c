//! Catalog error types.

use thiserror::Error;

/// Errors raised by the dashboard glue around the catalog engine.
///
/// The engine functions themselves (code generation, search, grouping,
/// formatting) never fail.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Product not found in the current snapshot.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Form input rejected.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Event not allowed in the current dashboard state.
    #[error("Invalid dashboard transition: {event} while {state}")]
    InvalidTransition { event: String, state: String },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::SerializationError(e.to_string())
    }
}

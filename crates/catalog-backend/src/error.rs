//! Backend error types.

use catalog_core::CatalogError;
use thiserror::Error;

/// Errors reported by the collaborators.
///
/// The dashboard only needs pass/fail; the variants exist for logs and
/// for callers that want to react to a specific failure.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Record not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Store rejected the write.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Object storage rejected the upload.
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    /// Sign-in rejected.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Operation needs a signed-in user.
    #[error("Not signed in")]
    Unauthorized,

    /// Catalog-level failure (validation, bad transition).
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl From<serde_json::Error> for BackendError {
    fn from(e: serde_json::Error) -> Self {
        BackendError::Catalog(CatalogError::from(e))
    }
}

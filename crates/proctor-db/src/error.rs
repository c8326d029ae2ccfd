//! Error types for proctor-db.

use proctor_core::validation::ValidationError;
use thiserror::Error;

/// Errors from session store operations (the storage error class).
///
/// Backend failures are surfaced as-is: the store never retries and never
/// falls back per call.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A SQL query failed or returned data that cannot be decoded.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB, operation not
    /// available in the active mode).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// The record was rejected before reaching storage.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Errors returned across the repository boundary.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The active backend failed.
    #[error("Storage error: {0}")]
    Storage(StoreError),

    /// The submitted record violates a session invariant.
    #[error("Validation error: {0}")]
    Validation(ValidationError),

    /// No session matches the id under either resolution path.
    #[error("Session not found: {id}")]
    NotFound { id: String },
}

impl From<StoreError> for RepositoryError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Validation(v) => Self::Validation(v),
            other => Self::Storage(other),
        }
    }
}

//! Error types for the backend layer.

use strata_model::ModelError;
use thiserror::Error;

/// Result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;

/// Errors that can occur in backend operations.
#[derive(Debug, Error)]
pub enum BackendError {
    /// No record exists at the given identity.
    #[error("no record found at '{0}'")]
    NotFound(String),

    /// The requested adapter alias was never registered.
    #[error("Unknown backend alias: '{0}'")]
    UnknownAlias(String),

    /// An operation requiring an assigned identity was called on a record
    /// without one.
    #[error("record has no identity: {0}")]
    MissingIdentity(String),

    /// A model-layer failure surfaced through a backend operation.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Adapter-specific failure, wrapping the underlying message.
    #[error("adapter error: {0}")]
    Adapter(String),
}

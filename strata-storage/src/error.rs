//! Error types for the file storage layer.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in file storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No file exists at the given path.
    #[error("no file found at '{0}'")]
    NotFound(String),

    /// The requested storage alias was never registered.
    #[error("Unknown storage alias: '{0}'")]
    UnknownAlias(String),

    /// Wrapped error message from the underlying storage provider.
    #[error("provider error: {0}")]
    Provider(String),
}

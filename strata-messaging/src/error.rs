//! Error types for the messaging and queue layers.

use thiserror::Error;

/// Result type for messaging operations.
pub type MessagingResult<T> = Result<T, MessagingError>;

/// Errors that can occur when sending messages.
#[derive(Debug, Error)]
pub enum MessagingError {
    /// The requested messager alias was never registered.
    #[error("Unknown messager alias: '{0}'")]
    UnknownAlias(String),

    /// The recipient lacks the address the channel needs (email for email,
    /// phone for text).
    #[error("recipient has no usable address for {0}")]
    MissingAddress(String),

    /// Wrapped error message from the underlying messaging provider.
    #[error("provider error: {0}")]
    Provider(String),
}

/// Result type for queue operations.
pub type QueueResult<T> = Result<T, QueueError>;

/// Errors that can occur in queue operations.
#[derive(Debug, Error)]
pub enum QueueError {
    /// The requested queue alias was never registered.
    #[error("Unknown queue alias: '{0}'")]
    UnknownAlias(String),

    /// Wrapped error message from the underlying queue provider.
    #[error("provider error: {0}")]
    Provider(String),
}

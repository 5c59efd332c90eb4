//! Error types for the authentication layer.

use strata_model::ModelError;
use thiserror::Error;

/// Result type for auth operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Errors raised by auth adapters. Provider-specific failures are wrapped,
/// never retried here: retry policy belongs to the caller.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Registration conflict on an already-known login.
    #[error("user already exists: {0}")]
    AlreadyRegistered(String),

    /// No registered user matches the given login.
    #[error("user not found: {0}")]
    UnknownUser(String),

    /// Credential verification failed.
    #[error("invalid credentials for {0}")]
    InvalidCredentials(String),

    /// The presented token or refresh token is unknown or expired.
    #[error("invalid token")]
    InvalidToken,

    /// The requested provider alias was never registered.
    #[error("Unknown auth alias: '{0}'")]
    UnknownAlias(String),

    /// Wrapped error message from the underlying identity provider.
    #[error("provider error: {0}")]
    Provider(String),

    /// A model-layer failure surfaced through an auth operation.
    #[error(transparent)]
    Model(#[from] ModelError),
}

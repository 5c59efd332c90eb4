//! Error types for the model layer.

use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors that can occur while building or mutating records.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A value violated one of its property's validation rules.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Field access on a property name the schema does not declare.
    #[error("unknown property: '{0}'")]
    UnknownProperty(String),

    /// A schema descriptor carried an unrecognized type tag.
    #[error("unknown property type `{0}`")]
    UnknownType(String),

    /// A schema descriptor is missing a field its type requires.
    #[error("missing descriptor field `{field}` on property '{property}'")]
    MissingField { property: String, field: String },

    /// Two schema entries share the same name.
    #[error("duplicate property name: '{0}'")]
    DuplicateProperty(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

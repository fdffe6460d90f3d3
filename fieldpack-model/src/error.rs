//! Error types for schema parsing and validation.

use thiserror::Error;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised while reading or checking a model declaration.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The model declaration has the wrong shape.
    #[error("invalid model config: {0}")]
    InvalidConfig(String),

    /// A field declaration could not be understood.
    #[error("invalid field '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    /// Two fields in one model share a name.
    #[error("duplicate field '{0}'")]
    DuplicateField(String),

    /// A field name is not a valid property path.
    #[error(transparent)]
    InvalidPath(#[from] fieldpack_types::Error),

    /// JSON (de)serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

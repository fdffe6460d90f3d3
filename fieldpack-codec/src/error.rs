//! Error types for the codec engine.

use fieldpack_model::SchemaError;
use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while registering models or encoding/decoding records.
#[derive(Debug, Error)]
pub enum CodecError {
    /// No model is registered under this name.
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// A model with this name is already registered.
    #[error("model already registered: {0}")]
    DuplicateModel(String),

    /// The blob holds a different number of values than the model has fields.
    #[error("field count mismatch for model '{model}': expected {expected}, got {actual}")]
    FieldCountMismatch {
        model: String,
        expected: usize,
        actual: usize,
    },

    /// A list field held something other than a sequence.
    #[error("field '{field}' is a list but holds a {found} value")]
    ExpectedList { field: String, found: &'static str },

    /// A transform was handed a value it cannot operate on.
    #[error("'{kind}' transform expected {expected}, got {found}")]
    TypeMismatch {
        kind: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A record value failed its field's validity predicate.
    #[error("invalid value for field '{field}' of model '{model}': expected {kind}, got {found}")]
    InvalidValue {
        model: String,
        field: String,
        kind: String,
        found: &'static str,
    },

    /// A field declaration cannot be bound to a transform.
    #[error("cannot bind field '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    /// Text is not valid base-58.
    #[error("invalid base58 text: {0}")]
    InvalidBase58(#[from] bs58::decode::Error),

    /// Bytes are MessagePack but not the shape a model blob must have.
    #[error("malformed blob: {0}")]
    Malformed(String),

    /// A wire integer does not fit in an `i64`.
    #[error("integer out of range: {0}")]
    IntegerOutOfRange(u64),

    /// MessagePack encoding failed.
    #[error("msgpack encode error: {0}")]
    Pack(#[from] rmpv::encode::Error),

    /// MessagePack decoding failed (truncated or invalid bytes).
    #[error("msgpack decode error: {0}")]
    Unpack(#[from] rmpv::decode::Error),

    /// No class is registered under this key.
    #[error("class not registered: {0}")]
    UnknownClass(String),

    /// A class key holds the wrong kind of class.
    #[error("class '{key}' is not a {expected} class")]
    ClassMismatch { key: String, expected: &'static str },

    /// A foreign field outlived the engine that owns its model registry.
    #[error("model registry is no longer available")]
    RegistryDropped,

    /// Schema declaration error.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

//! Per-field transforms between logical and wire values.

use crate::error::{CodecError, CodecResult};
use fieldpack_model::ScalarKind;
use fieldpack_types::Value;
use std::fmt;

/// A codec unit applied to one scalar value of a field.
///
/// Implementors provide the type-specific halves (`encode_value`,
/// `decode_value`). Callers use [`encode`](Self::encode) and
/// [`decode`](Self::decode), which let nil through untouched before the
/// type-specific code ever runs.
pub trait FieldTransform: fmt::Debug + Send + Sync {
    /// The kind name this transform was bound under (e.g. `"bs58"`).
    fn kind(&self) -> &str;

    /// Whether `candidate` is an acceptable logical value.
    ///
    /// Checked by [`Model::validate`](crate::Model::validate), never by
    /// `encode` itself.
    fn is_valid(&self, candidate: &Value) -> bool {
        let _ = candidate;
        true
    }

    /// Forward transform for a non-nil logical value.
    fn encode_value(&self, value: &Value) -> CodecResult<Value>;

    /// Inverse transform for a non-nil wire value.
    fn decode_value(&self, value: Value) -> CodecResult<Value>;

    /// Logical → wire. Nil passes through.
    fn encode(&self, value: &Value) -> CodecResult<Value> {
        if value.is_nil() {
            return Ok(Value::Nil);
        }
        self.encode_value(value)
    }

    /// Wire → logical. Nil passes through.
    fn decode(&self, value: Value) -> CodecResult<Value> {
        if value.is_nil() {
            return Ok(value);
        }
        self.decode_value(value)
    }
}

/// Pass-through transform for fields with no codec of their own.
///
/// The scalar kind only drives [`is_valid`](FieldTransform::is_valid).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityTransform {
    kind: ScalarKind,
}

impl IdentityTransform {
    #[must_use]
    pub const fn new(kind: ScalarKind) -> Self {
        Self { kind }
    }

    /// Identity over any value; used for untyped fields.
    #[must_use]
    pub const fn any() -> Self {
        Self::new(ScalarKind::Any)
    }

    #[must_use]
    pub const fn scalar_kind(&self) -> ScalarKind {
        self.kind
    }
}

impl Default for IdentityTransform {
    fn default() -> Self {
        Self::any()
    }
}

impl FieldTransform for IdentityTransform {
    fn kind(&self) -> &str {
        self.kind.as_str()
    }

    fn is_valid(&self, candidate: &Value) -> bool {
        self.kind.accepts(candidate)
    }

    fn encode_value(&self, value: &Value) -> CodecResult<Value> {
        Ok(value.clone())
    }

    fn decode_value(&self, value: Value) -> CodecResult<Value> {
        Ok(value)
    }
}

/// Base-58 text on the logical side, raw bytes on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bs58Transform;

impl Bs58Transform {
    pub const KIND: &'static str = "bs58";
}

impl FieldTransform for Bs58Transform {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn is_valid(&self, candidate: &Value) -> bool {
        matches!(candidate, Value::Str(_))
    }

    fn encode_value(&self, value: &Value) -> CodecResult<Value> {
        match value {
            Value::Str(text) => Ok(Value::Bytes(bs58::decode(text).into_vec()?)),
            other => Err(CodecError::TypeMismatch {
                kind: Self::KIND.into(),
                expected: "string",
                found: other.kind_name(),
            }),
        }
    }

    fn decode_value(&self, value: Value) -> CodecResult<Value> {
        match value {
            Value::Bytes(bytes) => Ok(Value::Str(bs58::encode(bytes).into_string())),
            other => Err(CodecError::TypeMismatch {
                kind: Self::KIND.into(),
                expected: "bytes",
                found: other.kind_name(),
            }),
        }
    }
}

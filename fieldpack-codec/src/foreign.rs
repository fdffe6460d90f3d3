//! Fields whose value is a whole record of another model.

use crate::error::{CodecError, CodecResult};
use crate::model::Model;
use crate::registry::ModelRegistry;
use crate::transform::FieldTransform;
use fieldpack_model::FieldSpec;
use fieldpack_types::Value;
use std::sync::{Arc, Weak};

/// Encodes a nested record with the target model's own encoder.
///
/// The wire value is the nested blob as bytes. The target is looked up by
/// name on every call, so it may be registered after the referring model.
/// Reference cycles in the data are not detected.
#[derive(Debug, Clone)]
pub struct ForeignTransform {
    target: String,
    models: Weak<ModelRegistry>,
}

impl ForeignTransform {
    pub const KIND: &'static str = FieldSpec::FOREIGN;

    pub fn new(target: impl Into<String>, models: Weak<ModelRegistry>) -> Self {
        Self {
            target: target.into(),
            models,
        }
    }

    /// Name of the referenced model.
    pub fn target(&self) -> &str {
        &self.target
    }

    fn resolve(&self) -> CodecResult<Arc<Model>> {
        self.models
            .upgrade()
            .ok_or(CodecError::RegistryDropped)?
            .get(&self.target)
    }
}

impl FieldTransform for ForeignTransform {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn is_valid(&self, candidate: &Value) -> bool {
        matches!(candidate, Value::Map(_))
            && self.resolve().is_ok_and(|model| model.is_valid(candidate))
    }

    fn encode_value(&self, value: &Value) -> CodecResult<Value> {
        self.resolve()?.encode(value).map(Value::Bytes)
    }

    fn decode_value(&self, value: Value) -> CodecResult<Value> {
        Ok(self.resolve()?.decode(&value)?.unwrap_or_default())
    }
}

//! Registrable classes: the model codec and the field transform factories.
//!
//! Keys follow the `model.<name>` / `field.<kind>` convention. An engine
//! starts from [`ClassRegistry::with_defaults`] and merges caller overrides
//! on top, so any default can be replaced without touching the engine.

use crate::error::{CodecError, CodecResult};
use crate::foreign::ForeignTransform;
use crate::model::{ModelCodec, PositionalCodec};
use crate::registry::ModelRegistry;
use crate::transform::{Bs58Transform, FieldTransform};
use fieldpack_model::FieldSpec;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};

/// Key of the model codec used for every registered model.
pub const MODEL_DEFAULT: &str = "model.default";
/// Key of the base-58 field transform.
pub const FIELD_BS58: &str = "field.bs58";
/// Key of the foreign reference field transform.
pub const FIELD_FOREIGN: &str = "field.foreign";

/// Registry key for a field kind.
pub fn field_key(kind: &str) -> String {
    format!("field.{kind}")
}

/// Builds the transform for one field at model registration time.
pub type FieldFactory =
    Arc<dyn Fn(&FieldBinding<'_>) -> CodecResult<Arc<dyn FieldTransform>> + Send + Sync>;

/// What a field factory gets to see about the field it is binding.
pub struct FieldBinding<'a> {
    field: &'a str,
    spec: &'a FieldSpec,
    models: &'a Weak<ModelRegistry>,
}

impl<'a> FieldBinding<'a> {
    pub fn new(field: &'a str, spec: &'a FieldSpec, models: &'a Weak<ModelRegistry>) -> Self {
        Self { field, spec, models }
    }

    /// Name of the field being bound.
    pub fn field(&self) -> &str {
        self.field
    }

    pub fn spec(&self) -> &FieldSpec {
        self.spec
    }

    /// Declared kind name, if any.
    pub fn kind(&self) -> Option<&str> {
        self.spec.kind_name()
    }

    /// The model a foreign field points at. See [`FieldSpec::target_model`].
    pub fn target_model(&self) -> Option<&str> {
        self.spec.target_model()
    }

    /// Handle to the owning engine's model registry.
    pub fn models(&self) -> Weak<ModelRegistry> {
        self.models.clone()
    }
}

/// A registrable class.
#[derive(Clone)]
pub enum Class {
    Model(Arc<dyn ModelCodec>),
    Field(FieldFactory),
}

impl Class {
    pub fn model(codec: impl ModelCodec + 'static) -> Self {
        Class::Model(Arc::new(codec))
    }

    pub fn field<F>(factory: F) -> Self
    where
        F: Fn(&FieldBinding<'_>) -> CodecResult<Arc<dyn FieldTransform>> + Send + Sync + 'static,
    {
        Class::Field(Arc::new(factory))
    }

    /// A field class that hands every field the same transform.
    pub fn shared_field(transform: impl FieldTransform + 'static) -> Self {
        let transform: Arc<dyn FieldTransform> = Arc::new(transform);
        Class::field(move |_| Ok(Arc::clone(&transform)))
    }

    pub fn is_model(&self) -> bool {
        matches!(self, Class::Model(_))
    }

    pub fn is_field(&self) -> bool {
        matches!(self, Class::Field(_))
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Class::Model(codec) => f.debug_tuple("Model").field(codec).finish(),
            Class::Field(_) => f.write_str("Field(<factory>)"),
        }
    }
}

fn foreign_factory(binding: &FieldBinding<'_>) -> CodecResult<Arc<dyn FieldTransform>> {
    let target = binding.target_model().ok_or_else(|| CodecError::InvalidField {
        field: binding.field().to_string(),
        reason: "foreign field has no target model".into(),
    })?;
    Ok(Arc::new(ForeignTransform::new(target, binding.models())))
}

/// Class lookup by key.
#[derive(Debug, Clone, Default)]
pub struct ClassRegistry {
    classes: HashMap<String, Class>,
}

impl ClassRegistry {
    /// An empty registry, typically used to collect overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in classes: positional model codec, base-58 and foreign fields.
    pub fn with_defaults() -> Self {
        Self::new()
            .with(MODEL_DEFAULT, Class::model(PositionalCodec))
            .with(FIELD_BS58, Class::shared_field(Bs58Transform))
            .with(FIELD_FOREIGN, Class::field(foreign_factory))
    }

    /// Adds or replaces a class (builder style).
    #[must_use]
    pub fn with(mut self, key: &str, class: Class) -> Self {
        self.insert(key, class);
        self
    }

    /// Adds or replaces a class, returning the previous one.
    pub fn insert(&mut self, key: &str, class: Class) -> Option<Class> {
        self.classes.insert(key.to_string(), class)
    }

    /// Registers a field factory under `field.<kind>`.
    pub fn register_field<F>(&mut self, kind: &str, factory: F) -> Option<Class>
    where
        F: Fn(&FieldBinding<'_>) -> CodecResult<Arc<dyn FieldTransform>> + Send + Sync + 'static,
    {
        self.insert(&field_key(kind), Class::field(factory))
    }

    pub fn get(&self, key: &str) -> Option<&Class> {
        self.classes.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.classes.contains_key(key)
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.classes.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Copies every class from `overrides` in, replacing existing keys.
    pub fn merge(&mut self, overrides: ClassRegistry) {
        self.classes.extend(overrides.classes);
    }

    /// The factory registered for a field kind, if any.
    pub fn field_factory(&self, kind: &str) -> CodecResult<Option<&FieldFactory>> {
        let key = field_key(kind);
        match self.classes.get(&key) {
            None => Ok(None),
            Some(Class::Field(factory)) => Ok(Some(factory)),
            Some(Class::Model(_)) => Err(CodecError::ClassMismatch {
                key,
                expected: "field",
            }),
        }
    }

    /// The model codec registered under `model.default`.
    pub fn model_codec(&self) -> CodecResult<Arc<dyn ModelCodec>> {
        match self.classes.get(MODEL_DEFAULT) {
            Some(Class::Model(codec)) => Ok(Arc::clone(codec)),
            Some(Class::Field(_)) => Err(CodecError::ClassMismatch {
                key: MODEL_DEFAULT.to_string(),
                expected: "model",
            }),
            None => Err(CodecError::UnknownClass(MODEL_DEFAULT.to_string())),
        }
    }
}

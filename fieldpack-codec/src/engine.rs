//! The engine: model registration and named-model encode/decode.

use crate::class::{Class, ClassRegistry, FIELD_FOREIGN, FieldBinding, field_key};
use crate::error::{CodecError, CodecResult};
use crate::foreign::ForeignTransform;
use crate::model::{FieldDescriptor, Model};
use crate::registry::ModelRegistry;
use crate::transform::{FieldTransform, IdentityTransform};
use fieldpack_model::{EngineConfig, FieldSpec, ModelConfig, SchemaError};
use fieldpack_types::{PropertyPath, Value};
use std::sync::{Arc, Weak};
use tracing::debug;

/// Options for [`Engine::new`].
#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    /// Classes merged over the built-in defaults. Entries here win.
    pub classes: ClassRegistry,
}

impl EngineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides or adds a class.
    #[must_use]
    pub fn with_class(mut self, key: &str, class: Class) -> Self {
        self.classes.insert(key, class);
        self
    }

    /// Registers a transform shared by every field of `kind`.
    #[must_use]
    pub fn with_field_transform(self, kind: &str, transform: impl FieldTransform + 'static) -> Self {
        self.with_class(&field_key(kind), Class::shared_field(transform))
    }
}

/// Registers models and encodes/decodes records by model name.
///
/// Registration needs `&mut self`; encoding and decoding only read. Callers
/// that register while other threads encode must add their own lock.
#[derive(Debug)]
pub struct Engine {
    models: Arc<ModelRegistry>,
    classes: ClassRegistry,
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            models: Arc::new(ModelRegistry::new()),
            classes: ClassRegistry::with_defaults(),
        }
    }
}

impl Engine {
    /// Creates an engine and registers the given models in order.
    pub fn new<I, S>(models: I, options: EngineOptions) -> CodecResult<Self>
    where
        I: IntoIterator<Item = (S, ModelConfig)>,
        S: AsRef<str>,
    {
        let mut engine = Self::default();
        for key in options.classes.keys() {
            debug!(class = key, "Class override");
        }
        engine.classes.merge(options.classes);

        for (name, config) in models {
            engine.add_model(name.as_ref(), config)?;
        }
        Ok(engine)
    }

    /// Creates an engine from a parsed configuration.
    pub fn from_config(config: EngineConfig, options: EngineOptions) -> CodecResult<Self> {
        Self::new(config, options)
    }

    /// Creates an engine from a JSON document of model declarations.
    pub fn from_json_str(json: &str, options: EngineOptions) -> CodecResult<Self> {
        Self::from_config(EngineConfig::from_json_str(json)?, options)
    }

    /// Registers a model.
    ///
    /// Each field's transform is resolved once, here:
    /// 1. a class registered as `field.<kind>`,
    /// 2. else a built-in scalar kind (identity), or identity over anything
    ///    for an untyped field,
    /// 3. else the kind names another model and `field.foreign` binds a
    ///    reference to it.
    pub fn add_model(&mut self, name: &str, config: ModelConfig) -> CodecResult<Arc<Model>> {
        if name.is_empty() {
            return Err(SchemaError::InvalidConfig("model name is empty".into()).into());
        }
        if self.models.contains(name) {
            return Err(CodecError::DuplicateModel(name.to_string()));
        }
        config.validate()?;

        let codec = self.classes.model_codec()?;
        let registry = Arc::downgrade(&self.models);
        let fields = config
            .fields()
            .iter()
            .map(|(field, spec)| self.bind_field(field, spec, &registry))
            .collect::<CodecResult<Vec<_>>>()?;

        let model = Arc::new(Model::new(name, fields, codec));
        self.models.insert(Arc::clone(&model))?;
        debug!(model = name, fields = model.fields().len(), "Model registered");
        Ok(model)
    }

    fn bind_field(
        &self,
        field: &str,
        spec: &FieldSpec,
        registry: &Weak<ModelRegistry>,
    ) -> CodecResult<FieldDescriptor> {
        let path = PropertyPath::parse(field).map_err(SchemaError::from)?;
        let binding = FieldBinding::new(field, spec, registry);

        let registered = match spec.kind_name() {
            Some(kind) => self.classes.field_factory(kind)?,
            None => None,
        };
        let transform: Arc<dyn FieldTransform> = match (registered, spec.scalar_kind()) {
            (Some(factory), _) => factory(&binding)?,
            (None, Some(scalar)) => Arc::new(IdentityTransform::new(scalar)),
            (None, None) => {
                let factory = self
                    .classes
                    .field_factory(ForeignTransform::KIND)?
                    .ok_or_else(|| CodecError::UnknownClass(FIELD_FOREIGN.to_string()))?;
                factory(&binding)?
            }
        };

        Ok(FieldDescriptor::new(path, transform, spec.list))
    }

    /// Looks up a registered model.
    pub fn model(&self, name: &str) -> CodecResult<Arc<Model>> {
        self.models.get(name)
    }

    pub fn has_model(&self, name: &str) -> bool {
        self.models.contains(name)
    }

    /// Registered model names, sorted.
    pub fn model_names(&self) -> Vec<String> {
        self.models.names()
    }

    /// The merged class registry this engine binds fields with.
    pub fn classes(&self) -> &ClassRegistry {
        &self.classes
    }

    /// The model registry shared with foreign fields.
    pub fn registry(&self) -> &Arc<ModelRegistry> {
        &self.models
    }

    /// Encodes a record with the named model.
    pub fn encode(&self, name: &str, record: &Value) -> CodecResult<Vec<u8>> {
        self.models.get(name)?.encode(record)
    }

    /// Decodes with the named model. Non-binary input yields `Ok(None)`.
    pub fn decode(&self, name: &str, data: &Value) -> CodecResult<Option<Value>> {
        self.models.get(name)?.decode(data)
    }

    /// Decodes raw bytes with the named model.
    pub fn decode_bytes(&self, name: &str, blob: &[u8]) -> CodecResult<Value> {
        self.models.get(name)?.decode_bytes(blob)
    }

    /// Checks a record against the named model's validity predicates.
    pub fn validate(&self, name: &str, record: &Value) -> CodecResult<()> {
        self.models.get(name)?.validate(record)
    }
}

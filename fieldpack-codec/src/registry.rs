//! The name → model lookup shared by an engine and its foreign fields.

use crate::error::{CodecError, CodecResult};
use crate::model::Model;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Registered models keyed by name.
///
/// Written only while models are being added; every encode and decode reads
/// it. Foreign transforms hold a `Weak` handle to it so nested models resolve
/// through the same engine without a reference cycle.
#[derive(Debug, Default)]
pub struct ModelRegistry {
    models: RwLock<HashMap<String, Arc<Model>>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a model by name.
    pub fn get(&self, name: &str) -> CodecResult<Arc<Model>> {
        self.models
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .ok_or_else(|| CodecError::ModelNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.models
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Registered model names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .models
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.models.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Adds a model. Names are registered once.
    pub(crate) fn insert(&self, model: Arc<Model>) -> CodecResult<()> {
        let mut models = self.models.write().unwrap_or_else(PoisonError::into_inner);
        if models.contains_key(model.name()) {
            return Err(CodecError::DuplicateModel(model.name().to_string()));
        }
        models.insert(model.name().to_string(), model);
        Ok(())
    }
}

//! Engine-level configuration: the set of models to register at startup.

use crate::error::SchemaResult;
use crate::schema::ModelConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Model declarations keyed by model name.
///
/// Parsed from a JSON object such as
/// `{ "user": { "name": "string" }, "post": { "author": "user" } }`.
/// Registration order does not matter: references between models are
/// resolved by name when a record is encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EngineConfig {
    pub models: BTreeMap<String, ModelConfig>,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a model declaration (builder style).
    #[must_use]
    pub fn with_model(mut self, name: &str, config: ModelConfig) -> Self {
        self.models.insert(name.to_string(), config);
        self
    }

    /// Parses a JSON document of model declarations.
    pub fn from_json_str(json: &str) -> SchemaResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Converts an already-parsed JSON value.
    pub fn from_value(json: serde_json::Value) -> SchemaResult<Self> {
        Ok(serde_json::from_value(json)?)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl IntoIterator for EngineConfig {
    type Item = (String, ModelConfig);
    type IntoIter = std::collections::btree_map::IntoIter<String, ModelConfig>;

    fn into_iter(self) -> Self::IntoIter {
        self.models.into_iter()
    }
}

use crate::error::{SchemaError, SchemaResult};
use crate::kind::ScalarKind;
use fieldpack_types::PropertyPath;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashSet;

/// Declares one field of a model.
///
/// Accepted JSON forms:
/// - `"string"`: a kind name (scalar kind, registered field kind, or the
///   name of another model)
/// - `{ "list": "string" }`: a list whose elements are of that kind
/// - `{ "type": "bs58", "list": true }`: the long form
/// - `{ "type": "foreign", "model": "user" }`: explicit foreign target
/// - `{}`: no type at all; the field is stored as-is
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFieldSpec")]
pub struct FieldSpec {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub list: bool,
    /// Target model for a foreign field. Defaults to `kind`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl FieldSpec {
    /// Kind name of an explicit reference to another model.
    pub const FOREIGN: &'static str = "foreign";

    /// A single value of the named kind.
    pub fn of(kind: &str) -> Self {
        Self {
            kind: Some(kind.into()),
            ..Self::default()
        }
    }

    /// An ordered list of values of the named kind.
    pub fn list_of(kind: &str) -> Self {
        Self {
            kind: Some(kind.into()),
            list: true,
            model: None,
        }
    }

    /// A field with no declared type.
    pub fn untyped() -> Self {
        Self::default()
    }

    /// A reference to another model, resolved through the foreign field kind.
    pub fn reference(model: &str) -> Self {
        Self {
            kind: Some(Self::FOREIGN.into()),
            list: false,
            model: Some(model.into()),
        }
    }

    /// Marks the field as a list.
    #[must_use]
    pub fn into_list(mut self) -> Self {
        self.list = true;
        self
    }

    /// The declared kind name, if any.
    pub fn kind_name(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    /// The built-in scalar kind this field maps to, if any.
    ///
    /// Untyped fields map to [`ScalarKind::Any`].
    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        match self.kind.as_deref() {
            None => Some(ScalarKind::Any),
            Some(name) => ScalarKind::from_name(name),
        }
    }

    /// The model a foreign field points at.
    ///
    /// An explicit `model` wins. Otherwise the kind itself names the model,
    /// unless the kind is the bare `foreign` keyword.
    pub fn target_model(&self) -> Option<&str> {
        match (self.model.as_deref(), self.kind.as_deref()) {
            (Some(model), _) => Some(model),
            (None, Some(Self::FOREIGN)) | (None, None) => None,
            (None, kind) => kind,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFieldSpec {
    Kind(String),
    Detailed(RawFieldObject),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFieldObject {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    list: Option<RawList>,
    #[serde(default)]
    model: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawList {
    Flag(bool),
    Kind(String),
}

impl TryFrom<RawFieldSpec> for FieldSpec {
    type Error = String;

    fn try_from(raw: RawFieldSpec) -> Result<Self, Self::Error> {
        let spec = match raw {
            RawFieldSpec::Kind(kind) => FieldSpec::of(&kind),
            RawFieldSpec::Detailed(obj) => {
                let (kind, list) = match obj.list {
                    None => (obj.kind, false),
                    Some(RawList::Flag(flag)) => (obj.kind, flag),
                    Some(RawList::Kind(element)) => match obj.kind {
                        Some(kind) if kind != element => {
                            return Err(format!(
                                "type '{kind}' conflicts with list element type '{element}'"
                            ));
                        }
                        _ => (Some(element), true),
                    },
                };
                FieldSpec {
                    kind,
                    list,
                    model: obj.model,
                }
            }
        };
        if spec.kind.as_deref() == Some("") {
            return Err("type name is empty".into());
        }
        Ok(spec)
    }
}

/// The ordered field declarations of one model.
///
/// Field order is significant: it fixes the positional layout of every blob
/// encoded against the model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct ModelConfig {
    fields: Vec<(String, FieldSpec)>,
}

impl ModelConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field (builder style).
    #[must_use]
    pub fn field(mut self, name: &str, spec: FieldSpec) -> Self {
        self.push_field(name, spec);
        self
    }

    /// Appends a field.
    pub fn push_field(&mut self, name: &str, spec: FieldSpec) {
        self.fields.push((name.to_string(), spec));
    }

    /// Field declarations in layout order.
    pub fn fields(&self) -> &[(String, FieldSpec)] {
        &self.fields
    }

    /// Looks up a field declaration by name.
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, spec)| spec)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Parses a JSON model declaration, keeping field order.
    ///
    /// Both the shorthand `{ "name": "string", ... }` and the full
    /// `{ "fields": { ... } }` forms are accepted. An object whose only key
    /// is `fields` with an object value is always read as the full form.
    pub fn from_json(json: serde_json::Value) -> SchemaResult<Self> {
        let mut map = match json {
            serde_json::Value::Object(map) => map,
            other => {
                return Err(SchemaError::InvalidConfig(format!(
                    "expected an object, got {}",
                    json_kind(&other)
                )));
            }
        };

        let full_form = map.get("fields").is_some_and(serde_json::Value::is_object);
        if full_form {
            if let Some(other) = map.keys().find(|k| k.as_str() != "fields") {
                return Err(SchemaError::InvalidConfig(format!("unknown model option '{other}'")));
            }
            match map.remove("fields") {
                Some(serde_json::Value::Object(fields)) => map = fields,
                _ => return Err(SchemaError::InvalidConfig("'fields' must be an object".into())),
            }
        }

        let mut config = Self::new();
        for (name, raw) in map {
            let spec: FieldSpec =
                serde_json::from_value(raw).map_err(|e| SchemaError::InvalidField {
                    field: name.clone(),
                    reason: e.to_string(),
                })?;
            config.push_field(&name, spec);
        }
        config.validate()?;
        Ok(config)
    }

    /// Parses a JSON model declaration from a string.
    pub fn from_json_str(json: &str) -> SchemaResult<Self> {
        Self::from_json(serde_json::from_str(json)?)
    }

    /// Checks field names: valid paths, unique, and no field nested inside
    /// another field's path.
    pub fn validate(&self) -> SchemaResult<()> {
        let mut seen = HashSet::new();
        let mut paths = Vec::with_capacity(self.fields.len());
        for (name, spec) in &self.fields {
            if !seen.insert(name.as_str()) {
                return Err(SchemaError::DuplicateField(name.clone()));
            }
            if spec.kind.as_deref() == Some("") {
                return Err(SchemaError::InvalidField {
                    field: name.clone(),
                    reason: "type name is empty".into(),
                });
            }
            paths.push(PropertyPath::parse(name)?);
        }

        for (i, a) in paths.iter().enumerate() {
            for b in &paths[i + 1..] {
                let (short, long) = if a.segments().len() <= b.segments().len() {
                    (a, b)
                } else {
                    (b, a)
                };
                if long.segments().starts_with(short.segments()) {
                    return Err(SchemaError::InvalidField {
                        field: long.to_string(),
                        reason: format!("nested inside field '{short}'"),
                    });
                }
            }
        }
        Ok(())
    }
}

impl TryFrom<serde_json::Value> for ModelConfig {
    type Error = SchemaError;

    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        Self::from_json(json)
    }
}

impl Serialize for ModelConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("fields", &FieldList(&self.fields))?;
        map.end()
    }
}

struct FieldList<'a>(&'a [(String, FieldSpec)]);

impl Serialize for FieldList<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, spec) in self.0 {
            map.serialize_entry(name, spec)?;
        }
        map.end()
    }
}

fn json_kind(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

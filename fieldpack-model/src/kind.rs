use fieldpack_types::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Built-in field kinds that carry no codec behaviour.
///
/// Fields of these kinds are stored on the wire exactly as they appear in
/// the record. The kind only decides which logical values are valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
    String,
    Number,
    Integer,
    Boolean,
    Bytes,
    Object,
    Array,
    /// Accepts anything. Used for fields declared without a type.
    Any,
}

impl ScalarKind {
    pub const ALL: [ScalarKind; 8] = [
        ScalarKind::String,
        ScalarKind::Number,
        ScalarKind::Integer,
        ScalarKind::Boolean,
        ScalarKind::Bytes,
        ScalarKind::Object,
        ScalarKind::Array,
        ScalarKind::Any,
    ];

    /// Looks up a kind by its declared name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Number => "number",
            ScalarKind::Integer => "integer",
            ScalarKind::Boolean => "boolean",
            ScalarKind::Bytes => "bytes",
            ScalarKind::Object => "object",
            ScalarKind::Array => "array",
            ScalarKind::Any => "any",
        }
    }

    /// Whether `value` has the shape this kind describes.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            ScalarKind::String => matches!(value, Value::Str(_)),
            ScalarKind::Number => matches!(value, Value::Int(_) | Value::Float(_)),
            ScalarKind::Integer => matches!(value, Value::Int(_)),
            ScalarKind::Boolean => matches!(value, Value::Bool(_)),
            ScalarKind::Bytes => matches!(value, Value::Bytes(_)),
            ScalarKind::Object => matches!(value, Value::Map(_)),
            ScalarKind::Array => matches!(value, Value::List(_)),
            ScalarKind::Any => true,
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Positional MessagePack packing.
//!
//! A model blob is a single MessagePack array holding one element per
//! field, in field order. No names or type tags are written, so the bytes
//! only make sense against the model that produced them.

use crate::error::{CodecError, CodecResult};
use fieldpack_types::{Map, Value};

/// Packs an ordered sequence of wire values into one MessagePack array.
pub fn pack(values: Vec<Value>) -> CodecResult<Vec<u8>> {
    let array = rmpv::Value::Array(values.into_iter().map(to_msgpack).collect());
    let mut buf = Vec::new();
    rmpv::encode::write_value(&mut buf, &array)?;
    Ok(buf)
}

/// Unpacks a MessagePack array into its ordered elements.
///
/// The bytes must hold exactly one array and nothing after it.
pub fn unpack(bytes: &[u8]) -> CodecResult<Vec<Value>> {
    let mut rd = bytes;
    let value = rmpv::decode::read_value(&mut rd)?;
    if !rd.is_empty() {
        return Err(CodecError::Malformed(format!(
            "{} trailing bytes after packed array",
            rd.len()
        )));
    }
    match value {
        rmpv::Value::Array(items) => items.into_iter().map(from_msgpack).collect(),
        other => Err(CodecError::Malformed(format!(
            "expected a packed array, got {}",
            msgpack_kind(&other)
        ))),
    }
}

/// Converts a value tree into its MessagePack form. Map keys keep their order.
pub fn to_msgpack(value: Value) -> rmpv::Value {
    match value {
        Value::Nil => rmpv::Value::Nil,
        Value::Bool(b) => rmpv::Value::Boolean(b),
        Value::Int(n) => rmpv::Value::from(n),
        Value::Float(n) => rmpv::Value::F64(n),
        Value::Str(s) => rmpv::Value::from(s),
        Value::Bytes(b) => rmpv::Value::Binary(b),
        Value::List(items) => rmpv::Value::Array(items.into_iter().map(to_msgpack).collect()),
        Value::Map(map) => rmpv::Value::Map(
            map.into_iter()
                .map(|(k, v)| (rmpv::Value::from(k), to_msgpack(v)))
                .collect(),
        ),
    }
}

/// Converts a MessagePack value back into a value tree.
pub fn from_msgpack(value: rmpv::Value) -> CodecResult<Value> {
    Ok(match value {
        rmpv::Value::Nil => Value::Nil,
        rmpv::Value::Boolean(b) => Value::Bool(b),
        rmpv::Value::Integer(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            // anything outside i64 is a u64 above i64::MAX
            None => return Err(CodecError::IntegerOutOfRange(n.as_u64().unwrap_or(u64::MAX))),
        },
        rmpv::Value::F32(n) => Value::Float(f64::from(n)),
        rmpv::Value::F64(n) => Value::Float(n),
        rmpv::Value::String(s) => match s.into_str() {
            Some(s) => Value::Str(s),
            None => return Err(CodecError::Malformed("string is not valid UTF-8".into())),
        },
        rmpv::Value::Binary(b) => Value::Bytes(b),
        rmpv::Value::Array(items) => {
            Value::List(items.into_iter().map(from_msgpack).collect::<CodecResult<_>>()?)
        }
        rmpv::Value::Map(entries) => {
            let mut map = Map::with_capacity(entries.len());
            for (k, v) in entries {
                let key = match k {
                    rmpv::Value::String(s) => s.into_str().ok_or_else(|| {
                        CodecError::Malformed("map key is not valid UTF-8".into())
                    })?,
                    other => {
                        return Err(CodecError::Malformed(format!(
                            "map key must be a string, got {}",
                            msgpack_kind(&other)
                        )));
                    }
                };
                map.insert(key, from_msgpack(v)?);
            }
            Value::Map(map)
        }
        rmpv::Value::Ext(tag, _) => {
            return Err(CodecError::Malformed(format!("unsupported extension type {tag}")));
        }
    })
}

fn msgpack_kind(value: &rmpv::Value) -> &'static str {
    match value {
        rmpv::Value::Nil => "nil",
        rmpv::Value::Boolean(_) => "boolean",
        rmpv::Value::Integer(_) => "integer",
        rmpv::Value::F32(_) | rmpv::Value::F64(_) => "float",
        rmpv::Value::String(_) => "string",
        rmpv::Value::Binary(_) => "binary",
        rmpv::Value::Array(_) => "array",
        rmpv::Value::Map(_) => "map",
        rmpv::Value::Ext(..) => "extension",
    }
}

//! Models: ordered field descriptors plus the codec that lays them out.

use crate::error::{CodecError, CodecResult};
use crate::transform::FieldTransform;
use crate::wire;
use fieldpack_types::{PropertyPath, Value};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

static NIL: Value = Value::Nil;

/// One field of a registered model, with its transform bound.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    path: PropertyPath,
    transform: Arc<dyn FieldTransform>,
    is_list: bool,
}

impl FieldDescriptor {
    pub fn new(path: PropertyPath, transform: Arc<dyn FieldTransform>, is_list: bool) -> Self {
        Self {
            path,
            transform,
            is_list,
        }
    }

    /// The field name, which is also its property path.
    pub fn name(&self) -> &str {
        self.path.as_str()
    }

    pub fn path(&self) -> &PropertyPath {
        &self.path
    }

    pub fn transform(&self) -> &Arc<dyn FieldTransform> {
        &self.transform
    }

    pub fn kind(&self) -> &str {
        self.transform.kind()
    }

    pub fn is_list(&self) -> bool {
        self.is_list
    }

    /// Reads this field's logical value from a record. Missing paths read as nil.
    pub fn read<'a>(&self, record: &'a Value) -> &'a Value {
        record.get_path(&self.path).unwrap_or(&NIL)
    }

    /// Logical → wire. List fields transform each element in order.
    pub fn encode(&self, logical: &Value) -> CodecResult<Value> {
        if !self.is_list {
            return self.transform.encode(logical);
        }
        match logical {
            Value::Nil => Ok(Value::Nil),
            Value::List(items) => items
                .iter()
                .map(|item| self.transform.encode(item))
                .collect::<CodecResult<Vec<_>>>()
                .map(Value::List),
            other => Err(self.expected_list(other)),
        }
    }

    /// Wire → logical. List fields transform each element in order.
    pub fn decode(&self, wire: Value) -> CodecResult<Value> {
        if !self.is_list {
            return self.transform.decode(wire);
        }
        match wire {
            Value::Nil => Ok(Value::Nil),
            Value::List(items) => items
                .into_iter()
                .map(|item| self.transform.decode(item))
                .collect::<CodecResult<Vec<_>>>()
                .map(Value::List),
            other => Err(self.expected_list(&other)),
        }
    }

    /// Applies the transform's validity predicate. Nil is always accepted;
    /// list fields must hold a sequence whose non-nil elements are valid.
    pub fn is_valid(&self, logical: &Value) -> bool {
        match (self.is_list, logical) {
            (_, Value::Nil) => true,
            (true, Value::List(items)) => items
                .iter()
                .all(|item| item.is_nil() || self.transform.is_valid(item)),
            (true, _) => false,
            (false, value) => self.transform.is_valid(value),
        }
    }

    fn expected_list(&self, found: &Value) -> CodecError {
        CodecError::ExpectedList {
            field: self.name().to_string(),
            found: found.kind_name(),
        }
    }
}

/// Lays out a model's field values as bytes and reads them back.
///
/// The engine registers [`PositionalCodec`] under `model.default`; callers
/// may substitute their own.
pub trait ModelCodec: fmt::Debug + Send + Sync {
    fn encode(&self, model: &Model, record: &Value) -> CodecResult<Vec<u8>>;

    fn decode(&self, model: &Model, blob: &[u8]) -> CodecResult<Value>;
}

/// The default layout: one MessagePack array, one element per field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PositionalCodec;

impl ModelCodec for PositionalCodec {
    fn encode(&self, model: &Model, record: &Value) -> CodecResult<Vec<u8>> {
        let values = model
            .fields()
            .iter()
            .map(|field| field.encode(field.read(record)))
            .collect::<CodecResult<Vec<_>>>()?;
        wire::pack(values)
    }

    fn decode(&self, model: &Model, blob: &[u8]) -> CodecResult<Value> {
        let values = wire::unpack(blob)?;
        if values.len() != model.fields().len() {
            return Err(CodecError::FieldCountMismatch {
                model: model.name().to_string(),
                expected: model.fields().len(),
                actual: values.len(),
            });
        }

        let mut record = Value::map();
        for (field, wire) in model.fields().iter().zip(values) {
            record.set_path(field.path(), field.decode(wire)?);
        }
        Ok(record)
    }
}

/// A registered model: name, ordered fields, and the codec that lays them out.
///
/// Immutable once built; field order is the positional layout.
#[derive(Debug)]
pub struct Model {
    name: String,
    fields: Vec<FieldDescriptor>,
    codec: Arc<dyn ModelCodec>,
}

impl Model {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDescriptor>, codec: Arc<dyn ModelCodec>) -> Self {
        Self {
            name: name.into(),
            fields,
            codec,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn codec(&self) -> &Arc<dyn ModelCodec> {
        &self.codec
    }

    /// Encodes a record into a blob.
    pub fn encode(&self, record: &Value) -> CodecResult<Vec<u8>> {
        let blob = self.codec.encode(self, record)?;
        trace!(model = %self.name, bytes = blob.len(), "Encoded record");
        Ok(blob)
    }

    /// Decodes a blob held in a value.
    ///
    /// Returns `Ok(None)` when `data` is not binary at all; that is a soft
    /// failure, not an error. Binary data that fails to decode is an error.
    pub fn decode(&self, data: &Value) -> CodecResult<Option<Value>> {
        match data.as_bytes() {
            Some(blob) => self.decode_bytes(blob).map(Some),
            None => {
                debug!(model = %self.name, found = data.kind_name(), "Decode input is not binary");
                Ok(None)
            }
        }
    }

    /// Decodes a blob.
    pub fn decode_bytes(&self, blob: &[u8]) -> CodecResult<Value> {
        trace!(model = %self.name, bytes = blob.len(), "Decoding record");
        self.codec.decode(self, blob)
    }

    /// Checks every field's value against its validity predicate.
    ///
    /// Encoding never calls this; it is for callers that want values checked
    /// before they are encoded.
    pub fn validate(&self, record: &Value) -> CodecResult<()> {
        for field in &self.fields {
            let value = field.read(record);
            if !field.is_valid(value) {
                return Err(CodecError::InvalidValue {
                    model: self.name.clone(),
                    field: field.name().to_string(),
                    kind: if field.is_list() {
                        format!("list of {}", field.kind())
                    } else {
                        field.kind().to_string()
                    },
                    found: value.kind_name(),
                });
            }
        }
        Ok(())
    }

    /// Whether every field's value passes its validity predicate.
    pub fn is_valid(&self, record: &Value) -> bool {
        self.validate(record).is_ok()
    }
}

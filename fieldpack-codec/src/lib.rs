//! Schema-driven positional binary encoding.
//!
//! A model is an ordered list of fields. Encoding a record reads each
//! field's value (by dotted property path), runs it through the field's
//! transform, and packs the results into one MessagePack array, in field
//! order, with no names or tags. Decoding reverses each step.
//!
//! - [`Engine`] — registers models and encodes/decodes by model name
//! - [`Model`] / [`FieldDescriptor`] — a registered model and its fields
//! - [`FieldTransform`] — the per-field codec contract, with
//!   [`IdentityTransform`], [`Bs58Transform`] and [`ForeignTransform`]
//! - [`ClassRegistry`] — the `model.default` / `field.<kind>` classes an
//!   engine binds fields with; callers override any entry
//!
//! ```
//! use fieldpack_codec::{Engine, EngineOptions};
//! use fieldpack_model::{FieldSpec, ModelConfig};
//! use fieldpack_types::Value;
//!
//! let config = ModelConfig::new().field("someField", FieldSpec::of("string"));
//! let engine = Engine::new([("someType", config)], EngineOptions::default()).unwrap();
//!
//! let record = Value::from_json_str(r#"{"someField": "testValue"}"#).unwrap();
//! let blob = engine.encode("someType", &record).unwrap();
//! assert_eq!(blob, [145, 169, 116, 101, 115, 116, 86, 97, 108, 117, 101]);
//!
//! let decoded = engine.decode_bytes("someType", &blob).unwrap();
//! assert_eq!(decoded, record);
//! ```

mod class;
mod engine;
mod error;
mod foreign;
mod model;
mod registry;
mod transform;
pub mod wire;

pub use class::{
    Class, ClassRegistry, FIELD_BS58, FIELD_FOREIGN, FieldBinding, FieldFactory, MODEL_DEFAULT,
    field_key,
};
pub use engine::{Engine, EngineOptions};
pub use error::{CodecError, CodecResult};
pub use foreign::ForeignTransform;
pub use model::{FieldDescriptor, Model, ModelCodec, PositionalCodec};
pub use registry::ModelRegistry;
pub use transform::{Bs58Transform, FieldTransform, IdentityTransform};

//! Declarative model schemas for fieldpack.
//!
//! Defines how a model's fields are declared before the codec engine binds
//! transforms to them:
//! - [`ModelConfig`] — the ordered field declarations of one model
//! - [`FieldSpec`] — one field: kind name, list multiplicity, foreign target
//! - [`ScalarKind`] — built-in kinds that are stored as-is on the wire
//! - [`EngineConfig`] — a named set of models, loadable from JSON
//!
//! Field order in a [`ModelConfig`] is the positional layout of the binary
//! encoding, so JSON declarations are parsed order-preserving.

mod config;
mod error;
mod kind;
mod schema;

pub use config::EngineConfig;
pub use error::{SchemaError, SchemaResult};
pub use kind::ScalarKind;
pub use schema::{FieldSpec, ModelConfig};

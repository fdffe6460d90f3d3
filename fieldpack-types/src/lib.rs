//! Core value types for fieldpack.
//!
//! This crate defines the schema-agnostic types every other fieldpack crate
//! builds on:
//! - [`Value`] — the tree-shaped record representation (maps, sequences,
//!   scalars, raw bytes, nil)
//! - [`PropertyPath`] — a dotted path addressing a nested property inside a
//!   [`Value`] tree
//!
//! Nothing here knows about models or wire formats; those live in
//! `fieldpack-model` and `fieldpack-codec`.

mod path;
mod value;

pub use path::PropertyPath;
pub use value::{Map, Value};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid property path '{path}': {reason}")]
    InvalidPath { path: String, reason: &'static str },

    #[error("integer out of range: {0}")]
    IntegerOutOfRange(u64),
}

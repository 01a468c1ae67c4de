//! Declarative form schemas
//!
//! Schemas describe the value slots of a form: names, defaults, nested
//! mappings and sequences, and how raw values are coerced into their
//! canonical representation.
//!
//! # Design Principles
//!
//! - Trees are validated once and read-only afterwards
//! - Coercion is an owned table, never patched into a shared library
//! - A value that does not coerce is treated as absent

mod coerce;
mod errors;
mod types;

pub use coerce::{coerce, parse_bool, parse_float, parse_int};
pub use errors::{SchemaError, SchemaResult};
pub use types::{FieldKind, SchemaField};

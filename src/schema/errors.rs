//! Schema error types
//!
//! Every variant is a programming error in a form definition: malformed
//! trees are rejected once, when a binder is built, and never while
//! resolving values.

use thiserror::Error;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Malformed schema tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Field with an empty or whitespace name
    #[error("Field at '{0}' has an empty name")]
    EmptyName(String),

    /// Two children of one mapping share a name
    #[error("Duplicate field: {0}")]
    DuplicateField(String),

    /// Scalar field carrying sub-fields
    #[error("Field '{path}' of kind {kind} cannot have children")]
    UnexpectedChildren { path: String, kind: &'static str },

    /// Sequence without exactly one element field
    #[error("Sequence '{path}' must have exactly one element field, found {found}")]
    InvalidSequence { path: String, found: usize },

    /// Default whose shape does not match the field kind
    #[error("Default for '{path}' must be a {expected}")]
    InvalidDefault { path: String, expected: &'static str },
}

impl SchemaError {
    /// Dotted path of the offending field
    pub fn path(&self) -> &str {
        match self {
            SchemaError::EmptyName(path) | SchemaError::DuplicateField(path) => path,
            SchemaError::UnexpectedChildren { path, .. }
            | SchemaError::InvalidSequence { path, .. }
            | SchemaError::InvalidDefault { path, .. } => path,
        }
    }
}

//! # Domain Errors

use thiserror::Error;

/// Result type for domain collaborator calls
pub type DomainResult<T> = Result<T, DomainError>;

/// Errors raised by domain collaborators
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("{kind} not found: {id}")]
    EntryNotFound { kind: &'static str, id: String },

    #[error("Wizard input rejected: {0}")]
    InvalidWizardInput(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            DomainError::ModelNotFound(_) => 404,
            DomainError::EntryNotFound { .. } => 404,
            DomainError::InvalidWizardInput(_) => 400,
            DomainError::Storage(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(DomainError::ModelNotFound("m".into()).status_code(), 404);
        assert_eq!(DomainError::Storage("disk".into()).status_code(), 500);
    }
}

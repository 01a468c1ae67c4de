//! # Chain Errors

use thiserror::Error;

/// Result type for chain lookups
pub type ChainResult<T> = Result<T, ChainError>;

/// Chain registry errors; these are programming errors in route setup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("Unknown validator chain: {0}")]
    UnknownChain(String),

    #[error("Validator chain already registered: {0}")]
    DuplicateChain(String),
}

impl ChainError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        500
    }
}

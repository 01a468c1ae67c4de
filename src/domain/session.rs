//! Session access
//!
//! The validation core only reads from the session; writes belong to the
//! request-handling layer.

use std::collections::HashMap;

/// Read access to the requesting user's session
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

/// Session backed by a plain map
#[derive(Debug, Clone, Default)]
pub struct MemorySession {
    values: HashMap<String, String>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }
}

impl SessionStore for MemorySession {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

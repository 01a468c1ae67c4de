//! Location file catalog
//!
//! A location file is a directory of prepared model inputs for one
//! geographic location. Its `config.json` describes it to the client
//! (including the optional setup wizard), and a registered handler
//! applies wizard answers to a model.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::errors::DomainResult;
use super::model::Model;

/// Applies a location wizard's answers to a model
pub trait WizardHandler: Send + Sync {
    fn apply(&self, model: &dyn Model, answers: &Value) -> DomainResult<Value>;
}

/// One catalog entry
#[derive(Clone, Default)]
pub struct LocationEntry {
    pub name: String,
    /// Parsed `config.json`
    pub config: Map<String, Value>,
    pub handler: Option<Arc<dyn WizardHandler>>,
}

impl LocationEntry {
    pub fn new(name: impl Into<String>, config: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            config,
            handler: None,
        }
    }

    pub fn with_handler(mut self, handler: Arc<dyn WizardHandler>) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Wizard template, when configured and non-empty
    pub fn wizard_html(&self) -> Option<&str> {
        self.config
            .get("wizard_html")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Wizard definition; an empty string when not configured
    pub fn wizard_json(&self) -> Value {
        self.config
            .get("wizard_json")
            .cloned()
            .unwrap_or_else(|| Value::String(String::new()))
    }

    /// Config as a JSON value
    pub fn to_json(&self) -> Value {
        Value::Object(self.config.clone())
    }
}

impl fmt::Debug for LocationEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationEntry")
            .field("name", &self.name)
            .field("config", &self.config)
            .field("handler", &self.handler.is_some())
            .finish()
    }
}

/// Named location entries
pub trait LocationCatalog: Send + Sync {
    fn get(&self, name: &str) -> Option<LocationEntry>;

    fn names(&self) -> Vec<String>;
}

/// Catalog built in code
#[derive(Debug, Clone, Default)]
pub struct MemoryLocationCatalog {
    entries: BTreeMap<String, LocationEntry>,
}

impl MemoryLocationCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, entry: LocationEntry) -> Self {
        self.insert(entry);
        self
    }

    pub fn insert(&mut self, entry: LocationEntry) {
        self.entries.insert(entry.name.clone(), entry);
    }
}

impl LocationCatalog for MemoryLocationCatalog {
    fn get(&self, name: &str) -> Option<LocationEntry> {
        self.entries.get(name).cloned()
    }

    fn names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

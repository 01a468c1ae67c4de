//! Request view seen by validators
//!
//! Carries the parts of an incoming request validators inspect (route
//! parameters, query string, JSON body, upload name) together with the
//! session and the shared services.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::config::Settings;
use crate::domain::{LocationCatalog, ModelRegistry, SessionStore};

/// Long-lived collaborators shared by every request
#[derive(Clone)]
pub struct Services {
    pub settings: Arc<Settings>,
    pub models: Arc<dyn ModelRegistry>,
    pub locations: Arc<dyn LocationCatalog>,
}

impl Services {
    pub fn new(
        settings: Settings,
        models: Arc<dyn ModelRegistry>,
        locations: Arc<dyn LocationCatalog>,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            models,
            locations,
        }
    }
}

impl fmt::Debug for Services {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Services")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// One incoming request
pub struct ValidationRequest<'a> {
    services: &'a Services,
    session: &'a dyn SessionStore,
    matchdict: HashMap<String, String>,
    query: HashMap<String, String>,
    body: Map<String, Value>,
    upload_filename: Option<String>,
}

impl<'a> ValidationRequest<'a> {
    pub fn new(services: &'a Services, session: &'a dyn SessionStore) -> Self {
        Self {
            services,
            session,
            matchdict: HashMap::new(),
            query: HashMap::new(),
            body: Map::new(),
            upload_filename: None,
        }
    }

    /// Add a route parameter
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.matchdict.insert(name.into(), value.into());
        self
    }

    /// Add a query string parameter
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    /// Set the JSON body; non-object bodies carry no named values
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = match body {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        self
    }

    /// Set the client-side name of an uploaded file
    pub fn with_upload(mut self, filename: impl Into<String>) -> Self {
        self.upload_filename = Some(filename.into());
        self
    }

    pub fn services(&self) -> &'a Services {
        self.services
    }

    pub fn settings(&self) -> &'a Settings {
        &self.services.settings
    }

    pub fn session(&self) -> &'a dyn SessionStore {
        self.session
    }

    /// Model id stored in the session
    pub fn session_model_id(&self) -> Option<String> {
        self.session.get(&self.settings().model_session_key)
    }

    /// Route parameter
    pub fn param(&self, name: &str) -> Option<&str> {
        self.matchdict.get(name).map(String::as_str)
    }

    /// Query string parameter
    pub fn query(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    pub fn body(&self) -> &Map<String, Value> {
        &self.body
    }

    /// String value of a body key
    pub fn body_str(&self, name: &str) -> Option<&str> {
        self.body.get(name).and_then(Value::as_str)
    }

    pub fn upload_filename(&self) -> Option<&str> {
        self.upload_filename.as_deref()
    }
}

impl fmt::Debug for ValidationRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationRequest")
            .field("matchdict", &self.matchdict)
            .field("query", &self.query)
            .field("body", &self.body)
            .field("upload_filename", &self.upload_filename)
            .finish_non_exhaustive()
    }
}

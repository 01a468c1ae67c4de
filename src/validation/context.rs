//! Validation Context
//!
//! Per-request accumulator carried through a validator chain. Holds the
//! values validators have bound, the field errors they recorded, and the
//! terminal status code.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use axum::http::StatusCode;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::{Model, WizardHandler};
use crate::schema::parse_float;

use super::response::ValidationFailure;

/// Names under which validators bind values
pub mod keys {
    pub const MODEL: &str = "model";
    pub const WIND: &str = "wind";
    pub const WIND_ID: &str = "wind_id";
    pub const COORDINATES: &str = "coordinates";
    pub const FILENAME: &str = "filename";
    pub const LOCATION_FILE_DATA: &str = "location_file_data";
    pub const LOCATION_FILE_MODEL_DATA: &str = "location_file_model_data";
    pub const LOCATION_DIR: &str = "location_dir";
    pub const WIZARD_HANDLER: &str = "wizard_handler";
    pub const WIZARD_HTML: &str = "wizard_html";
    pub const WIZARD_JSON: &str = "wizard_json";
}

/// Part of the request an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorLocation {
    Body,
    Query,
}

/// One recorded field error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub location: ErrorLocation,
    pub field: String,
    pub message: String,
}

/// A `lat`/`lon` pair as sent by the client; either part may be missing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Coordinates {
    pub lat: Option<String>,
    pub lon: Option<String>,
}

impl Coordinates {
    /// Both parts as numbers, when present and numeric
    pub fn parsed(&self) -> Option<(f64, f64)> {
        let lat = parse_float(&Value::String(self.lat.clone()?))?;
        let lon = parse_float(&Value::String(self.lon.clone()?))?;
        Some((lat, lon))
    }
}

/// A value bound by a validator
#[derive(Clone)]
pub enum Bound {
    Model(Arc<dyn Model>),
    Json(Value),
    Path(PathBuf),
    Coordinates(Coordinates),
    Handler(Arc<dyn WizardHandler>),
}

impl Bound {
    pub fn as_model(&self) -> Option<&Arc<dyn Model>> {
        match self {
            Bound::Model(model) => Some(model),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Bound::Json(value) => Some(value),
            _ => None,
        }
    }

    /// String payload of a JSON binding
    pub fn as_str(&self) -> Option<&str> {
        self.as_json().and_then(Value::as_str)
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Bound::Path(path) => Some(path),
            _ => None,
        }
    }

    pub fn as_coordinates(&self) -> Option<&Coordinates> {
        match self {
            Bound::Coordinates(coordinates) => Some(coordinates),
            _ => None,
        }
    }

    pub fn as_handler(&self) -> Option<&Arc<dyn WizardHandler>> {
        match self {
            Bound::Handler(handler) => Some(handler),
            _ => None,
        }
    }
}

impl fmt::Debug for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Model(model) => f.debug_tuple("Model").field(&model.id()).finish(),
            Bound::Json(value) => f.debug_tuple("Json").field(value).finish(),
            Bound::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Bound::Coordinates(c) => f.debug_tuple("Coordinates").field(c).finish(),
            Bound::Handler(_) => f.write_str("Handler(..)"),
        }
    }
}

/// Per-request validation state
#[derive(Debug)]
pub struct ValidationContext {
    /// Request ID for tracing
    pub request_id: Uuid,

    validated: HashMap<String, Bound>,
    errors: Vec<FieldError>,
    status: Option<StatusCode>,

    started_at: Instant,
}

impl ValidationContext {
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            validated: HashMap::new(),
            errors: Vec::new(),
            status: None,
            started_at: Instant::now(),
        }
    }

    /// Append an error; the first recorded status becomes the terminal one
    pub fn record_error(
        &mut self,
        location: ErrorLocation,
        field: impl Into<String>,
        message: impl Into<String>,
        status: StatusCode,
    ) {
        let field = field.into();
        let message = message.into();

        tracing::debug!(
            request_id = %self.request_id,
            field = %field,
            status = status.as_u16(),
            "{}",
            message
        );

        self.errors.push(FieldError {
            location,
            field,
            message,
        });
        self.status.get_or_insert(status);
    }

    /// Bind `value` under `name` unless something is already bound there
    ///
    /// Returns whatever ends up bound.
    pub fn bind(&mut self, name: &str, value: Bound) -> &Bound {
        self.validated.entry(name.to_string()).or_insert_with(|| {
            tracing::trace!(name, "bound");
            value
        })
    }

    /// Bind `value` under `name`, replacing an existing binding
    pub fn replace(&mut self, name: &str, value: Bound) -> Option<Bound> {
        self.validated.insert(name.to_string(), value)
    }

    pub fn get(&self, name: &str) -> Option<&Bound> {
        self.validated.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.validated.contains_key(name)
    }

    /// The bound model, if any
    pub fn model(&self) -> Option<Arc<dyn Model>> {
        self.get(keys::MODEL).and_then(Bound::as_model).cloned()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Terminal status; `None` while no error was recorded
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Names of all bound values
    pub fn bound_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.validated.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Get elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> u128 {
        self.started_at.elapsed().as_millis()
    }

    /// The error payload, when validation failed
    pub fn failure(&self) -> Option<ValidationFailure> {
        let status = self.status?;
        Some(ValidationFailure::new(status, self.errors.clone()))
    }
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::new()
    }
}

//! Validators
//!
//! Each validator inspects the request and the context, then either binds
//! values or records an error. Validators that need the model resolve it
//! through [`ensure_model`], which returns `None` as soon as the context
//! holds any error. This keeps one root failure from cascading into
//! unrelated lookups.

use std::path::Path;
use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::Value;

use crate::domain::{Container, Model};
use crate::files::{read_json, safe_join, DATA_DIR, MODEL_DATA_FILE};

use super::context::{keys, Bound, Coordinates, ErrorLocation, ValidationContext};
use super::request::ValidationRequest;

/// A single check/bind step of a chain
pub trait Validate: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &'static str;

    fn validate(&self, request: &ValidationRequest<'_>, ctx: &mut ValidationContext);
}

/// Built-in validators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Validator {
    /// Bind the session's model, creating one when the session has none
    ResolveSession,
    /// Bind the model named by the `model_id` route parameter
    RequireModel,
    RequireMap,
    /// Route parameter `id` must name an environment object
    RequireEnvironmentEntry,
    /// Route parameter `id` must name a mover
    RequireMoverEntry,
    /// Route parameter `id` must name a spill
    RequireSpillEntry,
    /// `wind_id` must name an environment object; binds `wind`
    RequireWind,
    /// `lat` and `lon` query parameters
    RequireCoordinates,
    /// Uploaded filename must be safe under the model's base directory
    RequireFilename,
    /// `filename` must exist in the model's data directory
    RequireUploadedFile,
    /// Route parameter `location` must name a readable location file
    RequireLocationConfig,
    /// Location must provide a wizard template and handler
    RequireLocationWizard,
    /// Route parameter `location` must not name an existing directory
    RequireNewLocationPath,
}

impl Validate for Validator {
    fn name(&self) -> &'static str {
        match self {
            Validator::ResolveSession => "resolve_session",
            Validator::RequireModel => "require_model",
            Validator::RequireMap => "require_map",
            Validator::RequireEnvironmentEntry => "require_environment_entry",
            Validator::RequireMoverEntry => "require_mover_entry",
            Validator::RequireSpillEntry => "require_spill_entry",
            Validator::RequireWind => "require_wind",
            Validator::RequireCoordinates => "require_coordinates",
            Validator::RequireFilename => "require_filename",
            Validator::RequireUploadedFile => "require_uploaded_file",
            Validator::RequireLocationConfig => "require_location_config",
            Validator::RequireLocationWizard => "require_location_wizard",
            Validator::RequireNewLocationPath => "require_new_location_path",
        }
    }

    fn validate(&self, request: &ValidationRequest<'_>, ctx: &mut ValidationContext) {
        match self {
            Validator::ResolveSession => resolve_session(request, ctx),
            Validator::RequireModel => require_model(request, ctx),
            Validator::RequireMap => require_map(request, ctx),
            Validator::RequireEnvironmentEntry => {
                require_entry(request, ctx, EntryKind::Environment)
            }
            Validator::RequireMoverEntry => require_entry(request, ctx, EntryKind::Mover),
            Validator::RequireSpillEntry => require_entry(request, ctx, EntryKind::Spill),
            Validator::RequireWind => require_wind(request, ctx),
            Validator::RequireCoordinates => require_coordinates(request, ctx),
            Validator::RequireFilename => require_filename(request, ctx),
            Validator::RequireUploadedFile => require_uploaded_file(request, ctx),
            Validator::RequireLocationConfig => require_location_config(request, ctx),
            Validator::RequireLocationWizard => require_location_wizard(request, ctx),
            Validator::RequireNewLocationPath => require_new_location_path(request, ctx),
        }
    }
}

/// The model named by the session, if it is still running
pub fn session_model(request: &ValidationRequest<'_>) -> Option<Arc<dyn Model>> {
    let id = request.session_model_id()?;

    match request.services().models.get(&id) {
        Ok(model) => Some(model),
        Err(e) => {
            tracing::debug!(model_id = %id, error = %e, "session model unavailable");
            None
        }
    }
}

/// Bind the session's model, or a newly created one; never fails
pub fn resolve_session(request: &ValidationRequest<'_>, ctx: &mut ValidationContext) {
    if ctx.contains(keys::MODEL) {
        return;
    }

    let model = session_model(request).unwrap_or_else(|| request.services().models.create());
    ctx.bind(keys::MODEL, Bound::Model(model));
}

/// Bind the model named by the `model_id` route parameter
///
/// The model must belong to the requesting session. A mismatch is
/// recorded as 403, not raised.
pub fn require_model(request: &ValidationRequest<'_>, ctx: &mut ValidationContext) {
    if ctx.contains(keys::MODEL) {
        return;
    }

    let model = request
        .param("model_id")
        .and_then(|id| request.services().models.get(id).ok());

    let Some(model) = model else {
        ctx.record_error(
            ErrorLocation::Body,
            "model",
            "Model not found.",
            StatusCode::NOT_FOUND,
        );
        return;
    };

    if request.session_model_id().as_deref() != Some(model.id()) {
        tracing::warn!(model_id = model.id(), "model requested outside its session");
        ctx.record_error(
            ErrorLocation::Body,
            "model",
            "Model does not belong to this session.",
            StatusCode::FORBIDDEN,
        );
        return;
    }

    ctx.bind(keys::MODEL, Bound::Model(model));
}

/// The model for validators that depend on it
///
/// `None` when the context already holds errors, or when model resolution
/// records one.
pub fn ensure_model(
    request: &ValidationRequest<'_>,
    ctx: &mut ValidationContext,
) -> Option<Arc<dyn Model>> {
    if ctx.has_errors() {
        return None;
    }
    if let Some(model) = ctx.model() {
        return Some(model);
    }

    require_model(request, ctx);

    if ctx.has_errors() {
        None
    } else {
        ctx.model()
    }
}

pub fn require_map(request: &ValidationRequest<'_>, ctx: &mut ValidationContext) {
    let Some(model) = ensure_model(request, ctx) else {
        return;
    };

    if !model.has_map() {
        ctx.record_error(ErrorLocation::Body, "map", "Map not found.", StatusCode::NOT_FOUND);
    }
}

#[derive(Debug, Clone, Copy)]
enum EntryKind {
    Environment,
    Mover,
    Spill,
}

impl EntryKind {
    fn container<'m>(&self, model: &'m dyn Model) -> &'m dyn Container {
        match self {
            EntryKind::Environment => model.environment(),
            EntryKind::Mover => model.movers(),
            EntryKind::Spill => model.spills(),
        }
    }

    fn field(&self) -> &'static str {
        match self {
            EntryKind::Environment => "environment",
            EntryKind::Mover => "mover",
            EntryKind::Spill => "spill",
        }
    }

    fn not_found(&self) -> &'static str {
        match self {
            EntryKind::Environment => "Environment object not found.",
            EntryKind::Mover => "Mover not found.",
            EntryKind::Spill => "Spill not found.",
        }
    }
}

fn require_entry(request: &ValidationRequest<'_>, ctx: &mut ValidationContext, kind: EntryKind) {
    let Some(model) = ensure_model(request, ctx) else {
        return;
    };

    let found = request
        .param("id")
        .map_or(false, |id| kind.container(model.as_ref()).contains(id));

    if !found {
        ctx.record_error(
            ErrorLocation::Body,
            kind.field(),
            kind.not_found(),
            StatusCode::NOT_FOUND,
        );
    }
}

/// `wind_id` comes from an earlier binding or from the JSON body
pub fn require_wind(request: &ValidationRequest<'_>, ctx: &mut ValidationContext) {
    let Some(model) = ensure_model(request, ctx) else {
        return;
    };

    let wind_id = ctx
        .get(keys::WIND_ID)
        .and_then(Bound::as_str)
        .or_else(|| request.body_str(keys::WIND_ID))
        .map(str::to_string);

    let Some(wind_id) = wind_id else {
        ctx.record_error(
            ErrorLocation::Body,
            "wind_mover",
            "Missing \"wind_id\" value.",
            StatusCode::BAD_REQUEST,
        );
        return;
    };

    match model.environment().get(&wind_id) {
        Some(wind) => {
            ctx.bind(keys::WIND, Bound::Json(wind));
        }
        None => ctx.record_error(
            ErrorLocation::Body,
            "wind_mover",
            "The wind_id did not match an existing Wind.",
            StatusCode::BAD_REQUEST,
        ),
    }
}

/// Always binds `coordinates`, even when a part is missing
///
/// Callers must check `has_errors()` before trusting the binding.
pub fn require_coordinates(request: &ValidationRequest<'_>, ctx: &mut ValidationContext) {
    let lat = request.query("lat").map(str::to_string);
    let lon = request.query("lon").map(str::to_string);

    if lat.is_none() {
        ctx.record_error(
            ErrorLocation::Query,
            "coordinates",
            "Latitude is required as \"lat\" GET parameter.",
            StatusCode::BAD_REQUEST,
        );
    }
    if lon.is_none() {
        ctx.record_error(
            ErrorLocation::Query,
            "coordinates",
            "Longitude is required as \"lon\" GET parameter.",
            StatusCode::BAD_REQUEST,
        );
    }

    ctx.bind(keys::COORDINATES, Bound::Coordinates(Coordinates { lat, lon }));
}

/// Binds the upload's path under the model's base directory
pub fn require_filename(request: &ValidationRequest<'_>, ctx: &mut ValidationContext) {
    let Some(model) = ensure_model(request, ctx) else {
        return;
    };

    let path = request
        .upload_filename()
        .filter(|name| !name.is_empty())
        .and_then(|name| safe_join(model.base_dir(), name));

    match path {
        Some(path) => {
            ctx.bind(keys::FILENAME, Bound::Path(path));
        }
        None => ctx.record_error(
            ErrorLocation::Body,
            "filename",
            "Illegal filename.",
            StatusCode::BAD_REQUEST,
        ),
    }
}

// `sub/wind.nc` for `<base_dir>/sub/wind.nc`, always with `/` separators.
fn relative_name(base: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(base).ok()?;
    let parts = relative
        .iter()
        .map(|part| part.to_str())
        .collect::<Option<Vec<_>>>()?;

    (!parts.is_empty()).then(|| parts.join("/"))
}

/// Rebinds `filename` as the public path `data/<name>`
pub fn require_uploaded_file(request: &ValidationRequest<'_>, ctx: &mut ValidationContext) {
    let Some(model) = ensure_model(request, ctx) else {
        return;
    };

    let filename = match ctx.get(keys::FILENAME) {
        Some(Bound::Path(path)) => relative_name(model.base_dir(), path),
        Some(bound) => bound.as_str().map(str::to_string),
        None => request.body_str(keys::FILENAME).map(str::to_string),
    };

    let exists = filename
        .as_deref()
        .filter(|name| !name.is_empty())
        .and_then(|name| safe_join(model.static_data_dir(), name))
        .map_or(false, |path| path.exists());

    match filename {
        Some(name) if exists => {
            let public = format!("{}/{}", DATA_DIR, name);
            ctx.replace(keys::FILENAME, Bound::Json(Value::String(public)));
        }
        _ => ctx.record_error(
            ErrorLocation::Body,
            "filename",
            "File does not exist.",
            StatusCode::BAD_REQUEST,
        ),
    }
}

fn location_not_found(ctx: &mut ValidationContext) {
    ctx.record_error(
        ErrorLocation::Body,
        "location_file",
        "Location file not found.",
        StatusCode::NOT_FOUND,
    );
}

/// Binds the location's config, its model data and its directory
pub fn require_location_config(request: &ValidationRequest<'_>, ctx: &mut ValidationContext) {
    let Some(name) = request.param("location") else {
        return location_not_found(ctx);
    };
    let Some(entry) = request.services().locations.get(name) else {
        return location_not_found(ctx);
    };
    let Some(dir) = safe_join(&request.settings().location_file_dir, name) else {
        return location_not_found(ctx);
    };

    let model_file = dir.join(MODEL_DATA_FILE);
    if !model_file.exists() {
        return location_not_found(ctx);
    }

    let data = match read_json(&model_file) {
        Ok(data) => data,
        Err(e) => {
            tracing::error!(location = %name, error = %e, "could not open location file");
            ctx.record_error(
                ErrorLocation::Body,
                "location_file",
                "Could not open location file",
                StatusCode::INTERNAL_SERVER_ERROR,
            );
            return;
        }
    };

    ctx.bind(keys::LOCATION_FILE_DATA, Bound::Json(entry.to_json()));
    ctx.bind(keys::LOCATION_FILE_MODEL_DATA, Bound::Json(data));
    ctx.bind(keys::LOCATION_DIR, Bound::Path(dir));
}

/// Binds the wizard handler, template and definition
pub fn require_location_wizard(request: &ValidationRequest<'_>, ctx: &mut ValidationContext) {
    let wizard = request
        .param("location")
        .and_then(|name| request.services().locations.get(name))
        .and_then(|entry| {
            let html = entry.wizard_html()?.to_string();
            let handler = entry.handler.clone()?;
            Some((handler, html, entry.wizard_json()))
        });

    let Some((handler, html, json)) = wizard else {
        ctx.record_error(
            ErrorLocation::Body,
            "location_file_wizard",
            "An input handler for the wizard was not found.",
            StatusCode::NOT_FOUND,
        );
        return;
    };

    ctx.bind(keys::WIZARD_HANDLER, Bound::Handler(handler));
    ctx.bind(keys::WIZARD_HTML, Bound::Json(Value::String(html)));
    ctx.bind(keys::WIZARD_JSON, Bound::Json(json));
}

/// Binds the directory a new location file would be created in
pub fn require_new_location_path(request: &ValidationRequest<'_>, ctx: &mut ValidationContext) {
    let dir = request
        .param("location")
        .and_then(|name| safe_join(&request.settings().location_file_dir, name));

    let Some(dir) = dir else {
        ctx.record_error(
            ErrorLocation::Body,
            "location_file",
            "Illegal location name.",
            StatusCode::BAD_REQUEST,
        );
        return;
    };

    if dir.exists() {
        ctx.record_error(
            ErrorLocation::Body,
            "location_file",
            "Location file already exists.",
            StatusCode::BAD_REQUEST,
        );
        return;
    }

    ctx.bind(keys::LOCATION_DIR, Bound::Path(dir));
}

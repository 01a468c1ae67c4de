//! Location file directories
//!
//! Layout of one location file:
//!
//! ```text
//! <location_file_dir>/<name>/
//!     config.json     client-facing description, wizard definition
//!     location.json   model data loaded when the location is chosen
//!     data/           input files referenced by location.json
//! ```

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use super::dirs::{dirnames, mkdir_p};
use super::errors::{FileError, FileResult};

/// Client-facing description of a location file
pub const CONFIG_FILE: &str = "config.json";

/// Model data of a location file
pub const MODEL_DATA_FILE: &str = "location.json";

/// Subdirectory holding a location's input files
pub const DATA_DIR: &str = "data";

/// Names of the valid location files in `dir`
///
/// A location file is a directory containing `config.json`. Directories
/// named in `ignored` are skipped; directories without a config are logged
/// and skipped. An unreadable `dir` is logged and yields no locations.
pub fn discover_location_files(dir: &Path, ignored: &[String]) -> Vec<String> {
    let listing = match dirnames(dir) {
        Ok(listing) => listing,
        Err(e) => {
            tracing::error!(path = %dir.display(), error = %e, "could not access location files");
            return Vec::new();
        }
    };

    listing
        .into_iter()
        .filter(|name| !ignored.contains(name))
        .filter(|name| {
            let config = dir.join(name).join(CONFIG_FILE);
            let exists = config.is_file();
            if !exists {
                tracing::error!(
                    location = %name,
                    path = %config.display(),
                    "location file does not contain a config.json file"
                );
            }
            exists
        })
        .collect()
}

/// Create a location file skeleton at `path`
///
/// Writes `data` as `config.json` and returns the serialized config.
pub fn create_location_file(path: &Path, data: &Map<String, Value>) -> FileResult<String> {
    if path.exists() {
        return Err(FileError::AlreadyExists(path.to_path_buf()));
    }

    let config_path = path.join(CONFIG_FILE);
    let json_config =
        serde_json::to_string(data).map_err(|e| FileError::json(&config_path, e))?;

    mkdir_p(path)?;
    mkdir_p(&path.join(DATA_DIR))?;
    fs::write(&config_path, &json_config).map_err(|e| FileError::io(&config_path, e))?;

    tracing::info!(path = %path.display(), "created location file");
    Ok(json_config)
}

/// Read and parse a JSON file
pub fn read_json(path: &Path) -> FileResult<Value> {
    let content = fs::read_to_string(path).map_err(|e| FileError::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| FileError::json(path, e))
}

/// Read and parse a file holding a JSON object
pub fn read_json_object(path: &Path) -> FileResult<Map<String, Value>> {
    match read_json(path)? {
        Value::Object(map) => Ok(map),
        other => Err(FileError::Json {
            path: path.to_path_buf(),
            message: format!("expected a JSON object, found {}", json_kind(&other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

//! CLI command implementations
//!
//! Each command loads what it needs, performs one action, and writes a
//! single JSON response.

use std::path::Path;

use serde_json::{json, Map, Value};

use crate::config::Settings;
use crate::domain::LocationCatalog;
use crate::files::{clean_directory, create_location_file, safe_join, FileLocationCatalog};
use crate::logging;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Main CLI entry point
///
/// Parses arguments, installs logging and dispatches to the command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    logging::init(cli.verbose);
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    let data = match cmd {
        Command::Clean {
            directory,
            simulate,
        } => clean(&directory, simulate)?,
        Command::Locations { config } => locations(&config)?,
        Command::NewLocation { name, config, data } => {
            new_location(&config, &name, data.as_deref())?
        }
    };

    write_response(data)
}

/// Empty `directory`, reporting the top-level names removed
pub fn clean(directory: &Path, simulate: bool) -> CliResult<Value> {
    let removed = clean_directory(directory, simulate)?;

    Ok(json!({
        "directory": directory.display().to_string(),
        "simulated": simulate,
        "total": removed.len(),
        "removed": removed,
    }))
}

/// Describe the location files found under the configured directory
pub fn locations(config_path: &Path) -> CliResult<Value> {
    let settings = Settings::load(config_path)?;
    let catalog = FileLocationCatalog::from_settings(&settings);

    let locations: Vec<Value> = catalog
        .names()
        .into_iter()
        .filter_map(|name| catalog.get(&name))
        .map(|entry| {
            let config = entry.to_json();
            json!({"name": entry.name, "config": config})
        })
        .collect();

    Ok(json!({
        "location_file_dir": settings.location_file_dir.display().to_string(),
        "locations": locations,
    }))
}

/// Create a location file skeleton named `name`
pub fn new_location(config_path: &Path, name: &str, data: Option<&str>) -> CliResult<Value> {
    let settings = Settings::load(config_path)?;

    if name.trim().is_empty() {
        return Err(CliError::invalid_argument("Location name must not be empty"));
    }
    let path = safe_join(&settings.location_file_dir, name)
        .ok_or_else(|| CliError::invalid_argument(format!("Illegal location name: {}", name)))?;

    let config = match data {
        Some(raw) => match serde_json::from_str::<Value>(raw)? {
            Value::Object(map) => map,
            _ => return Err(CliError::invalid_argument("--data must be a JSON object")),
        },
        None => {
            let mut map = Map::new();
            map.insert("name".to_string(), Value::String(name.to_string()));
            map
        }
    };

    create_location_file(&path, &config)?;

    Ok(json!({
        "created": path.display().to_string(),
        "config": config,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CliErrorCode;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(temp: &TempDir) -> std::path::PathBuf {
        let config = temp.path().join("webgnome.json");
        let settings = json!({"location_file_dir": temp.path().join("locations")});
        fs::write(&config, settings.to_string()).unwrap();
        config
    }

    #[test]
    fn test_clean_simulate_keeps_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.png"), b"png").unwrap();

        let data = clean(temp.path(), true).unwrap();

        assert_eq!(data["removed"], json!(["a.png"]));
        assert_eq!(data["total"], json!(1));
        assert!(temp.path().join("a.png").exists());
    }

    #[test]
    fn test_clean_missing_directory() {
        let temp = TempDir::new().unwrap();
        assert!(clean(&temp.path().join("missing"), false).is_err());
    }

    #[test]
    fn test_new_location_then_list() {
        let temp = TempDir::new().unwrap();
        let config = write_config(&temp);

        let created = new_location(&config, "boston", None).unwrap();
        assert_eq!(created["config"], json!({"name": "boston"}));

        let listed = locations(&config).unwrap();
        assert_eq!(
            listed["locations"],
            json!([{"name": "boston", "config": {"name": "boston"}}])
        );
    }

    #[test]
    fn test_new_location_twice_fails() {
        let temp = TempDir::new().unwrap();
        let config = write_config(&temp);

        new_location(&config, "boston", Some(r#"{"name": "Boston Harbor"}"#)).unwrap();
        let err = new_location(&config, "boston", None).unwrap_err();

        assert_eq!(err.code(), &CliErrorCode::AlreadyExists);
    }

    #[test]
    fn test_new_location_rejects_traversal() {
        let temp = TempDir::new().unwrap();
        let config = write_config(&temp);

        let err = new_location(&config, "../escape", None).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::InvalidArgument);

        let err = new_location(&config, "boston", Some("[1]")).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::InvalidArgument);
    }
}

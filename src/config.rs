//! Service Settings
//!
//! Loaded from a JSON file. Every field has a default, so a missing or
//! empty file yields a usable configuration.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Settings shared by the validators and the CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Session key holding the id of the user's model (default: "model_id")
    #[serde(default = "default_model_session_key")]
    pub model_session_key: String,

    /// Base directory of location files (default: "location_files")
    #[serde(default = "default_location_file_dir")]
    pub location_file_dir: PathBuf,

    /// Directory names skipped by location file discovery (default: ["templates"])
    #[serde(default = "default_ignored_location_files")]
    pub ignored_location_files: Vec<String>,

    /// Where new models get their directories (default: "models")
    #[serde(default = "default_model_data_dir")]
    pub model_data_dir: PathBuf,
}

fn default_model_session_key() -> String {
    "model_id".to_string()
}

fn default_location_file_dir() -> PathBuf {
    PathBuf::from("location_files")
}

fn default_ignored_location_files() -> Vec<String> {
    vec!["templates".to_string()]
}

fn default_model_data_dir() -> PathBuf {
    PathBuf::from("models")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model_session_key: default_model_session_key(),
            location_file_dir: default_location_file_dir(),
            ignored_location_files: default_ignored_location_files(),
            model_data_dir: default_model_data_dir(),
        }
    }
}

impl Settings {
    /// Load settings from `path`
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "config file missing, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let settings: Settings = serde_json::from_str(&content)?;
        settings.validate()?;

        Ok(settings)
    }

    /// Check field values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.model_session_key.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "model_session_key must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Point location file lookups at `dir`
    pub fn with_location_file_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.location_file_dir = dir.into();
        self
    }

    /// Root new model directories at `dir`
    pub fn with_model_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.model_data_dir = dir.into();
        self
    }
}

//! Location catalog backed by the location file directory

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Settings;
use crate::domain::{LocationCatalog, LocationEntry, WizardHandler};

use super::location::{discover_location_files, read_json_object, CONFIG_FILE};

/// Catalog loaded from the `config.json` of every discovered location file
///
/// Wizard handlers are code, not data, so they are registered after loading.
#[derive(Debug, Clone)]
pub struct FileLocationCatalog {
    dir: PathBuf,
    entries: BTreeMap<String, LocationEntry>,
}

impl FileLocationCatalog {
    /// Discover and load the location files in `dir`
    ///
    /// Locations whose config cannot be read are logged and left out.
    pub fn load(dir: &Path, ignored: &[String]) -> Self {
        let mut entries = BTreeMap::new();

        for name in discover_location_files(dir, ignored) {
            let config_path = dir.join(&name).join(CONFIG_FILE);
            match read_json_object(&config_path) {
                Ok(config) => {
                    entries.insert(name.clone(), LocationEntry::new(name, config));
                }
                Err(e) => {
                    tracing::error!(location = %name, error = %e, "could not load location config");
                }
            }
        }

        tracing::debug!(dir = %dir.display(), count = entries.len(), "loaded location files");

        Self {
            dir: dir.to_path_buf(),
            entries,
        }
    }

    /// Load from the configured location file directory
    pub fn from_settings(settings: &Settings) -> Self {
        Self::load(&settings.location_file_dir, &settings.ignored_location_files)
    }

    /// Attach the wizard handler for `name`; false when no such location was loaded
    pub fn register_handler(&mut self, name: &str, handler: Arc<dyn WizardHandler>) -> bool {
        match self.entries.get_mut(name) {
            Some(entry) => {
                entry.handler = Some(handler);
                true
            }
            None => {
                tracing::warn!(location = %name, "wizard handler for unknown location");
                false
            }
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LocationCatalog for FileLocationCatalog {
    fn get(&self, name: &str) -> Option<LocationEntry> {
        self.entries.get(name).cloned()
    }

    fn names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

//! Domain model collaborators
//!
//! The long-lived simulation model is owned elsewhere. The validation core
//! only needs to find a model by id, create a fresh one, and look entries
//! up in its environment, mover and spill containers.

use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use uuid::Uuid;

use crate::binding::Attributes;

use super::errors::{DomainError, DomainResult};

/// Mapping-like container of model entries keyed by id
pub trait Container: Send + Sync {
    /// Snapshot of the entry stored under `id`
    fn get(&self, id: &str) -> Option<Value>;

    /// Whether an entry exists under `id`
    fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// All entry ids
    fn ids(&self) -> Vec<String>;
}

/// A running simulation model
pub trait Model: Send + Sync {
    fn id(&self) -> &str;

    /// Whether a map has been loaded into the model
    fn has_map(&self) -> bool;

    fn environment(&self) -> &dyn Container;

    fn movers(&self) -> &dyn Container;

    fn spills(&self) -> &dyn Container;

    /// Directory holding the model's private files
    fn base_dir(&self) -> &Path;

    /// Directory holding the model's publicly served data files
    fn static_data_dir(&self) -> &Path;

    /// The model as a bind target
    fn as_attributes(&self) -> &dyn Attributes;
}

/// Lookup of running models
pub trait ModelRegistry: Send + Sync {
    /// Find a model by id
    fn get(&self, id: &str) -> DomainResult<Arc<dyn Model>>;

    /// Create and register a new model
    fn create(&self) -> Arc<dyn Model>;
}

/// In-memory container that counts lookups
#[derive(Debug, Default)]
pub struct EntryMap {
    entries: BTreeMap<String, Value>,
    lookups: AtomicUsize,
}

impl EntryMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, entry: Value) {
        self.entries.insert(id.into(), entry);
    }

    /// Number of `get`/`contains` calls served so far
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Container for EntryMap {
    fn get(&self, id: &str) -> Option<Value> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        self.entries.get(id).cloned()
    }

    fn ids(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

/// Model held entirely in memory
#[derive(Debug)]
pub struct MemoryModel {
    id: String,
    map: Option<Value>,
    environment: EntryMap,
    movers: EntryMap,
    spills: EntryMap,
    base_dir: PathBuf,
    static_data_dir: PathBuf,
    attributes: Map<String, Value>,
}

impl MemoryModel {
    /// Create an empty model rooted at `base_dir`; data files live in `base_dir/data`
    pub fn new(id: impl Into<String>, base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        Self {
            id: id.into(),
            map: None,
            environment: EntryMap::new(),
            movers: EntryMap::new(),
            spills: EntryMap::new(),
            static_data_dir: base_dir.join("data"),
            base_dir,
            attributes: Map::new(),
        }
    }

    pub fn with_map(mut self, map: Value) -> Self {
        self.map = Some(map);
        self
    }

    pub fn with_environment(mut self, id: impl Into<String>, entry: Value) -> Self {
        self.environment.insert(id, entry);
        self
    }

    pub fn with_mover(mut self, id: impl Into<String>, entry: Value) -> Self {
        self.movers.insert(id, entry);
        self
    }

    pub fn with_spill(mut self, id: impl Into<String>, entry: Value) -> Self {
        self.spills.insert(id, entry);
        self
    }

    pub fn with_static_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_data_dir = dir.into();
        self
    }

    /// Set a plain attribute exposed to form binding
    pub fn with_attribute(mut self, name: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    /// Lookups served by the environment container
    pub fn environment_lookups(&self) -> usize {
        self.environment.lookup_count()
    }

    /// Lookups served by the mover container
    pub fn mover_lookups(&self) -> usize {
        self.movers.lookup_count()
    }

    /// Lookups served by the spill container
    pub fn spill_lookups(&self) -> usize {
        self.spills.lookup_count()
    }
}

impl Attributes for MemoryModel {
    fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(Value::String(self.id.clone())),
            "map" => self.map.clone(),
            _ => self.attributes.get(name).cloned(),
        }
    }
}

impl Model for MemoryModel {
    fn id(&self) -> &str {
        &self.id
    }

    fn has_map(&self) -> bool {
        self.map.is_some()
    }

    fn environment(&self) -> &dyn Container {
        &self.environment
    }

    fn movers(&self) -> &dyn Container {
        &self.movers
    }

    fn spills(&self) -> &dyn Container {
        &self.spills
    }

    fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn static_data_dir(&self) -> &Path {
        &self.static_data_dir
    }

    fn as_attributes(&self) -> &dyn Attributes {
        self
    }
}

/// Registry of in-memory models, counting lookups and creations
pub struct InMemoryRegistry {
    models: RwLock<HashMap<String, Arc<dyn Model>>>,
    data_dir: PathBuf,
    lookups: AtomicUsize,
    created: AtomicUsize,
}

impl InMemoryRegistry {
    /// New models are rooted at `data_dir/<model id>`
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            models: RwLock::new(HashMap::new()),
            data_dir: data_dir.into(),
            lookups: AtomicUsize::new(0),
            created: AtomicUsize::new(0),
        }
    }

    /// Register an existing model
    pub fn insert(&self, model: impl Model + 'static) -> Arc<dyn Model> {
        let model: Arc<dyn Model> = Arc::new(model);
        self.insert_shared(Arc::clone(&model));
        model
    }

    /// Register a model the caller keeps a handle to
    pub fn insert_shared(&self, model: Arc<dyn Model>) {
        self.models
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(model.id().to_string(), model);
    }

    /// Number of `get` calls served so far
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }

    /// Number of models created through `create`
    pub fn created_count(&self) -> usize {
        self.created.load(Ordering::Relaxed)
    }

    pub fn len(&self) -> usize {
        self.models.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ModelRegistry for InMemoryRegistry {
    fn get(&self, id: &str) -> DomainResult<Arc<dyn Model>> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        self.models
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::ModelNotFound(id.to_string()))
    }

    fn create(&self) -> Arc<dyn Model> {
        let id = Uuid::new_v4().to_string();
        let model = self.insert(MemoryModel::new(id.clone(), self.data_dir.join(&id)));
        self.created.fetch_add(1, Ordering::Relaxed);
        tracing::info!(model_id = %id, "created model");
        model
    }
}

impl fmt::Debug for InMemoryRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryRegistry")
            .field("data_dir", &self.data_dir)
            .field("models", &self.len())
            .finish()
    }
}

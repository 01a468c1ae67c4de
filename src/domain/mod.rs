//! External collaborators of the validation core
//!
//! Sessions, the model registry, model containers and the location catalog
//! are owned by other layers. This module defines the interfaces the core
//! consumes, plus in-memory implementations used by the CLI and tests.

mod errors;
mod location;
mod model;
mod session;

pub use errors::{DomainError, DomainResult};
pub use location::{LocationCatalog, LocationEntry, MemoryLocationCatalog, WizardHandler};
pub use model::{Container, EntryMap, InMemoryRegistry, MemoryModel, Model, ModelRegistry};
pub use session::{MemorySession, SessionStore};

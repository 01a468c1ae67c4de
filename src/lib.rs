//! webgnome - request validation and form binding for the WebGNOME service
//!
//! - `schema`: declarative field trees and the coercion table
//! - `binding`: schema-driven value resolution against objects or mappings
//! - `validation`: validators, named chains, error payloads
//! - `domain`: collaborator interfaces (sessions, models, locations)
//! - `files`: path safety, directory and location file helpers

pub mod binding;
pub mod cli;
pub mod config;
pub mod domain;
pub mod files;
pub mod logging;
pub mod schema;
pub mod util;
pub mod validation;

//! CLI module for webgnome
//!
//! Provides command-line interface for:
//! - clean: Empty a model output or upload directory
//! - locations: List valid location files
//! - new-location: Create a location file skeleton

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{clean, locations, new_location, run, run_command};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_response, write_response_to};

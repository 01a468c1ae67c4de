//! CLI argument definitions using clap
//!
//! Commands:
//! - webgnome clean <directory> [--simulate]
//! - webgnome locations [--config <path>]
//! - webgnome new-location <name> [--config <path>] [--data <json>]

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// WebGNOME maintenance tools
#[derive(Parser, Debug)]
#[command(name = "webgnome")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Delete everything inside a directory (model output, uploads)
    Clean {
        /// Directory to empty
        directory: PathBuf,

        /// List what would be deleted without deleting it
        #[arg(long)]
        simulate: bool,
    },

    /// List the valid location files
    Locations {
        /// Path to configuration file
        #[arg(long, default_value = "./webgnome.json")]
        config: PathBuf,
    },

    /// Create a location file skeleton
    NewLocation {
        /// Directory name of the new location file
        name: String,

        /// Path to configuration file
        #[arg(long, default_value = "./webgnome.json")]
        config: PathBuf,

        /// JSON object written to config.json (default: {"name": <name>})
        #[arg(long)]
        data: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

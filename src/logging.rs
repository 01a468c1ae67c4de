//! Logging setup
//!
//! The library only emits `tracing` events. Binaries install a subscriber
//! once at startup through [`init`].

use tracing_subscriber::EnvFilter;

/// Filter for a `-v` count: 0 = warn, 1 = info, 2 = debug, 3+ = trace
pub fn filter_for(verbosity: u8) -> EnvFilter {
    match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

/// Install the global subscriber, writing to stderr
///
/// `RUST_LOG` overrides the verbosity. Returns false if a subscriber was
/// already installed.
pub fn init(verbosity: u8) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| filter_for(verbosity));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}

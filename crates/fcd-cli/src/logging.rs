//! Logging setup: a `tracing-subscriber` fmt layer on stderr.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directive from the verbosity flags, falling back to the config level.
pub fn level_for(verbose: u8, quiet: bool, configured: &str) -> String {
    match (verbose, quiet) {
        (0, true) => "error".to_string(),
        (0, false) => configured.to_string(),
        (1, _) => "info".to_string(),
        _ => "debug".to_string(),
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over `level`.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

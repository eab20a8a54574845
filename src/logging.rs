//! Diagnostic logging setup
//!
//! Events go to stderr so table and export output on stdout stays clean.
//! `RUST_LOG` takes precedence over the filter from settings.

use tracing_subscriber::EnvFilter;

/// Filter used when neither `RUST_LOG` nor settings give a usable one
pub const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber; later calls are no-ops
pub fn init(settings_filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(resolve_filter(settings_filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn resolve_filter(settings_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(settings_filter))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Compact logs on stderr so stdout stays reserved for command output.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init_cli(default_filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_filter))
        .with_writer(std::io::stderr)
        .compact()
        .with_target(false)
        .try_init();
}

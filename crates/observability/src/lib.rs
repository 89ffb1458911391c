//! Tracing and logging (shared setup).

/// Initialize human-readable logging on stderr for command-line use.
///
/// `default_filter` applies when `RUST_LOG` is unset.
pub fn init_cli(default_filter: &str) {
    tracing::init_cli(default_filter);
}

/// Tracing configuration (filters, layers).
pub mod tracing;

//! # Logging Setup
//!
//! Tracing subscriber initialization helpers.
//!
//! The filter comes from `RUST_LOG` when set, otherwise the supplied
//! default. Initialization is idempotent so tests can call it freely.

use tracing_subscriber::{fmt, EnvFilter};

/// Initializes human-readable log output at `info` by default.
pub fn init() {
    init_with_default("info");
}

/// Initializes JSON log output for production deployments.
pub fn init_json() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).json().try_init();
}

/// Initializes log output with an explicit default filter.
pub fn init_with_default(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = fmt().with_env_filter(filter).try_init();
}

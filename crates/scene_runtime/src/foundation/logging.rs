//! Logging utilities
//!
//! Thin wrapper over `env_logger`; filtering is controlled through the
//! `RUST_LOG` environment variable.

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system (call once per process)
pub fn init() {
    env_logger::init();
}

/// Fallible initialization for tests and hosts that may already have a logger
pub fn try_init() -> bool {
    env_logger::try_init().is_ok()
}

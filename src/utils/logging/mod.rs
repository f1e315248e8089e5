//! Logging initialization
//!
//! Installs the global `tracing` subscriber described by [`LoggingConfig`].
//! `RUST_LOG`, when set, takes precedence over the configured level.

use crate::config::LoggingConfig;
use crate::utils::error::{GateError, Result};
use tracing_subscriber::EnvFilter;

/// Filter from `RUST_LOG`, or from the configured level
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| GateError::logging(format!("Invalid log level {:?}: {}", config.level, e))),
    }
}

/// Install the global subscriber.
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = env_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.with_target)
        .with_thread_ids(false);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| GateError::logging(format!("Failed to install subscriber: {}", e)))
}

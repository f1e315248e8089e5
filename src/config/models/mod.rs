//! Configuration data models

#![allow(missing_docs)]

pub mod access;
pub mod logging;
pub mod usage;

pub use access::*;
pub use logging::*;
pub use usage::*;

/// Default values for configuration
pub fn default_true() -> bool {
    true
}

/// Default seconds between usage counter sweeps
pub fn default_cleanup_interval() -> u64 {
    3600
}

/// Default log filter
pub fn default_log_level() -> String {
    "info".to_string()
}

//! Usage tracking configuration

use super::*;
use crate::core::usage::UsagePeriod;
use serde::{Deserialize, Serialize};

/// Usage tracking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageConfig {
    /// Count invocations; when off every quota check passes
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Period used when a request names none
    #[serde(default)]
    pub default_period: UsagePeriod,
    /// Seconds between expired-counter sweeps
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_secs: u64,
}

impl Default for UsageConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default_period: UsagePeriod::default(),
            cleanup_interval_secs: default_cleanup_interval(),
        }
    }
}

impl UsageConfig {
    /// Merge usage configurations
    pub fn merge(mut self, other: Self) -> Self {
        if !other.enabled {
            self.enabled = other.enabled;
        }
        if other.default_period != UsagePeriod::default() {
            self.default_period = other.default_period;
        }
        if other.cleanup_interval_secs != default_cleanup_interval() {
            self.cleanup_interval_secs = other.cleanup_interval_secs;
        }
        self
    }
}

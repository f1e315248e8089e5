//! Access decision configuration

use super::*;
use crate::core::plan::PlanHierarchy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What `check_requirement` does with a feature name missing from the
/// requirement table.
///
/// This is independent of capability-matrix misses, which always deny.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownFeaturePolicy {
    /// Allow and log a warning
    #[default]
    Allow,
    /// Deny and log a warning
    Deny,
}

/// Access decision configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessConfig {
    /// Plan ordering used for plan checks and upgrade targets
    #[serde(default)]
    pub hierarchy: PlanHierarchy,
    /// Policy for feature names absent from the requirement table
    #[serde(default)]
    pub unknown_feature_policy: UnknownFeaturePolicy,
    /// YAML capability matrix; the built-in table when unset
    #[serde(default)]
    pub matrix_path: Option<PathBuf>,
    /// Log every decision at debug level
    #[serde(default = "default_true")]
    pub log_decisions: bool,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            hierarchy: PlanHierarchy::default(),
            unknown_feature_policy: UnknownFeaturePolicy::default(),
            matrix_path: None,
            log_decisions: true,
        }
    }
}

impl AccessConfig {
    /// Merge access configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.hierarchy != PlanHierarchy::default() {
            self.hierarchy = other.hierarchy;
        }
        if other.unknown_feature_policy != UnknownFeaturePolicy::default() {
            self.unknown_feature_policy = other.unknown_feature_policy;
        }
        if other.matrix_path.is_some() {
            self.matrix_path = other.matrix_path;
        }
        if !other.log_decisions {
            self.log_decisions = other.log_decisions;
        }
        self
    }
}

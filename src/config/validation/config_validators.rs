//! Validators for configuration sections

use super::trait_def::Validate;
use crate::config::models::*;
use crate::core::engine::FeatureRequirement;
use std::collections::HashSet;
use tracing_subscriber::EnvFilter;

impl Validate for AccessConfig {
    fn validate(&self) -> Result<(), String> {
        if let Some(path) = &self.matrix_path {
            if path.as_os_str().is_empty() {
                return Err("Capability matrix path cannot be empty".to_string());
            }
        }
        Ok(())
    }
}

impl Validate for UsageConfig {
    fn validate(&self) -> Result<(), String> {
        if self.cleanup_interval_secs == 0 {
            return Err("Usage cleanup interval must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        EnvFilter::try_new(&self.level)
            .map(|_| ())
            .map_err(|e| format!("Invalid log level {:?}: {}", self.level, e))
    }
}

impl Validate for FeatureRequirement {
    fn validate(&self) -> Result<(), String> {
        if self.feature.trim().is_empty() {
            return Err("Feature requirement must name a feature".to_string());
        }
        if self.usage_limit.is_none() && self.usage_period.is_some() {
            return Err(format!(
                "Feature {} sets a usage period without a usage limit",
                self.feature
            ));
        }
        Ok(())
    }
}

impl Validate for [FeatureRequirement] {
    fn validate(&self) -> Result<(), String> {
        let mut seen = HashSet::new();
        for requirement in self {
            requirement.validate()?;
            if !seen.insert(requirement.feature.as_str()) {
                return Err(format!(
                    "Feature {} is declared more than once",
                    requirement.feature
                ));
            }
        }
        Ok(())
    }
}

//! Configuration management for the access gate
//!
//! This module handles loading, validation, and merging of engine configuration.

mod loader;
pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::core::engine::{FeatureRequirement, RequirementTable};
use crate::utils::error::{GateError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the access gate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Access decision settings
    #[serde(default)]
    pub access: AccessConfig,
    /// Usage tracking settings
    #[serde(default)]
    pub usage: UsageConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Declarative feature requirements
    #[serde(default = "default_features")]
    pub features: Vec<FeatureRequirement>,
}

fn default_features() -> Vec<FeatureRequirement> {
    RequirementTable::builtin_requirements()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            access: AccessConfig::default(),
            usage: UsageConfig::default(),
            logging: LoggingConfig::default(),
            features: default_features(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GateError::config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml_str(&content)?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate a YAML document
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| GateError::config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Get access configuration
    pub fn access(&self) -> &AccessConfig {
        &self.access
    }

    /// Get usage configuration
    pub fn usage(&self) -> &UsageConfig {
        &self.usage
    }

    /// Get logging configuration
    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    /// Get feature requirements
    pub fn features(&self) -> &[FeatureRequirement] {
        &self.features
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.access
            .validate()
            .map_err(|e| GateError::validation(format!("Access config error: {}", e)))?;

        self.usage
            .validate()
            .map_err(|e| GateError::validation(format!("Usage config error: {}", e)))?;

        self.logging
            .validate()
            .map_err(|e| GateError::validation(format!("Logging config error: {}", e)))?;

        self.features
            .as_slice()
            .validate()
            .map_err(|e| GateError::validation(format!("Feature config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        self.access = self.access.merge(other.access);
        self.usage = self.usage.merge(other.usage);
        self.logging = self.logging.merge(other.logging);
        if other.features != default_features() {
            self.features = other.features;
        }
        self
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| GateError::config(format!("Failed to serialize config to JSON: {}", e)))
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| GateError::config(format!("Failed to serialize config to YAML: {}", e)))
    }
}

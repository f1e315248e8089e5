//! Configuration loading from the environment and layered sources

use super::Config;
use crate::core::plan::PlanHierarchy;
use crate::core::usage::UsagePeriod;
use crate::utils::error::{GateError, Result};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Prefix of every environment variable read by the loader
pub const ENV_PREFIX: &str = "ACCESS_GATE";

impl Config {
    /// Load configuration from environment variables
    ///
    /// A `.env` file in the working directory is read first when present.
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");
        dotenvy::dotenv().ok();

        let config = Self::from_lookup(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Build a configuration from `ACCESS_GATE_*` values supplied by `lookup`
    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{}_{}", ENV_PREFIX, name));
        let mut config = Self::default();

        // Access configuration
        if let Some(hierarchy) = var("HIERARCHY") {
            config.access.hierarchy = match hierarchy.to_lowercase().as_str() {
                "standard" => PlanHierarchy::Standard,
                "with_trial" | "trial" => PlanHierarchy::WithTrial,
                other => {
                    return Err(GateError::config(format!(
                        "Invalid plan hierarchy: {}",
                        other
                    )));
                }
            };
        }
        if let Some(policy) = var("UNKNOWN_FEATURE_POLICY") {
            config.access.unknown_feature_policy =
                serde_yaml::from_str(&policy.to_lowercase()).map_err(|e| {
                    GateError::config(format!("Invalid unknown feature policy: {}", e))
                })?;
        }
        if let Some(path) = var("MATRIX_PATH") {
            config.access.matrix_path = Some(PathBuf::from(path));
        }
        if let Some(log_decisions) = var("LOG_DECISIONS") {
            config.access.log_decisions = parse_bool("LOG_DECISIONS", &log_decisions)?;
        }

        // Usage configuration
        if let Some(enabled) = var("USAGE_ENABLED") {
            config.usage.enabled = parse_bool("USAGE_ENABLED", &enabled)?;
        }
        if let Some(period) = var("USAGE_PERIOD") {
            config.usage.default_period = UsagePeriod::parse_or_default(&period);
        }
        if let Some(interval) = var("CLEANUP_INTERVAL_SECS") {
            config.usage.cleanup_interval_secs = interval
                .parse()
                .map_err(|e| GateError::config(format!("Invalid cleanup interval: {}", e)))?;
        }

        // Logging configuration
        if let Some(level) = var("LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Some(json) = var("LOG_JSON") {
            config.logging.json = parse_bool("LOG_JSON", &json)?;
        }

        debug!("Configuration loaded from environment variables");
        Ok(config)
    }

    /// Load configuration from an optional YAML file overlaid with
    /// `ACCESS_GATE__SECTION__FIELD` environment variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut builder = ::config::Config::builder();
        if let Some(path) = path {
            info!("Loading layered configuration from: {:?}", path);
            builder = builder.add_source(
                ::config::File::from(path).format(::config::FileFormat::Yaml),
            );
        }
        builder = builder.add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(GateError::config(format!(
            "Invalid boolean for {}_{}: {}",
            ENV_PREFIX, name, value
        ))),
    }
}

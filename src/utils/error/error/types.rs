//! Error type definitions

use thiserror::Error;

/// Result type alias for the access gate
pub type Result<T> = std::result::Result<T, GateError>;

/// Main error type for the access gate
#[derive(Error, Debug)]
pub enum GateError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Layered configuration source errors
    #[error("Configuration source error: {0}")]
    ConfigSource(#[from] ::config::ConfigError),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unknown plan tier name
    #[error("Unknown plan tier: {0}")]
    UnknownTier(String),

    /// Unknown role label
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// Unknown account segment
    #[error("Unknown segment: {0}")]
    UnknownSegment(String),

    /// Feature key not declared by the platform
    #[error("Unknown feature: {0}")]
    UnknownFeature(String),

    /// Usage period name other than day, month or year
    #[error("Invalid usage period: {0}")]
    InvalidUsagePeriod(String),

    /// Capability value that fits none of the declared shapes
    #[error("Invalid capability value: {0}")]
    InvalidCapability(String),

    /// Logging subscriber could not be installed
    #[error("Logging error: {0}")]
    Logging(String),
}

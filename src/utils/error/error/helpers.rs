//! Helper functions for creating specific error types

use super::types::GateError;

impl GateError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn unknown_tier<S: Into<String>>(name: S) -> Self {
        Self::UnknownTier(name.into())
    }

    pub fn unknown_role<S: Into<String>>(name: S) -> Self {
        Self::UnknownRole(name.into())
    }

    pub fn unknown_segment<S: Into<String>>(name: S) -> Self {
        Self::UnknownSegment(name.into())
    }

    pub fn unknown_feature<S: Into<String>>(name: S) -> Self {
        Self::UnknownFeature(name.into())
    }

    pub fn invalid_usage_period<S: Into<String>>(name: S) -> Self {
        Self::InvalidUsagePeriod(name.into())
    }

    pub fn invalid_capability<S: Into<String>>(message: S) -> Self {
        Self::InvalidCapability(message.into())
    }

    pub fn logging<S: Into<String>>(message: S) -> Self {
        Self::Logging(message.into())
    }

    /// Whether the error came from parsing a name from an external source
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownTier(_)
                | Self::UnknownRole(_)
                | Self::UnknownSegment(_)
                | Self::UnknownFeature(_)
                | Self::InvalidUsagePeriod(_)
                | Self::InvalidCapability(_)
        )
    }
}

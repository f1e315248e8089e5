//! Plan tier definitions

use crate::utils::error::{GateError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Subscription level determining the feature ceiling of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanTier {
    /// Free plan
    Freemium,
    /// Time-limited trial of the advanced plan
    AdvancedTrial,
    /// Advanced plan
    Advanced,
    /// Professional plan
    Professional,
    /// Enterprise plan
    Enterprise,
}

impl PlanTier {
    /// Every tier known to the platform, across both hierarchies
    pub const ALL: [PlanTier; 5] = [
        PlanTier::Freemium,
        PlanTier::AdvancedTrial,
        PlanTier::Advanced,
        PlanTier::Professional,
        PlanTier::Enterprise,
    ];

    /// Wire name of the tier
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanTier::Freemium => "freemium",
            PlanTier::AdvancedTrial => "advanced_trial",
            PlanTier::Advanced => "advanced",
            PlanTier::Professional => "professional",
            PlanTier::Enterprise => "enterprise",
        }
    }

    /// Human-readable name for upgrade prompts
    pub fn display_name(&self) -> &'static str {
        match self {
            PlanTier::Freemium => "Freemium",
            PlanTier::AdvancedTrial => "Advanced (trial)",
            PlanTier::Advanced => "Advanced",
            PlanTier::Professional => "Professional",
            PlanTier::Enterprise => "Enterprise",
        }
    }

    /// Whether the tier is paid
    pub fn is_paid(&self) -> bool {
        !matches!(self, PlanTier::Freemium | PlanTier::AdvancedTrial)
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanTier {
    type Err = GateError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "freemium" => Ok(PlanTier::Freemium),
            "advanced_trial" => Ok(PlanTier::AdvancedTrial),
            "advanced" => Ok(PlanTier::Advanced),
            "professional" => Ok(PlanTier::Professional),
            "enterprise" => Ok(PlanTier::Enterprise),
            _ => Err(GateError::unknown_tier(s)),
        }
    }
}

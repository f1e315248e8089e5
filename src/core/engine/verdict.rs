//! Decision result types

use crate::core::identity::Role;
use crate::core::plan::PlanTier;
use crate::core::usage::UsagePeriod;
use serde::Serialize;
use std::fmt;

/// Why a check denied access
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum DenialReason {
    /// No identity was supplied
    Unauthenticated,
    /// The capability matrix has no entry for the identity's plan, segment
    /// and role of record
    NoCapabilities,
    /// The capability is absent or falsy for the identity's plan
    FeatureRequiresUpgrade,
    /// None of the required roles is held
    MissingRole { required: Vec<Role> },
    /// The identity's plan ranks below the required plan
    PlanTooLow { required: PlanTier },
    /// The usage counter for the current bucket reached its limit
    UsageLimitReached { limit: u64, period: UsagePeriod },
    /// The feature is not declared and the policy denies undeclared features
    UndeclaredFeature,
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenialReason::Unauthenticated => f.write_str("Not authenticated"),
            DenialReason::NoCapabilities => f.write_str("No capabilities found"),
            DenialReason::FeatureRequiresUpgrade => f.write_str("Feature requires upgrade"),
            DenialReason::MissingRole { required } => {
                let names: Vec<&str> = required.iter().map(Role::as_str).collect();
                match names.as_slice() {
                    [single] => write!(f, "Requires role: {}", single),
                    _ => write!(f, "Requires one of roles: {}", names.join(", ")),
                }
            }
            DenialReason::PlanTooLow { required } => {
                write!(f, "Requires {} plan or higher", required)
            }
            DenialReason::UsageLimitReached { limit, period } => {
                write!(f, "Usage limit of {} per {} reached", limit, period)
            }
            DenialReason::UndeclaredFeature => f.write_str("Feature is not declared"),
        }
    }
}

/// Result of an access check.
///
/// A denial always carries a reason; an allowed verdict never carries a
/// reason or an upgrade target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    allowed: bool,
    reason: Option<DenialReason>,
    upgrade_required: Option<PlanTier>,
}

/// Result of a feature gate or requirement check
pub type GateDecision = Verdict;

impl Verdict {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
            upgrade_required: None,
        }
    }

    pub fn deny(reason: DenialReason) -> Self {
        Self {
            allowed: false,
            reason: Some(reason),
            upgrade_required: None,
        }
    }

    /// Denial that names the plan which would grant access
    pub fn deny_with_upgrade(reason: DenialReason, upgrade: Option<PlanTier>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason),
            upgrade_required: upgrade,
        }
    }

    pub fn allowed(&self) -> bool {
        self.allowed
    }

    pub fn reason(&self) -> Option<&DenialReason> {
        self.reason.as_ref()
    }

    /// Human-readable denial reason
    pub fn reason_text(&self) -> Option<String> {
        self.reason.as_ref().map(ToString::to_string)
    }

    /// Lowest plan that would grant access, when one exists
    pub fn upgrade_required(&self) -> Option<PlanTier> {
        self.upgrade_required
    }

    /// What a gated surface should render for this verdict
    pub fn outcome(&self) -> GateOutcome {
        match (&self.reason, self.upgrade_required) {
            (None, _) => GateOutcome::Render,
            (Some(reason), Some(tier)) => GateOutcome::UpgradePrompt {
                tier,
                reason: reason.to_string(),
            },
            (Some(reason), None) => GateOutcome::Fallback {
                reason: reason.to_string(),
            },
        }
    }
}

/// Rendering instruction for a gated UI surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GateOutcome {
    /// Render the gated content
    Render,
    /// Render the fallback content, if any
    Fallback { reason: String },
    /// Render an upgrade prompt naming the target plan
    UpgradePrompt { tier: PlanTier, reason: String },
}

impl GateOutcome {
    pub fn is_render(&self) -> bool {
        matches!(self, GateOutcome::Render)
    }
}

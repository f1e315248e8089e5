//! Requirement-driven gates and usage reporting

use super::requirements::FeatureRequirement;
use super::system::AccessEngine;
use super::verdict::{DenialReason, GateDecision, Verdict};
use crate::config::UnknownFeaturePolicy;
use crate::core::capability::FeatureKey;
use crate::core::identity::Identity;
use crate::core::usage::{UsagePeriod, UsageStats};
use tracing::{debug, warn};

impl AccessEngine {
    /// Evaluate a feature requirement.
    ///
    /// Checks run in order (roles, plan, usage) and the first failure
    /// decides the reason. Usage is read, not recorded.
    pub fn check_feature_gate(
        &self,
        identity: Option<&Identity>,
        request: &FeatureRequirement,
    ) -> GateDecision {
        let Some(identity) = identity else {
            return Verdict::deny(DenialReason::Unauthenticated);
        };
        if identity.is_platform_admin() {
            return Verdict::allow();
        }

        if !request.required_roles.is_empty() && !identity.has_any_role(&request.required_roles) {
            return Verdict::deny(DenialReason::MissingRole {
                required: request.required_roles.clone(),
            });
        }

        if let Some(required) = request.required_plan {
            if !self.hierarchy().meets(identity.plan, required) {
                return Verdict::deny_with_upgrade(
                    DenialReason::PlanTooLow { required },
                    Some(required),
                );
            }
        }

        if let Some(limit) = request.usage_limit {
            let period = self.period_or_default(request.usage_period);
            let check = self
                .tracker
                .check(identity, &request.feature, Some(limit), period);
            if !check.allowed {
                return Verdict::deny(DenialReason::UsageLimitReached { limit, period });
            }
        }

        Verdict::allow()
    }

    /// Evaluate the declared requirement for `feature`.
    ///
    /// Features missing from the requirement table follow the configured
    /// [`UnknownFeaturePolicy`] (allow by default). This is separate from
    /// capability matrix misses, which always deny.
    pub fn check_requirement(&self, identity: Option<&Identity>, feature: &str) -> GateDecision {
        let Some(identity) = identity else {
            return Verdict::deny(DenialReason::Unauthenticated);
        };
        if identity.is_platform_admin() {
            return Verdict::allow();
        }

        let decision = match self.requirements.get(feature) {
            Some(requirement) => self.check_feature_gate(Some(identity), requirement),
            None => match self.config.unknown_feature_policy {
                UnknownFeaturePolicy::Allow => {
                    warn!("Feature {:?} has no declared requirement, allowing", feature);
                    Verdict::allow()
                }
                UnknownFeaturePolicy::Deny => {
                    warn!("Feature {:?} has no declared requirement, denying", feature);
                    Verdict::deny(DenialReason::UndeclaredFeature)
                }
            },
        };

        debug!(
            "Requirement {} for {}: allowed={}",
            feature,
            identity.user_id,
            decision.allowed()
        );
        decision
    }

    /// Record one invocation of `feature`; anonymous calls are ignored
    pub fn track_usage(&self, identity: Option<&Identity>, feature: &str, period: UsagePeriod) {
        match identity {
            Some(identity) => {
                self.tracker.track(identity, feature, period);
            }
            None => debug!("Ignoring usage of {} without an identity", feature),
        }
    }

    /// Current bucket statistics for `feature`.
    ///
    /// The limit and period come from the declared requirement when there
    /// is one, otherwise from the identity's matrix quota for a known
    /// feature key.
    pub fn get_usage_stats(&self, identity: &Identity, feature: &str) -> UsageStats {
        let (limit, period) = match self.requirements.get(feature) {
            Some(requirement) if requirement.usage_limit.is_some() => (
                requirement.usage_limit,
                self.period_or_default(requirement.usage_period),
            ),
            _ => (self.matrix_quota(identity, feature), self.tracker.default_period()),
        };
        self.tracker.stats(identity, feature, limit, period)
    }

    fn matrix_quota(&self, identity: &Identity, feature: &str) -> Option<u64> {
        if identity.is_platform_admin() {
            return None;
        }
        let key = feature.parse::<FeatureKey>().ok()?;
        let role = identity.primary_role()?;
        self.matrix
            .load()
            .lookup(identity.plan, identity.segment, role)?
            .get(key)?
            .quota()
    }

    fn period_or_default(&self, period: Option<UsagePeriod>) -> UsagePeriod {
        period.unwrap_or_else(|| self.tracker.default_period())
    }
}

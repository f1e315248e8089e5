//! Checks bound to the provider's current identity

use super::requirements::FeatureRequirement;
use super::system::AccessEngine;
use super::verdict::{GateDecision, Verdict};
use crate::core::capability::{AiTier, FeatureKey};
use crate::core::identity::{Identity, Role};
use crate::core::plan::PlanTier;
use crate::core::usage::{UsagePeriod, UsageStats};

/// Engine handle for the identity the provider reported when the handle was
/// created
#[derive(Debug)]
pub struct CurrentAccess<'a> {
    engine: &'a AccessEngine,
    identity: Option<Identity>,
}

impl AccessEngine {
    /// Bind checks to the identity provider's current identity
    pub fn current(&self) -> CurrentAccess<'_> {
        CurrentAccess {
            engine: self,
            identity: self.identity_provider.current_identity(),
        }
    }
}

impl CurrentAccess<'_> {
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    pub fn check_feature(&self, feature: FeatureKey) -> Verdict {
        self.engine.check_feature(self.identity(), feature)
    }

    pub fn check_feature_named(&self, feature: &str) -> Verdict {
        self.engine.check_feature_named(self.identity(), feature)
    }

    pub fn check_role(&self, roles: &[Role]) -> bool {
        self.engine.check_role(self.identity(), roles)
    }

    pub fn check_plan(&self, required: PlanTier) -> bool {
        self.engine.check_plan(self.identity(), required)
    }

    pub fn check_ai_access(&self, requested: AiTier) -> Verdict {
        self.engine.check_ai_access(self.identity(), requested)
    }

    pub fn check_feature_gate(&self, request: &FeatureRequirement) -> GateDecision {
        self.engine.check_feature_gate(self.identity(), request)
    }

    pub fn check_requirement(&self, feature: &str) -> GateDecision {
        self.engine.check_requirement(self.identity(), feature)
    }

    pub fn check_usage_quota(&self, feature: FeatureKey, period: UsagePeriod) -> Verdict {
        self.engine.check_usage_quota(self.identity(), feature, period)
    }

    /// Check the quota and record the invocation atomically when it fits
    pub fn consume_usage_quota(&self, feature: FeatureKey, period: UsagePeriod) -> Verdict {
        self.engine.consume_usage_quota(self.identity(), feature, period)
    }

    pub fn track_usage(&self, feature: &str, period: UsagePeriod) {
        self.engine.track_usage(self.identity(), feature, period)
    }

    /// `None` when nobody is signed in
    pub fn usage_stats(&self, feature: &str) -> Option<UsageStats> {
        self.identity()
            .map(|identity| self.engine.get_usage_stats(identity, feature))
    }
}

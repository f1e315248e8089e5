//! Feature, role, plan, AI and quota checks

use super::ai::ai_access_allows;
use super::system::AccessEngine;
use super::verdict::{DenialReason, Verdict};
use crate::core::capability::{AiTier, CapabilityMatrix, CapabilitySet, FeatureKey};
use crate::core::identity::{Identity, Role};
use crate::core::plan::PlanTier;
use crate::core::usage::{UsageCheck, UsagePeriod};
use tracing::{debug, warn};

/// Where a capability lookup ended up
enum Resolved<'a> {
    Denied(Verdict),
    Bypass,
    Capabilities(&'a CapabilitySet),
}

impl AccessEngine {
    /// Steps shared by every capability check: authentication, admin bypass
    /// and matrix lookup by plan, segment and role of record
    fn resolve<'m>(
        &self,
        matrix: &'m CapabilityMatrix,
        identity: Option<&Identity>,
        subject: &str,
    ) -> Resolved<'m> {
        let Some(identity) = identity else {
            return Resolved::Denied(Verdict::deny(DenialReason::Unauthenticated));
        };
        if identity.is_platform_admin() {
            return Resolved::Bypass;
        }

        let capabilities = identity
            .primary_role()
            .and_then(|role| matrix.lookup(identity.plan, identity.segment, role));

        match capabilities {
            Some(capabilities) => Resolved::Capabilities(capabilities),
            None => {
                warn!(
                    "No capabilities for {} (plan {}, segment {}, role {:?}) checking {} in matrix {}",
                    identity.user_id,
                    identity.plan,
                    identity.segment,
                    identity.primary_role(),
                    subject,
                    matrix.version()
                );
                Resolved::Denied(Verdict::deny(DenialReason::NoCapabilities))
            }
        }
    }

    /// Lowest tier above the identity's plan whose capability set for the
    /// same segment and role satisfies `offers`
    fn upgrade_target<F>(
        &self,
        matrix: &CapabilityMatrix,
        identity: &Identity,
        offers: F,
    ) -> Option<PlanTier>
    where
        F: Fn(&CapabilitySet) -> bool,
    {
        let role = identity.primary_role()?;
        self.hierarchy()
            .tiers_above(identity.plan)
            .find(|tier| {
                matrix
                    .lookup(*tier, identity.segment, role)
                    .is_some_and(&offers)
            })
    }

    fn log_verdict(&self, identity: Option<&Identity>, subject: &str, verdict: &Verdict) {
        if !self.config.log_decisions {
            return;
        }
        let user = identity.map_or("<anonymous>", |i| i.user_id.as_str());
        match verdict.reason() {
            None => debug!("Access to {} allowed for {}", subject, user),
            Some(reason) => debug!(
                "Access to {} denied for {}: {} (upgrade: {:?})",
                subject,
                user,
                reason,
                verdict.upgrade_required()
            ),
        }
    }

    /// Whether the identity's capabilities include `feature`
    pub fn check_feature(&self, identity: Option<&Identity>, feature: FeatureKey) -> Verdict {
        let verdict = self.evaluate_feature(identity, Some(feature), feature.as_str());
        self.log_verdict(identity, feature.as_str(), &verdict);
        verdict
    }

    /// [`check_feature`](Self::check_feature) for a feature name.
    ///
    /// A name outside the known feature set is treated as an absent
    /// capability.
    pub fn check_feature_named(&self, identity: Option<&Identity>, feature: &str) -> Verdict {
        let key = match feature.parse::<FeatureKey>() {
            Ok(key) => Some(key),
            Err(_) => {
                warn!("Unknown feature key {:?}, treating as absent", feature);
                None
            }
        };
        let verdict = self.evaluate_feature(identity, key, feature);
        self.log_verdict(identity, feature, &verdict);
        verdict
    }

    fn evaluate_feature(
        &self,
        identity: Option<&Identity>,
        feature: Option<FeatureKey>,
        subject: &str,
    ) -> Verdict {
        let matrix = self.matrix.load();
        let capabilities = match self.resolve(&matrix, identity, subject) {
            Resolved::Denied(verdict) => return verdict,
            Resolved::Bypass => return Verdict::allow(),
            Resolved::Capabilities(capabilities) => capabilities,
        };

        let Some(feature) = feature else {
            return Verdict::deny(DenialReason::FeatureRequiresUpgrade);
        };
        if capabilities.is_enabled(feature) {
            return Verdict::allow();
        }

        let upgrade = identity.and_then(|identity| {
            self.upgrade_target(&matrix, identity, |set| set.is_enabled(feature))
        });
        Verdict::deny_with_upgrade(DenialReason::FeatureRequiresUpgrade, upgrade)
    }

    /// Whether the identity holds at least one of `roles`
    pub fn check_role(&self, identity: Option<&Identity>, roles: &[Role]) -> bool {
        match identity {
            None => false,
            Some(identity) => identity.is_platform_admin() || identity.has_any_role(roles),
        }
    }

    /// Whether the identity's plan ranks at or above `required`
    pub fn check_plan(&self, identity: Option<&Identity>, required: PlanTier) -> bool {
        match identity {
            None => false,
            Some(identity) => {
                identity.is_platform_admin() || self.hierarchy().meets(identity.plan, required)
            }
        }
    }

    /// Whether the identity's `aiAccess` value grants the requested tier
    pub fn check_ai_access(&self, identity: Option<&Identity>, requested: AiTier) -> Verdict {
        let subject = FeatureKey::AiAccess.as_str();
        let matrix = self.matrix.load();
        let verdict = match self.resolve(&matrix, identity, subject) {
            Resolved::Denied(verdict) => verdict,
            Resolved::Bypass => Verdict::allow(),
            Resolved::Capabilities(capabilities) => {
                if ai_access_allows(capabilities.get(FeatureKey::AiAccess), requested) {
                    Verdict::allow()
                } else {
                    let upgrade = identity.and_then(|identity| {
                        self.upgrade_target(&matrix, identity, |set| {
                            ai_access_allows(set.get(FeatureKey::AiAccess), requested)
                        })
                    });
                    Verdict::deny_with_upgrade(DenialReason::FeatureRequiresUpgrade, upgrade)
                }
            }
        };
        self.log_verdict(identity, subject, &verdict);
        verdict
    }

    /// Check a quota feature against the identity's current usage without
    /// recording an invocation.
    ///
    /// The matrix value is the limit: `Quota(n)` caps at `n`, `Unlimited` and
    /// `Flag(true)` are uncapped, falsy values deny with an upgrade target.
    pub fn check_usage_quota(
        &self,
        identity: Option<&Identity>,
        feature: FeatureKey,
        period: UsagePeriod,
    ) -> Verdict {
        self.evaluate_quota(identity, feature, period, false)
    }

    /// Like [`check_usage_quota`](Self::check_usage_quota), recording the
    /// invocation atomically when it is within quota
    pub fn consume_usage_quota(
        &self,
        identity: Option<&Identity>,
        feature: FeatureKey,
        period: UsagePeriod,
    ) -> Verdict {
        self.evaluate_quota(identity, feature, period, true)
    }

    fn evaluate_quota(
        &self,
        identity: Option<&Identity>,
        feature: FeatureKey,
        period: UsagePeriod,
        record: bool,
    ) -> Verdict {
        let subject = feature.as_str();
        let matrix = self.matrix.load();

        let verdict = match (self.resolve(&matrix, identity, subject), identity) {
            (Resolved::Denied(verdict), _) => verdict,
            (Resolved::Bypass, _) | (_, None) => Verdict::allow(),
            (Resolved::Capabilities(capabilities), Some(identity)) => {
                match capabilities.get(feature).filter(|c| c.is_enabled()) {
                    None => Verdict::deny_with_upgrade(
                        DenialReason::FeatureRequiresUpgrade,
                        self.upgrade_target(&matrix, identity, |set| set.is_enabled(feature)),
                    ),
                    Some(capability) => {
                        let limit = capability.quota();
                        let check = if record {
                            self.tracker.check_and_track(identity, subject, limit, period)
                        } else {
                            self.tracker.check(identity, subject, limit, period)
                        };
                        self.quota_verdict(&matrix, identity, feature, period, &check)
                    }
                }
            }
        };
        self.log_verdict(identity, subject, &verdict);
        verdict
    }

    fn quota_verdict(
        &self,
        matrix: &CapabilityMatrix,
        identity: &Identity,
        feature: FeatureKey,
        period: UsagePeriod,
        check: &UsageCheck,
    ) -> Verdict {
        match (check.allowed, check.limit) {
            (true, _) | (false, None) => Verdict::allow(),
            (false, Some(limit)) => {
                // A higher tier helps only if it raises the cap.
                let upgrade = self.upgrade_target(matrix, identity, |set| {
                    set.get(feature).is_some_and(|c| {
                        c.is_enabled() && c.quota().is_none_or(|higher| higher > limit)
                    })
                });
                Verdict::deny_with_upgrade(
                    DenialReason::UsageLimitReached { limit, period },
                    upgrade,
                )
            }
        }
    }
}

//! Custom test assertions
//!
//! Domain-specific assertions for verdicts.

use access_gate::{DenialReason, PlanTier, Verdict};

/// Assertions for Verdict
pub trait VerdictAssertions {
    /// Assert the verdict allows access
    fn assert_allowed(&self);

    /// Assert the verdict denies with the given reason text
    fn assert_denied_with(&self, reason: &str);

    /// Assert the verdict denies with an upgrade prompt for `tier`
    fn assert_upgrade_to(&self, tier: PlanTier);
}

impl VerdictAssertions for Verdict {
    fn assert_allowed(&self) {
        assert!(
            self.allowed(),
            "Expected access to be allowed, denied with {:?}",
            self.reason()
        );
        assert!(self.reason().is_none());
        assert!(self.upgrade_required().is_none());
    }

    fn assert_denied_with(&self, reason: &str) {
        assert!(!self.allowed(), "Expected access to be denied");
        assert_eq!(self.reason_text().as_deref(), Some(reason));
    }

    fn assert_upgrade_to(&self, tier: PlanTier) {
        assert!(!self.allowed(), "Expected access to be denied");
        assert_eq!(
            self.reason(),
            Some(&DenialReason::FeatureRequiresUpgrade),
            "Expected an upgrade denial"
        );
        assert_eq!(self.upgrade_required(), Some(tier));
    }
}

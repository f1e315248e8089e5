//! Access decision scenarios against the built-in matrix
//!
//! Each test follows a screen or action of the booking platform through the
//! engine the way a gated surface would.

#[cfg(test)]
mod tests {
    use crate::common::assertions::VerdictAssertions;
    use crate::common::fixtures::{IdentityFactory, MatrixFactory};
    use access_gate::{
        AccessEngine, AiTier, FeatureKey, FeatureRequirement, GateOutcome, PlanHierarchy,
        PlanTier, Role, Segment, StaticIdentityProvider, UsagePeriod,
    };
    use std::sync::Arc;

    // ==================== Settings Screens ====================

    #[test]
    fn test_ai_settings_screen_for_professional() {
        let engine = AccessEngine::new();
        let user = IdentityFactory::end_user(PlanTier::Professional);

        let verdict = engine.check_feature(Some(&user), FeatureKey::AiSettings);
        verdict.assert_allowed();
        assert_eq!(verdict.outcome(), GateOutcome::Render);
    }

    #[test]
    fn test_custom_domain_prompts_enterprise_upgrade() {
        let engine = AccessEngine::new();
        let user = IdentityFactory::end_user(PlanTier::Professional);

        let verdict = engine.check_feature(Some(&user), FeatureKey::CustomDomain);
        verdict.assert_upgrade_to(PlanTier::Enterprise);
        assert_eq!(
            verdict.outcome(),
            GateOutcome::UpgradePrompt {
                tier: PlanTier::Enterprise,
                reason: "Feature requires upgrade".to_string(),
            }
        );
    }

    #[test]
    fn test_every_plan_sees_core_screens() {
        let engine = AccessEngine::new();
        for plan in PlanTier::ALL {
            let user = IdentityFactory::end_user(plan);
            for feature in [FeatureKey::Dashboard, FeatureKey::Bookings, FeatureKey::Calendar] {
                engine.check_feature(Some(&user), feature).assert_allowed();
            }
        }
    }

    #[test]
    fn test_higher_plans_never_lose_features() {
        let engine = AccessEngine::new();
        let tiers = PlanHierarchy::Standard.tiers();

        for pair in tiers.windows(2) {
            let lower = IdentityFactory::end_user(pair[0]);
            let higher = IdentityFactory::end_user(pair[1]);
            for feature in FeatureKey::ALL {
                if engine.check_feature(Some(&lower), feature).allowed() {
                    assert!(
                        engine.check_feature(Some(&higher), feature).allowed(),
                        "{} lost {} moving to {}",
                        pair[0],
                        feature,
                        pair[1]
                    );
                }
            }
        }
    }

    #[test]
    fn test_team_management_by_segment_and_role() {
        let engine = AccessEngine::new();

        let admin = IdentityFactory::team_admin(PlanTier::Advanced);
        engine
            .check_feature(Some(&admin), FeatureKey::TeamManagement)
            .assert_allowed();
        assert!(!engine.check_feature(Some(&admin), FeatureKey::OrgManagement).allowed());

        let member = IdentityFactory::create(&[Role::EndUser], PlanTier::Advanced, Segment::TeamMember);
        assert!(!engine.check_feature(Some(&member), FeatureKey::TeamManagement).allowed());

        let org = IdentityFactory::org_admin(PlanTier::Professional);
        engine
            .check_feature(Some(&org), FeatureKey::OrgManagement)
            .assert_allowed();
    }

    #[test]
    fn test_freemium_team_accounts_have_no_capabilities() {
        let engine = AccessEngine::new();
        let admin = IdentityFactory::team_admin(PlanTier::Freemium);

        engine
            .check_feature(Some(&admin), FeatureKey::Dashboard)
            .assert_denied_with("No capabilities found");
    }

    // ==================== Admin Bypass ====================

    #[test]
    fn test_platform_admin_on_empty_matrix() {
        let engine = AccessEngine::builder()
            .matrix(Arc::new(MatrixFactory::empty()))
            .build();
        let admin = IdentityFactory::platform_admin();

        for feature in FeatureKey::ALL {
            engine.check_feature(Some(&admin), feature).assert_allowed();
        }
        engine
            .check_ai_access(Some(&admin), AiTier::Full)
            .assert_allowed();
        assert!(engine.check_plan(Some(&admin), PlanTier::Enterprise));
        assert!(engine.check_role(Some(&admin), &[Role::OrgAdmin]));
    }

    // ==================== AI Access ====================

    #[test]
    fn test_ai_access_by_plan() {
        let engine = AccessEngine::builder()
            .hierarchy(PlanHierarchy::WithTrial)
            .build();

        let expectations = [
            (PlanTier::Freemium, false, false),
            (PlanTier::AdvancedTrial, true, false),
            (PlanTier::Advanced, true, false),
            (PlanTier::Professional, true, true),
            (PlanTier::Enterprise, true, true),
        ];

        for (plan, booking_only, full) in expectations {
            let user = IdentityFactory::end_user(plan);
            assert_eq!(
                engine.check_ai_access(Some(&user), AiTier::BookingOnly).allowed(),
                booking_only,
                "{} booking_only",
                plan
            );
            assert_eq!(
                engine.check_ai_access(Some(&user), AiTier::Full).allowed(),
                full,
                "{} full",
                plan
            );
        }
    }

    // ==================== Feature Gates ====================

    #[test]
    fn test_gate_reports_first_failing_check() {
        let engine = AccessEngine::new();
        let user = IdentityFactory::end_user(PlanTier::Freemium);

        let request = FeatureRequirement::new("teamSettings")
            .with_roles(&[Role::TeamAdmin, Role::OrgAdmin])
            .with_plan(PlanTier::Professional);
        engine
            .check_feature_gate(Some(&user), &request)
            .assert_denied_with("Requires one of roles: team_admin, org_admin");

        let admin = IdentityFactory::team_admin(PlanTier::Advanced);
        engine
            .check_feature_gate(Some(&admin), &request)
            .assert_denied_with("Requires professional plan or higher");

        let admin = IdentityFactory::team_admin(PlanTier::Professional);
        engine
            .check_feature_gate(Some(&admin), &request)
            .assert_allowed();
    }

    #[test]
    fn test_requirement_table_asymmetry() {
        let engine = AccessEngine::new();
        let user = IdentityFactory::end_user(PlanTier::Freemium);

        // Undeclared requirement: allowed.
        engine
            .check_requirement(Some(&user), "brandNewWidget")
            .assert_allowed();

        // Unmatched matrix entry: denied.
        let stray = IdentityFactory::create(&[Role::OrgAdmin], PlanTier::Freemium, Segment::OrgAdmin);
        engine
            .check_feature(Some(&stray), FeatureKey::Dashboard)
            .assert_denied_with("No capabilities found");
    }

    #[test]
    fn test_requirement_usage_cap() {
        let (engine, _clock) = crate::common::fixtures::engine_with_clock();
        let user = IdentityFactory::end_user(PlanTier::Advanced);

        for _ in 0..10 {
            engine
                .check_requirement(Some(&user), "aiServiceTemplates")
                .assert_allowed();
            engine.track_usage(Some(&user), "aiServiceTemplates", UsagePeriod::Month);
        }

        engine
            .check_requirement(Some(&user), "aiServiceTemplates")
            .assert_denied_with("Usage limit of 10 per month reached");
    }

    // ==================== Current Identity ====================

    #[test]
    fn test_signed_in_session() {
        let provider = Arc::new(StaticIdentityProvider::new());
        let engine = AccessEngine::builder()
            .identity_provider(provider.clone())
            .build();

        engine
            .current()
            .check_feature(FeatureKey::Dashboard)
            .assert_denied_with("Not authenticated");

        provider.set(IdentityFactory::end_user(PlanTier::Enterprise));
        let access = engine.current();
        access.check_feature(FeatureKey::ApiAccess).assert_allowed();
        assert!(access.check_plan(PlanTier::Enterprise));
    }

    // ==================== Matrix Reload ====================

    #[test]
    fn test_reload_swaps_capabilities() {
        let engine = AccessEngine::new();
        let user = IdentityFactory::end_user(PlanTier::Enterprise);
        engine
            .check_feature(Some(&user), FeatureKey::ApiAccess)
            .assert_allowed();

        engine.reload_matrix(Arc::new(MatrixFactory::two_tier()));
        let user = IdentityFactory::end_user(PlanTier::Freemium);
        engine
            .check_feature(Some(&user), FeatureKey::ApiAccess)
            .assert_upgrade_to(PlanTier::Enterprise);
        assert_eq!(engine.matrix().version(), "two-tier");
    }
}

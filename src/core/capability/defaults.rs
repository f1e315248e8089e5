//! Capability table shipped with the crate

use super::feature::FeatureKey;
use super::matrix::CapabilityMatrix;
use super::types::{AiTier, Capability, CapabilitySet};
use crate::core::identity::{Role, Segment};
use crate::core::plan::PlanTier;
use once_cell::sync::Lazy;
use std::sync::Arc;

pub(super) const BUILTIN_VERSION: &str = "builtin-2024.06";

static BUILTIN: Lazy<Arc<CapabilityMatrix>> = Lazy::new(|| Arc::new(build()));

pub(super) fn builtin_matrix() -> Arc<CapabilityMatrix> {
    BUILTIN.clone()
}

/// Features every plan gets
const CORE: &[FeatureKey] = &[
    FeatureKey::Dashboard,
    FeatureKey::Bookings,
    FeatureKey::Calendar,
    FeatureKey::Services,
    FeatureKey::Clients,
];

fn plan_base(plan: PlanTier) -> CapabilitySet {
    use FeatureKey::*;

    let free = CapabilitySet::new()
        .enable(CORE)
        .with(AiAccess, Capability::Flag(false))
        .with(SmartServiceTemplates, Capability::Quota(3));

    match plan {
        PlanTier::Freemium => free,
        PlanTier::AdvancedTrial => free
            .enable(&[Analytics, SlotBroadcast])
            .with(AiAccess, Capability::Ai(AiTier::BookingOnly))
            .with(SmartServiceTemplates, Capability::Quota(5)),
        PlanTier::Advanced => free
            .enable(&[Analytics, SlotBroadcast, CsvExport, Integrations])
            .with(AiAccess, Capability::Flag(true))
            .with(SmartServiceTemplates, Capability::Quota(10)),
        PlanTier::Professional => plan_base(PlanTier::Advanced)
            .enable(&[
                AdvancedAnalytics,
                AiSettings,
                AiVoiceAssistant,
                CustomBranding,
                PrioritySupport,
            ])
            .with(AiAccess, Capability::Ai(AiTier::Full))
            .with(SmartServiceTemplates, Capability::Quota(25)),
        PlanTier::Enterprise => plan_base(PlanTier::Professional)
            .enable(&[CustomDomain, ApiAccess])
            .with(SmartServiceTemplates, Capability::Unlimited),
    }
}

fn build() -> CapabilityMatrix {
    let mut builder = CapabilityMatrix::builder(BUILTIN_VERSION);

    for plan in PlanTier::ALL {
        let base = plan_base(plan);

        builder = builder.grant(plan, Segment::Individual, Role::EndUser, base.clone());

        // Team and organization accounts start at the advanced trial.
        if plan == PlanTier::Freemium {
            continue;
        }

        let team_admin = base.clone().enable(&[FeatureKey::TeamManagement]);
        let org_admin = team_admin.clone().enable(&[FeatureKey::OrgManagement]);

        builder = builder
            .grant(plan, Segment::TeamMember, Role::EndUser, base.clone())
            .grant(plan, Segment::TeamAdmin, Role::EndUser, base.clone())
            .grant(plan, Segment::TeamAdmin, Role::TeamAdmin, team_admin.clone())
            .grant(plan, Segment::OrgAdmin, Role::EndUser, base.clone())
            .grant(plan, Segment::OrgAdmin, Role::TeamAdmin, team_admin)
            .grant(plan, Segment::OrgAdmin, Role::OrgAdmin, org_admin);
    }

    builder.build()
}

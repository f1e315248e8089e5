//! Test fixtures and data factories
//!
//! Factories create real values with sensible defaults.

use access_gate::{
    AccessEngine, Capability, CapabilityMatrix, CapabilitySet, FeatureKey, Identity, ManualClock,
    PlanTier, Role, Segment,
};
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_USER: AtomicU64 = AtomicU64::new(1);

fn next_user_id() -> String {
    format!("user-{}", NEXT_USER.fetch_add(1, Ordering::Relaxed))
}

/// Factory for test identities; every identity gets a fresh user id
pub struct IdentityFactory;

impl IdentityFactory {
    pub fn create(roles: &[Role], plan: PlanTier, segment: Segment) -> Identity {
        Identity::new(next_user_id(), roles.to_vec(), plan, segment)
    }

    /// Individual end user on `plan`
    pub fn end_user(plan: PlanTier) -> Identity {
        Self::create(&[Role::EndUser], plan, Segment::Individual)
    }

    pub fn team_admin(plan: PlanTier) -> Identity {
        Self::create(&[Role::TeamAdmin], plan, Segment::TeamAdmin)
    }

    pub fn org_admin(plan: PlanTier) -> Identity {
        Self::create(&[Role::OrgAdmin], plan, Segment::OrgAdmin)
    }

    pub fn platform_admin() -> Identity {
        Self::create(&[Role::PlatformAdmin], PlanTier::Freemium, Segment::Individual)
    }
}

/// Factory for small capability matrices
pub struct MatrixFactory;

impl MatrixFactory {
    /// Individual end users only: freemium gets the dashboard, enterprise
    /// gets everything
    pub fn two_tier() -> CapabilityMatrix {
        CapabilityMatrix::builder("two-tier")
            .grant(
                PlanTier::Freemium,
                Segment::Individual,
                Role::EndUser,
                CapabilitySet::new()
                    .enable(&[FeatureKey::Dashboard])
                    .with(FeatureKey::SmartServiceTemplates, Capability::Quota(1)),
            )
            .grant(
                PlanTier::Enterprise,
                Segment::Individual,
                Role::EndUser,
                CapabilitySet::new()
                    .enable(&FeatureKey::ALL)
                    .with(FeatureKey::SmartServiceTemplates, Capability::Unlimited),
            )
            .build()
    }

    pub fn empty() -> CapabilityMatrix {
        CapabilityMatrix::builder("empty").build()
    }
}

/// Fixed instant used by clock-driven tests
pub fn test_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap()
}

/// Engine over the built-in matrix with a manual clock at [`test_instant`]
pub fn engine_with_clock() -> (AccessEngine, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(test_instant()));
    let engine = AccessEngine::builder().clock(clock.clone()).build();
    (engine, clock)
}

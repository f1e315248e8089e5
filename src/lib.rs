//! # access-gate
//!
//! Plan, role and feature gating for a booking platform.
//!
//! ## Features
//!
//! - **Capability matrix**: versioned `plan × segment × role` table of
//!   feature capabilities, built in code, shipped as a default, or loaded
//!   from YAML
//! - **Plan hierarchy**: standard and trial orderings of plan tiers
//! - **Access decisions**: feature, role, plan, AI tier and declarative
//!   requirement checks returning structured verdicts with upgrade targets
//! - **Usage quotas**: per-user counters bucketed by day, month or year
//!
//! ## Quick Start
//!
//! ```rust
//! use access_gate::{AccessEngine, FeatureKey, Identity, PlanTier, Role, Segment};
//!
//! let engine = AccessEngine::new();
//! let user = Identity::new(
//!     "user-42",
//!     vec![Role::EndUser],
//!     PlanTier::Professional,
//!     Segment::Individual,
//! );
//!
//! assert!(engine.check_feature(Some(&user), FeatureKey::AiSettings).allowed());
//!
//! let verdict = engine.check_feature(Some(&user), FeatureKey::CustomDomain);
//! assert!(!verdict.allowed());
//! assert_eq!(verdict.upgrade_required(), Some(PlanTier::Enterprise));
//! ```
//!
//! ## From Configuration
//!
//! ```rust,no_run
//! use access_gate::{AccessEngine, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/access-gate.yaml").await?;
//!     access_gate::utils::logging::init_logging(config.logging())?;
//!     let engine = AccessEngine::from_config(&config).await?;
//!     let _cleanup = engine.tracker().clone().start_cleanup_task();
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod utils;

// Re-export main types
pub use crate::config::Config;
pub use crate::core::capability::{
    AiTier, Capability, CapabilityMatrix, CapabilityMatrixBuilder, CapabilitySet, FeatureKey,
};
pub use crate::core::engine::{
    AccessEngine, AccessEngineBuilder, CurrentAccess, DenialReason, FeatureRequirement,
    GateDecision, GateOutcome, IdentityProvider, RequirementTable, StaticIdentityProvider,
    Verdict,
};
pub use crate::core::identity::{Identity, Role, Segment};
pub use crate::core::plan::{PlanHierarchy, PlanTier};
pub use crate::core::usage::{
    Clock, InMemoryUsageStore, ManualClock, Remaining, SystemClock, UsageCheck, UsagePeriod,
    UsageStats, UsageStore, UsageTracker,
};
pub use crate::utils::error::{GateError, Result};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

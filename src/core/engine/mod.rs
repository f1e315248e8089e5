//! Access decision engine
//!
//! Combines the capability matrix, the plan hierarchy, declared feature
//! requirements and the usage tracker into allow/deny verdicts.
//!
//! Check order for every capability question: missing identity denies,
//! `platform_admin` allows, then the matrix entry for the identity's plan,
//! segment and role of record decides. A missing matrix entry denies. A
//! feature missing from the requirement table allows unless configured
//! otherwise.

mod ai;
mod checks;
mod current;
mod gate;
mod provider;
mod requirements;
mod system;
mod verdict;

pub use ai::ai_access_allows;
pub use current::CurrentAccess;
pub use provider::{IdentityProvider, StaticIdentityProvider};
#[cfg(test)]
pub use provider::MockIdentityProvider;
pub use requirements::{FeatureRequirement, RequirementTable};
pub use system::{AccessEngine, AccessEngineBuilder};
pub use verdict::{DenialReason, GateDecision, GateOutcome, Verdict};

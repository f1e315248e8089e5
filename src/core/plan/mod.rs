//! Plan tiers and the orderings that compare them
//!
//! Two hierarchies exist: the standard four-tier ordering and a five-tier
//! ordering that places `advanced_trial` between `freemium` and `advanced`.
//! They are distinct values of [`PlanHierarchy`] and are never mixed.

mod hierarchy;
mod tier;

pub use hierarchy::PlanHierarchy;
pub use tier::PlanTier;

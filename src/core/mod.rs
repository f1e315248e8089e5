//! Core access control types and logic
//!
//! Leaves first: [`plan`] orders tiers, [`identity`] describes the acting
//! principal, [`capability`] maps plan, segment and role to capabilities,
//! [`usage`] counts invocations per period and [`engine`] turns all of them
//! into verdicts.

pub mod capability;
pub mod engine;
pub mod identity;
pub mod plan;
pub mod usage;

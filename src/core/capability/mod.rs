//! Capability matrix
//!
//! Maps `(plan tier, segment, role)` to the capability set granted to that
//! combination. The matrix is immutable once built; replacing it means
//! building a new one.

mod defaults;
mod feature;
mod matrix;
mod types;

pub use feature::FeatureKey;
pub use matrix::{CapabilityMatrix, CapabilityMatrixBuilder};
pub use types::{AiTier, Capability, CapabilitySet};

//! AI access decision table

use crate::core::capability::{AiTier, Capability};

/// Whether a stored `aiAccess` value grants the requested AI tier.
///
/// | stored           | booking_only | full  |
/// |------------------|--------------|-------|
/// | `true`           | allow        | deny  |
/// | `"full"`         | allow        | allow |
/// | `"booking_only"` | allow        | deny  |
/// | `false`, absent  | deny         | deny  |
///
/// Numeric and `unlimited` values are not AI tiers and never grant access.
pub fn ai_access_allows(stored: Option<Capability>, requested: AiTier) -> bool {
    match (stored, requested) {
        (Some(Capability::Ai(AiTier::Full)), _) => true,
        (Some(Capability::Ai(AiTier::BookingOnly)), AiTier::BookingOnly) => true,
        (Some(Capability::Ai(AiTier::BookingOnly)), AiTier::Full) => false,
        (Some(Capability::Flag(true)), AiTier::BookingOnly) => true,
        (Some(Capability::Flag(true)), AiTier::Full) => false,
        (Some(Capability::Flag(false)), _) | (None, _) => false,
        (Some(Capability::Quota(_)), _) | (Some(Capability::Unlimited), _) => false,
    }
}

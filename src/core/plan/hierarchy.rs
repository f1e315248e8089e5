//! Plan hierarchy comparator

use super::tier::PlanTier;
use serde::{Deserialize, Serialize};

const STANDARD: [PlanTier; 4] = [
    PlanTier::Freemium,
    PlanTier::Advanced,
    PlanTier::Professional,
    PlanTier::Enterprise,
];

const WITH_TRIAL: [PlanTier; 5] = [
    PlanTier::Freemium,
    PlanTier::AdvancedTrial,
    PlanTier::Advanced,
    PlanTier::Professional,
    PlanTier::Enterprise,
];

/// A named total ordering over plan tiers.
///
/// Ranks are positions in the ordering. A tier the ordering does not declare,
/// and any unparseable tier name, ranks as the lowest tier (0).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanHierarchy {
    /// `freemium < advanced < professional < enterprise`
    #[default]
    Standard,
    /// `freemium < advanced_trial < advanced < professional < enterprise`
    WithTrial,
}

impl PlanHierarchy {
    /// Declared tiers in ascending order
    pub fn tiers(&self) -> &'static [PlanTier] {
        match self {
            PlanHierarchy::Standard => &STANDARD,
            PlanHierarchy::WithTrial => &WITH_TRIAL,
        }
    }

    /// Whether this ordering declares the tier
    pub fn declares(&self, tier: PlanTier) -> bool {
        self.tiers().contains(&tier)
    }

    /// Integer rank of a tier
    pub fn rank(&self, tier: PlanTier) -> u8 {
        self.tiers()
            .iter()
            .position(|t| *t == tier)
            .map(|p| p as u8)
            .unwrap_or(0)
    }

    /// Rank of a tier given by name; unknown names rank 0
    pub fn rank_name(&self, name: &str) -> u8 {
        name.parse::<PlanTier>()
            .map(|tier| self.rank(tier))
            .unwrap_or(0)
    }

    /// `rank(actual) >= rank(required)`
    pub fn meets(&self, actual: PlanTier, required: PlanTier) -> bool {
        self.rank(actual) >= self.rank(required)
    }

    /// [`meets`](Self::meets) over tier names
    pub fn meets_name(&self, actual: &str, required: &str) -> bool {
        self.rank_name(actual) >= self.rank_name(required)
    }

    /// Declared tiers ranked strictly above `tier`, lowest first
    pub fn tiers_above(&self, tier: PlanTier) -> impl Iterator<Item = PlanTier> + '_ {
        let floor = self.rank(tier);
        self.tiers()
            .iter()
            .copied()
            .filter(move |t| self.rank(*t) > floor)
    }
}

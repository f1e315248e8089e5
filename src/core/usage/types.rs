//! Usage tracker result types

use super::period::UsagePeriod;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Quota headroom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Remaining {
    Unlimited,
    Count(u64),
}

impl Remaining {
    pub(super) fn from_limit(limit: Option<u64>, count: u64) -> Self {
        match limit {
            None => Remaining::Unlimited,
            Some(limit) => Remaining::Count(limit.saturating_sub(count)),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, Remaining::Count(0))
    }
}

/// Outcome of a quota check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageCheck {
    /// Whether the invocation is within quota
    pub allowed: bool,
    /// Count in the current bucket after the check (and increment, if any)
    pub count: u64,
    /// Cap, `None` when uncapped
    pub limit: Option<u64>,
    pub remaining: Remaining,
    /// When the current bucket ends
    pub resets_at: DateTime<Utc>,
}

/// Usage statistics for one feature
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageStats {
    pub count: u64,
    pub limit: Option<u64>,
    pub period: UsagePeriod,
    pub bucket_start: DateTime<Utc>,
    pub resets_at: DateTime<Utc>,
}

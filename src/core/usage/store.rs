//! Counter storage

use super::period::UsagePeriod;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// Counter key: one user, one feature, one period bucket
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UsageKey {
    pub user_id: String,
    pub feature: String,
    pub period: UsagePeriod,
    pub bucket_start: DateTime<Utc>,
}

/// Key-value storage for usage counters.
///
/// Implementations must make `increment` and `increment_if_below` atomic per
/// key. A missing key reads as zero.
pub trait UsageStore: Send + Sync {
    /// Current value, zero when absent
    fn get(&self, key: &UsageKey) -> u64;

    /// Add one and return the new value
    fn increment(&self, key: &UsageKey) -> u64;

    /// Add one only while the value is below `limit`.
    ///
    /// Returns `Ok(new value)` when incremented, `Err(current value)` otherwise.
    fn increment_if_below(&self, key: &UsageKey, limit: u64) -> Result<u64, u64>;

    /// Drop every key for which `keep` returns false; returns how many were dropped
    fn retain(&self, keep: &dyn Fn(&UsageKey) -> bool) -> usize;

    /// Number of stored counters
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-process store backed by a sharded concurrent map
#[derive(Debug, Default)]
pub struct InMemoryUsageStore {
    counters: DashMap<UsageKey, u64>,
}

impl InMemoryUsageStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UsageStore for InMemoryUsageStore {
    fn get(&self, key: &UsageKey) -> u64 {
        self.counters.get(key).map(|v| *v).unwrap_or(0)
    }

    fn increment(&self, key: &UsageKey) -> u64 {
        // The entry guard holds the shard lock for the whole update.
        let mut entry = self.counters.entry(key.clone()).or_insert(0);
        *entry += 1;
        *entry
    }

    fn increment_if_below(&self, key: &UsageKey, limit: u64) -> Result<u64, u64> {
        let mut entry = self.counters.entry(key.clone()).or_insert(0);
        if *entry < limit {
            *entry += 1;
            Ok(*entry)
        } else {
            Err(*entry)
        }
    }

    fn retain(&self, keep: &dyn Fn(&UsageKey) -> bool) -> usize {
        let before = self.counters.len();
        self.counters.retain(|key, _| keep(key));
        before.saturating_sub(self.counters.len())
    }

    fn len(&self) -> usize {
        self.counters.len()
    }
}

//! Usage tracker implementation

use super::clock::{Clock, SystemClock};
use super::period::UsagePeriod;
use super::store::{InMemoryUsageStore, UsageKey, UsageStore};
use super::types::{Remaining, UsageCheck, UsageStats};
use crate::config::models::usage::UsageConfig;
use crate::core::identity::Identity;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Per-user, per-feature invocation counter with period buckets
#[derive(Clone)]
pub struct UsageTracker {
    config: UsageConfig,
    store: Arc<dyn UsageStore>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for UsageTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsageTracker")
            .field("config", &self.config)
            .field("counters", &self.store.len())
            .field("clock", &self.clock)
            .finish()
    }
}

impl UsageTracker {
    /// Tracker with an in-memory store and the system clock
    pub fn new(config: UsageConfig) -> Self {
        Self::with_parts(
            config,
            Arc::new(InMemoryUsageStore::new()),
            Arc::new(SystemClock),
        )
    }

    pub fn with_parts(
        config: UsageConfig,
        store: Arc<dyn UsageStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            store,
            clock,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Period used when a caller does not name one
    pub fn default_period(&self) -> UsagePeriod {
        self.config.default_period
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    fn key(&self, identity: &Identity, feature: &str, period: UsagePeriod) -> UsageKey {
        UsageKey {
            user_id: identity.user_id.clone(),
            feature: feature.to_string(),
            period,
            bucket_start: period.bucket_start(self.clock.now()),
        }
    }

    /// Record one invocation in the current bucket and return the new count
    pub fn track(&self, identity: &Identity, feature: &str, period: UsagePeriod) -> u64 {
        if !self.config.enabled {
            return 0;
        }

        let key = self.key(identity, feature, period);
        let count = self.store.increment(&key);
        debug!(
            "Tracked {} for {} ({} bucket {}): {}",
            feature, identity.user_id, period, key.bucket_start, count
        );
        count
    }

    /// Invocations in the current bucket
    pub fn count(&self, identity: &Identity, feature: &str, period: UsagePeriod) -> u64 {
        if !self.config.enabled {
            return 0;
        }
        self.store.get(&self.key(identity, feature, period))
    }

    /// Headroom left under `limit`; `None` means uncapped
    pub fn remaining(
        &self,
        identity: &Identity,
        feature: &str,
        limit: Option<u64>,
        period: UsagePeriod,
    ) -> Remaining {
        Remaining::from_limit(limit, self.count(identity, feature, period))
    }

    /// Check the quota without recording.
    ///
    /// Racy if followed by [`track`](Self::track); use
    /// [`check_and_track`](Self::check_and_track) to do both atomically.
    pub fn check(
        &self,
        identity: &Identity,
        feature: &str,
        limit: Option<u64>,
        period: UsagePeriod,
    ) -> UsageCheck {
        let count = self.count(identity, feature, period);
        let allowed = !self.config.enabled || limit.is_none_or(|limit| count < limit);
        self.usage_check(allowed, count, limit, period)
    }

    /// Atomically check the quota and record the invocation if it fits
    pub fn check_and_track(
        &self,
        identity: &Identity,
        feature: &str,
        limit: Option<u64>,
        period: UsagePeriod,
    ) -> UsageCheck {
        if !self.config.enabled {
            return self.usage_check(true, 0, limit, period);
        }

        let key = self.key(identity, feature, period);
        let (allowed, count) = match limit {
            None => (true, self.store.increment(&key)),
            Some(limit) => match self.store.increment_if_below(&key, limit) {
                Ok(count) => (true, count),
                Err(count) => (false, count),
            },
        };

        if !allowed {
            debug!(
                "Usage limit reached for {} on {}: {}/{:?} per {}",
                identity.user_id, feature, count, limit, period
            );
        }

        self.usage_check(allowed, count, limit, period)
    }

    /// Count, cap and bucket boundaries for a feature
    pub fn stats(
        &self,
        identity: &Identity,
        feature: &str,
        limit: Option<u64>,
        period: UsagePeriod,
    ) -> UsageStats {
        let now = self.clock.now();
        UsageStats {
            count: self.count(identity, feature, period),
            limit,
            period,
            bucket_start: period.bucket_start(now),
            resets_at: period.next_bucket_start(now),
        }
    }

    fn usage_check(
        &self,
        allowed: bool,
        count: u64,
        limit: Option<u64>,
        period: UsagePeriod,
    ) -> UsageCheck {
        UsageCheck {
            allowed,
            count,
            limit,
            remaining: Remaining::from_limit(limit, count),
            resets_at: period.next_bucket_start(self.clock.now()),
        }
    }

    /// Drop counters of buckets that have already closed
    pub fn cleanup(&self) -> usize {
        let now = self.clock.now();
        let removed = self
            .store
            .retain(&|key: &UsageKey| key.bucket_start >= key.period.bucket_start(now));
        if removed > 0 {
            debug!("Removed {} expired usage counters", removed);
        }
        removed
    }

    /// Run [`cleanup`](Self::cleanup) on a fixed interval
    pub fn start_cleanup_task(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        let interval = Duration::from_secs(self.config.cleanup_interval_secs.max(1));
        info!("Starting usage cleanup task every {:?}", interval);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                self.cleanup();
            }
        })
    }
}

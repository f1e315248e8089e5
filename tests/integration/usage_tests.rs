//! Usage tracking integration tests

#[cfg(test)]
mod tests {
    use crate::common::fixtures::{IdentityFactory, engine_with_clock};
    use access_gate::config::UsageConfig;
    use access_gate::{
        FeatureKey, InMemoryUsageStore, ManualClock, PlanTier, Remaining, UsagePeriod,
        UsageTracker,
    };
    use chrono::{Duration, TimeZone, Utc};
    use std::sync::Arc;
    use std::thread;

    fn tracker_at(clock: Arc<ManualClock>) -> UsageTracker {
        UsageTracker::with_parts(
            UsageConfig::default(),
            Arc::new(InMemoryUsageStore::new()),
            clock,
        )
    }

    #[test]
    fn test_daily_counter_resets_at_midnight() {
        let (engine, clock) = engine_with_clock();
        let user = IdentityFactory::end_user(PlanTier::Advanced);

        engine.track_usage(Some(&user), "csvExport", UsagePeriod::Day);
        assert_eq!(engine.tracker().count(&user, "csvExport", UsagePeriod::Day), 1);

        clock.set(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());
        assert_eq!(engine.tracker().count(&user, "csvExport", UsagePeriod::Day), 0);
    }

    #[test]
    fn test_month_and_year_buckets() {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 12, 31, 23, 0, 0).unwrap(),
        ));
        let tracker = tracker_at(clock.clone());
        let user = IdentityFactory::end_user(PlanTier::Advanced);

        tracker.track(&user, "reports", UsagePeriod::Month);
        tracker.track(&user, "reports", UsagePeriod::Year);

        clock.advance(Duration::hours(1));
        assert_eq!(tracker.count(&user, "reports", UsagePeriod::Month), 0);
        assert_eq!(tracker.count(&user, "reports", UsagePeriod::Year), 0);

        let stats = tracker.stats(&user, "reports", Some(4), UsagePeriod::Year);
        assert_eq!(stats.bucket_start, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(stats.resets_at, Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_remaining_counts_down() {
        let (engine, _clock) = engine_with_clock();
        let user = IdentityFactory::end_user(PlanTier::Advanced);
        let tracker = engine.tracker();

        assert_eq!(
            tracker.remaining(&user, "sms", Some(2), UsagePeriod::Month),
            Remaining::Count(2)
        );
        tracker.track(&user, "sms", UsagePeriod::Month);
        tracker.track(&user, "sms", UsagePeriod::Month);
        tracker.track(&user, "sms", UsagePeriod::Month);
        assert_eq!(
            tracker.remaining(&user, "sms", Some(2), UsagePeriod::Month),
            Remaining::Count(0)
        );
        assert_eq!(
            tracker.remaining(&user, "sms", None, UsagePeriod::Month),
            Remaining::Unlimited
        );
    }

    #[test]
    fn test_concurrent_tracking_is_exact() {
        let (engine, _clock) = engine_with_clock();
        let engine = Arc::new(engine);
        let user = IdentityFactory::end_user(PlanTier::Advanced);

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let engine = engine.clone();
                let user = user.clone();
                thread::spawn(move || {
                    for _ in 0..100 {
                        engine.track_usage(Some(&user), "bookings", UsagePeriod::Day);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(engine.tracker().count(&user, "bookings", UsagePeriod::Day), 1600);
    }

    #[test]
    fn test_concurrent_quota_consumption_respects_cap() {
        let (engine, _clock) = engine_with_clock();
        let engine = Arc::new(engine);
        // Professional: 25 templates per month.
        let user = IdentityFactory::end_user(PlanTier::Professional);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let engine = engine.clone();
                let user = user.clone();
                thread::spawn(move || {
                    (0..10)
                        .filter(|_| {
                            engine
                                .consume_usage_quota(
                                    Some(&user),
                                    FeatureKey::SmartServiceTemplates,
                                    UsagePeriod::Month,
                                )
                                .allowed()
                        })
                        .count()
                })
            })
            .collect();

        let granted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(granted, 25);
        assert_eq!(
            engine
                .tracker()
                .count(&user, "smartServiceTemplates", UsagePeriod::Month),
            25
        );
    }

    #[test]
    fn test_cleanup_after_rollover() {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 5, 20, 8, 0, 0).unwrap(),
        ));
        let tracker = tracker_at(clock.clone());
        let user = IdentityFactory::end_user(PlanTier::Advanced);

        tracker.track(&user, "a", UsagePeriod::Day);
        tracker.track(&user, "b", UsagePeriod::Month);
        assert_eq!(tracker.cleanup(), 0);

        clock.advance(Duration::days(1));
        assert_eq!(tracker.cleanup(), 1);
        assert_eq!(tracker.count(&user, "b", UsagePeriod::Month), 1);
    }

    #[tokio::test]
    async fn test_cleanup_task_runs() {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 5, 20, 8, 0, 0).unwrap(),
        ));
        let config = UsageConfig {
            cleanup_interval_secs: 1,
            ..UsageConfig::default()
        };
        let tracker = Arc::new(UsageTracker::with_parts(
            config,
            Arc::new(InMemoryUsageStore::new()),
            clock.clone(),
        ));
        let user = IdentityFactory::end_user(PlanTier::Advanced);
        tracker.track(&user, "a", UsagePeriod::Day);

        clock.advance(Duration::days(2));
        let handle = tracker.clone().start_cleanup_task();
        // The first tick fires immediately.
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        handle.abort();

        assert!(format!("{:?}", tracker).contains("counters: 0"));
    }
}

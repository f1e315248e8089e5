//! Usage tracking and quota checks
//!
//! Counters are keyed by `(user, feature, period, bucket start)`. Buckets are
//! UTC-aligned day, month or year windows, so a counter resets implicitly as
//! soon as the clock enters the next window.

mod clock;
mod period;
mod store;
mod tracker;
mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use period::UsagePeriod;
pub use store::{InMemoryUsageStore, UsageKey, UsageStore};
pub use tracker::UsageTracker;
pub use types::{Remaining, UsageCheck, UsageStats};

//! Usage period buckets

use crate::utils::error::{GateError, Result};
use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Window over which a usage quota is counted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsagePeriod {
    Day,
    #[default]
    Month,
    Year,
}

impl UsagePeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            UsagePeriod::Day => "day",
            UsagePeriod::Month => "month",
            UsagePeriod::Year => "year",
        }
    }

    /// Parse a period name, falling back to the default period for anything
    /// that is not `day`, `month` or `year`
    pub fn parse_or_default(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            warn!(
                "Invalid usage period {:?}, using {}",
                name,
                UsagePeriod::default()
            );
            UsagePeriod::default()
        })
    }

    /// Start of the bucket containing `at`.
    ///
    /// The boundary instant itself belongs to the bucket it starts.
    pub fn bucket_start(&self, at: DateTime<Utc>) -> DateTime<Utc> {
        let date = at.date_naive();
        let first_day = match self {
            UsagePeriod::Day => date,
            UsagePeriod::Month => date - Duration::days(i64::from(date.day0())),
            UsagePeriod::Year => date - Duration::days(i64::from(date.ordinal0())),
        };
        first_day.and_time(NaiveTime::default()).and_utc()
    }

    /// Start of the bucket after the one containing `at`.
    ///
    /// Saturates to the current bucket start when the next one is beyond
    /// the representable range.
    pub fn next_bucket_start(&self, at: DateTime<Utc>) -> DateTime<Utc> {
        let start = self.bucket_start(at);
        // Month and year overshoot into the following window, then truncate.
        let step = match self {
            UsagePeriod::Day => Duration::days(1),
            UsagePeriod::Month => Duration::days(32),
            UsagePeriod::Year => Duration::days(366),
        };
        match start.checked_add_signed(step) {
            Some(next) if *self == UsagePeriod::Day => next,
            Some(next) => self.bucket_start(next),
            None => start,
        }
    }

    /// Whether `at` falls in the bucket starting at `bucket_start`
    pub fn in_bucket(&self, bucket_start: DateTime<Utc>, at: DateTime<Utc>) -> bool {
        bucket_start <= at && at < self.next_bucket_start(bucket_start)
    }
}

impl fmt::Display for UsagePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UsagePeriod {
    type Err = GateError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(UsagePeriod::Day),
            "month" => Ok(UsagePeriod::Month),
            "year" => Ok(UsagePeriod::Year),
            _ => Err(GateError::invalid_usage_period(s)),
        }
    }
}

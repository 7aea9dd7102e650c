use chrono::{DateTime, Duration, Utc};

/// Trailing window; 5-minute aggregated metrics still land in it.
const WINDOW_MINUTES: i64 = 8;
pub const PERIOD_SECONDS: i64 = 60;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

#[derive(Debug, PartialEq)]
pub struct TimeRange {
    pub start: chrono::DateTime<Utc>,
    pub end: chrono::DateTime<Utc>,
}

impl From<DateTime<Utc>> for TimeRange {
    fn from(now: DateTime<Utc>) -> Self {
        TimeRange {
            start: now - Duration::minutes(WINDOW_MINUTES),
            end: now,
        }
    }
}

impl TimeRange {
    pub fn start_time(&self) -> String {
        self.start.format(TIMESTAMP_FORMAT).to_string()
    }

    pub fn end_time(&self) -> String {
        self.end.format(TIMESTAMP_FORMAT).to_string()
    }
}

//! # Time Utilities
//!
//! Utilities for time formatting and manipulation using chrono.

use chrono::{DateTime, Utc};

/// Get current UTC time.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Format time as RFC3339 string.
pub fn format_time(time: DateTime<Utc>) -> String {
    time.to_rfc3339()
}

/// Whole minutes from `now` until `deadline` (negative once passed).
pub fn minutes_until(deadline: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (deadline - now).num_minutes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_format_and_minutes() {
        let t = Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap();
        assert_eq!(format_time(t), "2025-03-01T10:00:00+00:00");
        assert_eq!(minutes_until(t + Duration::minutes(4), t), 4);
        assert_eq!(minutes_until(t - Duration::minutes(2), t), -2);
    }
}

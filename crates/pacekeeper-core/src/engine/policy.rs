//! Fixed notification policy: ratios, time-of-day windows and phrasing.

use std::ops::RangeInclusive;

use chrono::Duration;

/// Progress at which a goal counts as achieved.
pub const ACHIEVED_RATIO: f64 = 1.0;
/// Progress at which an achievement is tagged as overachieved.
pub const OVERACHIEVER_RATIO: f64 = 1.5;
/// Goals under this ratio are behind pace.
pub const BEHIND_PACE_RATIO: f64 = 0.5;
/// Daily step progress under this ratio qualifies for evening encouragement.
pub const ENCOURAGEMENT_RATIO: f64 = 0.3;

/// Local hours (inclusive) during which behind-pace reminders may fire.
pub const REMINDER_HOURS: RangeInclusive<u32> = 14..=20;
/// Local hours (inclusive) during which encouragement may fire.
pub const ENCOURAGEMENT_HOURS: RangeInclusive<u32> = 18..=21;

/// "3 hours", "1 hour", or "45 minutes" when under an hour.
pub fn format_time_remaining(remaining: Duration) -> String {
    let hours = remaining.num_hours();
    if hours >= 1 {
        if hours == 1 {
            "1 hour".to_string()
        } else {
            format!("{hours} hours")
        }
    } else {
        let minutes = remaining.num_minutes().max(0);
        if minutes == 1 {
            "1 minute".to_string()
        } else {
            format!("{minutes} minutes")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_hours_when_at_least_one_hour() {
        assert_eq!(format_time_remaining(Duration::minutes(5 * 60 + 59)), "5 hours");
        assert_eq!(format_time_remaining(Duration::minutes(60)), "1 hour");
    }

    #[test]
    fn minutes_under_an_hour() {
        assert_eq!(format_time_remaining(Duration::minutes(59)), "59 minutes");
        assert_eq!(format_time_remaining(Duration::seconds(61)), "1 minute");
        assert_eq!(format_time_remaining(Duration::seconds(30)), "0 minutes");
    }

    #[test]
    fn windows_are_inclusive() {
        assert!(REMINDER_HOURS.contains(&14));
        assert!(REMINDER_HOURS.contains(&20));
        assert!(!REMINDER_HOURS.contains(&21));
        assert!(ENCOURAGEMENT_HOURS.contains(&21));
        assert!(!ENCOURAGEMENT_HOURS.contains(&17));
    }
}

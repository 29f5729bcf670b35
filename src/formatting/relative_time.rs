//! Human-readable distances between two instants ("about 2 hours ago").

use chrono::{DateTime, Utc};

const MINUTES_IN_HOUR: f64 = 60.0;
const MINUTES_IN_DAY: f64 = 1_440.0;
const MINUTES_IN_MONTH: f64 = 43_200.0;
const MINUTES_IN_TWO_MONTHS: f64 = 86_400.0;

/// Distance from `then` to `now` with a suffix: "5 minutes ago", or "in 5 minutes"
/// when `then` lies in the future.
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();
    let distance = distance_in_words(seconds.unsigned_abs());
    if seconds < 0 {
        format!("in {}", distance)
    } else {
        format!("{} ago", distance)
    }
}

/// Buckets an absolute distance in seconds into words.
pub fn distance_in_words(seconds: u64) -> String {
    let minutes = (seconds as f64 / 60.0).round();

    if minutes < 1.0 {
        return "less than a minute".to_string();
    }
    if minutes < 45.0 {
        return plural(minutes as u64, "minute");
    }
    if minutes < 90.0 {
        return "about 1 hour".to_string();
    }
    if minutes < MINUTES_IN_DAY {
        let hours = (minutes / MINUTES_IN_HOUR).round() as u64;
        return format!("about {}", plural(hours, "hour"));
    }
    if minutes < 2_520.0 {
        return "1 day".to_string();
    }
    if minutes < MINUTES_IN_MONTH {
        let days = (minutes / MINUTES_IN_DAY).round() as u64;
        return plural(days, "day");
    }
    if minutes < MINUTES_IN_TWO_MONTHS {
        let months = (minutes / MINUTES_IN_MONTH).round() as u64;
        return format!("about {}", plural(months, "month"));
    }

    let months = (minutes / MINUTES_IN_MONTH).floor() as u64;
    if months < 12 {
        let nearest = (minutes / MINUTES_IN_MONTH).round() as u64;
        return plural(nearest, "month");
    }

    let years = months / 12;
    match months % 12 {
        0..=2 => format!("about {}", plural(years, "year")),
        3..=8 => format!("over {}", plural(years, "year")),
        _ => format!("almost {}", plural(years + 1, "year")),
    }
}

fn plural(count: u64, unit: &str) -> String {
    if count == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", count, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn ago(duration: Duration) -> String {
        time_ago(now() - duration, now())
    }

    #[test]
    fn short_distances() {
        assert_eq!(ago(Duration::seconds(10)), "less than a minute ago");
        assert_eq!(ago(Duration::seconds(60)), "1 minute ago");
        assert_eq!(ago(Duration::minutes(5)), "5 minutes ago");
        assert_eq!(ago(Duration::minutes(50)), "about 1 hour ago");
        assert_eq!(ago(Duration::hours(2)), "about 2 hours ago");
    }

    #[test]
    fn days_and_months() {
        assert_eq!(ago(Duration::hours(30)), "1 day ago");
        assert_eq!(ago(Duration::days(3)), "3 days ago");
        assert_eq!(ago(Duration::days(31)), "about 1 month ago");
        assert_eq!(ago(Duration::days(95)), "3 months ago");
    }

    #[test]
    fn years() {
        assert_eq!(ago(Duration::days(370)), "about 1 year ago");
        assert_eq!(ago(Duration::days(365 + 150)), "over 1 year ago");
        assert_eq!(ago(Duration::days(365 + 320)), "almost 2 years ago");
    }

    #[test]
    fn future_instants() {
        assert_eq!(time_ago(now() + Duration::minutes(5), now()), "in 5 minutes");
    }
}

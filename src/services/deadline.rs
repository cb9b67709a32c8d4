use chrono::{DateTime, Duration, Utc};

use crate::domain::entities::{DurationSpec, Priority, DAY_MS, HOUR_MS, MINUTE_MS};
use crate::domain::errors::DomainResult;

/// Absolute deadline for a duration spec scaled by the priority multiplier.
///
/// Millisecond precision, so fractional effective windows (e.g. 2h at the
/// high multiplier giving 90 minutes) land exactly.
pub fn calculate_deadline(
    start: DateTime<Utc>,
    spec: &DurationSpec,
    priority: Priority,
) -> DomainResult<DateTime<Utc>> {
    let window_ms = spec.window_ms()?;
    let effective_ms = (window_ms as f64 * priority.multiplier()).round() as i64;
    Ok(start + Duration::milliseconds(effective_ms))
}

/// Countdown to (or elapsed time past) a deadline, with a display string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRemaining {
    pub expired: bool,
    pub overdue: bool,
    /// Remaining milliseconds, or milliseconds overdue once expired.
    pub milliseconds: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub formatted: String,
}

pub fn time_remaining(deadline: DateTime<Utc>, now: DateTime<Utc>) -> TimeRemaining {
    let diff = (deadline - now).num_milliseconds();

    if diff < 0 {
        let overdue_ms = diff.abs();
        return TimeRemaining {
            expired: true,
            overdue: true,
            milliseconds: overdue_ms,
            days: 0,
            hours: overdue_ms / HOUR_MS,
            minutes: (overdue_ms % HOUR_MS) / MINUTE_MS,
            formatted: "Overdue".to_string(),
        };
    }

    let days = diff / DAY_MS;
    let hours = (diff % DAY_MS) / HOUR_MS;
    let minutes = (diff % HOUR_MS) / MINUTE_MS;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{}d", days));
    }
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    // Minutes always render when nothing larger did, so the string is never empty.
    if minutes > 0 || parts.is_empty() {
        parts.push(format!("{}m", minutes));
    }

    TimeRemaining {
        expired: false,
        overdue: false,
        milliseconds: diff,
        days,
        hours,
        minutes,
        formatted: parts.join(" "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_medium_priority_adds_exact_window() {
        let start = utc("2024-01-01T00:00:00Z");
        let deadline =
            calculate_deadline(start, &DurationSpec::hours(2.0), Priority::Medium).unwrap();
        assert_eq!(deadline, utc("2024-01-01T02:00:00Z"));

        let deadline =
            calculate_deadline(start, &DurationSpec::days(1.0), Priority::Medium).unwrap();
        assert_eq!(deadline, utc("2024-01-02T00:00:00Z"));

        let deadline =
            calculate_deadline(start, &DurationSpec::minutes(45.0), Priority::Medium).unwrap();
        assert_eq!(deadline, utc("2024-01-01T00:45:00Z"));
    }

    #[test]
    fn test_high_priority_shortens_window() {
        // 2h at the high multiplier (0.75) lands at 90 minutes.
        let start = utc("2024-01-01T00:00:00Z");
        let deadline =
            calculate_deadline(start, &DurationSpec::hours(2.0), Priority::High).unwrap();
        assert_eq!(deadline, utc("2024-01-01T01:30:00Z"));
    }

    #[test]
    fn test_multiplier_ordering_holds() {
        let start = utc("2024-01-01T00:00:00Z");
        let spec = DurationSpec::hours(8.0);
        let urgent = calculate_deadline(start, &spec, Priority::Urgent).unwrap();
        let high = calculate_deadline(start, &spec, Priority::High).unwrap();
        let medium = calculate_deadline(start, &spec, Priority::Medium).unwrap();
        let low = calculate_deadline(start, &spec, Priority::Low).unwrap();
        assert!(urgent < high);
        assert!(high < medium);
        assert!(medium < low);
    }

    #[test]
    fn test_empty_spec_is_an_error() {
        let start = utc("2024-01-01T00:00:00Z");
        assert!(calculate_deadline(start, &DurationSpec::default(), Priority::Medium).is_err());
    }

    #[test]
    fn test_remaining_overdue_iff_deadline_passed() {
        let now = utc("2024-01-01T12:00:00Z");

        let future = time_remaining(utc("2024-01-01T12:00:01Z"), now);
        assert!(!future.overdue);
        assert!(!future.expired);

        let at_deadline = time_remaining(now, now);
        assert!(!at_deadline.overdue);

        let past = time_remaining(utc("2024-01-01T11:59:59Z"), now);
        assert!(past.overdue);
        assert!(past.expired);
        assert_eq!(past.formatted, "Overdue");
        assert_eq!(past.milliseconds, 1_000);
    }

    #[test]
    fn test_overdue_decomposition() {
        let now = utc("2024-01-02T02:30:00Z");
        let remaining = time_remaining(utc("2024-01-01T00:00:00Z"), now);
        // Overdue amounts report total hours, not days.
        assert_eq!(remaining.hours, 26);
        assert_eq!(remaining.minutes, 30);
        assert_eq!(remaining.days, 0);
    }

    #[test]
    fn test_formatted_skips_zero_components() {
        let now = utc("2024-01-01T00:00:00Z");

        let r = time_remaining(utc("2024-01-03T03:05:00Z"), now);
        assert_eq!(r.formatted, "2d 3h 5m");

        let r = time_remaining(utc("2024-01-03T00:00:00Z"), now);
        assert_eq!(r.formatted, "2d");

        let r = time_remaining(utc("2024-01-01T05:00:00Z"), now);
        assert_eq!(r.formatted, "5h");

        let r = time_remaining(utc("2024-01-01T00:45:00Z"), now);
        assert_eq!(r.formatted, "45m");

        let r = time_remaining(utc("2024-01-03T00:45:00Z"), now);
        assert_eq!(r.formatted, "2d 45m");
    }

    #[test]
    fn test_formatted_never_empty() {
        let now = utc("2024-01-01T00:00:00Z");
        let r = time_remaining(utc("2024-01-01T00:00:30Z"), now);
        assert_eq!(r.formatted, "0m");
    }
}

use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, DomainResult};

pub const MINUTE_MS: i64 = 60_000;
pub const HOUR_MS: i64 = 3_600_000;
pub const DAY_MS: i64 = 86_400_000;

/// An SLA's allotted time, expressed in exactly one unit.
///
/// The serialized shape keeps one unit field plus an optional human label,
/// matching the template entries stored under the `slaConfig` key. Specs with
/// zero or multiple units are rejected at use time rather than silently
/// resolved by field precedence.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DurationSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl DurationSpec {
    pub fn hours(value: f64) -> Self {
        Self {
            hours: Some(value),
            ..Default::default()
        }
    }

    pub fn days(value: f64) -> Self {
        Self {
            days: Some(value),
            ..Default::default()
        }
    }

    pub fn minutes(value: f64) -> Self {
        Self {
            minutes: Some(value),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Total window in milliseconds.
    ///
    /// Exactly one of `hours`, `days`, `minutes` must be set and positive.
    pub fn window_ms(&self) -> DomainResult<i64> {
        let units = [
            self.hours.map(|v| (v, HOUR_MS)),
            self.days.map(|v| (v, DAY_MS)),
            self.minutes.map(|v| (v, MINUTE_MS)),
        ];
        let mut set = units.iter().flatten();
        let (value, unit_ms) = match (set.next(), set.next()) {
            (Some(&(value, unit_ms)), None) => (value, unit_ms),
            (None, _) => {
                return Err(DomainError::Validation(
                    "Duration spec has no unit set".to_string(),
                ))
            }
            (Some(_), Some(_)) => {
                return Err(DomainError::Validation(
                    "Duration spec sets more than one unit".to_string(),
                ))
            }
        };

        if !value.is_finite() || value <= 0.0 {
            return Err(DomainError::Validation(
                "Duration must be greater than 0".to_string(),
            ));
        }

        Ok((value * unit_ms as f64).round() as i64)
    }
}

use regex::Regex;
use std::sync::OnceLock;

impl DurationSpec {
    /// Parse a compact duration string like "2h", "30m", "1d".
    ///
    /// Used by configuration screens that store templates in shorthand.
    pub fn parse(duration_str: &str) -> DomainResult<Self> {
        static DURATION_REGEX: OnceLock<Regex> = OnceLock::new();
        let re = DURATION_REGEX
            .get_or_init(|| Regex::new(r"^(\d+)([hmd])$").expect("Invalid duration regex"));

        let caps = re.captures(duration_str).ok_or_else(|| {
            DomainError::Validation(format!(
                "Invalid duration format: {}. Expected format: <number><h|m|d>",
                duration_str
            ))
        })?;

        let number: f64 = caps[1].parse().map_err(|_| {
            DomainError::Validation(format!("Invalid number in duration: {}", &caps[1]))
        })?;

        if number <= 0.0 {
            return Err(DomainError::Validation(
                "Duration must be greater than 0".to_string(),
            ));
        }

        let spec = match &caps[2] {
            "h" => Self::hours(number),
            "m" => Self::minutes(number),
            "d" => Self::days(number),
            unit => {
                return Err(DomainError::Validation(format!(
                    "Invalid duration unit: {}",
                    unit
                )))
            }
        };

        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_ms_single_unit() {
        assert_eq!(DurationSpec::hours(2.0).window_ms().unwrap(), 7_200_000);
        assert_eq!(DurationSpec::days(1.0).window_ms().unwrap(), 86_400_000);
        assert_eq!(DurationSpec::minutes(30.0).window_ms().unwrap(), 1_800_000);
    }

    #[test]
    fn test_window_ms_rejects_empty_spec() {
        let spec = DurationSpec::default().with_description("label only");
        assert!(spec.window_ms().is_err());
    }

    #[test]
    fn test_window_ms_rejects_multiple_units() {
        let spec = DurationSpec {
            hours: Some(2.0),
            minutes: Some(30.0),
            ..Default::default()
        };
        assert!(spec.window_ms().is_err());
    }

    #[test]
    fn test_window_ms_rejects_non_positive() {
        assert!(DurationSpec::hours(0.0).window_ms().is_err());
        assert!(DurationSpec::minutes(-5.0).window_ms().is_err());
    }

    #[test]
    fn test_parse_hours() {
        assert_eq!(DurationSpec::parse("2h").unwrap(), DurationSpec::hours(2.0));
        assert_eq!(
            DurationSpec::parse("24h").unwrap().window_ms().unwrap(),
            86_400_000
        );
    }

    #[test]
    fn test_parse_minutes() {
        assert_eq!(
            DurationSpec::parse("30m").unwrap(),
            DurationSpec::minutes(30.0)
        );
        assert_eq!(
            DurationSpec::parse("120m").unwrap().window_ms().unwrap(),
            7_200_000
        );
    }

    #[test]
    fn test_parse_days() {
        assert_eq!(DurationSpec::parse("1d").unwrap(), DurationSpec::days(1.0));
        assert_eq!(DurationSpec::parse("2d").unwrap(), DurationSpec::days(2.0));
    }

    #[test]
    fn test_parse_invalid_format() {
        assert!(DurationSpec::parse("2x").is_err());
        assert!(DurationSpec::parse("h2").is_err());
        assert!(DurationSpec::parse("two hours").is_err());
        assert!(DurationSpec::parse("").is_err());
    }

    #[test]
    fn test_parse_zero() {
        assert!(DurationSpec::parse("0h").is_err());
        assert!(DurationSpec::parse("0m").is_err());
    }

    #[test]
    fn test_serde_round_trip_keeps_single_unit() {
        let spec = DurationSpec::hours(4.0).with_description("First response");
        let json = serde_json::to_string(&spec).unwrap();
        assert!(json.contains("\"hours\":4.0"));
        assert!(!json.contains("days"));
        let back: DurationSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spec);
    }
}

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::{SlaTracking, WindowBasis};
use crate::services::deadline::time_remaining;

/// Display bucket for an active tracking. Distinct from `TrackingStatus`:
/// this decays as time passes and is recomputed on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlaHealth {
    OnTrack,
    Approaching,
    Warning,
    Critical,
    Breached,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Normal,
    Info,
    Warning,
    High,
    Critical,
}

/// What a chip or banner needs to render one tracking's health.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    pub health: SlaHealth,
    pub color: &'static str,
    pub label: &'static str,
    pub severity: Severity,
}

impl StatusBadge {
    fn of(health: SlaHealth) -> Self {
        match health {
            SlaHealth::OnTrack => Self {
                health,
                color: "success",
                label: "On Track",
                severity: Severity::Normal,
            },
            SlaHealth::Approaching => Self {
                health,
                color: "info",
                label: "Approaching SLA",
                severity: Severity::Info,
            },
            SlaHealth::Warning => Self {
                health,
                color: "warning",
                label: "SLA Warning",
                severity: Severity::Warning,
            },
            SlaHealth::Critical => Self {
                health,
                color: "error",
                label: "SLA Critical",
                severity: Severity::High,
            },
            SlaHealth::Breached => Self {
                health,
                color: "error",
                label: "SLA Breached",
                severity: Severity::Critical,
            },
        }
    }
}

/// Percent of the window still remaining, against the true total window
/// (`deadline - window_start`), never reconstructed from remaining time.
pub fn percent_remaining(
    window_start: DateTime<Utc>,
    deadline: DateTime<Utc>,
    now: DateTime<Utc>,
) -> f64 {
    let total_ms = (deadline - window_start).num_milliseconds();
    if total_ms <= 0 {
        return 0.0;
    }
    let remaining_ms = (deadline - now).num_milliseconds().max(0);
    remaining_ms as f64 / total_ms as f64 * 100.0
}

/// Bucket a tracking window into a display status.
pub fn classify(
    window_start: DateTime<Utc>,
    deadline: DateTime<Utc>,
    now: DateTime<Utc>,
) -> StatusBadge {
    if time_remaining(deadline, now).overdue {
        return StatusBadge::of(SlaHealth::Breached);
    }

    let percent = percent_remaining(window_start, deadline, now);
    let health = if percent < 10.0 {
        SlaHealth::Critical
    } else if percent < 25.0 {
        SlaHealth::Warning
    } else if percent < 50.0 {
        SlaHealth::Approaching
    } else {
        SlaHealth::OnTrack
    };
    StatusBadge::of(health)
}

pub fn window_start(tracking: &SlaTracking, basis: WindowBasis) -> DateTime<Utc> {
    match basis {
        WindowBasis::StartTime => tracking.start_time,
        WindowBasis::CreatedAt => tracking.created_at,
    }
}

pub fn classify_tracking(
    tracking: &SlaTracking,
    basis: WindowBasis,
    now: DateTime<Utc>,
) -> StatusBadge {
    classify(window_start(tracking, basis), tracking.deadline, now)
}

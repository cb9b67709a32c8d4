use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::{
    EscalationPolicy, SlaTracking, TrackingStatus, WindowBasis, HOUR_MS,
};
use crate::services::deadline::time_remaining;
use crate::services::status::{classify_tracking, window_start, SlaHealth};

/// Every tracking that has missed its deadline: completed late, or still
/// open with the deadline already in the past. Input order is preserved.
pub fn violations(items: &[SlaTracking], now: DateTime<Utc>) -> Vec<SlaTracking> {
    items
        .iter()
        .filter(|t| match t.completed_at {
            Some(completed_at) => completed_at > t.deadline,
            None => now > t.deadline,
        })
        .cloned()
        .collect()
}

/// Open, not-yet-overdue trackings whose percent-remaining has fallen below
/// the threshold.
pub fn approaching(
    items: &[SlaTracking],
    threshold_percent: f64,
    basis: WindowBasis,
    now: DateTime<Utc>,
) -> Vec<SlaTracking> {
    items
        .iter()
        .filter(|t| !t.is_completed())
        .filter(|t| {
            let remaining_ms = (t.deadline - now).num_milliseconds();
            if remaining_ms < 0 {
                return false;
            }
            let total_ms = (t.deadline - window_start(t, basis)).num_milliseconds();
            if total_ms <= 0 {
                return false;
            }
            (remaining_ms as f64 / total_ms as f64 * 100.0) < threshold_percent
        })
        .cloned()
        .collect()
}

/// Dashboard summary over a tracking collection.
///
/// `met + breached` can fall short of `completed` when records were finished
/// through a raw update instead of the completion transition, so the two
/// rates are reported independently and need not sum to 100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlaMetrics {
    pub total: usize,
    pub completed: usize,
    pub met: usize,
    pub breached: usize,
    pub active: usize,
    pub at_risk: usize,
    pub compliance_rate: u32,
    pub breach_rate: u32,
}

pub fn metrics(items: &[SlaTracking], basis: WindowBasis, now: DateTime<Utc>) -> SlaMetrics {
    let total = items.len();
    let completed = items.iter().filter(|t| t.is_completed()).count();
    let met = items
        .iter()
        .filter(|t| t.status == TrackingStatus::Met)
        .count();
    let breached = items.iter().filter(|t| t.breached).count();
    let active = items
        .iter()
        .filter(|t| t.status == TrackingStatus::Active)
        .count();
    let at_risk = items
        .iter()
        .filter(|t| t.status == TrackingStatus::Active)
        .filter(|t| {
            matches!(
                classify_tracking(t, basis, now).health,
                SlaHealth::Warning | SlaHealth::Critical
            )
        })
        .count();

    let rate = |count: usize| (count as f64 / completed as f64 * 100.0).round() as u32;
    let compliance_rate = if completed > 0 { rate(met) } else { 100 };
    let breach_rate = if completed > 0 { rate(breached) } else { 0 };

    SlaMetrics {
        total,
        completed,
        met,
        breached,
        active,
        at_risk,
        compliance_rate,
        breach_rate,
    }
}

/// Advisory escalation tier for a single tracking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Escalation {
    pub level: u32,
    pub description: String,
    pub urgent: bool,
}

/// Match a tracking against the configured escalation ladder.
///
/// Overdue trackings take the highest rule whose hours-overdue threshold is
/// exceeded, with levels numbered from the mildest rule up. A tracking that
/// is still inside its window but classified critical gets a level 1
/// advisory.
pub fn escalation_for(
    tracking: &SlaTracking,
    policy: &EscalationPolicy,
    basis: WindowBasis,
    now: DateTime<Utc>,
) -> Option<Escalation> {
    if !policy.enabled {
        return None;
    }

    let remaining = time_remaining(tracking.deadline, now);
    if remaining.overdue {
        let hours_overdue = remaining.milliseconds as f64 / HOUR_MS as f64;

        let mut ranked: Vec<&_> = policy.levels.iter().collect();
        ranked.sort_by(|a, b| {
            a.threshold_hours
                .partial_cmp(&b.threshold_hours)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut matched = None;
        for (idx, rule) in ranked.iter().enumerate() {
            if hours_overdue > rule.threshold_hours {
                matched = Some(Escalation {
                    level: idx as u32 + 1,
                    description: rule.description.clone(),
                    urgent: rule.urgent,
                });
            }
        }
        return matched;
    }

    if classify_tracking(tracking, basis, now).health == SlaHealth::Critical {
        return Some(Escalation {
            level: 1,
            description: "Requires immediate attention".to_string(),
            urgent: false,
        });
    }

    None
}

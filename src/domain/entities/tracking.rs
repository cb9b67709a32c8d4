use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::duration::DurationSpec;

// ===== Priority =====

/// Business priority of a tracked entity.
///
/// The multiplier scales the configured SLA window; a lower multiplier means
/// a shorter effective deadline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Urgent,
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn multiplier(&self) -> f64 {
        match self {
            Priority::Urgent => 0.5,
            Priority::High => 0.75,
            Priority::Medium => 1.0,
            Priority::Low => 1.5,
        }
    }

    /// Case-insensitive lookup; unrecognized labels fall back to Medium.
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or_default()
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Urgent => write!(f, "urgent"),
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "urgent" => Ok(Priority::Urgent),
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(format!("Invalid priority: {}", s)),
        }
    }
}

// ===== Tracking status =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackingStatus {
    Active,
    Met,
    Breached,
}

impl std::fmt::Display for TrackingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackingStatus::Active => write!(f, "active"),
            TrackingStatus::Met => write!(f, "met"),
            TrackingStatus::Breached => write!(f, "breached"),
        }
    }
}

impl std::str::FromStr for TrackingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(TrackingStatus::Active),
            "met" => Ok(TrackingStatus::Met),
            "breached" => Ok(TrackingStatus::Breached),
            _ => Err(format!("Invalid tracking status: {}", s)),
        }
    }
}

// ===== SLA Tracking =====

/// A deadline commitment attached to one business entity.
///
/// The deadline is computed once at creation and never recalculated, even if
/// the caller later rewrites the priority through an update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlaTracking {
    pub id: String,
    pub entity_type: String,
    pub entity_id: String,
    pub sla_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub deadline: DateTime<Utc>,
    pub priority: Priority,
    pub status: TrackingStatus,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub breached: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_time_ms: Option<i64>,
    pub config: DurationSpec,
}

impl SlaTracking {
    pub fn new(
        entity_type: String,
        entity_id: String,
        sla_type: String,
        start_time: DateTime<Utc>,
        deadline: DateTime<Utc>,
        priority: Priority,
        config: DurationSpec,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            entity_type,
            entity_id,
            sla_type,
            description: config.description.clone(),
            start_time,
            deadline,
            priority,
            status: TrackingStatus::Active,
            created_at: Utc::now(),
            completed_at: None,
            breached: false,
            completion_time_ms: None,
            config,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Terminal transition: record the completion outcome.
    ///
    /// Returns a new record; the stored copy must be replaced by the caller.
    /// Does not re-validate the current status, so completing an already
    /// completed record simply recomputes the outcome for the new timestamp.
    pub fn complete(&self, completed_at: DateTime<Utc>) -> Self {
        let breached = completed_at > self.deadline;
        Self {
            status: if breached {
                TrackingStatus::Breached
            } else {
                TrackingStatus::Met
            },
            breached,
            completed_at: Some(completed_at),
            completion_time_ms: Some((completed_at - self.start_time).num_milliseconds()),
            ..self.clone()
        }
    }
}

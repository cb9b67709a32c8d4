use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::entities::duration::DurationSpec;

/// Which timestamp anchors the total SLA window when computing the
/// percent-remaining of a tracking.
///
/// The display layers historically disagreed on this; it is an explicit
/// configuration decision here so every consumer classifies the same way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowBasis {
    #[default]
    StartTime,
    CreatedAt,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub enabled: bool,
    /// Percent-remaining below which a tracking counts as approaching.
    pub warning_percent: f64,
    pub critical_percent: f64,
    pub on_breach: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            warning_percent: 25.0,
            critical_percent: 10.0,
            on_breach: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscalationRule {
    /// Hours overdue beyond which this rule applies.
    pub threshold_hours: f64,
    pub action: String,
    pub description: String,
    pub urgent: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscalationPolicy {
    pub enabled: bool,
    pub levels: Vec<EscalationRule>,
}

impl Default for EscalationPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            levels: vec![
                EscalationRule {
                    threshold_hours: 0.0,
                    action: "notify_team_lead".to_string(),
                    description: "Escalate to team lead".to_string(),
                    urgent: false,
                },
                EscalationRule {
                    threshold_hours: 4.0,
                    action: "notify_manager".to_string(),
                    description: "Escalate to manager".to_string(),
                    urgent: true,
                },
                EscalationRule {
                    threshold_hours: 24.0,
                    action: "notify_senior_management".to_string(),
                    description: "Escalate to senior management".to_string(),
                    urgent: true,
                },
            ],
        }
    }
}

/// Auto-assignment on escalation is owned by the external assignment engine;
/// only the toggle lives here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoAssignmentSettings {
    pub enabled: bool,
}

/// Session-wide SLA configuration, persisted under the `slaConfig` key.
///
/// Missing or malformed persisted state falls back to `Default`, which
/// carries the stock insurance-CRM templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlaSettings {
    pub enabled: bool,
    /// entity type -> SLA type -> duration spec
    pub templates: HashMap<String, HashMap<String, DurationSpec>>,
    pub notifications: NotificationSettings,
    pub escalation: EscalationPolicy,
    pub auto_assignment: AutoAssignmentSettings,
    pub window_basis: WindowBasis,
}

impl Default for SlaSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            templates: default_templates(),
            notifications: NotificationSettings::default(),
            escalation: EscalationPolicy::default(),
            auto_assignment: AutoAssignmentSettings::default(),
            window_basis: WindowBasis::default(),
        }
    }
}

impl SlaSettings {
    pub fn template_for(&self, entity_type: &str, sla_type: &str) -> Option<&DurationSpec> {
        self.templates.get(entity_type)?.get(sla_type)
    }
}

fn default_templates() -> HashMap<String, HashMap<String, DurationSpec>> {
    let mut templates = HashMap::new();

    templates.insert(
        "lead".to_string(),
        HashMap::from([
            (
                "firstResponse".to_string(),
                DurationSpec::hours(2.0).with_description("First response to new lead"),
            ),
            (
                "qualification".to_string(),
                DurationSpec::days(1.0).with_description("Lead qualification"),
            ),
        ]),
    );

    templates.insert(
        "case".to_string(),
        HashMap::from([
            (
                "firstResponse".to_string(),
                DurationSpec::hours(4.0).with_description("First response to case"),
            ),
            (
                "resolution".to_string(),
                DurationSpec::days(5.0).with_description("Case resolution"),
            ),
        ]),
    );

    templates.insert(
        "task".to_string(),
        HashMap::from([(
            "completion".to_string(),
            DurationSpec::days(1.0).with_description("Task completion"),
        )]),
    );

    templates.insert(
        "email".to_string(),
        HashMap::from([(
            "response".to_string(),
            DurationSpec::hours(4.0).with_description("Email response"),
        )]),
    );

    templates.insert(
        "claim".to_string(),
        HashMap::from([
            (
                "acknowledgement".to_string(),
                DurationSpec::days(1.0).with_description("Claim acknowledgement"),
            ),
            (
                "settlement".to_string(),
                DurationSpec::days(15.0).with_description("Claim settlement"),
            ),
        ]),
    );

    templates
}

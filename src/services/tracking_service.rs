use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::domain::entities::{DurationSpec, Priority, SlaTracking};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::{SettingsStore, TrackingRepository};
use crate::events::{EventBus, SystemEvent};
use crate::services::deadline::calculate_deadline;
use crate::services::reporting::{self, Escalation, SlaMetrics};
use crate::services::status::{classify_tracking, StatusBadge};

/// Service owning the SLA tracking lifecycle: creation, completion, updates,
/// deletion, and the read-side views the dashboards consume.
#[derive(Clone)]
pub struct TrackingService {
    repo: Arc<dyn TrackingRepository>,
    settings: Arc<dyn SettingsStore>,
    event_bus: Arc<dyn EventBus>,
}

impl TrackingService {
    pub fn new(
        repo: Arc<dyn TrackingRepository>,
        settings: Arc<dyn SettingsStore>,
        event_bus: Arc<dyn EventBus>,
    ) -> Self {
        Self {
            repo,
            settings,
            event_bus,
        }
    }

    // ========================================
    // Lifecycle
    // ========================================

    /// Create a tracking for one entity event.
    ///
    /// An explicit `custom_config` wins; otherwise the configured template
    /// for `(entity_type, sla_type)` applies. With neither, the call fails
    /// instead of guessing a deadline.
    pub async fn create_tracking(
        &self,
        entity_type: &str,
        entity_id: &str,
        sla_type: &str,
        start_time: DateTime<Utc>,
        priority: Priority,
        custom_config: Option<DurationSpec>,
    ) -> DomainResult<SlaTracking> {
        let settings = self.settings.load().await?;
        if !settings.enabled {
            return Err(DomainError::Validation(
                "SLA tracking is disabled".to_string(),
            ));
        }

        let config = match custom_config {
            Some(config) => config,
            None => settings
                .template_for(entity_type, sla_type)
                .cloned()
                .ok_or_else(|| DomainError::ConfigurationMissing {
                    entity_type: entity_type.to_string(),
                    sla_type: sla_type.to_string(),
                })?,
        };

        let deadline = calculate_deadline(start_time, &config, priority)?;
        let tracking = SlaTracking::new(
            entity_type.to_string(),
            entity_id.to_string(),
            sla_type.to_string(),
            start_time,
            deadline,
            priority,
            config,
        );

        self.repo.insert(&tracking).await?;

        info!(
            "Created SLA tracking {} for {} {} ({}, deadline {})",
            tracking.id, entity_type, entity_id, sla_type, tracking.deadline
        );
        self.event_bus.publish(SystemEvent::TrackingCreated {
            tracking_id: tracking.id.clone(),
            entity_type: tracking.entity_type.clone(),
            entity_id: tracking.entity_id.clone(),
            sla_type: tracking.sla_type.clone(),
            deadline: tracking.deadline,
            timestamp: Utc::now(),
        });

        Ok(tracking)
    }

    /// Complete a tracking now, recording the breach outcome.
    pub async fn complete_tracking(&self, id: &str) -> DomainResult<SlaTracking> {
        let tracking = self
            .repo
            .get(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("SLA tracking not found: {}", id)))?;

        let completed = tracking.complete(Utc::now());
        self.repo.replace(&completed).await?;

        info!(
            "Completed SLA tracking {} ({})",
            completed.id, completed.status
        );
        let completed_at = completed.completed_at.unwrap_or_else(Utc::now);
        self.event_bus.publish(SystemEvent::TrackingCompleted {
            tracking_id: completed.id.clone(),
            entity_type: completed.entity_type.clone(),
            entity_id: completed.entity_id.clone(),
            breached: completed.breached,
            completed_at,
            timestamp: Utc::now(),
        });
        if completed.breached {
            self.event_bus.publish(SystemEvent::SlaBreached {
                tracking_id: completed.id.clone(),
                entity_type: completed.entity_type.clone(),
                entity_id: completed.entity_id.clone(),
                sla_type: completed.sla_type.clone(),
                deadline: completed.deadline,
                breached_at: completed_at,
                timestamp: Utc::now(),
            });
        }

        Ok(completed)
    }

    /// Wholesale replace of a stored record. The caller is trusted; no
    /// invariants are re-checked here.
    pub async fn update_tracking(&self, tracking: &SlaTracking) -> DomainResult<()> {
        self.repo.replace(tracking).await?;
        info!("Updated SLA tracking {}", tracking.id);
        Ok(())
    }

    /// Remove a record outright. No soft delete, no audit trail.
    pub async fn delete_tracking(&self, id: &str) -> DomainResult<()> {
        let existing = self
            .repo
            .get(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("SLA tracking not found: {}", id)))?;

        self.repo.remove(&existing.id).await?;

        info!("Deleted SLA tracking {}", existing.id);
        self.event_bus.publish(SystemEvent::TrackingDeleted {
            tracking_id: existing.id,
            timestamp: Utc::now(),
        });
        Ok(())
    }

    // ========================================
    // Queries
    // ========================================

    pub async fn get_tracking(&self, id: &str) -> DomainResult<Option<SlaTracking>> {
        self.repo.get(id).await
    }

    pub async fn list_trackings(&self) -> DomainResult<Vec<SlaTracking>> {
        self.repo.list().await
    }

    pub async fn trackings_for_entity(
        &self,
        entity_type: &str,
        entity_id: &str,
    ) -> DomainResult<Vec<SlaTracking>> {
        self.repo.for_entity(entity_type, entity_id).await
    }

    pub async fn active_trackings(&self) -> DomainResult<Vec<SlaTracking>> {
        self.repo.active().await
    }

    // ========================================
    // Read-side views
    // ========================================

    pub async fn tracking_status(&self, id: &str) -> DomainResult<StatusBadge> {
        let tracking = self
            .repo
            .get(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("SLA tracking not found: {}", id)))?;
        let settings = self.settings.load().await?;
        Ok(classify_tracking(
            &tracking,
            settings.window_basis,
            Utc::now(),
        ))
    }

    pub async fn violations(&self) -> DomainResult<Vec<SlaTracking>> {
        let items = self.repo.list().await?;
        Ok(reporting::violations(&items, Utc::now()))
    }

    /// Approaching items, thresholded by the configured warning percent.
    pub async fn approaching(&self) -> DomainResult<Vec<SlaTracking>> {
        let items = self.repo.list().await?;
        let settings = self.settings.load().await?;
        Ok(reporting::approaching(
            &items,
            settings.notifications.warning_percent,
            settings.window_basis,
            Utc::now(),
        ))
    }

    pub async fn metrics(&self) -> DomainResult<SlaMetrics> {
        let items = self.repo.list().await?;
        let settings = self.settings.load().await?;
        Ok(reporting::metrics(&items, settings.window_basis, Utc::now()))
    }

    pub async fn escalation_for(&self, id: &str) -> DomainResult<Option<Escalation>> {
        let tracking = self
            .repo
            .get(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("SLA tracking not found: {}", id)))?;
        let settings = self.settings.load().await?;
        Ok(reporting::escalation_for(
            &tracking,
            &settings.escalation,
            settings.window_basis,
            Utc::now(),
        ))
    }
}

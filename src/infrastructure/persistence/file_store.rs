use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::warn;

use crate::domain::entities::{SlaSettings, SlaTracking, TrackingStatus};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::{SettingsStore, TrackingRepository};

/// On-disk document, mirroring the key-value shape the admin console
/// persists: `slaConfig` and `slaTrackings`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(rename = "slaConfig", skip_serializing_if = "Option::is_none")]
    sla_config: Option<SlaSettings>,
    #[serde(rename = "slaTrackings", default)]
    sla_trackings: Vec<SlaTracking>,
}

/// JSON-file-backed store for trackings and settings.
///
/// The working copy lives in memory; every mutation rewrites the whole
/// document, so the file is always a complete snapshot. A missing file means
/// an empty collection; a malformed file is logged and replaced by defaults
/// rather than failing the session.
pub struct JsonFileStore {
    path: PathBuf,
    state: RwLock<StoreDocument>,
}

impl JsonFileStore {
    pub async fn open(path: impl AsRef<Path>) -> DomainResult<Self> {
        let path = path.as_ref().to_path_buf();
        let doc = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => match serde_json::from_str::<StoreDocument>(&raw) {
                Ok(doc) => doc,
                Err(e) => {
                    warn!(
                        "Malformed SLA store at {}: {}. Starting from defaults.",
                        path.display(),
                        e
                    );
                    StoreDocument::default()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => StoreDocument::default(),
            Err(e) => {
                return Err(DomainError::Storage(format!(
                    "Failed to read SLA store at {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        Ok(Self {
            path,
            state: RwLock::new(doc),
        })
    }

    async fn persist(&self, doc: &StoreDocument) -> DomainResult<()> {
        let json = serde_json::to_string_pretty(doc)
            .map_err(|e| DomainError::Storage(format!("Failed to serialize SLA store: {}", e)))?;
        tokio::fs::write(&self.path, json).await.map_err(|e| {
            DomainError::Storage(format!(
                "Failed to write SLA store at {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

#[async_trait::async_trait]
impl TrackingRepository for JsonFileStore {
    async fn insert(&self, tracking: &SlaTracking) -> DomainResult<()> {
        let mut doc = self.state.write().await;
        doc.sla_trackings.push(tracking.clone());
        self.persist(&doc).await
    }

    async fn get(&self, id: &str) -> DomainResult<Option<SlaTracking>> {
        Ok(self
            .state
            .read()
            .await
            .sla_trackings
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    async fn list(&self) -> DomainResult<Vec<SlaTracking>> {
        Ok(self.state.read().await.sla_trackings.clone())
    }

    async fn replace(&self, tracking: &SlaTracking) -> DomainResult<()> {
        let mut doc = self.state.write().await;
        let slot = doc
            .sla_trackings
            .iter_mut()
            .find(|t| t.id == tracking.id)
            .ok_or_else(|| {
                DomainError::NotFound(format!("SLA tracking not found: {}", tracking.id))
            })?;
        *slot = tracking.clone();
        self.persist(&doc).await
    }

    async fn remove(&self, id: &str) -> DomainResult<()> {
        let mut doc = self.state.write().await;
        doc.sla_trackings.retain(|t| t.id != id);
        self.persist(&doc).await
    }

    async fn for_entity(
        &self,
        entity_type: &str,
        entity_id: &str,
    ) -> DomainResult<Vec<SlaTracking>> {
        Ok(self
            .state
            .read()
            .await
            .sla_trackings
            .iter()
            .filter(|t| t.entity_type == entity_type && t.entity_id == entity_id)
            .cloned()
            .collect())
    }

    async fn active(&self) -> DomainResult<Vec<SlaTracking>> {
        Ok(self
            .state
            .read()
            .await
            .sla_trackings
            .iter()
            .filter(|t| t.status == TrackingStatus::Active)
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl SettingsStore for JsonFileStore {
    async fn load(&self) -> DomainResult<SlaSettings> {
        Ok(self
            .state
            .read()
            .await
            .sla_config
            .clone()
            .unwrap_or_default())
    }

    async fn save(&self, settings: &SlaSettings) -> DomainResult<()> {
        let mut doc = self.state.write().await;
        doc.sla_config = Some(settings.clone());
        self.persist(&doc).await
    }
}

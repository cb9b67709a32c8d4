use tokio::sync::RwLock;

use crate::domain::entities::{SlaSettings, SlaTracking, TrackingStatus};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::{SettingsStore, TrackingRepository};

/// In-memory store backing both ports. Insertion order is the iteration
/// order, matching what the tables expect.
pub struct InMemoryStore {
    trackings: RwLock<Vec<SlaTracking>>,
    settings: RwLock<SlaSettings>,
}

impl InMemoryStore {
    pub fn new(settings: SlaSettings) -> Self {
        Self {
            trackings: RwLock::new(Vec::new()),
            settings: RwLock::new(settings),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new(SlaSettings::default())
    }
}

#[async_trait::async_trait]
impl TrackingRepository for InMemoryStore {
    async fn insert(&self, tracking: &SlaTracking) -> DomainResult<()> {
        self.trackings.write().await.push(tracking.clone());
        Ok(())
    }

    async fn get(&self, id: &str) -> DomainResult<Option<SlaTracking>> {
        Ok(self
            .trackings
            .read()
            .await
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    async fn list(&self) -> DomainResult<Vec<SlaTracking>> {
        Ok(self.trackings.read().await.clone())
    }

    async fn replace(&self, tracking: &SlaTracking) -> DomainResult<()> {
        let mut trackings = self.trackings.write().await;
        let slot = trackings
            .iter_mut()
            .find(|t| t.id == tracking.id)
            .ok_or_else(|| {
                DomainError::NotFound(format!("SLA tracking not found: {}", tracking.id))
            })?;
        *slot = tracking.clone();
        Ok(())
    }

    async fn remove(&self, id: &str) -> DomainResult<()> {
        self.trackings.write().await.retain(|t| t.id != id);
        Ok(())
    }

    async fn for_entity(
        &self,
        entity_type: &str,
        entity_id: &str,
    ) -> DomainResult<Vec<SlaTracking>> {
        Ok(self
            .trackings
            .read()
            .await
            .iter()
            .filter(|t| t.entity_type == entity_type && t.entity_id == entity_id)
            .cloned()
            .collect())
    }

    async fn active(&self) -> DomainResult<Vec<SlaTracking>> {
        Ok(self
            .trackings
            .read()
            .await
            .iter()
            .filter(|t| t.status == TrackingStatus::Active)
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl SettingsStore for InMemoryStore {
    async fn load(&self) -> DomainResult<SlaSettings> {
        Ok(self.settings.read().await.clone())
    }

    async fn save(&self, settings: &SlaSettings) -> DomainResult<()> {
        *self.settings.write().await = settings.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{DurationSpec, Priority};
    use chrono::{Duration, Utc};

    fn sample(entity_id: &str) -> SlaTracking {
        let start = Utc::now();
        SlaTracking::new(
            "lead".to_string(),
            entity_id.to_string(),
            "firstResponse".to_string(),
            start,
            start + Duration::hours(2),
            Priority::Medium,
            DurationSpec::hours(2.0),
        )
    }

    #[test]
    fn test_insertion_order_preserved() {
        tokio_test::block_on(async {
            let store = InMemoryStore::default();
            let first = sample("L1");
            let second = sample("L2");
            store.insert(&first).await.unwrap();
            store.insert(&second).await.unwrap();

            let all = store.list().await.unwrap();
            assert_eq!(all.len(), 2);
            assert_eq!(all[0].id, first.id);
            assert_eq!(all[1].id, second.id);
        });
    }

    #[test]
    fn test_replace_swaps_in_place() {
        tokio_test::block_on(async {
            let store = InMemoryStore::default();
            let first = sample("L1");
            let second = sample("L2");
            store.insert(&first).await.unwrap();
            store.insert(&second).await.unwrap();

            let completed = first.complete(Utc::now());
            store.replace(&completed).await.unwrap();

            let all = store.list().await.unwrap();
            assert_eq!(all[0].id, first.id);
            assert!(all[0].is_completed());
            assert!(!all[1].is_completed());
        });
    }

    #[test]
    fn test_replace_missing_is_not_found() {
        tokio_test::block_on(async {
            let store = InMemoryStore::default();
            let err = store.replace(&sample("L1")).await.unwrap_err();
            assert!(matches!(err, DomainError::NotFound(_)));
        });
    }

    #[test]
    fn test_remove_filters_out() {
        tokio_test::block_on(async {
            let store = InMemoryStore::default();
            let tracking = sample("L1");
            store.insert(&tracking).await.unwrap();
            store.remove(&tracking.id).await.unwrap();
            assert!(store.list().await.unwrap().is_empty());

            // Removing a missing id is a no-op, not an error.
            store.remove("missing").await.unwrap();
        });
    }

    #[test]
    fn test_entity_scoped_query() {
        tokio_test::block_on(async {
            let store = InMemoryStore::default();
            store.insert(&sample("L1")).await.unwrap();
            store.insert(&sample("L2")).await.unwrap();
            store.insert(&sample("L1")).await.unwrap();

            let scoped = store.for_entity("lead", "L1").await.unwrap();
            assert_eq!(scoped.len(), 2);
            assert!(scoped.iter().all(|t| t.entity_id == "L1"));
        });
    }

    #[test]
    fn test_active_query_excludes_completed() {
        tokio_test::block_on(async {
            let store = InMemoryStore::default();
            let open = sample("L1");
            let closed = sample("L2");
            store.insert(&open).await.unwrap();
            store.insert(&closed).await.unwrap();
            store.replace(&closed.complete(Utc::now())).await.unwrap();

            let active = store.active().await.unwrap();
            assert_eq!(active.len(), 1);
            assert_eq!(active[0].id, open.id);
        });
    }
}

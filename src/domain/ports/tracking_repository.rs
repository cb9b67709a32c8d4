use crate::domain::entities::SlaTracking;
use crate::domain::errors::DomainResult;

/// Repository for SLA tracking records.
///
/// Implementations preserve insertion order; `replace` swaps the record with
/// the same id in place, and `remove` is a filter-out (removing a missing id
/// is not an error).
#[async_trait::async_trait]
pub trait TrackingRepository: Send + Sync {
    async fn insert(&self, tracking: &SlaTracking) -> DomainResult<()>;
    async fn get(&self, id: &str) -> DomainResult<Option<SlaTracking>>;
    async fn list(&self) -> DomainResult<Vec<SlaTracking>>;
    async fn replace(&self, tracking: &SlaTracking) -> DomainResult<()>;
    async fn remove(&self, id: &str) -> DomainResult<()>;
    async fn for_entity(
        &self,
        entity_type: &str,
        entity_id: &str,
    ) -> DomainResult<Vec<SlaTracking>>;
    async fn active(&self) -> DomainResult<Vec<SlaTracking>>;
}

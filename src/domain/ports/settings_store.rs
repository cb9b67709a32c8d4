use crate::domain::entities::SlaSettings;
use crate::domain::errors::DomainResult;

/// Store for the session-wide SLA configuration.
#[async_trait::async_trait]
pub trait SettingsStore: Send + Sync {
    async fn load(&self) -> DomainResult<SlaSettings>;
    async fn save(&self, settings: &SlaSettings) -> DomainResult<()>;
}

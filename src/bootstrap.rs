use std::sync::Arc;

use crate::config::Config;
use crate::domain::errors::DomainResult;
use crate::events::LocalEventBus;
use crate::infrastructure::persistence::JsonFileStore;
use crate::services::TrackingService;

/// Wire a tracking service onto the configured JSON store and a local
/// event bus. The same store instance backs both ports so trackings and
/// settings land in one document.
pub async fn build_engine(config: &Config) -> DomainResult<TrackingService> {
    let store = Arc::new(JsonFileStore::open(&config.store_path).await?);
    let event_bus = Arc::new(LocalEventBus::new(config.event_capacity));

    tracing::info!("SLA store opened at {}", config.store_path);

    Ok(TrackingService::new(store.clone(), store, event_bus))
}

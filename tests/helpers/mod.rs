#![allow(dead_code)]
use std::sync::Arc;

use chrono::{DateTime, Utc};
use oxitrack::infrastructure::persistence::InMemoryStore;
use oxitrack::{
    DurationSpec, LocalEventBus, Priority, SlaSettings, SlaTracking, TrackingService,
};

pub fn utc(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

/// Service wired onto a fresh in-memory store and a local bus; the store and
/// bus are returned so tests can inspect state and subscribe to events.
pub fn build_service() -> (TrackingService, Arc<InMemoryStore>, LocalEventBus) {
    build_service_with(SlaSettings::default())
}

pub fn build_service_with(
    settings: SlaSettings,
) -> (TrackingService, Arc<InMemoryStore>, LocalEventBus) {
    let store = Arc::new(InMemoryStore::new(settings));
    let bus = LocalEventBus::new(100);
    let service = TrackingService::new(store.clone(), store.clone(), Arc::new(bus.clone()));
    (service, store, bus)
}

/// Bare tracking with an explicit window, for the pure reporting functions.
pub fn tracking_between(
    entity_id: &str,
    start: DateTime<Utc>,
    deadline: DateTime<Utc>,
) -> SlaTracking {
    SlaTracking::new(
        "case".to_string(),
        entity_id.to_string(),
        "resolution".to_string(),
        start,
        deadline,
        Priority::Medium,
        DurationSpec::hours(1.0),
    )
}

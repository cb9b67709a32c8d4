use chrono::{DateTime, Utc};
use tokio::sync::broadcast;

/// Lifecycle events emitted by the tracking service.
///
/// Escalation and notification dispatch live outside this crate; they
/// subscribe here instead of being called directly.
#[derive(Debug, Clone)]
pub enum SystemEvent {
    TrackingCreated {
        tracking_id: String,
        entity_type: String,
        entity_id: String,
        sla_type: String,
        deadline: DateTime<Utc>,
        timestamp: DateTime<Utc>,
    },
    TrackingCompleted {
        tracking_id: String,
        entity_type: String,
        entity_id: String,
        breached: bool,
        completed_at: DateTime<Utc>,
        timestamp: DateTime<Utc>,
    },
    TrackingDeleted {
        tracking_id: String,
        timestamp: DateTime<Utc>,
    },
    SlaBreached {
        tracking_id: String,
        entity_type: String,
        entity_id: String,
        sla_type: String,
        deadline: DateTime<Utc>,
        breached_at: DateTime<Utc>,
        timestamp: DateTime<Utc>,
    },
}

/// Event bus for publishing and subscribing to system events
pub trait EventBus: Send + Sync {
    /// Publish an event to all subscribers (non-blocking, fire-and-forget)
    fn publish(&self, event: SystemEvent);

    /// Subscribe to events (returns a receiver)
    fn subscribe(&self) -> broadcast::Receiver<SystemEvent>;
}

/// Local in-memory implementation of EventBus
#[derive(Clone)]
pub struct LocalEventBus {
    tx: broadcast::Sender<SystemEvent>,
}

impl LocalEventBus {
    /// Create a new event bus with specified capacity
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl EventBus for LocalEventBus {
    fn publish(&self, event: SystemEvent) {
        // Fire-and-forget - if no subscribers or channel full, just log and continue
        if let Err(e) = self.tx.send(event) {
            tracing::debug!("No active subscribers for event (or channel full): {}", e);
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<SystemEvent> {
        self.tx.subscribe()
    }
}

impl Default for LocalEventBus {
    fn default() -> Self {
        Self::new(1000)
    }
}

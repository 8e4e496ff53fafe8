//! Logs every delivered event. Hosts embedding the library register their
//! own listeners the same way.

use shared_bus::{InMemoryEventBus, ListenerId};
use shared_types::{EventType, FsbEvent};
use tracing::info;

/// Register one logging listener per known event type.
pub fn register_logging_listeners(bus: &InMemoryEventBus) -> Vec<ListenerId> {
    EventType::ALL
        .into_iter()
        .map(|event_type| bus.on(event_type, log_event))
        .collect()
}

fn log_event(event: &FsbEvent) {
    match event {
        FsbEvent::Ping { timestamp, data } => {
            info!(%timestamp, manual = data.manual, "Ping received");
        }
        FsbEvent::ProductUpdated { timestamp, data } => {
            info!(
                %timestamp,
                product_id = data.id,
                title = %data.title,
                flags = %data.flags,
                "Product updated"
            );
        }
        FsbEvent::AnnouncementCreated { timestamp, data } => {
            let products: Vec<u64> = data.resolved_products.iter().map(|p| p.id).collect();
            info!(%timestamp, ?products, "Announcement created");
        }
        FsbEvent::Unknown { event_type, .. } => {
            info!(event_type = %event_type, "Unhandled event");
        }
    }
}

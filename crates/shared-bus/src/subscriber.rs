//! # Event Subscriber
//!
//! Channel-backed subscriptions for consumers that prefer to `await` events
//! instead of registering callbacks.

use crate::publisher::{remove_listener, ListenerId, ListenerMap};
use parking_lot::Mutex;
use shared_types::FsbEvent;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::debug;

/// Errors from subscription operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The registration was removed, e.g. by [`crate::InMemoryEventBus::clear`].
    #[error("Event bus closed")]
    Closed,
}

/// A subscription handle for receiving events of one type.
///
/// When dropped, the underlying listener is unregistered.
pub struct Subscription {
    receiver: mpsc::UnboundedReceiver<FsbEvent>,

    /// Registry the listener lives in (for cleanup).
    listeners: Arc<Mutex<ListenerMap>>,

    event_type: String,
    id: ListenerId,
}

impl Subscription {
    pub(crate) fn new(
        receiver: mpsc::UnboundedReceiver<FsbEvent>,
        listeners: Arc<Mutex<ListenerMap>>,
        event_type: String,
        id: ListenerId,
    ) -> Self {
        Self {
            receiver,
            listeners,
            event_type,
            id,
        }
    }

    /// Receive the next event.
    ///
    /// # Returns
    ///
    /// - `Some(event)` - The next event, in emission order
    /// - `None` - The registration was removed from the bus
    pub async fn recv(&mut self) -> Option<FsbEvent> {
        self.receiver.recv().await
    }

    /// Try to receive the next event without waiting.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(event))` - An event was queued
    /// - `Ok(None)` - Nothing queued yet
    /// - `Err(SubscriptionError::Closed)` - The registration was removed
    pub fn try_recv(&mut self) -> Result<Option<FsbEvent>, SubscriptionError> {
        match self.receiver.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(mpsc::error::TryRecvError::Empty) => Ok(None),
            Err(mpsc::error::TryRecvError::Disconnected) => Err(SubscriptionError::Closed),
        }
    }

    /// The event type tag this subscription listens to.
    #[must_use]
    pub fn event_type(&self) -> &str {
        &self.event_type
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        remove_listener(&self.listeners, &self.event_type, self.id);
        debug!(event_type = %self.event_type, "Subscription dropped");
    }
}

//! # Event Publisher
//!
//! The listener registry and the emitting side of the bus.

use crate::subscriber::Subscription;
use parking_lot::Mutex;
use shared_types::FsbEvent;
use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error};

/// A listener callback.
pub type Listener = Arc<dyn Fn(&FsbEvent) + Send + Sync>;

/// Handle returned on registration, used to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub(crate) struct Registration {
    id: ListenerId,
    once: bool,
    listener: Listener,
}

/// Event type tag -> registrations in invocation order.
pub(crate) type ListenerMap = HashMap<String, Vec<Registration>>;

/// Trait for handing events to the bus.
///
/// The webhook gateway only sees this trait, so hosts can put their own
/// dispatch behind it.
pub trait EventPublisher: Send + Sync {
    /// Deliver an event to every listener registered for its type.
    ///
    /// # Returns
    ///
    /// The number of listeners invoked.
    fn emit(&self, event: &FsbEvent) -> usize;

    /// Get the total number of events emitted.
    fn events_published(&self) -> u64;
}

/// In-memory implementation of the event bus.
///
/// Dispatch is synchronous: `emit` returns once every listener has run.
/// The registry lock is released before listeners are called, so a
/// listener may register or unregister listeners itself.
pub struct InMemoryEventBus {
    /// Registered listeners by event type.
    listeners: Arc<Mutex<ListenerMap>>,

    /// Source of listener ids.
    next_id: AtomicU64,

    /// Total events emitted.
    events_published: AtomicU64,
}

impl InMemoryEventBus {
    #[must_use]
    pub fn new() -> Self {
        Self {
            listeners: Arc::new(Mutex::new(HashMap::new())),
            next_id: AtomicU64::new(1),
            events_published: AtomicU64::new(0),
        }
    }

    /// Register a listener for `event_type`.
    ///
    /// Registering the same callback twice yields two independent
    /// registrations, each invoked once per event.
    pub fn on<F>(&self, event_type: impl AsRef<str>, listener: F) -> ListenerId
    where
        F: Fn(&FsbEvent) + Send + Sync + 'static,
    {
        self.register(event_type.as_ref(), Arc::new(listener), false)
    }

    /// Register a listener that is removed before its first invocation.
    pub fn once<F>(&self, event_type: impl AsRef<str>, listener: F) -> ListenerId
    where
        F: Fn(&FsbEvent) + Send + Sync + 'static,
    {
        self.register(event_type.as_ref(), Arc::new(listener), true)
    }

    /// Register an already shared listener.
    pub fn on_shared(&self, event_type: impl AsRef<str>, listener: Listener) -> ListenerId {
        self.register(event_type.as_ref(), listener, false)
    }

    /// Remove one registration.
    ///
    /// Returns `false` if `id` is not registered for `event_type`.
    pub fn off(&self, event_type: impl AsRef<str>, id: ListenerId) -> bool {
        remove_listener(&self.listeners, event_type.as_ref(), id)
    }

    /// Receive events of `event_type` through an async channel.
    ///
    /// Dropping the returned `Subscription` unregisters it.
    #[must_use]
    pub fn subscribe(&self, event_type: impl AsRef<str>) -> Subscription {
        let event_type = event_type.as_ref();
        let (sender, receiver) = mpsc::unbounded_channel();
        let id = self.on(event_type, move |event| {
            // The receiver is gone only while its Subscription is dropping.
            let _ = sender.send(event.clone());
        });

        debug!(event_type, "New subscription created");

        Subscription::new(receiver, Arc::clone(&self.listeners), event_type.to_string(), id)
    }

    /// Invoke every listener registered for the event's type, in
    /// registration order.
    ///
    /// # Returns
    ///
    /// The number of listeners invoked, including ones that panicked.
    pub fn emit(&self, event: &FsbEvent) -> usize {
        let event_type = event.event_type();
        self.events_published.fetch_add(1, Ordering::Relaxed);

        let batch: Vec<Listener> = {
            let mut listeners = self.listeners.lock();
            let Some(registrations) = listeners.get_mut(event_type) else {
                debug!(event_type, "Event dropped (no listeners)");
                return 0;
            };
            let batch = registrations
                .iter()
                .map(|registration| Arc::clone(&registration.listener))
                .collect();
            registrations.retain(|registration| !registration.once);
            if registrations.is_empty() {
                listeners.remove(event_type);
            }
            batch
        };

        for listener in &batch {
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| listener(event))) {
                error!(
                    event_type,
                    panic = %panic_message(payload.as_ref()),
                    "Listener panicked, continuing with remaining listeners"
                );
            }
        }

        debug!(event_type, listeners = batch.len(), "Event emitted");
        batch.len()
    }

    /// Number of registrations for `event_type`.
    #[must_use]
    pub fn listener_count(&self, event_type: impl AsRef<str>) -> usize {
        self.listeners
            .lock()
            .get(event_type.as_ref())
            .map_or(0, Vec::len)
    }

    /// Drop every registration. Open subscriptions see their channel close.
    pub fn clear(&self) {
        self.listeners.lock().clear();
    }

    fn register(&self, event_type: &str, listener: Listener, once: bool) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .lock()
            .entry(event_type.to_string())
            .or_default()
            .push(Registration { id, once, listener });
        id
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventPublisher for InMemoryEventBus {
    fn emit(&self, event: &FsbEvent) -> usize {
        InMemoryEventBus::emit(self, event)
    }

    fn events_published(&self) -> u64 {
        self.events_published.load(Ordering::Relaxed)
    }
}

pub(crate) fn remove_listener(
    listeners: &Mutex<ListenerMap>,
    event_type: &str,
    id: ListenerId,
) -> bool {
    let mut listeners = listeners.lock();
    let Some(registrations) = listeners.get_mut(event_type) else {
        return false;
    };
    let before = registrations.len();
    registrations.retain(|registration| registration.id != id);
    let removed = registrations.len() != before;
    if registrations.is_empty() {
        listeners.remove(event_type);
    }
    removed
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

//! # Shared Bus - In-Process Event Dispatch
//!
//! Delivers decoded webhook events to application listeners.
//!
//! ## Dispatch Model
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │   Webhook    │                    │  Application │
//! │   Gateway    │    emit()          │   Listener   │
//! │              │ ──────┐            │              │
//! └──────────────┘       │            └──────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │
//!                  │  Event Bus   │          │
//!                  │ (by type tag)│ ─────────┘
//!                  └──────────────┘  on() / once() / subscribe()
//! ```
//!
//! - Listeners are keyed by the event's wire tag and run synchronously on the
//!   emitting thread, in registration order.
//! - A panicking listener is logged and skipped; the remaining listeners
//!   still run.
//! - The bus is an ordinary value owned by the host. There is no global
//!   registry; tests build a fresh bus or call [`InMemoryEventBus::clear`].

#![allow(clippy::missing_const_for_fn)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod publisher;
pub mod subscriber;

pub use publisher::{EventPublisher, InMemoryEventBus, Listener, ListenerId};
pub use subscriber::{Subscription, SubscriptionError};

//! # Webhook Events
//!
//! The closed set of events a verified webhook payload can decode into.
//! Wire shape: `{"type": "...", "timestamp": <epoch offset>, "data": {...}}`.

use crate::entities::{PingEvent, Product, ResolvedAnnouncement};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Every event type tag starts with this prefix.
pub const EVENT_TYPE_PREFIX: &str = "fsb:event:";

/// Event types this library decodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    #[serde(rename = "fsb:event:ping")]
    Ping,
    #[serde(rename = "fsb:event:product_updated")]
    ProductUpdated,
    #[serde(rename = "fsb:event:announcement_created")]
    AnnouncementCreated,
}

impl EventType {
    pub const ALL: [EventType; 3] = [
        EventType::Ping,
        EventType::ProductUpdated,
        EventType::AnnouncementCreated,
    ];

    /// The wire tag, e.g. `fsb:event:ping`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            EventType::Ping => "fsb:event:ping",
            EventType::ProductUpdated => "fsb:event:product_updated",
            EventType::AnnouncementCreated => "fsb:event:announcement_created",
        }
    }

    #[must_use]
    pub fn from_wire(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == tag)
    }
}

impl AsRef<str> for EventType {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded webhook event.
#[derive(Debug, Clone, PartialEq)]
pub enum FsbEvent {
    /// Connectivity check sent by the partner API.
    Ping {
        timestamp: DateTime<Utc>,
        data: PingEvent,
    },

    /// A product's details changed.
    ProductUpdated {
        timestamp: DateTime<Utc>,
        data: Product,
    },

    /// A new announcement went out.
    AnnouncementCreated {
        timestamp: DateTime<Utc>,
        data: ResolvedAnnouncement,
    },

    /// A correctly prefixed type this library does not know yet.
    /// Only the timestamp is decoded; `data` is passed through untouched.
    Unknown {
        event_type: String,
        timestamp: Option<DateTime<Utc>>,
        data: Value,
    },
}

impl FsbEvent {
    /// The wire tag listeners are keyed by.
    #[must_use]
    pub fn event_type(&self) -> &str {
        match self {
            FsbEvent::Ping { .. } => EventType::Ping.as_str(),
            FsbEvent::ProductUpdated { .. } => EventType::ProductUpdated.as_str(),
            FsbEvent::AnnouncementCreated { .. } => EventType::AnnouncementCreated.as_str(),
            FsbEvent::Unknown { event_type, .. } => event_type,
        }
    }

    /// `None` for unknown event types.
    #[must_use]
    pub fn kind(&self) -> Option<EventType> {
        match self {
            FsbEvent::Ping { .. } => Some(EventType::Ping),
            FsbEvent::ProductUpdated { .. } => Some(EventType::ProductUpdated),
            FsbEvent::AnnouncementCreated { .. } => Some(EventType::AnnouncementCreated),
            FsbEvent::Unknown { .. } => None,
        }
    }

    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            FsbEvent::Ping { timestamp, .. }
            | FsbEvent::ProductUpdated { timestamp, .. }
            | FsbEvent::AnnouncementCreated { timestamp, .. } => Some(*timestamp),
            FsbEvent::Unknown { timestamp, .. } => *timestamp,
        }
    }
}

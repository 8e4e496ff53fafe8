//! # Parse Errors

use shared_types::EventType;
use thiserror::Error;

/// A verified payload that cannot be turned into an event.
#[derive(Debug, Error)]
pub enum EventParseError {
    /// The payload is not a JSON object.
    #[error("Event is not a JSON object")]
    NotAnObject,

    /// The payload has no `type` field.
    #[error("Event has no type")]
    MissingType,

    /// The `type` field is not a string.
    #[error("Event type is not a string: {0}")]
    InvalidType(serde_json::Value),

    /// A known event type without a decodable `timestamp`.
    #[error("Event {event_type} has no valid timestamp")]
    InvalidTimestamp { event_type: EventType },

    /// A known event type whose `data` does not match its entity.
    #[error("Event {event_type} has an invalid payload: {source}")]
    InvalidPayload {
        event_type: EventType,
        #[source]
        source: serde_json::Error,
    },
}

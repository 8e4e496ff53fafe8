//! # Event Parser

use crate::domain::errors::EventParseError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared_types::{parse_epoch_value, EventType, FsbEvent, EVENT_TYPE_PREFIX};
use tracing::debug;

/// The payload's `type` when it is a string carrying the event prefix.
///
/// Payloads for which this is `None` are authentic but not events, and are
/// not handed to [`parse_event`].
#[must_use]
pub fn supported_event_type(raw: &Value) -> Option<&str> {
    raw.get("type")
        .and_then(Value::as_str)
        .filter(|event_type| event_type.starts_with(EVENT_TYPE_PREFIX))
}

/// Decode a verified payload into an event.
///
/// # Errors
///
/// - `NotAnObject` / `MissingType` / `InvalidType` for payloads without a
///   string `type`
/// - `InvalidTimestamp` / `InvalidPayload` for known types whose
///   `timestamp` or `data` cannot be decoded
///
/// Unknown types never fail.
pub fn parse_event(raw: Value) -> Result<FsbEvent, EventParseError> {
    let Value::Object(mut event) = raw else {
        return Err(EventParseError::NotAnObject);
    };

    let event_type = match event.remove("type") {
        Some(Value::String(event_type)) => event_type,
        Some(other) => return Err(EventParseError::InvalidType(other)),
        None => return Err(EventParseError::MissingType),
    };
    let timestamp = event.get("timestamp").and_then(parse_epoch_value);
    let data = event.remove("data").unwrap_or(Value::Null);

    let Some(kind) = EventType::from_wire(&event_type) else {
        debug!(event_type = %event_type, "Passing through unknown event type");
        return Ok(FsbEvent::Unknown {
            event_type,
            timestamp,
            data,
        });
    };

    let timestamp = timestamp.ok_or(EventParseError::InvalidTimestamp { event_type: kind })?;

    let event = match kind {
        EventType::Ping => FsbEvent::Ping {
            timestamp,
            data: decode(kind, data)?,
        },
        EventType::ProductUpdated => FsbEvent::ProductUpdated {
            timestamp,
            data: decode(kind, data)?,
        },
        EventType::AnnouncementCreated => FsbEvent::AnnouncementCreated {
            timestamp,
            data: decode(kind, data)?,
        },
    };
    Ok(event)
}

fn decode<T: DeserializeOwned>(event_type: EventType, data: Value) -> Result<T, EventParseError> {
    serde_json::from_value(data)
        .map_err(|source| EventParseError::InvalidPayload { event_type, source })
}

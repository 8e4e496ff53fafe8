//! # Domain Entities
//!
//! Payload entities carried by webhook events.
//!
//! Only the fields the receiver interprets are typed. Everything else the
//! partner API sends is kept verbatim in `extra`, so nothing is lost when an
//! application re-serializes an entity.

use crate::bitfield::Bitfield;
use crate::flags::{ProductFlag, ProductImageFlag, ProductUrlFlag};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Payload of `fsb:event:ping`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingEvent {
    /// `true` when the ping was triggered by hand from the partner dashboard.
    pub manual: bool,
}

/// A free or discounted product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    /// End of the offer; `None` when the offer has no announced end.
    #[serde(default, with = "until_format")]
    pub until: Option<DateTime<Utc>>,
    pub flags: Bitfield<ProductFlag>,
    pub urls: Vec<ProductUrl>,
    pub images: Vec<ProductImage>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A link to a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductUrl {
    pub url: String,
    pub flags: Bitfield<ProductUrlFlag>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An image of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductImage {
    pub url: String,
    pub flags: Bitfield<ProductImageFlag>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An announcement with its products already resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedAnnouncement {
    #[serde(rename = "resolvedProducts")]
    pub resolved_products: Vec<Product>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `until` arrives as an RFC 3339 string, as Unix milliseconds, or as null.
/// Falsy values (`null`, `false`, `0`, `""`) all mean "no end date".
mod until_format {
    use chrono::{DateTime, Utc};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S: Serializer>(
        until: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match until {
            Some(time) => serializer.serialize_str(&time.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null | Value::Bool(false) => Ok(None),
            Value::String(raw) if raw.is_empty() => Ok(None),
            Value::Number(number) if number.as_f64() == Some(0.0) => Ok(None),
            Value::String(raw) => DateTime::parse_from_rfc3339(&raw)
                .map(|time| Some(time.with_timezone(&Utc)))
                .map_err(|e| D::Error::custom(format!("invalid until date {raw:?}: {e}"))),
            Value::Number(number) => number
                .as_i64()
                .and_then(DateTime::<Utc>::from_timestamp_millis)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid until timestamp {number}"))),
            other => Err(D::Error::custom(format!(
                "until must be a date string, a number or null, got {other}"
            ))),
        }
    }
}

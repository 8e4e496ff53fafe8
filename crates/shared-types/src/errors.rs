//! # Error Types
//!
//! Errors raised by the shared value types.

use thiserror::Error;

/// Errors from building a `Bitfield` out of flag names.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BitfieldError {
    /// The name is not part of the flag family.
    #[error("Unknown {family} flag: {name}")]
    UnknownFlag { family: &'static str, name: String },
}

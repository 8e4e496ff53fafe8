//! # Shared Types Crate
//!
//! Domain entities and value types shared by every crate in the workspace.
//!
//! ## Contents
//!
//! - [`bitfield`]: `Bitfield<F>`, a compact set over a fixed flag family.
//! - [`flags`]: the three product flag families carried on the wire.
//! - [`epoch`]: the epoch-offset timestamp encoding used by signatures and
//!   event payloads.
//! - [`entities`]: `Product`, `ProductUrl`, `ProductImage`,
//!   `ResolvedAnnouncement`, `PingEvent`.
//! - [`events`]: the closed `FsbEvent` set and its `EventType` tags.
//! - [`protocol`]: compatibility date and library identification.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: the epoch anchor lives here and nowhere else.
//!   Verifier and parser both decode through [`epoch::parse_epoch_offset`].
//! - **No raw flag integers past the parser**: entities expose flags only as
//!   `Bitfield` values.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod bitfield;
pub mod entities;
pub mod epoch;
pub mod errors;
pub mod events;
pub mod flags;
pub mod protocol;

pub use bitfield::{Bitfield, Flag};
pub use entities::{PingEvent, Product, ProductImage, ProductUrl, ResolvedAnnouncement};
pub use epoch::{epoch_anchor, parse_epoch_offset, parse_epoch_value, to_epoch_offset};
pub use errors::BitfieldError;
pub use events::{EventType, FsbEvent, EVENT_TYPE_PREFIX};
pub use flags::{ProductFlag, ProductImageFlag, ProductUrlFlag};
pub use protocol::{client_version, COMPATIBILITY_DATE};

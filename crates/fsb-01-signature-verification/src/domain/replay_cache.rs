//! # Replay Cache
//!
//! Remembers message ids until their expiry so a captured delivery cannot be
//! accepted twice.
//!
//! ## Design
//!
//! - A map from id to expiry answers membership in O(1).
//! - A min-heap ordered by expiry drives eviction. Every access first pops
//!   the expired head of the heap, so memory stays bounded by the ids seen
//!   within one retention period.
//! - Re-registering an id moves its expiry forward; the stale heap entry is
//!   skipped when it surfaces.
//!
//! Times are Unix milliseconds supplied by the caller, which keeps the cache
//! free of any clock.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

#[derive(Debug, Default)]
pub struct ReplayCache {
    /// Message id -> expiry (Unix millis).
    entries: HashMap<String, i64>,

    /// Expiry queue, earliest first.
    expiries: BinaryHeap<Reverse<(i64, String)>>,
}

impl ReplayCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `message_id` is remembered at `now`.
    pub fn contains(&mut self, message_id: &str, now: i64) -> bool {
        self.sweep(now);
        self.entries.contains_key(message_id)
    }

    /// Remember `message_id` until `expires_at`.
    pub fn register(&mut self, message_id: &str, now: i64, expires_at: i64) {
        self.sweep(now);
        self.entries.insert(message_id.to_string(), expires_at);
        self.expiries
            .push(Reverse((expires_at, message_id.to_string())));
    }

    /// Forget every id whose expiry is at or before `now`.
    ///
    /// Returns the number of ids forgotten.
    pub fn sweep(&mut self, now: i64) -> usize {
        let mut evicted = 0;
        while let Some(Reverse((expires_at, _))) = self.expiries.peek() {
            if *expires_at > now {
                break;
            }
            let Some(Reverse((expires_at, message_id))) = self.expiries.pop() else {
                break;
            };
            // Only the newest registration of an id may evict it.
            if self.entries.get(&message_id) == Some(&expires_at) {
                self.entries.remove(&message_id);
                evicted += 1;
            }
        }
        evicted
    }

    /// Number of remembered ids, including expired ones not yet swept.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

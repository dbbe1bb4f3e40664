// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch point tracker: identifier → target for the lifetime of a gesture.
//!
//! A record is created when a contact is pressed, read while it moves or stays
//! stationary, and consumed when it is released or cancelled. Targets are never
//! re-resolved after the press: touches capture implicitly to where they started.
//!
//! ```
//! use understory_touch::tracker::TouchPointTracker;
//!
//! let mut t: TouchPointTracker<u32> = TouchPointTracker::new();
//! t.record_press(1, 10, None);
//! assert_eq!(t.target(1), Some(&10));
//! assert_eq!(t.consume(1).map(|r| r.target), Some(10));
//! assert!(t.is_empty());
//! ```

use alloc::collections::BTreeMap;

use crate::types::{RegionTag, TouchId};

/// What the tracker remembers about one pressed contact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TouchRecord<N> {
    /// Target resolved at press time.
    pub target: N,
    /// Region tag resolved at press time.
    pub region: Option<RegionTag>,
}

/// Identifier → record map for the active gesture.
#[derive(Clone, Debug)]
pub struct TouchPointTracker<N> {
    records: BTreeMap<TouchId, TouchRecord<N>>,
}

impl<N> Default for TouchPointTracker<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> TouchPointTracker<N> {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
        }
    }

    /// Record the target of a pressed contact.
    ///
    /// A press for an identifier that is already down replaces the old record.
    /// Platforms do not always deliver well-formed sequences, so this is
    /// tolerated and only logged.
    pub fn record_press(&mut self, id: TouchId, target: N, region: Option<RegionTag>) {
        if self
            .records
            .insert(id, TouchRecord { target, region })
            .is_some()
        {
            tracing::warn!(id, "press for a contact that is already down; replacing its target");
        }
    }

    /// Target recorded for `id`, without re-resolving.
    pub fn target(&self, id: TouchId) -> Option<&N> {
        self.records.get(&id).map(|r| &r.target)
    }

    /// Full record for `id`.
    pub fn record(&self, id: TouchId) -> Option<&TouchRecord<N>> {
        self.records.get(&id)
    }

    /// Remove and return the record for `id`.
    pub fn consume(&mut self, id: TouchId) -> Option<TouchRecord<N>> {
        self.records.remove(&id)
    }

    /// Forget every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Number of recorded contacts.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no contact is recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch-action resolution and gesture-wide accumulation.
//!
//! ## Effective action of one target
//!
//! [`effective_touch_action`] walks from the target towards the outermost document root,
//! crossing from a child document's root into its host frame element. Every node whose
//! box supports the property narrows the result. Once the walk has passed a box that
//! scrolls its overflow (or a document root), panning is handled by that scroller, so
//! ancestors further out can no longer disable the pan bits. The walk stops early once
//! nothing is allowed.
//!
//! ## Gesture-wide value
//!
//! [`TouchActionAccumulator`] intersects the effective action of every pressed target.
//! Bits only ever get cleared until the gesture ends and the value returns to
//! [`TouchAction::AUTO`].
//!
//! ```
//! use understory_touch::touch_action::TouchActionAccumulator;
//! use understory_touch::types::TouchAction;
//!
//! let mut acc = TouchActionAccumulator::new();
//! assert_eq!(acc.combine(TouchAction::PAN_Y), Some(TouchAction::PAN_Y));
//! // Already at most PAN_Y: no change to report.
//! assert_eq!(acc.combine(TouchAction::AUTO), None);
//! assert_eq!(acc.combine(TouchAction::PAN_X), Some(TouchAction::empty()));
//! acc.reset();
//! assert_eq!(acc.value(), TouchAction::AUTO);
//! ```

use crate::types::{TouchAction, TouchContent};

/// Compute the effective touch-action of `node`.
pub fn effective_touch_action<C: TouchContent + ?Sized>(content: &C, node: C::Node) -> TouchAction {
    let mut effective = TouchAction::AUTO;
    let mut handled = TouchAction::empty();
    let mut current = Some(node);
    while let Some(n) = current {
        if let Some(action) = content.touch_action(&n) {
            effective &= action | handled;
            if effective.is_empty() {
                break;
            }
        }
        let doc = content.document_of(&n);
        let is_root = doc.is_some_and(|d| content.document_root(&d) == Some(n));
        if is_root || content.scrolls_overflow(&n) {
            handled |= TouchAction::PAN;
        }
        current = content
            .parent(&n)
            .or_else(|| doc.and_then(|d| content.host_of(&d)));
    }
    effective
}

/// Gesture-wide touch-action value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TouchActionAccumulator {
    value: TouchAction,
}

impl Default for TouchActionAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl TouchActionAccumulator {
    /// Start unrestricted.
    pub const fn new() -> Self {
        Self {
            value: TouchAction::AUTO,
        }
    }

    /// Current gesture-wide value.
    pub const fn value(&self) -> TouchAction {
        self.value
    }

    /// Intersect `action` into the value; returns the new value if it changed.
    pub fn combine(&mut self, action: TouchAction) -> Option<TouchAction> {
        let next = self.value & action;
        if next == self.value {
            return None;
        }
        self.value = next;
        Some(next)
    }

    /// Return to [`TouchAction::AUTO`].
    pub fn reset(&mut self) {
        self.value = TouchAction::AUTO;
    }
}

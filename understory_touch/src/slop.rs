// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Move suppression within the slop region.
//!
//! A tap whose touch start nobody handled usually wiggles a few pixels before lifting.
//! While the platform reports those moves as inside the slop region, dispatching them is
//! pointless, so the router consumes them and reports
//! [`DispatchOutcome::HandledSuppressed`](crate::types::DispatchOutcome::HandledSuppressed).
//!
//! ## Transitions
//!
//! - `Idle → Suppressing`: a batch of only pressed points dispatched as not handled.
//! - `Suppressing`: single-contact move batches without the slop flag are suppressed.
//! - `Suppressing → Idle`: a move flagged as beyond the slop region, any released or
//!   cancelled point, or any batch with more than one contact.
//! - Gesture end and aborts return to `Idle`.
//!
//! ```
//! use kurbo::Point;
//! use understory_touch::slop::{SlopState, SlopSuppressor};
//! use understory_touch::types::{DispatchOutcome, TouchBatch, TouchPoint, TouchState};
//!
//! let mut slop = SlopSuppressor::new(true);
//! slop.after_dispatch(true, DispatchOutcome::NotHandled);
//! assert_eq!(slop.state(), SlopState::Suppressing);
//!
//! let wiggle: TouchBatch<u32> = TouchBatch::new([TouchPoint::new(1, TouchState::Moved, Point::ZERO)]);
//! assert!(slop.suppresses(&wiggle));
//!
//! let drag = wiggle.with_moved_beyond_slop_region(true);
//! assert!(!slop.suppresses(&drag));
//! assert_eq!(slop.state(), SlopState::Idle);
//! ```

use crate::types::{DispatchOutcome, TouchBatch};

/// State of the [`SlopSuppressor`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SlopState {
    /// Moves are dispatched.
    #[default]
    Idle,
    /// Moves within the slop region are consumed.
    Suppressing,
}

/// Two-state machine deciding whether a move batch is dispatched.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SlopSuppressor {
    state: SlopState,
    enabled: bool,
}

impl Default for SlopSuppressor {
    fn default() -> Self {
        Self::new(true)
    }
}

impl SlopSuppressor {
    /// Create an idle suppressor; a disabled one never suppresses.
    pub const fn new(enabled: bool) -> Self {
        Self {
            state: SlopState::Idle,
            enabled,
        }
    }

    /// Current state.
    pub const fn state(&self) -> SlopState {
        self.state
    }

    /// Returns true if suppression is enabled.
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable suppression; disabling also returns to idle.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.state = SlopState::Idle;
        }
    }

    /// Decide whether `batch` is consumed without dispatch, updating the state.
    pub fn suppresses<N>(&mut self, batch: &TouchBatch<N>) -> bool {
        if self.state == SlopState::Idle {
            return false;
        }
        if batch.points.len() > 1 || batch.any_ended() {
            self.state = SlopState::Idle;
            return false;
        }
        if !batch.is_move() {
            return false;
        }
        if batch.moved_beyond_slop_region {
            self.state = SlopState::Idle;
            return false;
        }
        true
    }

    /// Feed the merged outcome of a dispatched batch.
    pub fn after_dispatch(&mut self, sequence_start: bool, outcome: DispatchOutcome) {
        if self.enabled && sequence_start && outcome == DispatchOutcome::NotHandled {
            self.state = SlopState::Suppressing;
        }
    }

    /// Return to idle.
    pub fn reset(&mut self) {
        self.state = SlopState::Idle;
    }
}

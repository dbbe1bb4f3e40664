// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Router implementation.
//!
//! ## Overview
//!
//! [`TouchRouter`] owns all state that outlives a batch: the touch point tracker, the
//! sequence document, the pressed flag, the gesture-wide touch-action, and the slop
//! suppressor. Each call to [`TouchRouter::handle_batch`] runs one batch to completion:
//!
//! 1. Pressed points are retargeted; the first resolved target fixes the sequence document.
//! 2. Each newly pressed target narrows the gesture touch-action.
//! 3. Every point is resolved to a [`Touch`]; released and cancelled points consume their
//!    record. Targets outside the sequence document are reported as its root and never
//!    dispatched.
//! 4. Moves inside the slop region may be suppressed.
//! 5. Events are grouped and dispatched in [`DISPATCH_ORDER`](crate::types::DISPATCH_ORDER).
//! 6. When no contact is left down, the sequence is torn down.
//!
//! ## Aborts
//!
//! If the sequence document loses its view (before or during dispatch), the batch reports
//! [`DispatchOutcome::NotHandled`], every piece of gesture state is cleared, and the reason
//! is returned in [`BatchResult::aborted`].
//!
//! ## Preconditions
//!
//! Hit testing reads whatever layout the host exposes; bring layout up to date before
//! routing a batch.

use alloc::vec::Vec;

use crate::dispatch::{EventFlags, GroupedTouch, TouchGroups, dispatch_groups};
use crate::error::RouteError;
use crate::retarget::resolve_pressed;
use crate::slop::{SlopState, SlopSuppressor};
use crate::touch_action::{TouchActionAccumulator, effective_touch_action};
use crate::tracker::TouchPointTracker;
use crate::types::{
    BatchResult, DispatchOutcome, HitTestRequest, Touch, TouchAction, TouchBatch, TouchContent,
    TouchEventSink, TouchState,
};

/// Router configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TouchRouterConfig {
    /// Options for the independent hit test of pressed points.
    pub hit_test: HitTestRequest,
    /// Consume moves within the slop region after an unhandled touch start.
    pub suppress_moves_within_slop: bool,
}

impl Default for TouchRouterConfig {
    fn default() -> Self {
        Self {
            hit_test: HitTestRequest::default(),
            suppress_moves_within_slop: true,
        }
    }
}

/// Touch routing context for one input source.
///
/// ## Usage
///
/// - Construct with [`TouchRouter::new`] or [`TouchRouter::with_config`].
/// - Optionally adjust [`TouchRouter::set_hit_test_request`] and
///   [`TouchRouter::set_slop_suppression`].
/// - Call [`TouchRouter::handle_batch`] once per platform batch with a host implementing
///   [`TouchContent`] and [`TouchEventSink`].
/// - Call [`TouchRouter::reset`] when the input source is lost.
///
/// Routers are independent: several may route different input sources over the same host.
#[derive(Clone, Debug)]
pub struct TouchRouter<N, D> {
    config: TouchRouterConfig,
    tracker: TouchPointTracker<N>,
    sequence: Option<D>,
    touch_pressed: bool,
    touch_action: TouchActionAccumulator,
    slop: SlopSuppressor,
}

impl<N, D> Default for TouchRouter<N, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, D> TouchRouter<N, D> {
    /// Create a router with the default configuration.
    pub fn new() -> Self {
        Self::with_config(TouchRouterConfig::default())
    }

    /// Create a router with an explicit configuration.
    pub fn with_config(config: TouchRouterConfig) -> Self {
        Self {
            config,
            tracker: TouchPointTracker::new(),
            sequence: None,
            touch_pressed: false,
            touch_action: TouchActionAccumulator::new(),
            slop: SlopSuppressor::new(config.suppress_moves_within_slop),
        }
    }

    /// Current configuration.
    pub fn config(&self) -> TouchRouterConfig {
        self.config
    }

    /// Set the options used when hit testing pressed points.
    pub fn set_hit_test_request(&mut self, request: HitTestRequest) {
        self.config.hit_test = request;
    }

    /// Enable or disable move suppression within the slop region.
    pub fn set_slop_suppression(&mut self, enabled: bool) {
        self.config.suppress_moves_within_slop = enabled;
        self.slop.set_enabled(enabled);
    }

    /// Returns true while a touch sequence is active.
    pub fn is_active(&self) -> bool {
        self.sequence.is_some()
    }

    /// Returns true if some contact was still down after the last batch.
    pub fn is_touch_pressed(&self) -> bool {
        self.touch_pressed
    }

    /// Gesture-wide touch-action.
    pub fn touch_action(&self) -> TouchAction {
        self.touch_action.value()
    }

    /// Document owning every target of the active sequence.
    pub fn sequence_document(&self) -> Option<&D> {
        self.sequence.as_ref()
    }

    /// Per-contact records of the active sequence.
    pub fn tracker(&self) -> &TouchPointTracker<N> {
        &self.tracker
    }

    /// Current slop suppression state.
    pub fn slop_state(&self) -> SlopState {
        self.slop.state()
    }

    /// Abort the active sequence and clear all gesture state.
    ///
    /// The touch-action returns to [`TouchAction::AUTO`] without being reported.
    pub fn reset(&mut self) {
        self.tracker.clear();
        self.sequence = None;
        self.touch_pressed = false;
        self.touch_action.reset();
        self.slop.reset();
    }
}

impl<N: Copy + Eq + core::fmt::Debug, D: Copy + Eq + core::fmt::Debug> TouchRouter<N, D> {
    /// Route one batch and return the merged outcome.
    pub fn handle_batch<H>(&mut self, host: &mut H, batch: &TouchBatch<N>) -> BatchResult
    where
        H: TouchContent<Node = N, Document = D> + TouchEventSink<N>,
    {
        if batch.points.is_empty() {
            return BatchResult {
                outcome: DispatchOutcome::NotHandled,
                touch_active: self.touch_pressed,
                aborted: None,
            };
        }
        match self.route(host, batch) {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!(%err, "aborting touch sequence");
                self.reset();
                BatchResult {
                    outcome: DispatchOutcome::NotHandled,
                    touch_active: false,
                    aborted: Some(err),
                }
            }
        }
    }

    fn route<H>(&mut self, host: &mut H, batch: &TouchBatch<N>) -> Result<BatchResult, RouteError>
    where
        H: TouchContent<Node = N, Document = D> + TouchEventSink<N>,
    {
        let sequence_start = batch.is_sequence_start();
        if sequence_start && self.sequence.is_some() {
            tracing::warn!("new touch sequence while one is active; discarding the stale one");
            self.reset();
        }
        if let Some(doc) = self.sequence
            && !host.has_view(&doc)
        {
            return Err(RouteError::SequenceViewGone);
        }

        self.retarget_pressed(host, batch);
        self.touch_pressed = !batch.all_ended();

        let Some(sequence) = self.sequence else {
            if !self.touch_pressed {
                self.end_sequence();
            }
            return Ok(self.result(DispatchOutcome::NotHandled));
        };

        let resolved = self.resolve_points(host, sequence, batch)?;

        if !host.has_touch_handlers(&sequence) {
            if !self.touch_pressed {
                self.end_sequence();
            }
            return Ok(self.result(DispatchOutcome::NotHandled));
        }

        if self.slop.suppresses(batch) {
            return Ok(self.result(DispatchOutcome::HandledSuppressed));
        }

        let groups = TouchGroups::build(resolved);
        let flags = EventFlags {
            cancelable: batch.cancelable,
            moved_beyond_slop_region: batch.moved_beyond_slop_region,
            observe: batch.touch_start_or_first_move && batch.points.len() == 1,
        };
        let outcome = dispatch_groups(host, sequence, &groups, flags)?;

        if !self.touch_pressed {
            self.end_sequence();
        }
        self.slop.after_dispatch(sequence_start, outcome);
        Ok(self.result(outcome))
    }

    fn retarget_pressed<H>(&mut self, host: &mut H, batch: &TouchBatch<N>)
    where
        H: TouchContent<Node = N, Document = D> + TouchEventSink<N>,
    {
        let pressed = batch
            .points
            .iter()
            .filter(|p| p.point.state == TouchState::Pressed);
        for p in pressed {
            // A re-pressed id that resolves to nothing must not keep its old target.
            let Some((target, doc)) =
                resolve_pressed(&*host, self.sequence, p, self.config.hit_test)
                    .and_then(|t| host.document_of(&t.node).map(|doc| (t, doc)))
            else {
                tracing::debug!(id = p.point.id, "pressed point has no target");
                let _ = self.tracker.consume(p.point.id);
                continue;
            };
            if self.sequence.is_none() {
                tracing::debug!(?doc, "touch sequence started");
                self.sequence = Some(doc);
            }
            let action = effective_touch_action(&*host, target.node);
            self.tracker.record_press(p.point.id, target.node, target.region);
            if let Some(changed) = self.touch_action.combine(action) {
                host.touch_action_changed(changed);
            }
        }
    }

    fn resolve_points<H>(
        &mut self,
        host: &H,
        sequence: D,
        batch: &TouchBatch<N>,
    ) -> Result<Vec<GroupedTouch<N>>, RouteError>
    where
        H: TouchContent<Node = N, Document = D>,
    {
        let zoom = host.page_zoom(&sequence);
        let scale = if zoom.is_finite() && zoom > 0.0 {
            1.0 / zoom
        } else {
            1.0
        };
        let mut out = Vec::with_capacity(batch.points.len());
        for p in &batch.points {
            let point = &p.point;
            let record = if point.state.is_ended() {
                self.tracker.consume(point.id)
            } else {
                self.tracker.record(point.id).cloned()
            };
            let known = record
                .filter(|r| host.document_of(&r.target) == Some(sequence))
                .map(|r| (r.target, r.region));
            let known_target = known.is_some();
            let (target, region) = match known {
                Some(k) => k,
                None => (
                    host.document_root(&sequence)
                        .ok_or(RouteError::SequenceDocumentGone)?,
                    None,
                ),
            };
            out.push(GroupedTouch {
                state: point.state,
                known_target,
                touch: Touch {
                    id: point.id,
                    target,
                    region,
                    screen_position: point.screen_position,
                    content_position: host.to_contents(&sequence, point.position),
                    radius: point.radius * scale,
                    rotation: point.rotation,
                    force: point.force,
                    pointer: point.pointer,
                },
            });
        }
        Ok(out)
    }

    fn end_sequence(&mut self) {
        if let Some(doc) = self.sequence {
            tracing::debug!(?doc, "touch sequence ended");
        }
        self.reset();
    }

    fn result(&self, outcome: DispatchOutcome) -> BatchResult {
        BatchResult {
            outcome,
            touch_active: self.touch_pressed,
            aborted: None,
        }
    }
}

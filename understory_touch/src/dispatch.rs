// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event grouping and dispatch.
//!
//! ## Grouping
//!
//! [`TouchGroups::build`] turns the resolved points of one batch into the three views
//! listeners see:
//!
//! - `touches`: every point still down after the batch (never released or cancelled ones).
//! - `target_touches`: the same points split by target. Every target with a changed point
//!   gets a list, possibly empty, so a target losing its last contact still sees one.
//! - changed touches: one [`ChangedTouches`] bucket per state with the distinct targets in
//!   first-seen order. Stationary points and points with an unknown target never enter a
//!   bucket, but unknown-target points still count in `touches`.
//!
//! ## Dispatch
//!
//! [`dispatch_groups`] walks the buckets in [`DISPATCH_ORDER`] and emits exactly one event
//! per (bucket, target) pair. The sequence document's view is checked before every event;
//! if a listener tore it down, the remaining events are dropped and the batch aborts.

use alloc::vec::Vec;

use crate::error::RouteError;
use crate::types::{
    DISPATCH_ORDER, DispatchOutcome, PointerKind, TOUCH_STATE_COUNT, Touch, TouchContent,
    TouchEvent, TouchEventKind, TouchEventSink, TouchState,
};

/// A touch with its batch state, ready for grouping.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupedTouch<N> {
    /// State of the contact in this batch.
    pub state: TouchState,
    /// False when the contact's target was not resolved inside the sequence document.
    pub known_target: bool,
    /// The touch as listeners will see it.
    pub touch: Touch<N>,
}

/// Changed-touches bucket for one state.
#[derive(Clone, Debug, PartialEq)]
pub struct ChangedTouches<N> {
    /// Points that changed to this state, in batch order.
    pub touches: Vec<Touch<N>>,
    /// Distinct targets among `touches`, first-seen order.
    pub targets: Vec<N>,
    /// Device of the last inserted point.
    pub pointer: PointerKind,
}

impl<N> Default for ChangedTouches<N> {
    fn default() -> Self {
        Self {
            touches: Vec::new(),
            targets: Vec::new(),
            pointer: PointerKind::default(),
        }
    }
}

/// All per-batch views of the resolved points.
#[derive(Clone, Debug)]
pub struct TouchGroups<N> {
    touches: Vec<Touch<N>>,
    target_touches: Vec<(N, Vec<Touch<N>>)>,
    changed: [ChangedTouches<N>; TOUCH_STATE_COUNT],
}

impl<N: Copy + Eq> TouchGroups<N> {
    /// Group the resolved points of one batch.
    pub fn build(points: impl IntoIterator<Item = GroupedTouch<N>>) -> Self {
        let mut groups = Self {
            touches: Vec::new(),
            target_touches: Vec::new(),
            changed: core::array::from_fn(|_| ChangedTouches::default()),
        };
        for GroupedTouch {
            state,
            known_target,
            touch,
        } in points
        {
            let target = touch.target;
            let list = groups.list_for(target);
            if !state.is_ended() {
                list.push(touch.clone());
                groups.touches.push(touch.clone());
            }
            if state == TouchState::Stationary || !known_target {
                continue;
            }
            let bucket = &mut groups.changed[state.bucket()];
            bucket.pointer = touch.pointer;
            if !bucket.targets.contains(&target) {
                bucket.targets.push(target);
            }
            bucket.touches.push(touch);
        }
        groups
    }

    /// Points still down after the batch.
    pub fn touches(&self) -> &[Touch<N>] {
        &self.touches
    }

    /// Points still down that target `target`; empty for targets without a list.
    pub fn target_touches(&self, target: &N) -> &[Touch<N>] {
        self.target_touches
            .iter()
            .find(|(t, _)| t == target)
            .map(|(_, list)| list.as_slice())
            .unwrap_or_default()
    }

    /// Changed-touches bucket for `state`.
    pub fn changed(&self, state: TouchState) -> &ChangedTouches<N> {
        &self.changed[state.bucket()]
    }

    fn list_for(&mut self, target: N) -> &mut Vec<Touch<N>> {
        let idx = match self.target_touches.iter().position(|(t, _)| *t == target) {
            Some(i) => i,
            None => {
                self.target_touches.push((target, Vec::new()));
                self.target_touches.len() - 1
            }
        };
        &mut self.target_touches[idx].1
    }
}

/// Batch-wide flags copied onto every dispatched event.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EventFlags {
    /// Whether listeners may cancel the events.
    pub cancelable: bool,
    /// The platform reported movement beyond the slop region.
    pub moved_beyond_slop_region: bool,
    /// Report each outcome to [`TouchEventSink::observe_dispatch`].
    pub observe: bool,
}

/// Dispatch every (bucket, target) pair and merge the outcomes.
///
/// Returns [`RouteError::SequenceViewGone`] as soon as the sequence document loses its view;
/// events not yet delivered are dropped.
pub fn dispatch_groups<H>(
    host: &mut H,
    sequence: H::Document,
    groups: &TouchGroups<H::Node>,
    flags: EventFlags,
) -> Result<DispatchOutcome, RouteError>
where
    H: TouchContent + TouchEventSink<<H as TouchContent>::Node> + ?Sized,
{
    let mut merged = DispatchOutcome::NotHandled;
    for state in DISPATCH_ORDER {
        let Some(kind) = TouchEventKind::for_state(state) else {
            continue;
        };
        let bucket = groups.changed(state);
        for target in &bucket.targets {
            if !host.has_view(&sequence) {
                tracing::warn!(?kind, "sequence view torn down during dispatch");
                return Err(RouteError::SequenceViewGone);
            }
            let event = TouchEvent {
                kind,
                target: *target,
                touches: groups.touches(),
                target_touches: groups.target_touches(target),
                changed_touches: &bucket.touches,
                pointer: bucket.pointer,
                cancelable: flags.cancelable,
                moved_beyond_slop_region: flags.moved_beyond_slop_region,
            };
            tracing::trace!(
                ?kind,
                ?target,
                touches = event.touches.len(),
                changed = event.changed_touches.len(),
                "dispatching touch event"
            );
            let outcome = host.dispatch_touch_event(&event);
            if flags.observe {
                host.observe_dispatch(kind, outcome);
            }
            merged = merged.merge(outcome);
        }
    }
    Ok(merged)
}

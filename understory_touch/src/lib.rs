// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_touch --heading-base-level=0

//! Understory Touch: a deterministic, `no_std` router for multi-touch input.
//!
//! ## Overview
//!
//! This crate turns per-frame batches of hardware touch samples into touch events for
//! document content: one event per (state, target) pair, in a fixed order, with the
//! `touches`, `targetTouches`, and `changedTouches` views listeners expect.
//! It does not own a content model. Implement [`TouchContent`](crate::types::TouchContent)
//! for yours (or enable `document_adapter` for Understory Document) and
//! [`TouchEventSink`](crate::types::TouchEventSink) for your event dispatcher.
//!
//! ## Gesture state
//!
//! A [`TouchRouter`](crate::router::TouchRouter) holds everything that outlives one batch:
//!
//! - [`tracker`]: contact id → target captured at press time.
//! - The sequence document: fixed by the first resolved target; targets in any other
//!   document are never dispatched to.
//! - [`touch_action`]: the gesture-wide intersection of every pressed target's
//!   `touch-action`, pushed to the sink when it narrows.
//! - [`slop`]: suppression of moves within the slop region after an unhandled touch start.
//!
//! ## Per batch
//!
//! 1) Pressed points are resolved by [`retarget`] (pre-computed target, or a content-only hit
//!    test, refined by canvas regions and lifted off text nodes).
//! 2) [`dispatch`] groups every point and emits events in
//!    [`DISPATCH_ORDER`](crate::types::DISPATCH_ORDER): released, cancelled, pressed, moved.
//! 3) Outcomes merge so that any handled dispatch wins.
//! 4) When the last contact lifts, the sequence is torn down after dispatch.
//!
//! If the sequence document loses its view, the batch aborts: nothing more is dispatched,
//! all gesture state is cleared, and the result carries a [`RouteError`](crate::error::RouteError).
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_touch::router::TouchRouter;
//! use understory_touch::types::{
//!     DispatchOutcome, HitTestRequest, TouchBatch, TouchContent, TouchEvent, TouchEventSink,
//!     TouchPoint, TouchState,
//! };
//!
//! // One document (0) whose root (0) holds a button (1) on the left half.
//! struct Host {
//!     log: Vec<(u32, usize)>,
//! }
//!
//! impl TouchContent for Host {
//!     type Node = u32;
//!     type Document = u32;
//!     fn main_document(&self) -> u32 { 0 }
//!     fn document_of(&self, _: &u32) -> Option<u32> { Some(0) }
//!     fn document_root(&self, _: &u32) -> Option<u32> { Some(0) }
//!     fn has_view(&self, _: &u32) -> bool { true }
//!     fn hit_test(&self, _: &u32, p: Point, _: HitTestRequest) -> Option<u32> {
//!         Some(if p.x < 50.0 { 1 } else { 0 })
//!     }
//!     fn parent(&self, n: &u32) -> Option<u32> { (*n == 1).then_some(0) }
//! }
//!
//! impl TouchEventSink<u32> for Host {
//!     fn dispatch_touch_event(&mut self, e: &TouchEvent<'_, u32>) -> DispatchOutcome {
//!         self.log.push((e.target, e.touches.len()));
//!         DispatchOutcome::Handled
//!     }
//! }
//!
//! let mut host = Host { log: Vec::new() };
//! let mut router = TouchRouter::new();
//! let down = TouchBatch::new([TouchPoint::new(7, TouchState::Pressed, Point::new(10.0, 10.0))]);
//! let res = router.handle_batch(&mut host, &down);
//! assert_eq!(res.outcome, DispatchOutcome::Handled);
//! assert!(res.touch_active);
//!
//! let up = TouchBatch::new([TouchPoint::new(7, TouchState::Released, Point::new(90.0, 10.0))]);
//! let res = router.handle_batch(&mut host, &up);
//! assert!(!res.touch_active);
//! assert!(!router.is_active());
//! // The release still goes to the button the contact started on.
//! assert_eq!(host.log, [(1, 1), (1, 0)]);
//! ```
//!
//! ## Logging
//!
//! Diagnostics go through [`tracing`]: sequence start and end at `debug`, each dispatch at
//! `trace`, and duplicate presses, stale sequences, and aborts at `warn`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod dispatch;
pub mod error;
pub mod retarget;
pub mod router;
pub mod slop;
pub mod touch_action;
pub mod tracker;
pub mod types;

#[cfg(test)]
mod testing;

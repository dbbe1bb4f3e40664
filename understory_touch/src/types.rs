// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for touch routing: points, batches, touches, events, outcomes, and host seams.
//!
//! ## Overview
//!
//! These types describe the routing protocol and its inputs/outputs.
//! They are consumed by [`TouchRouter`](crate::router::TouchRouter) and implemented or
//! read by the host (the content model and the event-dispatch layer).

use alloc::string::String;
use alloc::vec::Vec;
use kurbo::{Point, Size};

/// Stable identifier of one hardware contact for the lifetime of a gesture.
pub type TouchId = u32;

/// Opaque sub-identifier of an addressable area inside a node (for example a canvas hit region).
pub type RegionTag = String;

/// State of a touch point within a batch.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TouchState {
    /// The contact lifted.
    Released,
    /// The contact went down in this batch.
    Pressed,
    /// The contact moved.
    Moved,
    /// The contact is down but did not change.
    Stationary,
    /// The platform cancelled the contact.
    Cancelled,
}

impl TouchState {
    /// Returns true for states that end a contact.
    pub const fn is_ended(self) -> bool {
        matches!(self, Self::Released | Self::Cancelled)
    }

    pub(crate) const fn bucket(self) -> usize {
        match self {
            Self::Released => 0,
            Self::Pressed => 1,
            Self::Moved => 2,
            Self::Stationary => 3,
            Self::Cancelled => 4,
        }
    }
}

/// Number of distinct [`TouchState`] values.
pub(crate) const TOUCH_STATE_COUNT: usize = 5;

/// Order in which changed-touches buckets are dispatched.
///
/// Stationary points never dispatch, so they are absent.
pub const DISPATCH_ORDER: [TouchState; 4] = [
    TouchState::Released,
    TouchState::Cancelled,
    TouchState::Pressed,
    TouchState::Moved,
];

/// Kind of device producing a contact.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum PointerKind {
    /// A finger.
    #[default]
    Touch,
    /// A stylus tip.
    Pen,
    /// A stylus eraser.
    Eraser,
    /// A mouse emulating touch.
    Mouse,
    /// Anything else.
    Unknown,
}

/// One hardware contact sample within a batch.
#[derive(Clone, Debug, PartialEq)]
pub struct TouchPoint {
    /// Stable contact identifier.
    pub id: TouchId,
    /// Change state of the contact in this batch.
    pub state: TouchState,
    /// Position in root-frame coordinates.
    pub position: Point,
    /// Position in screen coordinates.
    pub screen_position: Point,
    /// Contact radii (x, y) in root-frame units.
    pub radius: Size,
    /// Contact ellipse rotation in degrees.
    pub rotation: f32,
    /// Normalized pressure in `0.0..=1.0`, or `0.0` when unknown.
    pub force: f32,
    /// Device producing the contact.
    pub pointer: PointerKind,
}

impl TouchPoint {
    /// A finger contact at `position` (screen position equal to `position`, no radius or force).
    pub fn new(id: TouchId, state: TouchState, position: Point) -> Self {
        Self {
            id,
            state,
            position,
            screen_position: position,
            radius: Size::ZERO,
            rotation: 0.0,
            force: 0.0,
            pointer: PointerKind::Touch,
        }
    }
}

/// A resolved content target: a node plus an optional region tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedTarget<N> {
    /// Target node.
    pub node: N,
    /// Region inside the node, if the node exposes addressable sub-areas.
    pub region: Option<RegionTag>,
}

impl<N> ResolvedTarget<N> {
    /// A target without a region tag.
    pub fn node(node: N) -> Self {
        Self { node, region: None }
    }
}

/// A touch point plus the target a prior pointer-resolution pass found for it, if any.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchPoint<N> {
    /// The raw sample.
    pub point: TouchPoint,
    /// Pre-computed target; only consulted for pressed points.
    pub pointer_target: Option<ResolvedTarget<N>>,
}

impl<N> From<TouchPoint> for BatchPoint<N> {
    fn from(point: TouchPoint) -> Self {
        Self {
            point,
            pointer_target: None,
        }
    }
}

/// One frame's worth of touch samples from the platform.
#[derive(Clone, Debug, PartialEq)]
pub struct TouchBatch<N> {
    /// Samples in platform order.
    pub points: Vec<BatchPoint<N>>,
    /// Set by the platform once a move leaves the slop region around its start.
    pub moved_beyond_slop_region: bool,
    /// Whether listeners may cancel the resulting events.
    pub cancelable: bool,
    /// Set by the platform for touch-start batches and the first move of a sequence.
    pub touch_start_or_first_move: bool,
}

impl<N> TouchBatch<N> {
    /// A cancelable batch of points without pre-computed targets.
    pub fn new(points: impl IntoIterator<Item = TouchPoint>) -> Self {
        Self {
            points: points.into_iter().map(BatchPoint::from).collect(),
            moved_beyond_slop_region: false,
            cancelable: true,
            touch_start_or_first_move: false,
        }
    }

    /// Set the slop flag.
    pub fn with_moved_beyond_slop_region(mut self, moved: bool) -> Self {
        self.moved_beyond_slop_region = moved;
        self
    }

    /// Attach a pre-computed target to the point with identifier `id`.
    pub fn with_pointer_target(mut self, id: TouchId, target: ResolvedTarget<N>) -> Self {
        if let Some(p) = self.points.iter_mut().find(|p| p.point.id == id) {
            p.pointer_target = Some(target);
        }
        self
    }

    /// True iff the batch is non-empty and every point is pressed.
    pub fn is_sequence_start(&self) -> bool {
        !self.points.is_empty()
            && self
                .points
                .iter()
                .all(|p| p.point.state == TouchState::Pressed)
    }

    /// True iff every point is released or cancelled.
    pub fn all_ended(&self) -> bool {
        self.points.iter().all(|p| p.point.state.is_ended())
    }

    /// True iff some point is released or cancelled.
    pub fn any_ended(&self) -> bool {
        self.points.iter().any(|p| p.point.state.is_ended())
    }

    /// True iff some point moved and every other point is stationary.
    pub fn is_move(&self) -> bool {
        self.points
            .iter()
            .any(|p| p.point.state == TouchState::Moved)
            && self.points.iter().all(|p| {
                matches!(p.point.state, TouchState::Moved | TouchState::Stationary)
            })
    }
}

bitflags::bitflags! {
    /// Native gestures allowed to proceed alongside content handling.
    ///
    /// Mirrors the computed CSS `touch-action` value; the empty set is `none`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct TouchAction: u8 {
        /// Panning towards the left edge.
        const PAN_LEFT        = 0b0000_0001;
        /// Panning towards the right edge.
        const PAN_RIGHT       = 0b0000_0010;
        /// Panning towards the top edge.
        const PAN_UP          = 0b0000_0100;
        /// Panning towards the bottom edge.
        const PAN_DOWN        = 0b0000_1000;
        /// Pinch zooming.
        const PINCH_ZOOM      = 0b0001_0000;
        /// Double-tap zooming.
        const DOUBLE_TAP_ZOOM = 0b0010_0000;

        /// Horizontal panning.
        const PAN_X = Self::PAN_LEFT.bits() | Self::PAN_RIGHT.bits();
        /// Vertical panning.
        const PAN_Y = Self::PAN_UP.bits() | Self::PAN_DOWN.bits();
        /// Any panning.
        const PAN = Self::PAN_X.bits() | Self::PAN_Y.bits();
        /// Panning and pinch zooming.
        const MANIPULATION = Self::PAN.bits() | Self::PINCH_ZOOM.bits();
        /// Unrestricted.
        const AUTO = Self::MANIPULATION.bits() | Self::DOUBLE_TAP_ZOOM.bits();
    }
}

impl Default for TouchAction {
    fn default() -> Self {
        Self::AUTO
    }
}

/// Outcome of dispatching one event, or of a whole batch.
///
/// Ordered so that merging is a maximum: any handled dispatch wins over not handled.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum DispatchOutcome {
    /// No listener consumed the event.
    #[default]
    NotHandled,
    /// The router consumed the batch without dispatching (moves within the slop region).
    HandledSuppressed,
    /// A listener consumed the event.
    Handled,
}

impl DispatchOutcome {
    /// Merge two outcomes; handled wins over not handled.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        self.max(other)
    }
}

/// Options for the independent hit test run for pressed points.
///
/// Hit tests are always restricted to document content (never UI chrome).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct HitTestRequest {
    /// Also consider nodes with `pointer-events: none`.
    pub allow_pointer_events_none: bool,
}

/// A canvas-style region found under a point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionHit<N> {
    /// Element registered to receive events for the region, if any.
    pub control: Option<N>,
    /// Region identifier.
    pub id: RegionTag,
}

/// A touch as reported to listeners.
#[derive(Clone, Debug, PartialEq)]
pub struct Touch<N> {
    /// Contact identifier.
    pub id: TouchId,
    /// Target the contact was first pressed on, or the sequence document's root when unknown.
    pub target: N,
    /// Region tag recorded at press time.
    pub region: Option<RegionTag>,
    /// Screen position.
    pub screen_position: Point,
    /// Position in the sequence document's contents coordinates, unzoomed.
    pub content_position: Point,
    /// Contact radii, unzoomed.
    pub radius: Size,
    /// Contact ellipse rotation in degrees.
    pub rotation: f32,
    /// Normalized pressure.
    pub force: f32,
    /// Device producing the contact.
    pub pointer: PointerKind,
}

/// Kind of a dispatched touch event.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TouchEventKind {
    /// `touchstart`.
    Start,
    /// `touchmove`.
    Move,
    /// `touchend`.
    End,
    /// `touchcancel`.
    Cancel,
}

impl TouchEventKind {
    /// Event kind for a changed-touches bucket; stationary points have none.
    pub const fn for_state(state: TouchState) -> Option<Self> {
        match state {
            TouchState::Pressed => Some(Self::Start),
            TouchState::Moved => Some(Self::Move),
            TouchState::Released => Some(Self::End),
            TouchState::Cancelled => Some(Self::Cancel),
            TouchState::Stationary => None,
        }
    }
}

/// One event delivered to one target.
#[derive(Clone, Debug)]
pub struct TouchEvent<'a, N> {
    /// Event kind.
    pub kind: TouchEventKind,
    /// Target node.
    pub target: N,
    /// Every contact still down after this batch.
    pub touches: &'a [Touch<N>],
    /// The subset of `touches` targeting `target`.
    pub target_touches: &'a [Touch<N>],
    /// Contacts that changed to this event's state in this batch.
    pub changed_touches: &'a [Touch<N>],
    /// Device of the last changed contact.
    pub pointer: PointerKind,
    /// Whether listeners may cancel the event.
    pub cancelable: bool,
    /// Copied from the batch.
    pub moved_beyond_slop_region: bool,
}

/// Result of routing one batch.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BatchResult {
    /// Merged outcome of every dispatch in the batch.
    pub outcome: DispatchOutcome,
    /// True iff some contact is still down after the batch.
    pub touch_active: bool,
    /// Set when the batch aborted the sequence.
    pub aborted: Option<crate::error::RouteError>,
}

/// Read access to the content model the router targets.
///
/// Node and document handles are expected to be cheap generational ids: a
/// removed node must make [`TouchContent::document_of`] return `None` rather
/// than alias another node.
pub trait TouchContent {
    /// Content node handle.
    type Node: Copy + Eq + core::fmt::Debug;
    /// Document handle.
    type Document: Copy + Eq + core::fmt::Debug;

    /// The top-level document input arrives in.
    fn main_document(&self) -> Self::Document;

    /// Document currently owning `node`, or `None` if the node is gone.
    fn document_of(&self, node: &Self::Node) -> Option<Self::Document>;

    /// Root node of `doc`, or `None` if the document is gone.
    fn document_root(&self, doc: &Self::Document) -> Option<Self::Node>;

    /// Returns true if `doc` is alive and has a usable view.
    fn has_view(&self, doc: &Self::Document) -> bool;

    /// Hit test `doc` at a root-frame position, restricted to content.
    fn hit_test(
        &self,
        doc: &Self::Document,
        position: Point,
        request: HitTestRequest,
    ) -> Option<Self::Node>;

    /// Flat-tree parent of `node` within its document.
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Returns true if any touch listeners are registered in `doc`.
    fn has_touch_handlers(&self, _doc: &Self::Document) -> bool {
        true
    }

    /// Region of a canvas-like node under a root-frame position.
    fn hit_region(&self, _node: &Self::Node, _position: Point) -> Option<RegionHit<Self::Node>> {
        None
    }

    /// Returns true for text nodes, which never receive touch events directly.
    fn is_text(&self, _node: &Self::Node) -> bool {
        false
    }

    /// Frame element hosting `doc`, if it is a child document.
    fn host_of(&self, _doc: &Self::Document) -> Option<Self::Node> {
        None
    }

    /// Computed `touch-action` of `node`, or `None` when its box does not support the property.
    fn touch_action(&self, _node: &Self::Node) -> Option<TouchAction> {
        None
    }

    /// Returns true if `node`'s box scrolls its overflow.
    fn scrolls_overflow(&self, _node: &Self::Node) -> bool {
        false
    }

    /// Convert a root-frame position to `doc`'s unzoomed contents coordinates.
    fn to_contents(&self, _doc: &Self::Document, position: Point) -> Point {
        position
    }

    /// Page zoom factor of `doc`.
    fn page_zoom(&self, _doc: &Self::Document) -> f64 {
        1.0
    }
}

/// Delivery of touch events and side-channel values to the outside world.
///
/// The router calls this with mutable access to the host, so a listener may
/// mutate content (including tearing down the view) between dispatches.
pub trait TouchEventSink<N> {
    /// Deliver one event to its target and report whether a listener handled it.
    fn dispatch_touch_event(&mut self, event: &TouchEvent<'_, N>) -> DispatchOutcome;

    /// The gesture-wide touch-action narrowed; forward it to the compositor.
    fn touch_action_changed(&mut self, _action: TouchAction) {}

    /// Pass-through telemetry for single-contact touch starts and first moves.
    fn observe_dispatch(&mut self, _kind: TouchEventKind, _outcome: DispatchOutcome) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(states: &[TouchState]) -> TouchBatch<u32> {
        TouchBatch::new(
            (0_u32..)
                .zip(states)
                .map(|(i, s)| TouchPoint::new(i, *s, Point::ZERO)),
        )
    }

    #[test]
    fn outcome_merge_handled_wins() {
        use DispatchOutcome::*;
        assert_eq!(NotHandled.merge(Handled), Handled);
        assert_eq!(Handled.merge(NotHandled), Handled);
        assert_eq!(NotHandled.merge(HandledSuppressed), HandledSuppressed);
        assert_eq!(HandledSuppressed.merge(Handled), Handled);
        assert_eq!(NotHandled.merge(NotHandled), NotHandled);
    }

    #[test]
    fn batch_classification() {
        use TouchState::*;
        assert!(batch(&[Pressed, Pressed]).is_sequence_start());
        assert!(!batch(&[Pressed, Stationary]).is_sequence_start());
        assert!(!batch(&[]).is_sequence_start());

        assert!(batch(&[Moved, Stationary]).is_move());
        assert!(!batch(&[Stationary]).is_move());
        assert!(!batch(&[Moved, Released]).is_move());

        assert!(batch(&[Released, Cancelled]).all_ended());
        assert!(!batch(&[Released, Pressed]).all_ended());
        assert!(batch(&[Released, Pressed]).any_ended());
    }

    #[test]
    fn dispatch_order_is_release_cancel_press_move() {
        assert_eq!(
            DISPATCH_ORDER,
            [
                TouchState::Released,
                TouchState::Cancelled,
                TouchState::Pressed,
                TouchState::Moved
            ]
        );
        assert!(
            DISPATCH_ORDER
                .iter()
                .all(|s| TouchEventKind::for_state(*s).is_some())
        );
        assert_eq!(TouchEventKind::for_state(TouchState::Stationary), None);
    }

    #[test]
    fn pointer_target_attaches_to_matching_point() {
        let b = batch(&[TouchState::Pressed, TouchState::Pressed])
            .with_pointer_target(1, ResolvedTarget::node(7));
        assert_eq!(b.points[0].pointer_target, None);
        assert_eq!(b.points[1].pointer_target, Some(ResolvedTarget::node(7)));
    }
}

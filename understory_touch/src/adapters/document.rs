// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter for Understory Document.
//!
//! ## Feature
//!
//! Enable with `document_adapter`.
//!
//! ## Notes
//!
//! [`Page`] implements [`TouchContent`] directly. Hit tests consider visible content nodes
//! only; nodes with `pointer-events: none` (not [`NodeFlags::PICKABLE`]) are skipped unless
//! the router's [`HitTestRequest`] allows them. Positions are mapped into contents
//! coordinates with [`Page::root_to_contents`].
//!
//! [`PageHost`] pairs a page with a listener closure so it can be handed to
//! [`TouchRouter::handle_batch`](crate::router::TouchRouter::handle_batch). The listener gets
//! mutable access to the page and may mutate it (including detaching views) between events.
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_document::{LocalNode, NodeKind, Page};
//! use understory_touch::adapters::document::PageHost;
//! use understory_touch::router::TouchRouter;
//! use understory_touch::types::{DispatchOutcome, TouchBatch, TouchPoint, TouchState};
//!
//! let mut page = Page::new();
//! let root = page.root(page.main_document()).unwrap();
//! page.set_local_bounds(root, Rect::new(0.0, 0.0, 200.0, 200.0));
//! let button = page.insert(root, NodeKind::Element, LocalNode {
//!     local_bounds: Rect::new(10.0, 10.0, 60.0, 60.0),
//!     ..Default::default()
//! });
//! let _ = page.commit();
//!
//! let mut host = PageHost::new(page, move |_page, event| {
//!     if event.target == button { DispatchOutcome::Handled } else { DispatchOutcome::NotHandled }
//! });
//! let mut router = TouchRouter::new();
//! let press = TouchBatch::new([TouchPoint::new(0, TouchState::Pressed, Point::new(20.0, 20.0))]);
//! assert_eq!(router.handle_batch(&mut host, &press).outcome, DispatchOutcome::Handled);
//! ```

use kurbo::Point;
use understory_document::{DocumentId, NodeFlags, NodeId, NodeKind, Page, QueryFilter};

use crate::types::{
    DispatchOutcome, HitTestRequest, RegionHit, TouchAction, TouchContent, TouchEvent,
    TouchEventSink,
};

fn convert(action: understory_document::TouchAction) -> TouchAction {
    TouchAction::from_bits_truncate(action.bits())
}

impl TouchContent for Page {
    type Node = NodeId;
    type Document = DocumentId;

    fn main_document(&self) -> DocumentId {
        Self::main_document(self)
    }

    fn document_of(&self, node: &NodeId) -> Option<DocumentId> {
        Self::document_of(self, *node)
    }

    fn document_root(&self, doc: &DocumentId) -> Option<NodeId> {
        self.root(*doc)
    }

    fn has_view(&self, doc: &DocumentId) -> bool {
        Self::has_view(self, *doc)
    }

    fn hit_test(&self, doc: &DocumentId, position: Point, request: HitTestRequest) -> Option<NodeId> {
        let filter = QueryFilter {
            visible_only: true,
            pickable_only: !request.allow_pointer_events_none,
            content_only: true,
        };
        self.hit_test_point(*doc, position, filter)
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        Self::parent(self, *node)
    }

    fn has_touch_handlers(&self, doc: &DocumentId) -> bool {
        Self::has_touch_handlers(self, *doc)
    }

    fn hit_region(&self, node: &NodeId, position: Point) -> Option<RegionHit<NodeId>> {
        let region = self.canvas_hit_region(*node, position)?;
        Some(RegionHit {
            control: region.control.filter(|c| self.is_alive(*c)),
            id: region.id.clone(),
        })
    }

    fn is_text(&self, node: &NodeId) -> bool {
        matches!(self.kind(*node), Some(NodeKind::Text))
    }

    fn host_of(&self, doc: &DocumentId) -> Option<NodeId> {
        Self::host_of(self, *doc)
    }

    fn touch_action(&self, node: &NodeId) -> Option<TouchAction> {
        self.local(*node)?.touch_action.map(convert)
    }

    fn scrolls_overflow(&self, node: &NodeId) -> bool {
        self.local(*node)
            .is_some_and(|l| l.flags.contains(NodeFlags::SCROLLER))
    }

    fn to_contents(&self, doc: &DocumentId, position: Point) -> Point {
        self.root_to_contents(*doc, position).unwrap_or(position)
    }

    fn page_zoom(&self, doc: &DocumentId) -> f64 {
        self.view(*doc).map_or(1.0, |v| v.page_zoom)
    }
}

/// A [`Page`] plus the listener that receives its touch events.
pub struct PageHost<F> {
    page: Page,
    listener: F,
    touch_action: TouchAction,
}

impl<F> core::fmt::Debug for PageHost<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PageHost")
            .field("page", &self.page)
            .field("touch_action", &self.touch_action)
            .finish_non_exhaustive()
    }
}

impl<F> PageHost<F>
where
    F: FnMut(&mut Page, &TouchEvent<'_, NodeId>) -> DispatchOutcome,
{
    /// Wrap `page` with a listener.
    pub fn new(page: Page, listener: F) -> Self {
        Self {
            page,
            listener,
            touch_action: TouchAction::AUTO,
        }
    }

    /// The wrapped page.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Mutable access to the wrapped page.
    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    /// Last touch-action reported by a router.
    pub fn touch_action(&self) -> TouchAction {
        self.touch_action
    }

    /// Unwrap the page.
    pub fn into_page(self) -> Page {
        self.page
    }
}

impl<F> TouchContent for PageHost<F> {
    type Node = NodeId;
    type Document = DocumentId;

    fn main_document(&self) -> DocumentId {
        self.page.main_document()
    }

    fn document_of(&self, node: &NodeId) -> Option<DocumentId> {
        self.page.document_of(*node)
    }

    fn document_root(&self, doc: &DocumentId) -> Option<NodeId> {
        self.page.root(*doc)
    }

    fn has_view(&self, doc: &DocumentId) -> bool {
        self.page.has_view(*doc)
    }

    fn hit_test(&self, doc: &DocumentId, position: Point, request: HitTestRequest) -> Option<NodeId> {
        TouchContent::hit_test(&self.page, doc, position, request)
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.page.parent(*node)
    }

    fn has_touch_handlers(&self, doc: &DocumentId) -> bool {
        self.page.has_touch_handlers(*doc)
    }

    fn hit_region(&self, node: &NodeId, position: Point) -> Option<RegionHit<NodeId>> {
        TouchContent::hit_region(&self.page, node, position)
    }

    fn is_text(&self, node: &NodeId) -> bool {
        TouchContent::is_text(&self.page, node)
    }

    fn host_of(&self, doc: &DocumentId) -> Option<NodeId> {
        self.page.host_of(*doc)
    }

    fn touch_action(&self, node: &NodeId) -> Option<TouchAction> {
        TouchContent::touch_action(&self.page, node)
    }

    fn scrolls_overflow(&self, node: &NodeId) -> bool {
        TouchContent::scrolls_overflow(&self.page, node)
    }

    fn to_contents(&self, doc: &DocumentId, position: Point) -> Point {
        TouchContent::to_contents(&self.page, doc, position)
    }

    fn page_zoom(&self, doc: &DocumentId) -> f64 {
        TouchContent::page_zoom(&self.page, doc)
    }
}

impl<F> TouchEventSink<NodeId> for PageHost<F>
where
    F: FnMut(&mut Page, &TouchEvent<'_, NodeId>) -> DispatchOutcome,
{
    fn dispatch_touch_event(&mut self, event: &TouchEvent<'_, NodeId>) -> DispatchOutcome {
        (self.listener)(&mut self.page, event)
    }

    fn touch_action_changed(&mut self, action: TouchAction) {
        self.touch_action = action;
    }
}

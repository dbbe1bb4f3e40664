// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A tiny in-memory host for unit tests.

use alloc::vec;
use alloc::vec::Vec;
use kurbo::{Point, Rect};

use crate::types::{
    DispatchOutcome, HitTestRequest, RegionHit, TouchAction, TouchContent, TouchEvent,
    TouchEventKind, TouchEventSink, TouchId,
};

#[derive(Clone, Debug)]
pub(crate) struct MockNode {
    pub(crate) doc: u32,
    pub(crate) rect: Rect,
    pub(crate) parent: Option<u32>,
    pub(crate) text: bool,
    pub(crate) removed: bool,
    pub(crate) pointer_events_none: bool,
    pub(crate) touch_action: Option<TouchAction>,
    pub(crate) scroller: bool,
    pub(crate) region: Option<RegionHit<u32>>,
}

#[derive(Clone, Debug)]
pub(crate) struct MockDoc {
    pub(crate) root: u32,
    pub(crate) host: Option<u32>,
    pub(crate) view: bool,
    pub(crate) removed: bool,
    pub(crate) handlers: bool,
    pub(crate) zoom: f64,
}

/// One recorded dispatch, flattened to identifiers.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Dispatched {
    pub(crate) kind: TouchEventKind,
    pub(crate) target: u32,
    pub(crate) touches: Vec<TouchId>,
    pub(crate) target_touches: Vec<TouchId>,
    pub(crate) changed: Vec<TouchId>,
}

#[derive(Debug)]
pub(crate) struct MockHost {
    pub(crate) nodes: Vec<MockNode>,
    pub(crate) docs: Vec<MockDoc>,
    /// Targets whose listeners handle events.
    pub(crate) handling: Vec<u32>,
    pub(crate) log: Vec<Dispatched>,
    pub(crate) touch_actions: Vec<TouchAction>,
    pub(crate) observed: Vec<(TouchEventKind, DispatchOutcome)>,
    /// Detach this document's view from inside the first dispatch.
    pub(crate) detach_during_dispatch: Option<u32>,
}

impl MockHost {
    /// Main document 0 with root node 0 covering `0..1000` in both axes.
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![MockNode::new(0, Rect::new(0.0, 0.0, 1000.0, 1000.0), None)],
            docs: vec![MockDoc {
                root: 0,
                host: None,
                view: true,
                removed: false,
                handlers: true,
                zoom: 1.0,
            }],
            handling: Vec::new(),
            log: Vec::new(),
            touch_actions: Vec::new(),
            observed: Vec::new(),
            detach_during_dispatch: None,
        }
    }

    /// Add an element under `parent`, drawn above everything added before it.
    pub(crate) fn add(&mut self, parent: u32, rect: Rect) -> u32 {
        let doc = self.nodes[parent as usize].doc;
        self.push(MockNode::new(doc, rect, Some(parent)))
    }

    pub(crate) fn add_text(&mut self, parent: u32, rect: Rect) -> u32 {
        let id = self.add(parent, rect);
        self.nodes[id as usize].text = true;
        id
    }

    /// Add a child document hosted by `host`, with a root covering the host's rect.
    pub(crate) fn add_doc(&mut self, host: u32) -> u32 {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Test hosts are tiny."
        )]
        let doc = self.docs.len() as u32;
        let rect = self.nodes[host as usize].rect;
        let root = self.push(MockNode::new(doc, rect, None));
        self.docs.push(MockDoc {
            root,
            host: Some(host),
            view: true,
            removed: false,
            handlers: true,
            zoom: 1.0,
        });
        doc
    }

    pub(crate) fn node_mut(&mut self, id: u32) -> &mut MockNode {
        &mut self.nodes[id as usize]
    }

    pub(crate) fn doc_mut(&mut self, id: u32) -> &mut MockDoc {
        &mut self.docs[id as usize]
    }

    fn push(&mut self, node: MockNode) -> u32 {
        self.nodes.push(node);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Test hosts are tiny."
        )]
        let id = (self.nodes.len() - 1) as u32;
        id
    }

    fn doc(&self, id: u32) -> Option<&MockDoc> {
        self.docs.get(id as usize).filter(|d| !d.removed)
    }

    fn node(&self, id: u32) -> Option<&MockNode> {
        self.nodes.get(id as usize).filter(|n| !n.removed)
    }

    fn within(&self, mut inner: u32, outer: u32) -> bool {
        loop {
            if inner == outer {
                return true;
            }
            let Some(d) = self.doc(inner).filter(|d| d.view) else {
                return false;
            };
            let Some(host_doc) = d.host.and_then(|h| self.node(h)).map(|n| n.doc) else {
                return false;
            };
            inner = host_doc;
        }
    }
}

impl MockNode {
    fn new(doc: u32, rect: Rect, parent: Option<u32>) -> Self {
        Self {
            doc,
            rect,
            parent,
            text: false,
            removed: false,
            pointer_events_none: false,
            touch_action: None,
            scroller: false,
            region: None,
        }
    }
}

impl TouchContent for MockHost {
    type Node = u32;
    type Document = u32;

    fn main_document(&self) -> u32 {
        0
    }

    fn document_of(&self, node: &u32) -> Option<u32> {
        self.node(*node).map(|n| n.doc)
    }

    fn document_root(&self, doc: &u32) -> Option<u32> {
        self.doc(*doc).map(|d| d.root)
    }

    fn has_view(&self, doc: &u32) -> bool {
        self.doc(*doc).is_some_and(|d| d.view)
    }

    fn hit_test(&self, doc: &u32, position: Point, request: HitTestRequest) -> Option<u32> {
        if !self.has_view(doc) {
            return None;
        }
        let (idx, _) = self.nodes.iter().enumerate().rev().find(|(_, n)| {
            !n.removed
                && n.rect.contains(position)
                && (request.allow_pointer_events_none || !n.pointer_events_none)
                && self.within(n.doc, *doc)
        })?;
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Test hosts are tiny."
        )]
        let id = idx as u32;
        Some(id)
    }

    fn parent(&self, node: &u32) -> Option<u32> {
        self.node(*node)?.parent
    }

    fn has_touch_handlers(&self, doc: &u32) -> bool {
        self.doc(*doc).is_some_and(|d| d.handlers)
    }

    fn hit_region(&self, node: &u32, _position: Point) -> Option<RegionHit<u32>> {
        self.node(*node)?.region.clone()
    }

    fn is_text(&self, node: &u32) -> bool {
        self.node(*node).is_some_and(|n| n.text)
    }

    fn host_of(&self, doc: &u32) -> Option<u32> {
        self.doc(*doc)?.host
    }

    fn touch_action(&self, node: &u32) -> Option<TouchAction> {
        self.node(*node)?.touch_action
    }

    fn scrolls_overflow(&self, node: &u32) -> bool {
        self.node(*node).is_some_and(|n| n.scroller)
    }

    fn page_zoom(&self, doc: &u32) -> f64 {
        self.doc(*doc).map_or(1.0, |d| d.zoom)
    }

    fn to_contents(&self, doc: &u32, position: Point) -> Point {
        let zoom = self.page_zoom(doc);
        Point::new(position.x / zoom, position.y / zoom)
    }
}

impl TouchEventSink<u32> for MockHost {
    fn dispatch_touch_event(&mut self, event: &TouchEvent<'_, u32>) -> DispatchOutcome {
        self.log.push(Dispatched {
            kind: event.kind,
            target: event.target,
            touches: event.touches.iter().map(|t| t.id).collect(),
            target_touches: event.target_touches.iter().map(|t| t.id).collect(),
            changed: event.changed_touches.iter().map(|t| t.id).collect(),
        });
        if let Some(doc) = self.detach_during_dispatch.take() {
            self.docs[doc as usize].view = false;
        }
        if self.handling.contains(&event.target) {
            DispatchOutcome::Handled
        } else {
            DispatchOutcome::NotHandled
        }
    }

    fn touch_action_changed(&mut self, action: TouchAction) {
        self.touch_actions.push(action);
    }

    fn observe_dispatch(&mut self, kind: TouchEventKind, outcome: DispatchOutcome) {
        self.observed.push((kind, outcome));
    }
}

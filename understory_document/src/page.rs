// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core page implementation: documents, node structure, updates, queries.

use alloc::vec::Vec;
use kurbo::{Affine, Point, Rect, RoundedRect};

use crate::types::{
    DocumentId, HitRegion, LocalNode, NodeFlags, NodeId, NodeKind, QueryFilter, TouchAction, View,
};

/// A batched set of changes derived from [`Page::commit`].
#[derive(Clone, Debug, Default)]
pub struct Damage {
    /// World-space rectangles that should be repainted.
    pub dirty_rects: Vec<Rect>,
}

impl Damage {
    /// Returns the union of all damage rects.
    pub fn union_rect(&self) -> Option<Rect> {
        let mut it = self.dirty_rects.iter().copied();
        let first = it.next()?;
        Some(it.fold(first, |acc, r| acc.union(r)))
    }
}

#[derive(Clone, Debug, Default)]
struct WorldNode {
    world_transform: Affine,
    // Clipped AABB of the transformed local bounds.
    world_bounds: Rect,
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    document: DocumentId,
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    local: LocalNode,
    world: WorldNode,
}

impl Node {
    fn new(generation: u32, document: DocumentId, kind: NodeKind, local: LocalNode) -> Self {
        Self {
            generation,
            document,
            kind,
            parent: None,
            children: Vec::new(),
            local,
            world: WorldNode::default(),
        }
    }
}

#[derive(Clone, Debug)]
struct Document {
    generation: u32,
    root: NodeId,
    host: Option<NodeId>,
    view: Option<View>,
    touch_handlers: bool,
}

/// A page: the main document plus any documents hosted by its frames.
///
/// Nodes of every document live in one generational arena, so a [`NodeId`]
/// can be resolved without knowing its document up front. Each node records
/// the document that currently owns it.
pub struct Page {
    nodes: Vec<Option<Node>>,
    generations: Vec<u32>, // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    documents: Vec<Option<Document>>,
    doc_generations: Vec<u32>,
    doc_free_list: Vec<usize>,
    main: DocumentId,
    epoch: u64,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Page {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let docs = self.documents.iter().filter(|d| d.is_some()).count();
        f.debug_struct("Page")
            .field("nodes_total", &self.nodes.len())
            .field("nodes_alive", &alive)
            .field("documents_alive", &docs)
            .field("main", &self.main)
            .field("epoch", &self.epoch)
            .finish_non_exhaustive()
    }
}

impl Page {
    /// Create a page with an empty main document.
    ///
    /// The main document starts with a view, touch handlers registered, and a
    /// root node with zero bounds; size it with [`Page::set_local_bounds`].
    pub fn new() -> Self {
        let mut page = Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            documents: Vec::new(),
            doc_generations: Vec::new(),
            doc_free_list: Vec::new(),
            main: DocumentId::new(0, 0),
            epoch: 0,
        };
        page.main = page.alloc_document(None, Rect::ZERO);
        page
    }

    /// The top-level document.
    pub fn main_document(&self) -> DocumentId {
        self.main
    }

    /// Root node of a document, if the document is alive.
    pub fn root(&self, doc: DocumentId) -> Option<NodeId> {
        self.document(doc).map(|d| d.root)
    }

    /// Insert a new node as the last child of `parent`, in the parent's document.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is stale.
    pub fn insert(&mut self, parent: NodeId, kind: NodeKind, local: LocalNode) -> NodeId {
        let document = self.node(parent).document;
        let id = self.alloc_node(document, kind, local);
        self.link_parent(id, parent);
        id
    }

    /// Remove a node (and its subtree) from the page.
    ///
    /// Documents hosted by removed frames are removed as well.
    /// Document roots are only removed through [`Page::remove_document`].
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) || matches!(self.node(id).kind, NodeKind::Document) {
            return;
        }
        self.remove_subtree(id);
    }

    /// Move `id` (and its subtree) under `new_parent`, adopting it into the new parent's document.
    ///
    /// Does nothing if either node is stale, if `id` is a document root, or if
    /// `new_parent` is inside `id`'s subtree.
    pub fn reparent(&mut self, id: NodeId, new_parent: NodeId) {
        if !self.is_alive(id) || !self.is_alive(new_parent) {
            return;
        }
        if matches!(self.node(id).kind, NodeKind::Document) {
            return;
        }
        let mut cur = Some(new_parent);
        while let Some(n) = cur {
            if n == id {
                return;
            }
            cur = self.node(n).parent;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        self.link_parent(id, new_parent);
        let document = self.node(new_parent).document;
        self.set_subtree_document(id, document);
    }

    /// Attach a new child document to a frame element.
    ///
    /// The document's root is sized to the frame's local bounds and placed at
    /// their origin. Returns `None` if `host` is stale, is not a frame, or
    /// already hosts a document.
    pub fn add_document(&mut self, host: NodeId) -> Option<DocumentId> {
        let n = self.node_opt(host)?;
        if !matches!(n.kind, NodeKind::Frame { content: None }) {
            return None;
        }
        let size = n.local.local_bounds.size();
        let origin = n.local.local_bounds.origin();
        let doc = self.alloc_document(Some(host), Rect::from_origin_size(Point::ZERO, size));
        if let Some(root) = self.root(doc) {
            self.set_local_transform(root, Affine::translate(origin.to_vec2()));
        }
        self.node_mut(host).kind = NodeKind::Frame { content: Some(doc) };
        Some(doc)
    }

    /// Remove a child document, its nodes, and any documents nested inside it.
    ///
    /// The main document cannot be removed.
    pub fn remove_document(&mut self, doc: DocumentId) {
        if doc == self.main {
            return;
        }
        let Some(d) = self.document(doc) else {
            return;
        };
        let (root, host) = (d.root, d.host);
        if let Some(host) = host
            && let Some(h) = self.node_opt_mut(host)
        {
            h.kind = NodeKind::Frame { content: None };
        }
        self.remove_subtree(root);
        self.documents[doc.idx()] = None;
        self.doc_free_list.push(doc.idx());
    }

    /// Tear down a document's view. Hit testing and routing treat the document as unusable.
    pub fn detach_view(&mut self, doc: DocumentId) {
        if let Some(d) = self.document_mut(doc) {
            d.view = None;
        }
    }

    /// Attach (or replace) a document's view.
    pub fn attach_view(&mut self, doc: DocumentId, view: View) {
        if let Some(d) = self.document_mut(doc) {
            d.view = Some(view);
        }
    }

    /// Returns the document's view, if it is alive and has one.
    pub fn view(&self, doc: DocumentId) -> Option<&View> {
        self.document(doc)?.view.as_ref()
    }

    /// Returns true if the document is alive and has a view.
    pub fn has_view(&self, doc: DocumentId) -> bool {
        self.view(doc).is_some()
    }

    /// Record whether any touch listeners are registered in the document.
    ///
    /// Documents start with listeners registered.
    pub fn set_touch_handlers(&mut self, doc: DocumentId, registered: bool) {
        if let Some(d) = self.document_mut(doc) {
            d.touch_handlers = registered;
        }
    }

    /// Returns true if touch listeners are registered in the document.
    pub fn has_touch_handlers(&self, doc: DocumentId) -> bool {
        self.document(doc).is_some_and(|d| d.touch_handlers)
    }

    /// Update local transform.
    pub fn set_local_transform(&mut self, id: NodeId, tf: Affine) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.local_transform = tf;
        }
    }

    /// Update local clip.
    pub fn set_local_clip(&mut self, id: NodeId, clip: Option<RoundedRect>) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.local_clip = clip;
        }
    }

    /// Update z index.
    pub fn set_z_index(&mut self, id: NodeId, z: i32) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.z_index = z;
        }
    }

    /// Update local bounds.
    pub fn set_local_bounds(&mut self, id: NodeId, bounds: Rect) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.local_bounds = bounds;
        }
    }

    /// Update node flags.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.flags = flags;
        }
    }

    /// Update the computed `touch-action` (`None` when the box does not support it).
    pub fn set_touch_action(&mut self, id: NodeId, action: Option<TouchAction>) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.touch_action = action;
        }
    }

    /// Replace a canvas' hit regions. Ignored for nodes that are not canvases.
    pub fn set_hit_regions(&mut self, canvas: NodeId, new_regions: Vec<HitRegion>) {
        if let Some(n) = self.node_opt_mut(canvas)
            && let NodeKind::Canvas { regions } = &mut n.kind
        {
            *regions = new_regions;
        }
    }

    /// Recompute world transforms and bounds for every document and return coarse damage.
    ///
    /// Hit testing reads committed world data only.
    pub fn commit(&mut self) -> Damage {
        self.epoch = self.epoch.wrapping_add(1);
        let mut damage = Damage::default();
        if let Some(root) = self.root(self.main) {
            self.update_world_recursive(root, Affine::IDENTITY, None, &mut damage);
        }
        damage
    }

    /// Returns the topmost node at a world-space point within `doc`.
    ///
    /// Nodes of documents nested in `doc` are candidates too, as long as every
    /// document between them and `doc` has a view. Returns `None` if `doc` has
    /// no view. If multiple nodes overlap with the same `z_index`, the newer
    /// [`NodeId`] wins.
    pub fn hit_test_point(&self, doc: DocumentId, pt: Point, filter: QueryFilter) -> Option<NodeId> {
        if !self.has_view(doc) {
            return None;
        }
        let mut best: Option<(NodeId, i32)> = None;
        for (i, slot) in self.nodes.iter().enumerate() {
            let Some(node) = slot.as_ref() else {
                continue;
            };
            if filter.visible_only && !node.local.flags.contains(NodeFlags::VISIBLE) {
                continue;
            }
            if filter.pickable_only && !node.local.flags.contains(NodeFlags::PICKABLE) {
                continue;
            }
            if filter.content_only && node.local.flags.contains(NodeFlags::CHROME) {
                continue;
            }
            if !node.world.world_bounds.contains(pt) {
                continue;
            }
            if let Some(clip) = node.local.local_clip {
                let local_pt = node.world.world_transform.inverse() * pt;
                if !clip.rect().contains(local_pt) {
                    continue;
                }
            }
            if !self.document_within(node.document, doc) {
                continue;
            }
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices."
            )]
            let id = NodeId::new(i as u32, node.generation);
            let z = node.local.z_index;
            match best {
                None => best = Some((id, z)),
                Some((best_id, z_best)) => {
                    if z > z_best || (z == z_best && id.is_newer_than(best_id)) {
                        best = Some((id, z));
                    }
                }
            }
        }
        best.map(|(node, _)| node)
    }

    /// Returns the hit region of a canvas under a world-space point.
    ///
    /// Later regions win where regions overlap.
    pub fn canvas_hit_region(&self, canvas: NodeId, pt: Point) -> Option<&HitRegion> {
        let node = self.node_opt(canvas)?;
        let NodeKind::Canvas { regions } = &node.kind else {
            return None;
        };
        let local = node.world.world_transform.inverse() * pt;
        let rel = local - node.local.local_bounds.origin().to_vec2();
        regions.iter().rev().find(|r| r.bounds.contains(rel))
    }

    /// Convert a world-space (root frame) point to `doc`'s contents coordinates.
    pub fn root_to_contents(&self, doc: DocumentId, pt: Point) -> Option<Point> {
        let d = self.document(doc)?;
        let view = d.view.as_ref()?;
        let root = self.node_opt(d.root)?;
        Some(view.frame_to_contents(root.world.world_transform.inverse() * pt))
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is considered live if its slot exists and its generation matches
    /// the current generation stored in that slot.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some()
    }

    /// Returns true if `doc` refers to a live document.
    pub fn is_document_alive(&self, doc: DocumentId) -> bool {
        self.document(doc).is_some()
    }

    /// Document currently owning a node.
    pub fn document_of(&self, id: NodeId) -> Option<DocumentId> {
        self.node_opt(id).map(|n| n.document)
    }

    /// Parent of a node within its document. Document roots have no parent.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id)?.parent
    }

    /// Frame element hosting a child document.
    pub fn host_of(&self, doc: DocumentId) -> Option<NodeId> {
        self.document(doc)?.host
    }

    /// What a node is.
    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.node_opt(id).map(|n| &n.kind)
    }

    /// Local geometry and style of a node.
    pub fn local(&self, id: NodeId) -> Option<&LocalNode> {
        self.node_opt(id).map(|n| &n.local)
    }

    /// Committed world-space bounds of a node.
    pub fn world_bounds(&self, id: NodeId) -> Option<Rect> {
        self.node_opt(id).map(|n| n.world.world_bounds)
    }

    // --- internals ---

    fn alloc_node(&mut self, document: DocumentId, kind: NodeKind, local: LocalNode) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, document, kind, local));
            (idx, generation)
        } else {
            let generation = 1_u32;
            self.nodes
                .push(Some(Node::new(generation, document, kind, local)));
            self.generations.push(generation);
            (self.nodes.len() - 1, generation)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId uses 32-bit indices."
        )]
        NodeId::new(idx as u32, generation)
    }

    fn alloc_document(&mut self, host: Option<NodeId>, bounds: Rect) -> DocumentId {
        let (idx, generation) = if let Some(idx) = self.doc_free_list.pop() {
            let generation = self.doc_generations[idx].saturating_add(1);
            self.doc_generations[idx] = generation;
            (idx, generation)
        } else {
            self.documents.push(None);
            self.doc_generations.push(1);
            (self.documents.len() - 1, 1)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "DocumentId uses 32-bit indices."
        )]
        let doc = DocumentId::new(idx as u32, generation);
        let root = self.alloc_node(
            doc,
            NodeKind::Document,
            LocalNode {
                local_bounds: bounds,
                ..Default::default()
            },
        );
        self.documents[idx] = Some(Document {
            generation,
            root,
            host,
            view: Some(View::default()),
            touch_handlers: true,
        });
        doc
    }

    fn remove_subtree(&mut self, id: NodeId) {
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        if let NodeKind::Frame {
            content: Some(doc),
        } = self.node(id).kind
        {
            self.remove_document(doc);
        }
        let children = self.node(id).children.clone();
        for child in children {
            if self.is_alive(child) {
                self.remove_subtree(child);
            }
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    fn set_subtree_document(&mut self, id: NodeId, document: DocumentId) {
        let children = {
            let n = self.node_mut(id);
            n.document = document;
            n.children.clone()
        };
        for c in children {
            self.set_subtree_document(c, document);
        }
    }

    /// True if `inner` is `outer` or nested inside it through view-bearing documents.
    fn document_within(&self, mut inner: DocumentId, outer: DocumentId) -> bool {
        loop {
            if inner == outer {
                return true;
            }
            let Some(d) = self.document(inner) else {
                return false;
            };
            if d.view.is_none() {
                return false;
            }
            let Some(host_doc) = d.host.and_then(|h| self.document_of(h)) else {
                return false;
            };
            inner = host_doc;
        }
    }

    fn document(&self, doc: DocumentId) -> Option<&Document> {
        self.documents
            .get(doc.idx())?
            .as_ref()
            .filter(|d| d.generation == doc.1)
    }

    fn document_mut(&mut self, doc: DocumentId) -> Option<&mut Document> {
        self.documents
            .get_mut(doc.idx())?
            .as_mut()
            .filter(|d| d.generation == doc.1)
    }

    /// Access a node; panics if `id` is stale.
    fn node(&self, id: NodeId) -> &Node {
        self.node_opt(id).expect("dangling NodeId")
    }

    /// Access a node mutably; panics if `id` is stale.
    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.node_opt_mut(id).expect("dangling NodeId")
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        self.nodes
            .get(id.idx())?
            .as_ref()
            .filter(|n| n.generation == id.1)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes
            .get_mut(id.idx())?
            .as_mut()
            .filter(|n| n.generation == id.1)
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        if let Some(p) = self.node_opt_mut(parent) {
            p.children.retain(|c| *c != id);
        }
        self.node_mut(id).parent = None;
    }

    fn update_world_recursive(
        &mut self,
        id: NodeId,
        parent_tf: Affine,
        parent_clip: Option<Rect>,
        damage: &mut Damage,
    ) {
        let hosted_root = match self.node(id).kind {
            NodeKind::Frame { content: Some(doc) } => self.root(doc),
            _ => None,
        };
        let node = self.node_mut(id);
        let tf = parent_tf * node.local.local_transform;
        let clip = match node.local.local_clip {
            Some(rr) => Some(tf.transform_rect_bbox(rr.rect())),
            None => parent_clip,
        };
        let mut bounds = tf.transform_rect_bbox(node.local.local_bounds);
        if let Some(c) = clip {
            bounds = bounds.intersect(c);
        }
        let previous = core::mem::replace(
            &mut node.world,
            WorldNode {
                world_transform: tf,
                world_bounds: bounds,
            },
        );
        let children = node.children.clone();

        if previous.world_bounds != bounds {
            damage.dirty_rects.extend(
                [previous.world_bounds, bounds]
                    .into_iter()
                    .filter(|r| r.area() > 0.0),
            );
        }

        for child in children {
            self.update_world_recursive(child, tf, clip, damage);
        }
        // A hosted document is clipped to its frame.
        if let Some(root) = hosted_root {
            self.update_world_recursive(root, tf, Some(bounds), damage);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;
    use kurbo::Vec2;

    const FILTER: QueryFilter = QueryFilter {
        visible_only: true,
        pickable_only: true,
        content_only: true,
    };

    fn element(bounds: Rect, z_index: i32) -> LocalNode {
        LocalNode {
            local_bounds: bounds,
            z_index,
            ..Default::default()
        }
    }

    fn sized_page() -> (Page, NodeId) {
        let mut page = Page::new();
        let root = page.root(page.main_document()).unwrap();
        page.set_local_bounds(root, Rect::new(0.0, 0.0, 400.0, 400.0));
        (page, root)
    }

    #[test]
    fn insert_and_hit_test() {
        let (mut page, root) = sized_page();
        let doc = page.main_document();
        let _a = page.insert(root, NodeKind::Element, element(Rect::new(10.0, 10.0, 60.0, 60.0), 0));
        let b = page.insert(
            root,
            NodeKind::Element,
            element(Rect::new(40.0, 40.0, 120.0, 120.0), 10),
        );
        let _ = page.commit();

        let hit = page.hit_test_point(doc, Point::new(50.0, 50.0), FILTER);
        assert_eq!(hit, Some(b), "topmost by z should win");
        let empty = page.hit_test_point(doc, Point::new(300.0, 300.0), FILTER);
        assert_eq!(empty, Some(root), "document root is the fallback");
    }

    #[test]
    fn transform_and_damage() {
        let (mut page, root) = sized_page();
        let n = page.insert(root, NodeKind::Element, element(Rect::new(0.0, 0.0, 10.0, 10.0), 0));
        let _ = page.commit();
        page.set_local_transform(n, Affine::translate(Vec2::new(50.0, 0.0)));
        let dmg = page.commit();
        assert!(dmg.union_rect().is_some());
        assert_eq!(page.world_bounds(n), Some(Rect::new(50.0, 0.0, 60.0, 10.0)));
    }

    #[test]
    fn pointer_events_none_and_chrome_filters() {
        let (mut page, root) = sized_page();
        let doc = page.main_document();
        let under = page.insert(root, NodeKind::Element, element(Rect::new(0.0, 0.0, 100.0, 100.0), 0));
        let overlay = page.insert(
            root,
            NodeKind::Element,
            LocalNode {
                local_bounds: Rect::new(0.0, 0.0, 100.0, 100.0),
                flags: NodeFlags::VISIBLE,
                ..Default::default()
            },
        );
        let scrollbar = page.insert(
            root,
            NodeKind::Element,
            LocalNode {
                local_bounds: Rect::new(90.0, 0.0, 100.0, 100.0),
                flags: NodeFlags::default() | NodeFlags::CHROME,
                z_index: 5,
                ..Default::default()
            },
        );
        let _ = page.commit();

        let pt = Point::new(50.0, 50.0);
        assert_eq!(page.hit_test_point(doc, pt, FILTER), Some(under));
        let tolerant = QueryFilter {
            pickable_only: false,
            ..FILTER
        };
        assert_eq!(page.hit_test_point(doc, pt, tolerant), Some(overlay));

        let edge = Point::new(95.0, 50.0);
        assert_eq!(page.hit_test_point(doc, edge, FILTER), Some(under));
        let with_chrome = QueryFilter {
            content_only: false,
            ..FILTER
        };
        assert_eq!(page.hit_test_point(doc, edge, with_chrome), Some(scrollbar));
    }

    #[test]
    fn liveness_insert_remove_reuse() {
        let (mut page, root) = sized_page();
        let a = page.insert(root, NodeKind::Element, element(Rect::new(0.0, 0.0, 1.0, 1.0), 0));
        assert!(page.is_alive(a));

        page.remove(a);
        assert!(!page.is_alive(a));
        assert_eq!(page.document_of(a), None, "stale ids must resolve to nothing");

        let b = page.insert(root, NodeKind::Element, element(Rect::new(0.0, 0.0, 1.0, 1.0), 0));
        assert!(page.is_alive(b));
        assert!(!page.is_alive(a));
        if a.0 == b.0 {
            assert!(b.1 > a.1, "generation must increase on reuse");
        }
    }

    #[test]
    fn document_root_cannot_be_removed_as_node() {
        let (mut page, root) = sized_page();
        page.remove(root);
        assert!(page.is_alive(root));
    }

    #[test]
    fn child_document_hit_and_contents_mapping() {
        let (mut page, root) = sized_page();
        let main = page.main_document();
        let frame = page.insert(
            root,
            NodeKind::Frame { content: None },
            element(Rect::new(100.0, 100.0, 300.0, 300.0), 0),
        );
        let child = page.add_document(frame).unwrap();
        let child_root = page.root(child).unwrap();
        let inner = page.insert(
            child_root,
            NodeKind::Element,
            element(Rect::new(0.0, 0.0, 50.0, 50.0), 0),
        );
        page.attach_view(
            child,
            View {
                scroll_offset: Vec2::new(0.0, 10.0),
                page_zoom: 2.0,
            },
        );
        let _ = page.commit();

        let pt = Point::new(110.0, 110.0);
        assert_eq!(page.hit_test_point(main, pt, FILTER), Some(inner));
        assert_eq!(page.hit_test_point(child, pt, FILTER), Some(inner));
        assert_eq!(page.document_of(inner), Some(child));
        assert_eq!(page.host_of(child), Some(frame));
        assert_eq!(page.root_to_contents(child, pt), Some(Point::new(5.0, 10.0)));

        // Without a view the child document disappears from the main document's hit tests.
        page.detach_view(child);
        assert_eq!(page.hit_test_point(main, pt, FILTER), Some(frame));
        assert_eq!(page.hit_test_point(child, pt, FILTER), None);
        assert!(!page.has_view(child));
    }

    #[test]
    fn removing_frame_removes_hosted_document() {
        let (mut page, root) = sized_page();
        let frame = page.insert(
            root,
            NodeKind::Frame { content: None },
            element(Rect::new(0.0, 0.0, 100.0, 100.0), 0),
        );
        let child = page.add_document(frame).unwrap();
        let child_root = page.root(child).unwrap();
        let inner = page.insert(child_root, NodeKind::Element, LocalNode::default());
        assert_eq!(page.add_document(frame), None, "frame already hosts a document");

        page.remove(frame);
        assert!(!page.is_document_alive(child));
        assert!(!page.is_alive(inner));
        assert!(!page.is_alive(child_root));
    }

    #[test]
    fn reparent_adopts_into_other_document() {
        let (mut page, root) = sized_page();
        let frame = page.insert(
            root,
            NodeKind::Frame { content: None },
            element(Rect::new(0.0, 0.0, 100.0, 100.0), 0),
        );
        let child = page.add_document(frame).unwrap();
        let child_root = page.root(child).unwrap();
        let a = page.insert(root, NodeKind::Element, LocalNode::default());
        let text = page.insert(a, NodeKind::Text, LocalNode::default());

        page.reparent(a, child_root);
        assert_eq!(page.document_of(a), Some(child));
        assert_eq!(page.document_of(text), Some(child));
        assert_eq!(page.parent(a), Some(child_root));

        // Cycles are refused.
        page.reparent(a, text);
        assert_eq!(page.parent(a), Some(child_root));
    }

    #[test]
    fn canvas_regions_topmost_wins() {
        let (mut page, root) = sized_page();
        let canvas = page.insert(
            root,
            NodeKind::canvas(),
            element(Rect::new(100.0, 100.0, 200.0, 200.0), 0),
        );
        let button = page.insert(root, NodeKind::Element, LocalNode::default());
        page.set_hit_regions(
            canvas,
            vec![
                HitRegion {
                    id: "background".to_string(),
                    bounds: Rect::new(0.0, 0.0, 100.0, 100.0),
                    control: None,
                },
                HitRegion {
                    id: "ok".to_string(),
                    bounds: Rect::new(10.0, 10.0, 30.0, 30.0),
                    control: Some(button),
                },
            ],
        );
        let _ = page.commit();

        let r = page.canvas_hit_region(canvas, Point::new(115.0, 115.0)).unwrap();
        assert_eq!(r.id, "ok");
        assert_eq!(r.control, Some(button));
        let r = page.canvas_hit_region(canvas, Point::new(150.0, 150.0)).unwrap();
        assert_eq!(r.id, "background");
        assert!(page.canvas_hit_region(canvas, Point::new(250.0, 150.0)).is_none());
        assert!(page.canvas_hit_region(button, Point::new(115.0, 115.0)).is_none());
    }

    #[test]
    fn hit_equal_z_newer_wins() {
        let (mut page, root) = sized_page();
        let doc = page.main_document();
        let a = page.insert(root, NodeKind::Element, element(Rect::new(40.0, 40.0, 120.0, 120.0), 5));
        let b = page.insert(root, NodeKind::Element, element(Rect::new(40.0, 40.0, 120.0, 120.0), 5));
        let _ = page.commit();
        let expected = if b.is_newer_than(a) { b } else { a };
        assert_eq!(page.hit_test_point(doc, Point::new(60.0, 60.0), FILTER), Some(expected));

        page.remove(a);
        let c = page.insert(root, NodeKind::Element, element(Rect::new(40.0, 40.0, 120.0, 120.0), 5));
        let _ = page.commit();
        assert!(c.is_newer_than(b));
        assert_eq!(
            page.hit_test_point(doc, Point::new(60.0, 60.0), FILTER),
            Some(c),
            "newer id should win on equal z"
        );
    }
}

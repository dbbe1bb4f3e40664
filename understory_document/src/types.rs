// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the page: node and document identifiers, flags, styles, and local geometry.

use alloc::string::String;
use alloc::vec::Vec;
use kurbo::{Affine, Point, Rect, RoundedRect, Vec2};

/// Handle to a node of any document in a [`Page`](crate::Page).
///
/// A slot index plus a generation. Removing a node frees its slot; reusing the
/// slot bumps the generation, so an old handle stops resolving instead of
/// pointing at the new occupant. Routers can therefore keep a `NodeId` for the
/// whole of a gesture and simply find it gone.
///
/// Handles are ordered by generation, then slot. The larger one counts as newer
/// when [hit testing](crate::Page::hit_test_point) breaks ties between equal z-indices.
/// Check liveness with [`Page::is_alive`](crate::Page::is_alive).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn is_newer_than(self, other: Self) -> bool {
        (self.1 > other.1) || (self.1 == other.1 && self.0 > other.0)
    }
}

/// Identifier for a document in the page.
///
/// Generational like [`NodeId`]: removing a document makes every outstanding
/// `DocumentId` for it stale, even if its slot is later reused.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct DocumentId(pub(crate) u32, pub(crate) u32);

impl DocumentId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Node flags controlling visibility and picking.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node is visible (participates in rendering and hit testing).
        const VISIBLE  = 0b0000_0001;
        /// Node is pickable; cleared for `pointer-events: none`.
        const PICKABLE = 0b0000_0010;
        /// Node is UI chrome (scrollbars, resizers) rather than document content.
        const CHROME   = 0b0000_0100;
        /// Node's box scrolls its overflow.
        const SCROLLER = 0b0000_1000;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE
    }
}

bitflags::bitflags! {
    /// Computed value of the CSS `touch-action` property.
    ///
    /// The empty set is `touch-action: none`.
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

        /// `pan-x`.
        const PAN_X = Self::PAN_LEFT.bits() | Self::PAN_RIGHT.bits();
        /// `pan-y`.
        const PAN_Y = Self::PAN_UP.bits() | Self::PAN_DOWN.bits();
        /// Any panning.
        const PAN = Self::PAN_X.bits() | Self::PAN_Y.bits();
        /// `manipulation`.
        const MANIPULATION = Self::PAN.bits() | Self::PINCH_ZOOM.bits();
        /// `auto`.
        const AUTO = Self::MANIPULATION.bits() | Self::DOUBLE_TAP_ZOOM.bits();
    }
}

impl Default for TouchAction {
    fn default() -> Self {
        Self::AUTO
    }
}

/// An addressable sub-area of a canvas element.
#[derive(Clone, Debug, PartialEq)]
pub struct HitRegion {
    /// Region identifier reported alongside touches inside the region.
    pub id: String,
    /// Bounds relative to the canvas' world-space origin.
    pub bounds: Rect,
    /// Fallback element that receives events for this region, if any.
    pub control: Option<NodeId>,
}

/// What a node is.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// Root node of a document. Created by the page, never inserted directly.
    Document,
    /// A plain element.
    Element,
    /// A text run. Never an event target on its own.
    Text,
    /// A canvas element with optional hit regions (later regions win on overlap).
    Canvas {
        /// Registered hit regions.
        regions: Vec<HitRegion>,
    },
    /// An element hosting a child document.
    Frame {
        /// The hosted document, once attached.
        content: Option<DocumentId>,
    },
}

impl NodeKind {
    /// A canvas without hit regions.
    pub fn canvas() -> Self {
        Self::Canvas {
            regions: Vec::new(),
        }
    }

    /// Returns true for nodes that are elements (including canvases and frames).
    pub fn is_element(&self) -> bool {
        matches!(self, Self::Element | Self::Canvas { .. } | Self::Frame { .. })
    }
}

/// Local geometry and style for a node.
#[derive(Clone, Debug)]
pub struct LocalNode {
    /// Local (untransformed) bounds. For non-axis-aligned content, use a conservative AABB.
    pub local_bounds: Rect,
    /// Local transform relative to parent space.
    pub local_transform: Affine,
    /// Optional local clip (rounded-rect). AABB is used for bounds; precise hit test is best-effort.
    pub local_clip: Option<RoundedRect>,
    /// Z-order within parent stacking context. Higher is drawn on top.
    pub z_index: i32,
    /// Visibility, picking, chrome, and scrolling flags.
    pub flags: NodeFlags,
    /// Computed `touch-action`, or `None` when the node's box does not support the property.
    pub touch_action: Option<TouchAction>,
}

impl Default for LocalNode {
    fn default() -> Self {
        Self {
            local_bounds: Rect::ZERO,
            local_transform: Affine::IDENTITY,
            local_clip: None,
            z_index: 0,
            flags: NodeFlags::default(),
            touch_action: None,
        }
    }
}

/// Viewport state of a document.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct View {
    /// Scroll offset of the document contents.
    pub scroll_offset: Vec2,
    /// Page zoom factor; contents coordinates are divided by it.
    pub page_zoom: f64,
}

impl Default for View {
    fn default() -> Self {
        Self {
            scroll_offset: Vec2::ZERO,
            page_zoom: 1.0,
        }
    }
}

impl View {
    /// Convert a frame-local point to unzoomed contents coordinates.
    pub fn frame_to_contents(&self, pt: Point) -> Point {
        let scrolled = pt + self.scroll_offset;
        Point::new(scrolled.x / self.page_zoom, scrolled.y / self.page_zoom)
    }
}

/// Filters applied during hit testing.
///
/// Used by [`Page::hit_test_point`](crate::Page::hit_test_point).
#[derive(Clone, Copy, Debug, Default)]
pub struct QueryFilter {
    /// If true, only consider nodes marked [`NodeFlags::VISIBLE`].
    pub visible_only: bool,
    /// If true, only consider nodes marked [`NodeFlags::PICKABLE`].
    pub pickable_only: bool,
    /// If true, skip nodes marked [`NodeFlags::CHROME`].
    pub content_only: bool,
}

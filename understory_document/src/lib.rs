// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_document --heading-base-level=0

//! Understory Document: a Kurbo-native page model for input routing.
//!
//! Understory Document is the content side of touch routing.
//! It models what a router needs to know about a web-style page and nothing more.
//!
//! - A [`Page`] holds a main document plus documents hosted by frame elements.
//! - Nodes live in one generational arena; a [`NodeId`] goes stale when its node is removed,
//!   so routers can hold targets across a gesture without dangling.
//! - Each node carries local bounds, a transform, an optional clip, z-order, [`NodeFlags`],
//!   and an optional computed [`TouchAction`].
//! - Canvas elements expose [`HitRegion`]s with an optional fallback control element.
//! - Each document has an optional [`View`]; tearing it down makes the document unusable for routing.
//!
//! ## Not a layout engine
//!
//! This crate does not perform layout or style resolution.
//! Upstream code computes boxes and `touch-action` values and writes them here, then calls
//! [`Page::commit`] to refresh world-space bounds. Hit testing reads committed data only,
//! so callers must commit before routing input.
//!
//! ## Hit testing
//!
//! [`Page::hit_test_point`] returns the topmost node under a world-space point within one
//! document and any view-bearing documents nested inside it.
//! Candidates are ranked by z-index; on equal z-index the newer [`NodeId`] wins.
//! A [`QueryFilter`] restricts candidates to visible, pickable (`pointer-events` not `none`),
//! and content (not [`NodeFlags::CHROME`]) nodes.
//!
//! ## Minimal usage
//!
//! ```
//! use understory_document::{LocalNode, NodeKind, Page, QueryFilter};
//! use kurbo::{Point, Rect};
//!
//! let mut page = Page::new();
//! let doc = page.main_document();
//! let root = page.root(doc).unwrap();
//! page.set_local_bounds(root, Rect::new(0.0, 0.0, 200.0, 200.0));
//!
//! let button = page.insert(
//!     root,
//!     NodeKind::Element,
//!     LocalNode { local_bounds: Rect::new(10.0, 10.0, 60.0, 60.0), ..Default::default() },
//! );
//! let label = page.insert(button, NodeKind::Text, LocalNode {
//!     local_bounds: Rect::new(15.0, 15.0, 50.0, 30.0),
//!     ..Default::default()
//! });
//!
//! let _ = page.commit();
//!
//! let filter = QueryFilter { visible_only: true, pickable_only: true, content_only: true };
//! assert_eq!(page.hit_test_point(doc, Point::new(20.0, 20.0), filter), Some(label));
//! assert_eq!(page.hit_test_point(doc, Point::new(50.0, 50.0), filter), Some(button));
//! assert_eq!(page.parent(label), Some(button));
//! ```
//!
//! ## Child documents
//!
//! ```
//! use understory_document::{LocalNode, NodeKind, Page};
//! use kurbo::Rect;
//!
//! let mut page = Page::new();
//! let root = page.root(page.main_document()).unwrap();
//! let frame = page.insert(
//!     root,
//!     NodeKind::Frame { content: None },
//!     LocalNode { local_bounds: Rect::new(0.0, 0.0, 100.0, 100.0), ..Default::default() },
//! );
//! let child = page.add_document(frame).unwrap();
//! assert_eq!(page.host_of(child), Some(frame));
//!
//! page.detach_view(child);
//! assert!(!page.has_view(child));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod page;
mod types;

pub use page::{Damage, Page};
pub use types::{
    DocumentId, HitRegion, LocalNode, NodeFlags, NodeId, NodeKind, QueryFilter, TouchAction, View,
};

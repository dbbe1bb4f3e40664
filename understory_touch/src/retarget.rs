// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Target resolution for pressed points.
//!
//! ## Policy
//!
//! 1. A pre-computed pointer target is accepted when no sequence is active yet, or when it
//!    lives in the sequence document.
//! 2. Otherwise the point is hit tested against the sequence document (or the main document
//!    when no sequence is active). Hit tests only consider content.
//! 3. A hit on a canvas-like node is refined to the region under the point: the region's
//!    control element becomes the target when it has one, and the region tag is kept.
//! 4. Text nodes are replaced by their nearest non-text ancestor.
//!
//! A point that resolves to nothing is dropped from targeting for this batch; it is not
//! retried later.
//!
//! Resolution never validates the sequence's view: callers abort before retargeting when
//! the view is gone.

use crate::types::{BatchPoint, HitTestRequest, ResolvedTarget, TouchContent};

/// Resolve the target of one pressed point.
pub fn resolve_pressed<C: TouchContent + ?Sized>(
    content: &C,
    sequence: Option<C::Document>,
    point: &BatchPoint<C::Node>,
    request: HitTestRequest,
) -> Option<ResolvedTarget<C::Node>> {
    let precomputed = point.pointer_target.as_ref().filter(|t| match sequence {
        None => true,
        Some(doc) => content.document_of(&t.node) == Some(doc),
    });

    let ResolvedTarget { node, region } = match precomputed {
        Some(t) => t.clone(),
        None => {
            let doc = sequence.unwrap_or_else(|| content.main_document());
            let position = point.point.position;
            let hit = content.hit_test(&doc, position, request)?;
            match content.hit_region(&hit, position) {
                Some(r) => ResolvedTarget {
                    node: r.control.unwrap_or(hit),
                    region: Some(r.id),
                },
                None => ResolvedTarget::node(hit),
            }
        }
    };

    let node = element_for(content, node)?;
    Some(ResolvedTarget { node, region })
}

/// Nearest ancestor-or-self that is not a text node.
fn element_for<C: TouchContent + ?Sized>(content: &C, mut node: C::Node) -> Option<C::Node> {
    while content.is_text(&node) {
        node = content.parent(&node)?;
    }
    Some(node)
}

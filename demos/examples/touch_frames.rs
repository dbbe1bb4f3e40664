// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch routing across documents.
//!
//! The first finger lands inside a zoomed, scrolled child document, which becomes the
//! sequence document. A second finger on the outer page is tracked but never dispatched
//! to. The link's listener then tears down the child document's view while handling the
//! release, so the next batch aborts the gesture.
//!
//! Run:
//! - `cargo run -p understory_demos --example touch_frames`

use kurbo::{Point, Rect, Vec2};
use understory_document::{LocalNode, NodeId, NodeKind, Page, View};
use understory_touch::adapters::document::PageHost;
use understory_touch::router::TouchRouter;
use understory_touch::types::{
    DispatchOutcome, TouchBatch, TouchEvent, TouchEventKind, TouchPoint, TouchState,
};

fn main() {
    let mut page = Page::new();
    let root = page.root(page.main_document()).unwrap();
    page.set_local_bounds(root, Rect::new(0.0, 0.0, 600.0, 400.0));
    let outer_button = page.insert(
        root,
        NodeKind::Element,
        LocalNode {
            local_bounds: Rect::new(400.0, 20.0, 500.0, 60.0),
            ..Default::default()
        },
    );
    let frame = page.insert(
        root,
        NodeKind::Frame { content: None },
        LocalNode {
            local_bounds: Rect::new(50.0, 50.0, 350.0, 350.0),
            ..Default::default()
        },
    );
    let child = page.add_document(frame).unwrap();
    page.attach_view(
        child,
        View {
            scroll_offset: Vec2::new(0.0, 40.0),
            page_zoom: 2.0,
        },
    );
    let child_root = page.root(child).unwrap();
    let link = page.insert(
        child_root,
        NodeKind::Element,
        LocalNode {
            local_bounds: Rect::new(0.0, 0.0, 200.0, 100.0),
            ..Default::default()
        },
    );
    let _ = page.commit();

    println!("outer button={outer_button:?} link={link:?} child document={child:?}");

    let mut host = PageHost::new(page, move |page: &mut Page, e: &TouchEvent<'_, NodeId>| {
        for t in e.changed_touches {
            println!(
                "    {:?} -> {:?} id={} content={:?} screen={:?}",
                e.kind, e.target, t.id, t.content_position, t.screen_position
            );
        }
        if e.kind == TouchEventKind::End {
            // Navigating away from the child document.
            page.detach_view(child);
        }
        DispatchOutcome::Handled
    });
    let mut router = TouchRouter::new();

    println!("== finger 1 down on the link ==");
    let res = router.handle_batch(
        &mut host,
        &TouchBatch::new([TouchPoint::new(1, TouchState::Pressed, Point::new(70.0, 70.0))]),
    );
    println!("  {res:?} sequence={:?}", router.sequence_document());

    println!("== finger 2 down on the outer button ==");
    let res = router.handle_batch(
        &mut host,
        &TouchBatch::new([
            TouchPoint::new(1, TouchState::Stationary, Point::new(70.0, 70.0)),
            TouchPoint::new(2, TouchState::Pressed, Point::new(450.0, 40.0)),
        ]),
    );
    println!("  {res:?} tracked={}", router.tracker().len());

    println!("== finger 1 lifts, finger 2 moves ==");
    let res = router.handle_batch(
        &mut host,
        &TouchBatch::new([
            TouchPoint::new(1, TouchState::Released, Point::new(70.0, 70.0)),
            TouchPoint::new(2, TouchState::Moved, Point::new(460.0, 40.0)),
        ]),
    );
    println!("  {res:?} active={}", router.is_active());

    println!("== finger 2 moves again ==");
    let res = router.handle_batch(
        &mut host,
        &TouchBatch::new([TouchPoint::new(2, TouchState::Moved, Point::new(470.0, 40.0))]),
    );
    println!("  {res:?} active={}", router.is_active());
    if let Some(err) = res.aborted {
        println!("  aborted: {err}");
    }
}

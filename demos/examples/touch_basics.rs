// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch routing basics.
//!
//! Routes a short two-finger gesture over a page with a button and a horizontal slider:
//! a tap-and-wiggle that gets slop-suppressed, then a second finger on the slider that
//! narrows the touch-action, then both fingers lifting in one batch.
//!
//! Run:
//! - `cargo run -p understory_demos --example touch_basics`

use kurbo::{Point, Rect};
use understory_document::{LocalNode, NodeId, NodeKind, Page};
use understory_touch::adapters::document::PageHost;
use understory_touch::router::TouchRouter;
use understory_touch::types::{
    DispatchOutcome, TouchBatch, TouchEvent, TouchPoint, TouchState,
};

fn main() {
    let mut page = Page::new();
    let root = page.root(page.main_document()).unwrap();
    page.set_local_bounds(root, Rect::new(0.0, 0.0, 400.0, 300.0));
    let button = page.insert(
        root,
        NodeKind::Element,
        LocalNode {
            local_bounds: Rect::new(20.0, 20.0, 120.0, 60.0),
            ..Default::default()
        },
    );
    let slider = page.insert(
        root,
        NodeKind::Element,
        LocalNode {
            local_bounds: Rect::new(20.0, 200.0, 380.0, 240.0),
            touch_action: Some(understory_document::TouchAction::PAN_X),
            ..Default::default()
        },
    );
    let _ = page.commit();

    let name = move |n: NodeId| -> &'static str {
        if n == button {
            "button"
        } else if n == slider {
            "slider"
        } else {
            "root"
        }
    };

    // The slider handles its events; the button ignores them.
    let mut host = PageHost::new(page, move |_page: &mut Page, e: &TouchEvent<'_, NodeId>| {
        let ids: Vec<u32> = e.changed_touches.iter().map(|t| t.id).collect();
        println!(
            "    {:?} -> {} changed={ids:?} touches={} target_touches={}",
            e.kind,
            name(e.target),
            e.touches.len(),
            e.target_touches.len()
        );
        if e.target == slider {
            DispatchOutcome::Handled
        } else {
            DispatchOutcome::NotHandled
        }
    });
    let mut router = TouchRouter::new();

    let steps: [(&str, TouchBatch<NodeId>); 5] = [
        (
            "finger 1 down on the button",
            TouchBatch::new([TouchPoint::new(1, TouchState::Pressed, Point::new(50.0, 40.0))]),
        ),
        (
            "finger 1 wiggles within the slop region",
            TouchBatch::new([TouchPoint::new(1, TouchState::Moved, Point::new(52.0, 41.0))]),
        ),
        (
            "finger 2 down on the slider",
            TouchBatch::new([
                TouchPoint::new(1, TouchState::Stationary, Point::new(52.0, 41.0)),
                TouchPoint::new(2, TouchState::Pressed, Point::new(100.0, 220.0)),
            ]),
        ),
        (
            "finger 2 drags",
            TouchBatch::new([
                TouchPoint::new(1, TouchState::Stationary, Point::new(52.0, 41.0)),
                TouchPoint::new(2, TouchState::Moved, Point::new(160.0, 222.0)),
            ])
            .with_moved_beyond_slop_region(true),
        ),
        (
            "both fingers lift",
            TouchBatch::new([
                TouchPoint::new(1, TouchState::Released, Point::new(52.0, 41.0)),
                TouchPoint::new(2, TouchState::Released, Point::new(160.0, 222.0)),
            ]),
        ),
    ];

    for (label, batch) in &steps {
        println!("== {label} ==");
        let res = router.handle_batch(&mut host, batch);
        println!(
            "  outcome={:?} touch_active={} touch_action={:?} slop={:?}",
            res.outcome,
            res.touch_active,
            router.touch_action(),
            router.slop_state()
        );
    }
    println!("== compositor saw touch-action {:?} ==", host.touch_action());
}

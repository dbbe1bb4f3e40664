// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page hit testing.
//!
//! Builds a page with a transformed card, a text label, a `pointer-events: none` overlay,
//! and a canvas with hit regions, then hit tests a few points.
//!
//! Run:
//! - `cargo run -p understory_demos --example page_hit_testing`

use kurbo::{Affine, Point, Rect};
use understory_document::{HitRegion, LocalNode, NodeFlags, NodeId, NodeKind, Page, QueryFilter};

fn main() {
    let mut page = Page::new();
    let doc = page.main_document();
    let root = page.root(doc).unwrap();
    page.set_local_bounds(root, Rect::new(0.0, 0.0, 400.0, 300.0));

    let card = page.insert(
        root,
        NodeKind::Element,
        LocalNode {
            local_bounds: Rect::new(0.0, 0.0, 120.0, 80.0),
            local_transform: Affine::translate((20.0, 20.0)),
            ..Default::default()
        },
    );
    let label = page.insert(
        card,
        NodeKind::Text,
        LocalNode {
            local_bounds: Rect::new(10.0, 10.0, 100.0, 30.0),
            ..Default::default()
        },
    );
    let overlay = page.insert(
        root,
        NodeKind::Element,
        LocalNode {
            local_bounds: Rect::new(0.0, 0.0, 400.0, 300.0),
            z_index: 10,
            flags: NodeFlags::VISIBLE,
            ..Default::default()
        },
    );
    let play = page.insert(
        root,
        NodeKind::Element,
        LocalNode {
            local_bounds: Rect::new(380.0, 280.0, 390.0, 290.0),
            ..Default::default()
        },
    );
    let canvas = page.insert(
        root,
        NodeKind::canvas(),
        LocalNode {
            local_bounds: Rect::new(200.0, 100.0, 360.0, 200.0),
            ..Default::default()
        },
    );
    page.set_hit_regions(
        canvas,
        vec![
            HitRegion {
                id: "background".into(),
                bounds: Rect::new(0.0, 0.0, 160.0, 100.0),
                control: None,
            },
            HitRegion {
                id: "play".into(),
                bounds: Rect::new(10.0, 10.0, 50.0, 50.0),
                control: Some(play),
            },
        ],
    );

    let damage = page.commit();
    println!("== Commit ==");
    println!("  damage: {:?}", damage.union_rect());

    let names = [
        (root, "root"),
        (card, "card"),
        (label, "label"),
        (overlay, "overlay"),
        (play, "play button"),
        (canvas, "canvas"),
    ];
    let name = |n: NodeId| -> &'static str {
        names
            .iter()
            .find(|(id, _)| *id == n)
            .map_or("?", |(_, s)| *s)
    };

    let content = QueryFilter {
        visible_only: true,
        pickable_only: true,
        content_only: true,
    };
    let everything = QueryFilter {
        pickable_only: false,
        ..content
    };

    println!("== Hit tests ==");
    for pt in [
        Point::new(40.0, 40.0),
        Point::new(130.0, 90.0),
        Point::new(220.0, 120.0),
        Point::new(300.0, 180.0),
        Point::new(5.0, 290.0),
    ] {
        let hit = page.hit_test_point(doc, pt, content);
        let raw = page.hit_test_point(doc, pt, everything);
        println!(
            "  {pt:?}: content={} including pointer-events:none={}",
            hit.map_or("none", name),
            raw.map_or("none", name),
        );
        if let Some(n) = hit
            && let Some(region) = page.canvas_hit_region(n, pt)
        {
            println!(
                "    region {:?} control={}",
                region.id,
                region.control.map_or("none", name)
            );
        }
    }
}

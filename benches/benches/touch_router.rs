// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use understory_document::{LocalNode, NodeId, NodeKind, Page};
use understory_touch::adapters::document::PageHost;
use understory_touch::router::TouchRouter;
use understory_touch::types::{DispatchOutcome, TouchBatch, TouchEvent, TouchPoint, TouchState};

fn page(n: usize) -> Page {
    let mut page = Page::new();
    let root = page.root(page.main_document()).unwrap();
    let side = n as f64 * 20.0;
    page.set_local_bounds(root, Rect::new(0.0, 0.0, side, side));
    for y in 0..n {
        for x in 0..n {
            let (x0, y0) = (x as f64 * 20.0, y as f64 * 20.0);
            let _ = page.insert(
                root,
                NodeKind::Element,
                LocalNode {
                    local_bounds: Rect::new(x0, y0, x0 + 20.0, y0 + 20.0),
                    ..Default::default()
                },
            );
        }
    }
    let _ = page.commit();
    page
}

/// Press `fingers` contacts, move them `moves` times, then lift them all.
fn gesture(fingers: u32, moves: usize) -> Vec<TouchBatch<NodeId>> {
    let at = |id: u32, step: usize| Point::new(10.0 + f64::from(id) * 40.0, 10.0 + step as f64 * 3.0);
    let mut out = Vec::with_capacity(moves + 2);
    out.push(TouchBatch::new(
        (0..fingers).map(|id| TouchPoint::new(id, TouchState::Pressed, at(id, 0))),
    ));
    for step in 1..=moves {
        out.push(
            TouchBatch::new((0..fingers).map(|id| TouchPoint::new(id, TouchState::Moved, at(id, step))))
                .with_moved_beyond_slop_region(true),
        );
    }
    out.push(TouchBatch::new(
        (0..fingers).map(|id| TouchPoint::new(id, TouchState::Released, at(id, moves))),
    ));
    out
}

fn bench_gestures(c: &mut Criterion) {
    let mut group = c.benchmark_group("touch_router");
    let mut host = PageHost::new(page(32), |_: &mut Page, e: &TouchEvent<'_, NodeId>| {
        black_box(e.touches.len());
        DispatchOutcome::Handled
    });
    for fingers in [1_u32, 2, 5] {
        let batches = gesture(fingers, 30);
        group.throughput(Throughput::Elements(batches.len() as u64));
        group.bench_function(format!("gesture_{fingers}_fingers"), |b| {
            let mut router = TouchRouter::new();
            b.iter(|| {
                for batch in &batches {
                    black_box(router.handle_batch(&mut host, batch));
                }
            });
        });
    }

    let suppressed = gesture(1, 30)
        .into_iter()
        .map(|b| b.with_moved_beyond_slop_region(false))
        .collect::<Vec<_>>();
    let mut quiet = PageHost::new(page(32), |_: &mut Page, _: &TouchEvent<'_, NodeId>| {
        DispatchOutcome::NotHandled
    });
    group.bench_function("tap_with_suppressed_wiggle", |b| {
        let mut router = TouchRouter::new();
        b.iter(|| {
            for batch in &suppressed {
                black_box(router.handle_batch(&mut quiet, batch));
            }
        });
    });
    group.finish();
}

criterion_group!(benches, bench_gestures);
criterion_main!(benches);

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use understory_document::{LocalNode, NodeKind, Page, QueryFilter};

const FILTER: QueryFilter = QueryFilter {
    visible_only: true,
    pickable_only: true,
    content_only: true,
};

/// A page with an `n`×`n` grid of cells, each holding a text run.
fn grid_page(n: usize, cell: f64) -> Page {
    let mut page = Page::new();
    let root = page.root(page.main_document()).unwrap();
    let side = n as f64 * cell;
    page.set_local_bounds(root, Rect::new(0.0, 0.0, side, side));
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            let el = page.insert(
                root,
                NodeKind::Element,
                LocalNode {
                    local_bounds: Rect::new(x0, y0, x0 + cell, y0 + cell),
                    ..Default::default()
                },
            );
            let _ = page.insert(
                el,
                NodeKind::Text,
                LocalNode {
                    local_bounds: Rect::new(x0 + 1.0, y0 + 1.0, x0 + cell * 0.5, y0 + cell * 0.5),
                    ..Default::default()
                },
            );
        }
    }
    let _ = page.commit();
    page
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn next_f64(&mut self) -> f64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        ((x >> 11) as f64) / ((1_u64 << 53) as f64)
    }
}

fn bench_hit_test(c: &mut Criterion) {
    let mut group = c.benchmark_group("page_hit_test");
    for &n in &[8_usize, 16, 32] {
        let page = grid_page(n, 10.0);
        let side = n as f64 * 10.0;
        let mut rng = Rng(0x9E37_79B9_7F4A_7C15);
        let points: Vec<Point> = (0..256)
            .map(|_| Point::new(rng.next_f64() * side, rng.next_f64() * side))
            .collect();
        group.throughput(Throughput::Elements(points.len() as u64));
        group.bench_function(format!("random_points_n{n}"), |b| {
            b.iter(|| {
                let doc = page.main_document();
                let hits = points
                    .iter()
                    .filter(|p| page.hit_test_point(doc, **p, FILTER).is_some())
                    .count();
                black_box(hits);
            });
        });
    }
    group.finish();
}

fn bench_commit(c: &mut Criterion) {
    let mut group = c.benchmark_group("page_commit");
    for &n in &[16_usize, 32] {
        group.throughput(Throughput::Elements((2 * n * n) as u64));
        group.bench_function(format!("build_and_commit_n{n}"), |b| {
            b.iter(|| black_box(grid_page(n, 10.0)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_hit_test, bench_commit);
criterion_main!(benches);

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Affine, BezPath, Circle, Point, Rect, Vec2};
use peniko::Color;
use understory_graphic_list::{
    ActionMask, Graphic, GraphicList, GraphicStyle, ListConfig, Painter, ShapeGraphic,
};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// An `n` by `n` grid of boxes, every other one filled.
fn grid_list(n: usize, cell: f64) -> Arc<GraphicList> {
    let fill = GraphicStyle::default().with_fill(Color::from_rgb8(40, 90, 160));
    let list = GraphicList::new();
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            let mut g = ShapeGraphic::new(Rect::new(x0, y0, x0 + cell * 0.8, y0 + cell * 0.8));
            if (x + y) % 2 == 0 {
                g = g.with_style(fill);
            }
            list.add(Arc::new(g));
        }
    }
    list
}

/// `groups` vague symbols, each holding `per_group` circles.
fn symbol_list(groups: usize, per_group: usize) -> Arc<GraphicList> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    let layer = GraphicList::new();
    for _ in 0..groups {
        let symbol = GraphicList::with_config(ListConfig {
            vague: true,
            ..Default::default()
        });
        let cx = rng.next_f64() * 2000.0;
        let cy = rng.next_f64() * 2000.0;
        for _ in 0..per_group {
            let dx = (rng.next_f64() - 0.5) * 40.0;
            let dy = (rng.next_f64() - 0.5) * 40.0;
            symbol.add(Arc::new(ShapeGraphic::new(Circle::new((cx + dx, cy + dy), 6.0))));
        }
        layer.add(symbol);
    }
    layer
}

fn sample_points(count: usize, extent: f64) -> Vec<Point> {
    let mut rng = Rng::new(0xBADC_F00D_1234_5678);
    (0..count)
        .map(|_| Point::new(rng.next_f64() * extent, rng.next_f64() * extent))
        .collect()
}

struct NullPainter(usize);

impl Painter for NullPainter {
    fn fill_path(&mut self, path: &BezPath, _color: Color) {
        self.0 += path.elements().len();
    }

    fn stroke_path(&mut self, path: &BezPath, _color: Color, _width: f64) {
        self.0 += path.elements().len();
    }
}

fn bench_flat(c: &mut Criterion) {
    let mut group = c.benchmark_group("flat_grid");
    for &n in &[16usize, 32, 64] {
        let list = grid_list(n, 10.0);
        let points = sample_points(64, n as f64 * 10.0);
        group.throughput(Throughput::Elements(points.len() as u64));
        group.bench_function(format!("find_closest_n{}", n * n), |b| {
            b.iter(|| {
                let mut found = 0usize;
                for &pt in &points {
                    found += usize::from(list.find_closest(black_box(pt), 4.0).is_some());
                }
                found
            });
        });
        group.bench_function(format!("find_containing_n{}", n * n), |b| {
            b.iter(|| {
                let mut found = 0usize;
                for &pt in &points {
                    found += usize::from(list.find_containing(black_box(pt)).is_some());
                }
                found
            });
        });
        group.bench_function(format!("find_all_n{}", n * n), |b| {
            b.iter(|| {
                points
                    .iter()
                    .map(|&pt| list.find_all(black_box(pt), 15.0).len())
                    .sum::<usize>()
            });
        });
    }
    group.finish();
}

fn bench_nested(c: &mut Criterion) {
    let mut group = c.benchmark_group("vague_symbols");
    for &groups in &[64usize, 256] {
        let layer = symbol_list(groups, 8);
        let points = sample_points(64, 2000.0);
        group.throughput(Throughput::Elements(points.len() as u64));
        group.bench_function(format!("find_closest_g{groups}"), |b| {
            b.iter(|| {
                points
                    .iter()
                    .filter(|&&pt| layer.find_closest(black_box(pt), 20.0).is_some())
                    .count()
            });
        });
        group.bench_function(format!("select_closest_g{groups}"), |b| {
            b.iter(|| {
                points
                    .iter()
                    .filter(|&&pt| layer.select_closest(black_box(pt), 20.0).is_some())
                    .count()
            });
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    for &n in &[32usize, 64] {
        let list = grid_list(n, 10.0);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("render_n{}", n * n), |b| {
            b.iter(|| {
                let mut painter = NullPainter(0);
                list.render(&mut painter);
                painter.0
            });
        });
        group.bench_function(format!("generate_n{}", n * n), |b| {
            let projection = Affine::translate(Vec2::new(5.0, 5.0)) * Affine::scale(1.5);
            b.iter(|| list.generate(black_box(&projection)));
        });
    }
    group.finish();
}

fn bench_actions(c: &mut Criterion) {
    let mut group = c.benchmark_group("actions");
    for &n in &[256usize, 1024] {
        group.bench_function(format!("add_raise_select_n{n}"), |b| {
            b.iter_batched(
                || {
                    let graphics: Vec<Arc<dyn Graphic>> = (0..n)
                        .map(|i| {
                            let x = i as f64 * 3.0;
                            Arc::new(ShapeGraphic::new(Rect::new(x, 0.0, x + 2.0, 2.0)))
                                as Arc<dyn Graphic>
                        })
                        .collect();
                    (GraphicList::new(), graphics)
                },
                |(list, graphics)| {
                    for g in &graphics {
                        list.do_action(
                            Some(g),
                            ActionMask::ADD | ActionMask::RAISE_TO_TOP | ActionMask::SELECT,
                        )
                        .unwrap();
                    }
                    list.len()
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_flat, bench_nested, bench_render, bench_actions);
criterion_main!(benches);

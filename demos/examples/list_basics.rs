// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Graphic list basics.
//!
//! Build a list of shapes, project it, render it, and run a few queries.
//!
//! Run:
//! - `cargo run -p understory_demos --example list_basics`

use std::sync::Arc;

use kurbo::{Affine, BezPath, Circle, Line, Point, Rect, Vec2};
use peniko::Color;
use understory_graphic_list::{
    Graphic, GraphicList, GraphicStyle, ListConfig, Painter, ShapeGraphic, TraversalPolicy,
};

/// Prints every draw call.
struct PrintPainter;

impl Painter for PrintPainter {
    fn fill_path(&mut self, path: &BezPath, color: Color) {
        println!("  fill   {:>2} elements with {:?}", path.elements().len(), color.to_rgba8());
    }

    fn stroke_path(&mut self, path: &BezPath, color: Color, width: f64) {
        println!(
            "  stroke {:>2} elements with {:?} at {width}",
            path.elements().len(),
            color.to_rgba8()
        );
    }
}

fn main() {
    let lake: Arc<dyn Graphic> = Arc::new(
        ShapeGraphic::new(Rect::new(0.0, 0.0, 80.0, 50.0))
            .with_style(GraphicStyle::default().with_fill(Color::from_rgb8(70, 130, 180))),
    );
    let road: Arc<dyn Graphic> = Arc::new(
        ShapeGraphic::new(Line::new((-20.0, 25.0), (120.0, 25.0)))
            .with_style(GraphicStyle::default().with_stroke(Color::from_rgb8(90, 90, 90), 6.0)),
    );
    let town: Arc<dyn Graphic> = Arc::new(ShapeGraphic::new(Circle::new((100.0, 10.0), 5.0)));

    // The road was added last; with `LastOnTop` it draws over the lake and wins ties.
    let layer = GraphicList::with_config(ListConfig {
        traversal: TraversalPolicy::LastOnTop,
        ..Default::default()
    });
    layer.add(lake.clone());
    layer.add(town.clone());
    layer.add(road.clone());

    // Map world units to screen pixels.
    let projection = Affine::translate(Vec2::new(10.0, 10.0)) * Affine::scale(2.0);
    assert!(layer.generate(&projection));

    println!("render:");
    layer.render(&mut PrintPainter);

    // On the road inside the lake: both are at distance 0, the road is on top.
    let pt = Point::new(60.0, 60.0);
    let hit = layer.find_closest(pt, 5.0).unwrap();
    println!("closest to {pt:?}: entry {} at {}", hit.index, hit.distance);
    assert_eq!(hit.index, 2);

    // Lake interior, away from the road.
    let pt = Point::new(30.0, 20.0);
    let hit = layer.find_closest(pt, 5.0).unwrap();
    println!("closest to {pt:?}: entry {} at {}", hit.index, hit.distance);
    assert_eq!(hit.index, 0);

    // Near the town outline.
    let pt = Point::new(210.0, 44.0);
    let all = layer.find_all(pt, 8.0);
    println!("{} graphics within 8px of {pt:?}", all.len());

    // Select by clicking and read back the selection.
    let picked = layer.select_closest(Point::new(210.0, 30.0), 20.0);
    println!("selected: {}", picked.is_some());
    println!("selection size: {}", layer.selected().len());

    // Hide the road; the lake now answers at the same point.
    road.set_visible(false);
    let hit = layer.find_closest(Point::new(60.0, 60.0), 5.0).unwrap();
    assert_eq!(hit.index, 0);
    println!("with the road hidden the lake is picked");
}

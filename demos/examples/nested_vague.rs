// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nested and vague groups.
//!
//! A map symbol made of several shapes is kept in its own list. Marked vague,
//! the symbol is reported as a whole by every query; otherwise the individual
//! shape is reported together with the index of the group in the outer list.
//!
//! Run:
//! - `cargo run -p understory_demos --example nested_vague`

use std::sync::Arc;

use kurbo::{Circle, Point, Rect};
use peniko::Color;
use understory_graphic_list::{
    Graphic, GraphicList, GraphicStyle, ListConfig, ShapeGraphic, same_graphic,
};

fn symbol(x: f64, y: f64, vague: bool) -> (Arc<GraphicList>, Arc<dyn Graphic>) {
    let group = GraphicList::with_config(ListConfig {
        vague,
        ..Default::default()
    });
    let head: Arc<dyn Graphic> = Arc::new(
        ShapeGraphic::new(Circle::new((x, y), 4.0))
            .with_style(GraphicStyle::default().with_fill(Color::from_rgb8(200, 40, 40))),
    );
    group.add(head.clone());
    group.add(Arc::new(ShapeGraphic::new(Rect::new(
        x - 1.0,
        y + 4.0,
        x + 1.0,
        y + 20.0,
    ))));
    (group, head)
}

fn main() {
    let layer = GraphicList::new();
    let (plain, plain_head) = symbol(20.0, 20.0, false);
    let (flag, _) = symbol(80.0, 20.0, true);
    layer.add(Arc::new(ShapeGraphic::new(Rect::new(0.0, 0.0, 200.0, 100.0))));
    layer.add(plain.clone());
    layer.add(flag.clone());

    let hit = layer.find_closest(Point::new(20.0, 20.0), 3.0).unwrap();
    println!("plain symbol: entry {}, leaf reported", hit.index);
    assert_eq!(hit.index, 1);
    assert!(same_graphic(&*hit.graphic, &*plain_head));

    let hit = layer.find_closest(Point::new(80.0, 20.0), 3.0).unwrap();
    println!("vague symbol: entry {}, group reported", hit.index);
    assert!(same_graphic(&*hit.graphic, &*flag));

    let within = layer.find_all(Point::new(80.0, 22.0), 3.0);
    println!("find_all near the vague symbol: {} result(s)", within.len());

    // Selecting the vague symbol selects every part of it.
    let picked = layer.select_closest(Point::new(80.0, 20.0), 3.0).unwrap();
    assert!(same_graphic(&*picked, &*flag));
    println!("parts selected in the vague symbol: {}", flag.selected().len());

    // Hiding a vague group removes it from queries as a unit.
    flag.set_visible(false);
    assert!(layer.find_closest(Point::new(80.0, 20.0), 3.0).is_none());
    println!("hidden vague symbol no longer matches");
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Driving edits through an action mask.
//!
//! Run:
//! - `cargo run -p understory_demos --example action_protocol`

use std::cmp::Ordering;
use std::sync::Arc;

use kurbo::{Point, Rect};
use understory_graphic_list::{ActionMask, Graphic, GraphicList, ShapeGraphic, same_graphic};

fn boxed(x: f64) -> Arc<dyn Graphic> {
    Arc::new(ShapeGraphic::new(Rect::new(x, 0.0, x + 10.0, 10.0)))
}

fn left_to_right(a: &dyn Graphic, b: &dyn Graphic) -> Ordering {
    a.distance_to_edge(Point::ZERO)
        .total_cmp(&b.distance_to_edge(Point::ZERO))
}

fn print(list: &GraphicList, names: &[(&str, &Arc<dyn Graphic>)]) {
    let order: Vec<_> = list
        .graphics()
        .iter()
        .map(|g| {
            let name = names
                .iter()
                .find(|(_, n)| same_graphic(&***n, &**g))
                .map_or("?", |(name, _)| *name);
            if list.is_selected(&**g) {
                format!("[{name}]")
            } else {
                name.to_string()
            }
        })
        .collect();
    println!("{}", order.join(" "));
}

fn main() {
    let a = boxed(0.0);
    let b = boxed(20.0);
    let c = boxed(40.0);
    let names = [("a", &a), ("b", &b), ("c", &c)];

    let list = GraphicList::new();
    list.set_sort_policy(Some(left_to_right));

    for g in [&c, &b] {
        list.do_action(Some(g), ActionMask::ADD).unwrap();
    }
    print(&list, &names);

    // Add `a` and bring it to the top in one step.
    list.do_action(Some(&a), ActionMask::ADD | ActionMask::RAISE_TO_TOP | ActionMask::SELECT)
        .unwrap();
    print(&list, &names);

    // Move the selection to `c`.
    list.do_action(Some(&c), ActionMask::DESELECT_ALL | ActionMask::SELECT)
        .unwrap();
    print(&list, &names);

    // Restore spatial order.
    list.do_action(None, ActionMask::SORT).unwrap();
    print(&list, &names);

    // Delete `b`; the raise is skipped, the sort still runs.
    list.do_action(Some(&b), ActionMask::DELETE | ActionMask::RAISE | ActionMask::SORT)
        .unwrap();
    print(&list, &names);

    // Inserting needs a graphic.
    let err = list.do_action(None, ActionMask::ADD).unwrap_err();
    println!("error: {err}");
}

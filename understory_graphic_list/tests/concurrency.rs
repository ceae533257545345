// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for sharing a `GraphicList` between an editing thread and query threads.
//!
//! Each list serializes its own operations; these checks make sure readers
//! only ever observe whole edits.

use std::sync::Arc;
use std::thread;

use kurbo::{Point, Rect};
use peniko::Color;
use understory_graphic_list::{
    ActionMask, Graphic, GraphicList, GraphicStyle, ListConfig, ShapeGraphic, same_graphic,
};

const ROUNDS: usize = 500;

fn filled_box(x: f64) -> Arc<dyn Graphic> {
    Arc::new(
        ShapeGraphic::new(Rect::new(x, 0.0, x + 10.0, 10.0))
            .with_style(GraphicStyle::default().with_fill(Color::from_rgb8(30, 30, 30))),
    )
}

#[test]
fn queries_see_consistent_lists_while_editing() {
    let graphics: Vec<_> = (0..8).map(|i| filled_box(i as f64 * 20.0)).collect();
    let list = GraphicList::from_graphics(ListConfig::default(), graphics.iter().cloned());

    thread::scope(|s| {
        s.spawn(|| {
            for round in 0..ROUNDS {
                let g = &graphics[round % graphics.len()];
                list.do_action(Some(g), ActionMask::DELETE).unwrap();
                list.do_action(Some(g), ActionMask::ADD | ActionMask::RAISE_TO_TOP)
                    .unwrap();
                list.move_indexed_one_to_back(round % 5);
            }
        });
        s.spawn(|| {
            for round in 0..ROUNDS {
                let x = (round % 8) as f64 * 20.0 + 5.0;
                let hit = list.find_closest(Point::new(x, 5.0), 1.0);
                // Each box is missing for a moment while it is re-added, but
                // never within a single action.
                if let Some(hit) = hit {
                    assert_eq!(hit.distance, 0.0);
                    assert!(hit.index < graphics.len());
                    assert!(graphics.iter().any(|g| same_graphic(&**g, &*hit.graphic)));
                }
                assert!(list.len() >= graphics.len() - 1);
            }
        });
    });

    assert_eq!(list.len(), graphics.len());
    for g in &graphics {
        assert!(list.contains_graphic(&**g));
    }
}

#[test]
fn action_batches_are_atomic() {
    let graphics: Vec<_> = (0..6).map(|i| filled_box(i as f64 * 20.0)).collect();
    let list = GraphicList::from_graphics(ListConfig::default(), graphics.iter().cloned());
    list.do_action(Some(&graphics[0]), ActionMask::SELECT).unwrap();

    thread::scope(|s| {
        for offset in 0..2 {
            let list = &list;
            let graphics = &graphics;
            s.spawn(move || {
                for round in 0..ROUNDS {
                    let g = &graphics[(round * 2 + offset) % graphics.len()];
                    list.do_action(Some(g), ActionMask::DESELECT_ALL | ActionMask::SELECT)
                        .unwrap();
                }
            });
        }
        s.spawn(|| {
            for _ in 0..ROUNDS {
                assert_eq!(list.selected().len(), 1, "never between deselect and select");
            }
        });
    });

    assert_eq!(list.selected().len(), 1);
}

#[test]
fn select_closest_races_with_edits() {
    let graphics: Vec<_> = (0..4).map(|i| filled_box(i as f64 * 20.0)).collect();
    let list = GraphicList::from_graphics(ListConfig::default(), graphics.iter().cloned());

    thread::scope(|s| {
        s.spawn(|| {
            for round in 0..ROUNDS {
                list.move_indexed_to_top(round % graphics.len());
                list.deselect_all();
            }
        });
        s.spawn(|| {
            for round in 0..ROUNDS {
                let x = (round % 4) as f64 * 20.0 + 5.0;
                let picked = list.select_closest(Point::new(x, 5.0), 1.0);
                let picked = picked.expect("every box stays in the list");
                assert!(same_graphic(&*picked, &*graphics[round % 4]));
            }
        });
    });
}

#[test]
fn nested_groups_toggle_while_queried() {
    let symbol = GraphicList::with_config(ListConfig {
        vague: true,
        ..Default::default()
    });
    symbol.add(filled_box(0.0));
    symbol.add(filled_box(20.0));
    let layer = GraphicList::new();
    layer.add(symbol.clone());
    layer.add(filled_box(100.0));

    thread::scope(|s| {
        s.spawn(|| {
            for round in 0..ROUNDS {
                symbol.set_visible(round % 2 == 0);
            }
        });
        s.spawn(|| {
            for _ in 0..ROUNDS {
                if let Some(hit) = layer.find_closest(Point::new(25.0, 5.0), 1.0) {
                    assert!(same_graphic(&*hit.graphic, &*symbol));
                    assert_eq!(hit.index, 0);
                }
                let far = layer.find_closest(Point::new(105.0, 5.0), 1.0).unwrap();
                assert_eq!(far.index, 1);
            }
        });
    });
}

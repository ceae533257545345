// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_graphic_list --heading-base-level=0

//! Understory Graphic List: an ordered, nestable collection of map graphics with spatial queries.
//!
//! Understory Graphic List is the container a map layer keeps its drawables in.
//!
//! - Holds an ordered sequence of graphics, where a graphic is either a leaf shape or another list.
//! - Answers "which graphic is closest to this screen point", "which contains it", and "which lie within a tolerance".
//! - Renders in back-to-front order and hit-tests in front-to-back order, so what you see on top is what you pick.
//! - Applies batched edits (add, delete, raise, lower, select, sort) through a single [`ActionMask`] call.
//!
//! Lists are shared between an editing thread and a rendering or picking thread, so every list
//! guards its own state with a lock and is handed around as an [`Arc<GraphicList>`](alloc::sync::Arc).
//!
//! ## Ordering
//!
//! Each list has a [`TraversalPolicy`] that says which end of the sequence is on top.
//! Under [`FirstOnTop`](TraversalPolicy::FirstOnTop) index `0` is topmost; under
//! [`LastOnTop`](TraversalPolicy::LastOnTop) the last index is.
//! Rendering paints the topmost entry last, and every query tests the topmost entry first.
//! A candidate only replaces the current best when strictly closer, so exact ties go to the topmost graphic.
//!
//! ## Groups and vagueness
//!
//! A list can be added to another list; queries descend into it and report the leaf that matched,
//! together with the index of the entry in the list that was queried.
//! A list configured as vague instead reports itself whenever something inside it matches,
//! which makes a compound symbol behave as one pickable unit.
//!
//! Lists must never contain themselves, directly or indirectly. This is not checked.
//!
//! ## Distances
//!
//! Closest queries rank leaves with [`pick_distance`]: a point inside a filled graphic is at
//! distance `0`, otherwise the distance to the outline is used, less half the stroke width
//! for strokes wider than one unit.
//!
//! ## API overview
//!
//! - [`GraphicList`]: the collection, with mutation, reordering, selection, cascades, and rendering.
//! - [`Graphic`]: capability trait implemented by leaves and by [`GraphicList`] itself.
//! - [`ShapeGraphic`]: a leaf backed by any [`kurbo::Shape`].
//! - [`Painter`] and [`Projection`]: seams to the rendering backend and the map projection.
//! - [`Hit`]: result of a closest or containing query.
//! - [`ActionMask`]: bits for [`GraphicList::do_action`].
//! - [`ListConfig`], [`GraphicStyle`], [`SortFn`]: configuration.
//!
//! Key operations:
//! - [`GraphicList::find_closest`] / [`GraphicList::find_index_of_closest`] → [`Hit`]
//! - [`GraphicList::find_containing`] and [`GraphicList::find_all`]
//! - [`GraphicList::select_closest`]
//! - [`GraphicList::do_action`]
//! - [`GraphicList::render`] and [`GraphicList::generate`]
//!
//! ## Examples
//!
//! - `demos/examples/list_basics.rs`: builds a list, renders it, and runs a few queries.
//! - `demos/examples/nested_vague.rs`: nests a vague group and shows what queries report.
//! - `demos/examples/action_protocol.rs`: drives edits through [`ActionMask`].
//!
//! ### Minimal usage
//!
//! ```
//! use std::sync::Arc;
//! use kurbo::{Point, Rect};
//! use peniko::Color;
//! use understory_graphic_list::{Graphic, GraphicList, GraphicStyle, ShapeGraphic};
//!
//! let list = GraphicList::new();
//!
//! let fill = GraphicStyle::default().with_fill(Color::from_rgb8(0, 120, 200));
//! let a: Arc<dyn Graphic> =
//!     Arc::new(ShapeGraphic::new(Rect::new(0.0, 0.0, 100.0, 100.0)).with_style(fill));
//! let b: Arc<dyn Graphic> = Arc::new(ShapeGraphic::new(Rect::new(150.0, 0.0, 250.0, 100.0)));
//! list.add(a.clone());
//! list.add(b.clone());
//!
//! // Inside the filled box: distance zero.
//! let hit = list.find_closest(Point::new(50.0, 50.0), f64::INFINITY).unwrap();
//! assert_eq!(hit.index, 0);
//! assert_eq!(hit.distance, 0.0);
//!
//! // The unfilled box only counts near its outline.
//! let hit = list.find_closest(Point::new(145.0, 50.0), 10.0).unwrap();
//! assert_eq!(hit.index, 1);
//! assert!(list.find_closest(Point::new(200.0, 50.0), 10.0).is_none());
//! ```
//!
//! ### Vague groups
//!
//! ```
//! use std::sync::Arc;
//! use kurbo::{Circle, Point};
//! use understory_graphic_list::{GraphicList, ListConfig, ShapeGraphic, same_graphic};
//!
//! let symbol = GraphicList::with_config(ListConfig { vague: true, ..Default::default() });
//! symbol.add(Arc::new(ShapeGraphic::new(Circle::new((10.0, 10.0), 4.0))));
//! symbol.add(Arc::new(ShapeGraphic::new(Circle::new((20.0, 10.0), 4.0))));
//!
//! let layer = GraphicList::new();
//! layer.add(symbol.clone());
//!
//! let hit = layer.find_closest(Point::new(20.0, 15.0), 5.0).unwrap();
//! assert!(same_graphic(&*hit.graphic, &*symbol));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod action;
mod error;
mod graphic;
mod list;
mod query;
mod shape;
mod types;

pub use error::GraphicListError;
pub use graphic::{Graphic, Painter, Projection, pick_distance, same_graphic};
pub use list::GraphicList;
pub use shape::ShapeGraphic;
pub use types::{
    ActionMask, GraphicStyle, Hit, ListConfig, SortFn, Traversal, TraversalPolicy,
};

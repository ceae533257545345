// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The capability interface shared by leaf graphics and nested lists, plus the
//! narrow drawing and projection seams supplied by the embedding application.

use core::fmt::Debug;

use kurbo::{Affine, BezPath, Point};
use peniko::Color;

use crate::list::GraphicList;
use crate::types::GraphicStyle;

/// A drawable unit held by a [`GraphicList`].
///
/// Leaves implement the shape tests; groups are themselves `GraphicList`s and
/// answer [`as_list`](Self::as_list) so the list can recurse into them with its
/// own query entry points.
///
/// All methods take `&self` because graphics are shared between the thread that
/// edits a list and the thread that renders or hit-tests it. Implementations
/// keep their mutable state behind their own lock.
///
/// Selection is deliberately absent: it is owned by the list holding the
/// graphic and passed to [`paint`](Self::paint).
pub trait Graphic: Send + Sync + Debug {
    /// Whether the graphic participates in rendering and queries.
    fn is_visible(&self) -> bool;

    /// Show or hide the graphic.
    fn set_visible(&self, visible: bool);

    /// Current rendering attributes.
    fn style(&self) -> GraphicStyle;

    /// Replace the rendering attributes.
    fn set_style(&self, style: &GraphicStyle);

    /// Whether `pt` (screen space) falls inside the graphic's shape.
    fn contains(&self, pt: Point) -> bool;

    /// Shortest distance from `pt` (screen space) to the graphic's outline.
    ///
    /// Return `f64::INFINITY` when the graphic has no screen representation.
    fn distance_to_edge(&self, pt: Point) -> f64;

    /// Paint the graphic. `selected` comes from the owning list.
    fn paint(&self, painter: &mut dyn Painter, selected: bool);

    /// Recompute the screen-space representation for a new projection.
    ///
    /// Returns true if the graphic can be rendered under `projection`.
    fn generate(&self, projection: &dyn Projection) -> bool;

    /// Returns the list if this graphic is a group.
    fn as_list(&self) -> Option<&GraphicList> {
        None
    }
}

/// Draw context handed to [`Graphic::paint`].
///
/// Implemented by the rendering backend; the list only forwards it.
pub trait Painter {
    /// Fill the interior of `path`.
    fn fill_path(&mut self, path: &BezPath, color: Color);

    /// Stroke the outline of `path`.
    fn stroke_path(&mut self, path: &BezPath, color: Color, width: f64);
}

/// Maps world coordinates to screen space for [`Graphic::generate`].
pub trait Projection {
    /// Project a world-space point, or `None` if it is not representable.
    fn forward(&self, world: Point) -> Option<Point>;
}

/// Planar projection: an affine map from world to screen space.
impl Projection for Affine {
    fn forward(&self, world: Point) -> Option<Point> {
        let p = *self * world;
        (p.x.is_finite() && p.y.is_finite()).then_some(p)
    }
}

/// Returns true if `a` and `b` are the same graphic object.
///
/// Lists compare entries by identity, never by value.
pub fn same_graphic(a: &dyn Graphic, b: &dyn Graphic) -> bool {
    core::ptr::addr_eq(core::ptr::from_ref(a), core::ptr::from_ref(b))
}

/// Distance used to rank a leaf graphic in closest queries.
///
/// - `0` when `pt` is inside a graphic with a non-clear fill.
/// - Otherwise the distance to the outline, less half the stroke width
///   (floored at `0`) for strokes wider than one unit.
///
/// Interior points always report `0`, however close they are to the edge.
pub fn pick_distance(graphic: &dyn Graphic, pt: Point) -> f64 {
    let style = graphic.style();
    if style.is_filled() && graphic.contains(pt) {
        return 0.0;
    }
    let distance = graphic.distance_to_edge(pt);
    if style.stroke_width > 1.0 {
        (distance - style.stroke_width / 2.0).max(0.0)
    } else {
        distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::ShapeGraphic;
    use kurbo::{Rect, Vec2};

    #[test]
    fn filled_interior_is_zero() {
        let g = ShapeGraphic::new(Rect::new(0.0, 0.0, 10.0, 10.0))
            .with_style(GraphicStyle::default().with_fill(Color::from_rgb8(10, 20, 30)));
        assert_eq!(pick_distance(&g, Point::new(5.0, 5.0)), 0.0);
    }

    #[test]
    fn clear_interior_measures_to_edge() {
        let g = ShapeGraphic::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        let d = pick_distance(&g, Point::new(5.0, 3.0));
        assert!((d - 3.0).abs() < 1e-6, "distance to nearest edge, got {d}");
    }

    #[test]
    fn wide_stroke_grants_tolerance() {
        let g = ShapeGraphic::new(Rect::new(0.0, 0.0, 10.0, 10.0))
            .with_style(GraphicStyle::default().with_stroke(Color::BLACK, 4.0));
        let d = pick_distance(&g, Point::new(15.0, 5.0));
        assert!((d - 3.0).abs() < 1e-6, "5 units away minus half of 4, got {d}");
        let d = pick_distance(&g, Point::new(11.0, 5.0));
        assert_eq!(d, 0.0, "tolerance floors at zero");
    }

    #[test]
    fn thin_stroke_grants_no_tolerance() {
        let g = ShapeGraphic::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        let d = pick_distance(&g, Point::new(12.0, 5.0));
        assert!((d - 2.0).abs() < 1e-6, "got {d}");
    }

    #[test]
    fn affine_projection_maps_points() {
        let proj = Affine::translate(Vec2::new(5.0, -5.0));
        assert_eq!(proj.forward(Point::new(1.0, 1.0)), Some(Point::new(6.0, -4.0)));
        let degenerate = Affine::scale(f64::INFINITY);
        assert_eq!(degenerate.forward(Point::new(1.0, 1.0)), None);
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A reference leaf graphic backed by a Kurbo path.
//!
//! Real map layers bring their own graphics (polygons, arcs, rasters, text).
//! `ShapeGraphic` is the smallest useful leaf: any [`kurbo::Shape`] in world
//! coordinates, projected point by point into screen space.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{BezPath, ParamCurveNearest, PathEl, Point, Shape};
use spin::Mutex;

use crate::graphic::{Graphic, Painter, Projection};
use crate::types::GraphicStyle;

/// Flattening tolerance used when converting shapes to paths.
const PATH_TOLERANCE: f64 = 0.1;
/// Accuracy passed to [`ParamCurveNearest::nearest`] for curved segments.
const NEAREST_ACCURACY: f64 = 1e-6;

/// A leaf graphic drawn from a world-space path.
///
/// Until [`generate`](Graphic::generate) is called the screen path equals the
/// world path, which makes the type convenient for screen-space overlays.
/// If a projection cannot place every point, the graphic has no screen
/// representation: it contains nothing, is infinitely far away, and paints
/// nothing, until a later projection succeeds.
#[derive(Debug)]
pub struct ShapeGraphic {
    state: Mutex<ShapeState>,
}

#[derive(Clone, Debug)]
struct ShapeState {
    world: BezPath,
    screen: Option<BezPath>,
    style: GraphicStyle,
    visible: bool,
}

impl ShapeGraphic {
    /// Create a visible graphic with the default style.
    pub fn new(shape: impl Shape) -> Self {
        let world = shape.into_path(PATH_TOLERANCE);
        Self {
            state: Mutex::new(ShapeState {
                screen: Some(world.clone()),
                world,
                style: GraphicStyle::default(),
                visible: true,
            }),
        }
    }

    /// Returns this graphic with the given style.
    #[must_use]
    pub fn with_style(mut self, style: GraphicStyle) -> Self {
        self.state.get_mut().style = style;
        self
    }

    /// Replace the world-space shape. The screen path follows on the next
    /// [`generate`](Graphic::generate); until then it is the new world path.
    pub fn set_shape(&self, shape: impl Shape) {
        let world = shape.into_path(PATH_TOLERANCE);
        let mut state = self.state.lock();
        state.screen = Some(world.clone());
        state.world = world;
    }

    /// The world-space path.
    pub fn world_path(&self) -> BezPath {
        self.state.lock().world.clone()
    }

    /// The screen-space path, if the last projection succeeded.
    pub fn screen_path(&self) -> Option<BezPath> {
        self.state.lock().screen.clone()
    }
}

impl Graphic for ShapeGraphic {
    fn is_visible(&self) -> bool {
        self.state.lock().visible
    }

    fn set_visible(&self, visible: bool) {
        self.state.lock().visible = visible;
    }

    fn style(&self) -> GraphicStyle {
        self.state.lock().style
    }

    fn set_style(&self, style: &GraphicStyle) {
        self.state.lock().style = *style;
    }

    fn contains(&self, pt: Point) -> bool {
        self.state
            .lock()
            .screen
            .as_ref()
            .is_some_and(|path| path.contains(pt))
    }

    fn distance_to_edge(&self, pt: Point) -> f64 {
        let state = self.state.lock();
        let Some(path) = state.screen.as_ref() else {
            return f64::INFINITY;
        };
        path.segments()
            .map(|seg| seg.nearest(pt, NEAREST_ACCURACY).distance_sq)
            .fold(f64::INFINITY, f64::min)
            .sqrt()
    }

    fn paint(&self, painter: &mut dyn Painter, selected: bool) {
        // The painter runs without the lock held.
        let (path, style) = {
            let state = self.state.lock();
            if !state.visible {
                return;
            }
            let Some(path) = state.screen.clone() else {
                return;
            };
            (path, state.style)
        };
        if style.is_filled()
            && let Some(fill) = style.fill
        {
            painter.fill_path(&path, fill);
        }
        if let Some(outline) = style.outline(selected) {
            painter.stroke_path(&path, outline, style.stroke_width);
        }
    }

    fn generate(&self, projection: &dyn Projection) -> bool {
        let mut state = self.state.lock();
        state.screen = project_path(&state.world, projection);
        if state.screen.is_none() {
            log::debug!("shape could not be projected; it will not render");
        }
        state.screen.is_some()
    }
}

fn project_path(path: &BezPath, projection: &dyn Projection) -> Option<BezPath> {
    let mut out = BezPath::new();
    for el in path.elements() {
        let el = match *el {
            PathEl::MoveTo(p) => PathEl::MoveTo(projection.forward(p)?),
            PathEl::LineTo(p) => PathEl::LineTo(projection.forward(p)?),
            PathEl::QuadTo(p1, p2) => {
                PathEl::QuadTo(projection.forward(p1)?, projection.forward(p2)?)
            }
            PathEl::CurveTo(p1, p2, p3) => PathEl::CurveTo(
                projection.forward(p1)?,
                projection.forward(p2)?,
                projection.forward(p3)?,
            ),
            PathEl::ClosePath => PathEl::ClosePath,
        };
        out.push(el);
    }
    Some(out)
}

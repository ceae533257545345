// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the graphic list: traversal policy, action masks, hits, and style.

use alloc::sync::Arc;
use core::cmp::Ordering;
use core::ops::Range;

use peniko::Color;

use crate::graphic::Graphic;

/// Which end of a [`GraphicList`](crate::GraphicList) is considered on top.
///
/// The policy is consulted by everything that has a notion of front/back:
///
/// - Rendering visits entries so the topmost is painted last.
/// - Hit testing visits entries so the topmost is tested first, which makes
///   exact ties resolve to the visually topmost entry.
/// - "Move to top" means move to the front of the sequence under
///   [`FirstOnTop`](Self::FirstOnTop) and to the back under
///   [`LastOnTop`](Self::LastOnTop); "move to bottom" is the inverse.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TraversalPolicy {
    /// The earliest inserted entry is topmost.
    #[default]
    FirstOnTop,
    /// The most recently inserted entry is topmost.
    LastOnTop,
}

impl TraversalPolicy {
    /// Returns true if the front of the sequence (index `0`) is the top.
    #[inline]
    pub const fn top_is_front(self) -> bool {
        matches!(self, Self::FirstOnTop)
    }

    /// Entry indices in hit-test order: topmost first.
    pub fn hit_order(self, len: usize) -> Traversal {
        Traversal {
            range: 0..len,
            reverse: !self.top_is_front(),
        }
    }

    /// Entry indices in paint order: topmost last.
    ///
    /// Always the exact reverse of [`hit_order`](Self::hit_order) for the same length.
    pub fn paint_order(self, len: usize) -> Traversal {
        Traversal {
            range: 0..len,
            reverse: self.top_is_front(),
        }
    }
}

/// Iterator over entry indices in a direction chosen by [`TraversalPolicy`].
#[derive(Clone, Debug)]
pub struct Traversal {
    range: Range<usize>,
    reverse: bool,
}

impl Iterator for Traversal {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.reverse {
            self.range.next_back()
        } else {
            self.range.next()
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl DoubleEndedIterator for Traversal {
    fn next_back(&mut self) -> Option<usize> {
        if self.reverse {
            self.range.next()
        } else {
            self.range.next_back()
        }
    }
}

impl ExactSizeIterator for Traversal {}

bitflags::bitflags! {
    /// A batch of mutations requested in a single [`GraphicList::do_action`](crate::GraphicList::do_action) call.
    ///
    /// Bits may be combined freely. The list always applies them in the fixed
    /// order documented on [`do_action`](crate::GraphicList::do_action), so for
    /// example `ADD | RAISE_TO_TOP` adds a graphic and then brings it to the top.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ActionMask: u16 {
        /// Insert the graphic (subject to the duplicate policy).
        const ADD             = 1 << 0;
        /// Insert the graphic only if it is not already present.
        const UPDATE          = 1 << 1;
        /// Remove the graphic.
        const DELETE          = 1 << 2;
        /// Move the graphic one slot toward the top.
        const RAISE           = 1 << 3;
        /// Move the graphic all the way to the top.
        const RAISE_TO_TOP    = 1 << 4;
        /// Move the graphic one slot toward the bottom.
        const LOWER           = 1 << 5;
        /// Move the graphic all the way to the bottom.
        const LOWER_TO_BOTTOM = 1 << 6;
        /// Clear the selection of every entry.
        const DESELECT_ALL    = 1 << 7;
        /// Mark the graphic selected.
        const SELECT          = 1 << 8;
        /// Clear the graphic's selection.
        const DESELECT        = 1 << 9;
        /// Reorder the entries with the list's sort policy, if any.
        const SORT            = 1 << 10;
    }
}

impl ActionMask {
    /// Bits that need a graphic to act on; everything else applies to the whole list.
    pub const GRAPHIC_SPECIFIC: Self = Self::ADD
        .union(Self::UPDATE)
        .union(Self::DELETE)
        .union(Self::RAISE)
        .union(Self::RAISE_TO_TOP)
        .union(Self::LOWER)
        .union(Self::LOWER_TO_BOTTOM)
        .union(Self::SELECT)
        .union(Self::DESELECT);
}

/// The outcome of a closest or containment query.
///
/// Created fresh for every query; `index` refers to the position in the list
/// that was queried at the instant of the query, and any later mutation of that
/// list invalidates it.
#[derive(Clone, Debug)]
pub struct Hit {
    /// The matched graphic. For a vague group this is the group itself.
    pub graphic: Arc<dyn Graphic>,
    /// Distance from the query point, `0.0` for interior hits.
    pub distance: f64,
    /// Index of the matching entry in the queried list.
    pub index: usize,
}

/// Rendering attributes cascaded through a list with
/// [`GraphicList::set_style`](crate::GraphicList::set_style).
///
/// The fill and stroke width also feed the closest-distance rule: a point
/// inside a graphic with a non-clear fill is at distance `0`, and strokes
/// wider than one unit grant half their width as click tolerance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphicStyle {
    /// Interior paint. `None` or a fully transparent colour means "clear".
    pub fill: Option<Color>,
    /// Outline paint.
    pub stroke: Option<Color>,
    /// Outline width in screen units.
    pub stroke_width: f64,
    /// Outline paint used while selected; falls back to `stroke`.
    pub select_stroke: Option<Color>,
}

impl Default for GraphicStyle {
    fn default() -> Self {
        Self {
            fill: None,
            stroke: Some(Color::BLACK),
            stroke_width: 1.0,
            select_stroke: None,
        }
    }
}

impl GraphicStyle {
    /// Returns true if the fill paints anything.
    pub fn is_filled(&self) -> bool {
        self.fill.is_some_and(|c| c.components[3] > 0.0)
    }

    /// Returns this style with the given fill.
    #[must_use]
    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    /// Returns this style with the given stroke paint and width.
    #[must_use]
    pub fn with_stroke(mut self, stroke: Color, width: f64) -> Self {
        self.stroke = Some(stroke);
        self.stroke_width = width;
        self
    }

    /// The outline paint to use for the given selection state.
    pub fn outline(&self, selected: bool) -> Option<Color> {
        if selected {
            self.select_stroke.or(self.stroke)
        } else {
            self.stroke
        }
    }
}

/// Comparison used by [`ActionMask::SORT`].
pub type SortFn = fn(&dyn Graphic, &dyn Graphic) -> Ordering;

/// Construction-time configuration for a [`GraphicList`](crate::GraphicList).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListConfig {
    /// Which end of the list is on top.
    pub traversal: TraversalPolicy,
    /// Whether queries from outside report the list itself instead of the
    /// interior graphic that matched.
    pub vague: bool,
    /// Whether the same graphic (by identity) may appear more than once.
    ///
    /// Allowing duplicates skips the identity scan on every insert.
    pub allow_duplicates: bool,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            traversal: TraversalPolicy::FirstOnTop,
            vague: false,
            allow_duplicates: true,
        }
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spatial queries: closest, containing, all-within, and select-closest.
//!
//! Every query walks entries topmost-first (see [`TraversalPolicy::hit_order`]),
//! skips hidden leaves, and descends into nested lists through their own query
//! entry points. A candidate replaces the current best only when it is strictly
//! closer, so exact ties go to the topmost entry; a distance of `0` ends the
//! walk early.
//!
//! [`TraversalPolicy::hit_order`]: crate::TraversalPolicy::hit_order

use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;

use kurbo::Point;

use crate::graphic::{Graphic, pick_distance};
use crate::list::{Entry, GraphicList, Snapshot};
use crate::types::Hit;

/// Best distance for one entry: the leaf itself, or whatever the nested list reports.
fn closest_of(entry: &Entry, pt: Point, limit: f64) -> Option<(Arc<dyn Graphic>, f64)> {
    if entry.is_skipped() {
        return None;
    }
    match entry.graphic.as_list() {
        Some(list) => list.find_closest(pt, limit).map(|hit| (hit.graphic, hit.distance)),
        None => Some((entry.graphic.clone(), pick_distance(&*entry.graphic, pt))),
    }
}

fn containing_of(entry: &Entry, pt: Point) -> Option<Arc<dyn Graphic>> {
    if entry.is_skipped() {
        return None;
    }
    match entry.graphic.as_list() {
        Some(list) => list.find_containing(pt).map(|hit| hit.graphic),
        None => entry.graphic.contains(pt).then(|| entry.graphic.clone()),
    }
}

impl GraphicList {
    /// A vague list reports itself in place of whatever matched inside it.
    fn report(&self, vague: bool, mut hit: Hit) -> Hit {
        if vague && let Some(me) = self.as_graphic() {
            hit.graphic = me;
        }
        hit
    }

    fn closest_in(snapshot: &Snapshot, pt: Point, limit: f64) -> Option<Hit> {
        if snapshot.is_hidden() {
            return None;
        }
        let mut best: Option<Hit> = None;
        for index in snapshot.traversal.hit_order(snapshot.entries.len()) {
            let Some((graphic, distance)) = closest_of(&snapshot.entries[index], pt, limit) else {
                continue;
            };
            if distance < limit && best.as_ref().is_none_or(|b| distance < b.distance) {
                best = Some(Hit {
                    graphic,
                    distance,
                    index,
                });
                if distance <= 0.0 {
                    break;
                }
            }
        }
        best
    }

    /// The visible graphic closest to `pt`, if any lies strictly within `limit`.
    ///
    /// Filled graphics report distance `0` for interior points; see
    /// [`pick_distance`]. The hit's `index` is the position of the matching
    /// entry in this list, even when the graphic was found in a nested list.
    ///
    /// Pass `f64::INFINITY` for an unbounded search.
    pub fn find_closest(&self, pt: Point, limit: f64) -> Option<Hit> {
        let snapshot = self.snapshot();
        let hit = Self::closest_in(&snapshot, pt, limit)?;
        Some(self.report(snapshot.vague, hit))
    }

    /// Index of the entry holding the closest graphic within `limit`.
    pub fn find_index_of_closest(&self, pt: Point, limit: f64) -> Option<usize> {
        self.find_closest(pt, limit).map(|hit| hit.index)
    }

    /// Distance from `pt` to the closest visible graphic, or `f64::INFINITY`.
    pub fn distance(&self, pt: Point) -> f64 {
        self.find_closest(pt, f64::INFINITY)
            .map_or(f64::INFINITY, |hit| hit.distance)
    }

    /// The topmost visible graphic whose shape contains `pt`.
    ///
    /// The hit's distance is always `0`.
    pub fn find_containing(&self, pt: Point) -> Option<Hit> {
        let snapshot = self.snapshot();
        if snapshot.is_hidden() {
            return None;
        }
        snapshot
            .traversal
            .hit_order(snapshot.entries.len())
            .find_map(|index| {
                containing_of(&snapshot.entries[index], pt).map(|graphic| Hit {
                    graphic,
                    distance: 0.0,
                    index,
                })
            })
            .map(|hit| self.report(snapshot.vague, hit))
    }

    /// Every visible leaf strictly within `limit` of `pt`, topmost first.
    ///
    /// Nested lists are flattened into the result, except that a vague list
    /// with any match contributes only itself.
    pub fn find_all(&self, pt: Point, limit: f64) -> Vec<Arc<dyn Graphic>> {
        let snapshot = self.snapshot();
        if snapshot.is_hidden() {
            return Vec::new();
        }
        let mut out = Vec::new();
        for index in snapshot.traversal.hit_order(snapshot.entries.len()) {
            let entry = &snapshot.entries[index];
            if entry.is_skipped() {
                continue;
            }
            match entry.graphic.as_list() {
                Some(list) => out.extend(list.find_all(pt, limit)),
                None => {
                    if pick_distance(&*entry.graphic, pt) < limit {
                        out.push(entry.graphic.clone());
                    }
                }
            }
        }
        if snapshot.vague
            && !out.is_empty()
            && let Some(me) = self.as_graphic()
        {
            return vec![me];
        }
        out
    }

    /// Find the closest graphic within `limit` and mark it selected.
    ///
    /// Candidates that were the best so far but lost to a closer graphic are
    /// deselected along the way. A nested list that wins makes its own
    /// selection recursively. A vague list that matches selects all of its
    /// entries and returns itself.
    ///
    /// This list stays locked for the whole search and selection, so no edit
    /// can interleave with it.
    pub fn select_closest(&self, pt: Point, limit: f64) -> Option<Arc<dyn Graphic>> {
        let mut state = self.lock();
        if state.config.vague && !state.visible {
            return None;
        }
        let mut best: Option<(usize, f64)> = None;
        for index in state.config.traversal.hit_order(state.entries.len()) {
            let Some((_, distance)) = closest_of(&state.entries[index], pt, limit) else {
                continue;
            };
            if distance < limit && best.is_none_or(|(_, b)| distance < b) {
                if let Some((previous, _)) = best {
                    state.entries[previous].set_selected(false);
                }
                best = Some((index, distance));
                if distance <= 0.0 {
                    break;
                }
            }
        }
        let (winner, _) = best?;

        if state.config.vague {
            state.set_all_selected(true);
            drop(state);
            return self.as_graphic();
        }

        let graphic = state.entries[winner].graphic.clone();
        let picked = match graphic.as_list() {
            Some(list) => list.select_closest(pt, limit),
            None => Some(graphic.clone()),
        };
        // A nested list can change between the scan and its own selection.
        if picked.is_some() {
            state.entries[winner].selected = true;
            log::trace!("selected entry {winner}");
        }
        picked
    }
}

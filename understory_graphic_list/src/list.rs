// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core list implementation: storage, locking, ordering, and cascades.
//!
//! Queries live in `query.rs` and the action protocol in `action.rs`; both are
//! further `impl GraphicList` blocks over the state defined here.

use alloc::sync::{Arc, Weak};
use alloc::vec::Vec;

use kurbo::Point;
use spin::{Mutex, MutexGuard};

use crate::error::GraphicListError;
use crate::graphic::{Graphic, Painter, Projection, same_graphic};
use crate::types::{GraphicStyle, ListConfig, SortFn, TraversalPolicy};

/// One slot of a list: the graphic plus the selection state the list owns for it.
#[derive(Clone, Debug)]
pub(crate) struct Entry {
    pub(crate) graphic: Arc<dyn Graphic>,
    pub(crate) selected: bool,
}

impl Entry {
    fn new(graphic: Arc<dyn Graphic>) -> Self {
        Self {
            graphic,
            selected: false,
        }
    }

    /// Leaves that are hidden are skipped by every traversal. Groups decide
    /// for themselves when recursed into.
    pub(crate) fn is_skipped(&self) -> bool {
        self.graphic.as_list().is_none() && !self.graphic.is_visible()
    }

    /// Set the selection flag; a group is selected or deselected as a whole.
    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
        if let Some(list) = self.graphic.as_list() {
            list.set_all_selected(selected);
        }
    }
}

/// Everything guarded by the list lock.
pub(crate) struct ListState {
    pub(crate) entries: Vec<Entry>,
    pub(crate) config: ListConfig,
    pub(crate) visible: bool,
    pub(crate) style: GraphicStyle,
    pub(crate) sort: Option<SortFn>,
}

impl ListState {
    fn new(config: ListConfig) -> Self {
        Self {
            entries: Vec::new(),
            config,
            visible: true,
            style: GraphicStyle::default(),
            sort: None,
        }
    }

    pub(crate) fn position(&self, graphic: &dyn Graphic) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| same_graphic(&*e.graphic, graphic))
    }

    /// Insert at `index` (already checked against the current length).
    ///
    /// When duplicates are disallowed the prior occurrence is removed first and
    /// `index` is clamped to the shortened list.
    pub(crate) fn insert(&mut self, graphic: Arc<dyn Graphic>, index: usize) {
        let mut index = index;
        if !self.config.allow_duplicates
            && let Some(prior) = self.position(&*graphic)
        {
            log::debug!("replacing duplicate entry at {prior}");
            self.entries.remove(prior);
            index = index.min(self.entries.len());
        }
        log::trace!("insert at {index} of {}", self.entries.len());
        self.entries.insert(index, Entry::new(graphic));
    }

    pub(crate) fn push(&mut self, graphic: Arc<dyn Graphic>) {
        let len = self.entries.len();
        self.insert(graphic, len);
    }

    /// Remove every occurrence of `graphic`; returns true if any was present.
    pub(crate) fn remove_all(&mut self, graphic: &dyn Graphic) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| !same_graphic(&*e.graphic, graphic));
        before != self.entries.len()
    }

    pub(crate) fn move_one_to_front(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.entries.len() {
            log::debug!("move one to front ignored for index {index}");
            return false;
        }
        log::trace!("move {index} one to front");
        self.entries.swap(index, index - 1);
        true
    }

    pub(crate) fn move_one_to_back(&mut self, index: usize) -> bool {
        if index >= self.entries.len().saturating_sub(1) {
            log::debug!("move one to back ignored for index {index}");
            return false;
        }
        log::trace!("move {index} one to back");
        self.entries.swap(index, index + 1);
        true
    }

    pub(crate) fn move_to_first(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.entries.len() {
            log::debug!("move to first ignored for index {index}");
            return false;
        }
        log::trace!("move {index} to first");
        self.entries[..=index].rotate_right(1);
        true
    }

    pub(crate) fn move_to_last(&mut self, index: usize) -> bool {
        if index >= self.entries.len().saturating_sub(1) {
            log::debug!("move to last ignored for index {index}");
            return false;
        }
        log::trace!("move {index} to last");
        self.entries[index..].rotate_left(1);
        true
    }

    pub(crate) fn raise_one(&mut self, index: usize) -> bool {
        if self.config.traversal.top_is_front() {
            self.move_one_to_front(index)
        } else {
            self.move_one_to_back(index)
        }
    }

    pub(crate) fn raise_to_top(&mut self, index: usize) -> bool {
        if self.config.traversal.top_is_front() {
            self.move_to_first(index)
        } else {
            self.move_to_last(index)
        }
    }

    pub(crate) fn lower_one(&mut self, index: usize) -> bool {
        if self.config.traversal.top_is_front() {
            self.move_one_to_back(index)
        } else {
            self.move_one_to_front(index)
        }
    }

    pub(crate) fn lower_to_bottom(&mut self, index: usize) -> bool {
        if self.config.traversal.top_is_front() {
            self.move_to_last(index)
        } else {
            self.move_to_first(index)
        }
    }

    pub(crate) fn set_all_selected(&mut self, selected: bool) {
        for entry in &mut self.entries {
            entry.set_selected(selected);
        }
    }

    /// Stable sort with the configured policy; no-op without one.
    pub(crate) fn sort(&mut self) {
        if let Some(cmp) = self.sort {
            self.entries.sort_by(|a, b| cmp(&*a.graphic, &*b.graphic));
        }
    }
}

/// Entries and settings copied out under the lock for a traversal.
pub(crate) struct Snapshot {
    pub(crate) entries: Vec<Entry>,
    pub(crate) traversal: TraversalPolicy,
    pub(crate) vague: bool,
    pub(crate) visible: bool,
}

impl Snapshot {
    /// A hidden vague group is invisible as a whole; non-vague groups are only
    /// as visible as their members.
    pub(crate) fn is_hidden(&self) -> bool {
        self.vague && !self.visible
    }
}

/// An ordered, possibly nested collection of graphics.
///
/// See the crate documentation for the ordering, vagueness, and locking
/// contracts. Lists are always handled through an [`Arc`] so that the editing
/// and rendering threads can share them and so that a list can be nested in
/// another list as an `Arc<dyn Graphic>`.
///
/// ## Locking
///
/// Each list owns one lock, held for one logical operation. Queries copy the
/// entry sequence under the lock and release it before descending into nested
/// lists, which take their own locks. Nothing spans more than one list
/// atomically except [`select_closest`](Self::select_closest) and
/// [`do_action`](Self::do_action), which hold the lock while they mutate.
///
/// ## Cycles
///
/// A list must never contain itself, directly or through nested lists. This is
/// not checked; violating it recurses without bound (or spins on the list's
/// own lock).
pub struct GraphicList {
    me: Weak<Self>,
    state: Mutex<ListState>,
}

impl core::fmt::Debug for GraphicList {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut s = f.debug_struct("GraphicList");
        match self.state.try_lock() {
            Some(state) => s
                .field("len", &state.entries.len())
                .field("config", &state.config)
                .field("visible", &state.visible)
                .finish_non_exhaustive(),
            None => s.field("state", &"<locked>").finish_non_exhaustive(),
        }
    }
}

impl GraphicList {
    /// Create an empty list with the default [`ListConfig`].
    pub fn new() -> Arc<Self> {
        Self::with_config(ListConfig::default())
    }

    /// Create an empty list with the given configuration.
    pub fn with_config(config: ListConfig) -> Arc<Self> {
        Arc::new_cyclic(|me| Self {
            me: me.clone(),
            state: Mutex::new(ListState::new(config)),
        })
    }

    /// Create a list seeded from existing graphics, in order.
    ///
    /// The duplicate policy of `config` applies while seeding.
    pub fn from_graphics(
        config: ListConfig,
        graphics: impl IntoIterator<Item = Arc<dyn Graphic>>,
    ) -> Arc<Self> {
        let list = Self::with_config(config);
        {
            let mut state = list.lock();
            for graphic in graphics {
                state.push(graphic);
            }
        }
        list
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, ListState> {
        self.state.lock()
    }

    pub(crate) fn snapshot(&self) -> Snapshot {
        let state = self.lock();
        Snapshot {
            entries: state.entries.clone(),
            traversal: state.config.traversal,
            vague: state.config.vague,
            visible: state.visible,
        }
    }

    /// This list as a shared graphic handle, used when a vague list reports itself.
    pub(crate) fn as_graphic(&self) -> Option<Arc<dyn Graphic>> {
        self.me.upgrade().map(|me| me as Arc<dyn Graphic>)
    }

    // --- configuration ---

    /// Current configuration.
    pub fn config(&self) -> ListConfig {
        self.lock().config
    }

    /// Which end of the list is on top.
    pub fn traversal(&self) -> TraversalPolicy {
        self.lock().config.traversal
    }

    /// Change which end of the list is on top. Entries are not reordered.
    pub fn set_traversal(&self, traversal: TraversalPolicy) {
        self.lock().config.traversal = traversal;
    }

    /// Whether the list reports itself instead of interior matches.
    pub fn is_vague(&self) -> bool {
        self.lock().config.vague
    }

    /// Set whether the list reports itself instead of interior matches.
    pub fn set_vague(&self, vague: bool) {
        self.lock().config.vague = vague;
    }

    /// Whether the same graphic may appear more than once.
    pub fn allows_duplicates(&self) -> bool {
        self.lock().config.allow_duplicates
    }

    /// Set the duplicate policy. Existing duplicates are left in place.
    pub fn set_allow_duplicates(&self, allow: bool) {
        self.lock().config.allow_duplicates = allow;
    }

    /// Set the comparison used by [`ActionMask::SORT`](crate::ActionMask::SORT).
    pub fn set_sort_policy(&self, sort: Option<SortFn>) {
        self.lock().sort = sort;
    }

    // --- inspection ---

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Returns true if the list has no entries.
    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// The graphic at `index`, if any.
    pub fn get(&self, index: usize) -> Option<Arc<dyn Graphic>> {
        self.lock().entries.get(index).map(|e| e.graphic.clone())
    }

    /// Position of the first occurrence of `graphic` (by identity).
    pub fn index_of(&self, graphic: &dyn Graphic) -> Option<usize> {
        self.lock().position(graphic)
    }

    /// Returns true if `graphic` (by identity) is an entry of this list.
    pub fn contains_graphic(&self, graphic: &dyn Graphic) -> bool {
        self.index_of(graphic).is_some()
    }

    /// A copy of the entries, front to back.
    pub fn graphics(&self) -> Vec<Arc<dyn Graphic>> {
        self.lock()
            .entries
            .iter()
            .map(|e| e.graphic.clone())
            .collect()
    }

    // --- mutation ---

    /// Append a graphic.
    ///
    /// When duplicates are disallowed, an existing occurrence is removed first
    /// so the graphic ends up at the end.
    pub fn add(&self, graphic: Arc<dyn Graphic>) {
        self.lock().push(graphic);
    }

    /// Insert a graphic before position `index` (`index == len` appends).
    ///
    /// When duplicates are disallowed, an existing occurrence is removed first;
    /// `index` is then clamped to the shortened list.
    pub fn insert_at(
        &self,
        graphic: Arc<dyn Graphic>,
        index: usize,
    ) -> Result<(), GraphicListError> {
        let mut state = self.lock();
        let len = state.entries.len();
        if index > len {
            return Err(GraphicListError::IndexOutOfBounds { index, len });
        }
        state.insert(graphic, index);
        Ok(())
    }

    /// Remove and return the graphic at `index`; `None` if out of range.
    pub fn remove_at(&self, index: usize) -> Option<Arc<dyn Graphic>> {
        let mut state = self.lock();
        if index >= state.entries.len() {
            log::debug!("remove_at ignored for index {index}");
            return None;
        }
        log::trace!("remove at {index}");
        Some(state.entries.remove(index).graphic)
    }

    /// Remove the first occurrence of `graphic`; returns false if it was not present.
    pub fn remove(&self, graphic: &dyn Graphic) -> bool {
        let mut state = self.lock();
        let Some(index) = state.position(graphic) else {
            log::debug!("remove ignored for a graphic not in the list");
            return false;
        };
        log::trace!("remove at {index}");
        state.entries.remove(index);
        true
    }

    /// Replace the graphic at `index`, returning the previous one.
    ///
    /// The new entry starts deselected. Returns `None` (and changes nothing)
    /// if `index` is out of range.
    pub fn replace_at(
        &self,
        index: usize,
        graphic: Arc<dyn Graphic>,
    ) -> Option<Arc<dyn Graphic>> {
        let mut state = self.lock();
        let slot = state.entries.get_mut(index)?;
        log::trace!("replace at {index}");
        Some(core::mem::replace(slot, Entry::new(graphic)).graphic)
    }

    /// Remove every entry.
    pub fn clear(&self) {
        log::trace!("clear");
        self.lock().entries.clear();
    }

    /// Move `graphic` from this list to the end of `target`.
    ///
    /// Returns false (and leaves `target` untouched) if `graphic` is not in
    /// this list. The two lists are locked one after the other, never together.
    pub fn transfer(&self, graphic: &Arc<dyn Graphic>, target: &Self) -> bool {
        if !self.remove(&**graphic) {
            return false;
        }
        target.add(graphic.clone());
        true
    }

    // --- reordering ---

    /// Swap the entry at `index` with the one before it.
    ///
    /// No-op (returns false) at index `0` or out of range.
    pub fn move_indexed_one_to_front(&self, index: usize) -> bool {
        self.lock().move_one_to_front(index)
    }

    /// Swap the entry at `index` with the one after it.
    ///
    /// No-op (returns false) at the last index or out of range.
    pub fn move_indexed_one_to_back(&self, index: usize) -> bool {
        self.lock().move_one_to_back(index)
    }

    /// Move the entry at `index` to position `0`, sliding the others back.
    pub fn move_indexed_to_first(&self, index: usize) -> bool {
        self.lock().move_to_first(index)
    }

    /// Move the entry at `index` to the end, sliding the others forward.
    pub fn move_indexed_to_last(&self, index: usize) -> bool {
        self.lock().move_to_last(index)
    }

    /// Move the entry at `index` one slot toward the top, per the traversal policy.
    pub fn move_indexed_one_to_top(&self, index: usize) -> bool {
        self.lock().raise_one(index)
    }

    /// Move the entry at `index` one slot toward the bottom, per the traversal policy.
    pub fn move_indexed_one_to_bottom(&self, index: usize) -> bool {
        self.lock().lower_one(index)
    }

    /// Move the entry at `index` to the top, per the traversal policy.
    pub fn move_indexed_to_top(&self, index: usize) -> bool {
        self.lock().raise_to_top(index)
    }

    /// Move the entry at `index` to the bottom, per the traversal policy.
    pub fn move_indexed_to_bottom(&self, index: usize) -> bool {
        self.lock().lower_to_bottom(index)
    }

    // --- selection ---

    /// Returns true if `graphic`'s entry in this list is selected.
    pub fn is_selected(&self, graphic: &dyn Graphic) -> bool {
        let state = self.lock();
        state
            .position(graphic)
            .is_some_and(|i| state.entries[i].selected)
    }

    /// The selected entries, front to back.
    pub fn selected(&self) -> Vec<Arc<dyn Graphic>> {
        self.lock()
            .entries
            .iter()
            .filter(|e| e.selected)
            .map(|e| e.graphic.clone())
            .collect()
    }

    /// Select every entry, recursing into nested lists.
    pub fn select_all(&self) {
        self.set_all_selected(true);
    }

    /// Deselect every entry, recursing into nested lists.
    pub fn deselect_all(&self) {
        self.set_all_selected(false);
    }

    pub(crate) fn set_all_selected(&self, selected: bool) {
        self.lock().set_all_selected(selected);
    }

    // --- cascades ---

    /// Whether the list takes part in rendering and queries.
    ///
    /// A vague list answers with its own flag; otherwise the list is visible
    /// if any of its entries is.
    pub fn is_visible(&self) -> bool {
        let snapshot = self.snapshot();
        if snapshot.vague {
            snapshot.visible
        } else {
            snapshot.entries.iter().any(|e| e.graphic.is_visible())
        }
    }

    /// Set the list's own visibility and cascade it to every entry.
    pub fn set_visible(&self, visible: bool) {
        self.lock().visible = visible;
        for entry in self.snapshot().entries {
            entry.graphic.set_visible(visible);
        }
    }

    /// The list's default style.
    pub fn style(&self) -> GraphicStyle {
        self.lock().style
    }

    /// Set the list's default style and cascade it to every entry.
    ///
    /// Nested lists receive the style too, vague or not.
    pub fn set_style(&self, style: &GraphicStyle) {
        self.lock().style = *style;
        for entry in self.snapshot().entries {
            entry.graphic.set_style(style);
        }
    }

    // --- rendering ---

    /// Paint visible entries so the topmost is painted last.
    pub fn render(&self, painter: &mut dyn Painter) {
        let snapshot = self.snapshot();
        if snapshot.is_hidden() {
            return;
        }
        for i in snapshot.traversal.paint_order(snapshot.entries.len()) {
            let entry = &snapshot.entries[i];
            if entry.is_skipped() {
                continue;
            }
            entry.graphic.paint(painter, entry.selected);
        }
    }

    /// Ask every entry to recompute its screen representation.
    ///
    /// Returns true if at least one entry can be rendered.
    pub fn generate(&self, projection: &dyn Projection) -> bool {
        let mut any = false;
        for entry in self.snapshot().entries {
            any |= entry.graphic.generate(projection);
        }
        any
    }
}

impl Graphic for GraphicList {
    fn is_visible(&self) -> bool {
        Self::is_visible(self)
    }

    fn set_visible(&self, visible: bool) {
        Self::set_visible(self, visible);
    }

    fn style(&self) -> GraphicStyle {
        Self::style(self)
    }

    fn set_style(&self, style: &GraphicStyle) {
        Self::set_style(self, style);
    }

    fn contains(&self, pt: Point) -> bool {
        self.find_containing(pt).is_some()
    }

    fn distance_to_edge(&self, pt: Point) -> f64 {
        self.distance(pt)
    }

    fn paint(&self, painter: &mut dyn Painter, _selected: bool) {
        self.render(painter);
    }

    fn generate(&self, projection: &dyn Projection) -> bool {
        Self::generate(self, projection)
    }

    fn as_list(&self) -> Option<&Self> {
        Some(self)
    }
}

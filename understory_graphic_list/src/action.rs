// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Batched mutations addressed by an [`ActionMask`].

use alloc::sync::Arc;

use crate::error::GraphicListError;
use crate::graphic::Graphic;
use crate::list::GraphicList;
use crate::types::ActionMask;

impl GraphicList {
    /// Apply every action in `mask` to `graphic` as one atomic edit.
    ///
    /// Steps run in this order regardless of how the bits were combined:
    ///
    /// 1. [`ADD`](ActionMask::ADD), or [`UPDATE`](ActionMask::UPDATE) when the
    ///    graphic is not present: append it (subject to the duplicate policy).
    /// 2. [`DELETE`](ActionMask::DELETE): remove every occurrence. The
    ///    remaining graphic-specific steps are skipped; list-wide steps still run.
    /// 3. [`RAISE`](ActionMask::RAISE), then [`RAISE_TO_TOP`](ActionMask::RAISE_TO_TOP).
    /// 4. [`LOWER`](ActionMask::LOWER), then [`LOWER_TO_BOTTOM`](ActionMask::LOWER_TO_BOTTOM).
    /// 5. [`DESELECT_ALL`](ActionMask::DESELECT_ALL).
    /// 6. [`SELECT`](ActionMask::SELECT), then [`DESELECT`](ActionMask::DESELECT).
    /// 7. [`SORT`](ActionMask::SORT), if a sort policy is configured.
    ///
    /// Steps that target a graphic which is not in the list are no-ops. The
    /// position of the graphic is looked up again before each step.
    ///
    /// Passing `None` with a mask that only holds list-wide bits is fine.
    /// Asking to insert without a graphic fails with
    /// [`GraphicListError::MissingGraphic`] and changes nothing.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use kurbo::Rect;
    /// use understory_graphic_list::{ActionMask, Graphic, GraphicList, ShapeGraphic};
    ///
    /// let list = GraphicList::new();
    /// list.add(Arc::new(ShapeGraphic::new(Rect::new(0.0, 0.0, 1.0, 1.0))));
    /// let g: Arc<dyn Graphic> = Arc::new(ShapeGraphic::new(Rect::new(2.0, 0.0, 3.0, 1.0)));
    ///
    /// list.do_action(Some(&g), ActionMask::ADD | ActionMask::RAISE_TO_TOP | ActionMask::SELECT)
    ///     .unwrap();
    /// assert_eq!(list.index_of(&*g), Some(0));
    /// assert!(list.is_selected(&*g));
    /// ```
    pub fn do_action(
        &self,
        graphic: Option<&Arc<dyn Graphic>>,
        mask: ActionMask,
    ) -> Result<(), GraphicListError> {
        if mask.is_empty() {
            return Ok(());
        }
        let mut state = self.lock();

        let Some(graphic) = graphic else {
            if mask.intersects(ActionMask::ADD | ActionMask::UPDATE) {
                log::warn!("do_action {mask:?} without a graphic to insert");
                return Err(GraphicListError::MissingGraphic(mask));
            }
            if mask.intersects(ActionMask::GRAPHIC_SPECIFIC) {
                log::debug!("do_action {mask:?} without a graphic; only list-wide bits apply");
            }
            if mask.contains(ActionMask::DESELECT_ALL) {
                state.set_all_selected(false);
            }
            if mask.contains(ActionMask::SORT) {
                state.sort();
            }
            return Ok(());
        };
        log::trace!("do_action {mask:?}");

        if mask.contains(ActionMask::ADD)
            || (mask.contains(ActionMask::UPDATE) && state.position(&**graphic).is_none())
        {
            state.push(graphic.clone());
        }

        if mask.contains(ActionMask::DELETE) {
            if state.remove_all(&**graphic) {
                log::trace!("deleted graphic");
            }
        } else {
            if mask.contains(ActionMask::RAISE)
                && let Some(index) = state.position(&**graphic)
            {
                state.raise_one(index);
            }
            if mask.contains(ActionMask::RAISE_TO_TOP)
                && let Some(index) = state.position(&**graphic)
            {
                state.raise_to_top(index);
            }
            if mask.contains(ActionMask::LOWER)
                && let Some(index) = state.position(&**graphic)
            {
                state.lower_one(index);
            }
            if mask.contains(ActionMask::LOWER_TO_BOTTOM)
                && let Some(index) = state.position(&**graphic)
            {
                state.lower_to_bottom(index);
            }
        }

        if mask.contains(ActionMask::DESELECT_ALL) {
            state.set_all_selected(false);
        }

        if !mask.contains(ActionMask::DELETE) {
            if mask.contains(ActionMask::SELECT)
                && let Some(index) = state.position(&**graphic)
            {
                state.entries[index].set_selected(true);
            }
            if mask.contains(ActionMask::DESELECT)
                && let Some(index) = state.position(&**graphic)
            {
                state.entries[index].set_selected(false);
            }
        }

        if mask.contains(ActionMask::SORT) {
            state.sort();
        }
        Ok(())
    }
}

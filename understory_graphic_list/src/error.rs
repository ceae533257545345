// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by list mutations.

use thiserror::Error;

use crate::types::ActionMask;

/// Invalid arguments passed to a mutating [`GraphicList`](crate::GraphicList) operation.
///
/// Removing a missing graphic or reordering past either end is not an error;
/// those operations report a no-op through their return value.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GraphicListError {
    /// An insertion position was past the end of the list.
    #[error("insertion index {index} is out of bounds for a list of length {len}")]
    IndexOutOfBounds {
        /// Requested position.
        index: usize,
        /// Length of the list at the time of the call.
        len: usize,
    },
    /// An action that inserts a graphic was requested without one.
    #[error("action {0:?} needs a graphic to insert but none was supplied")]
    MissingGraphic(ActionMask),
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The data source contract consumed by the controller.

use kurbo::Size;

use crate::Cell;

/// Supplies items, their geometry, and views to a [`GridController`](crate::GridController).
///
/// The controller queries the item count and every size on each (re)load and
/// never caches them across loads.
pub trait DataSource {
    /// Item payload handed to [`Cell::update_content`].
    type Payload;
    /// View type produced by [`DataSource::create_view`].
    type View: Cell<Self::Payload>;

    /// Number of items.
    fn item_count(&self) -> usize;

    /// Type identifier of the view that renders `index`.
    ///
    /// Views are pooled per identifier, so every view created for an
    /// identifier must be able to render any item that reports it.
    fn cell_type(&self, index: usize) -> &str;

    /// Size of the item at `index`. Both components are expected to be finite.
    fn size(&self, index: usize) -> Size;

    /// Creates a new view for `index`.
    ///
    /// Only called when the pool has no free view of `cell_type`.
    fn create_view(&mut self, index: usize, cell_type: &str) -> Self::View;

    /// Payload for `index`. Sources that let cells fetch their own data
    /// leave this as `None`.
    fn payload(&self, index: usize) -> Option<Self::Payload> {
        let _ = index;
        None
    }
}

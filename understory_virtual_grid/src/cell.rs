// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The contract between the controller and the views it recycles.

use alloc::string::String;

/// A recyclable view.
///
/// A cell instance is reused for many items over its lifetime. The controller
/// calls [`Cell::update_content`] whenever the bound item's content must be
/// (re)rendered, and [`Cell::unbind`] right before the instance goes back into
/// the pool.
pub trait Cell<P> {
    /// Renders the item at `index`.
    ///
    /// `payload` is whatever the [`DataSource`](crate::DataSource) supplies for
    /// `index`; it is `None` when the source does not provide payloads and the
    /// cell fetches its own data.
    ///
    /// This may be called repeatedly for the same index. A cell that starts
    /// asynchronous work here must compare the index it recorded against its
    /// current binding when that work completes and drop stale results.
    fn update_content(&mut self, index: usize, payload: Option<P>);

    /// The cell is leaving the visible range and will be pooled.
    fn unbind(&mut self) {}
}

/// A view together with the fields the controller manages on it.
///
/// A recycled view is in exactly one place at a time: bound in the active set
/// (`index` is `Some`) or free in the pool (`index` is `None`).
#[derive(Debug)]
pub struct Recycled<V> {
    cell_type: String,
    index: Option<usize>,
    view: V,
}

impl<V> Recycled<V> {
    pub(crate) fn new(cell_type: String, view: V) -> Self {
        Self {
            cell_type,
            index: None,
            view,
        }
    }

    /// Type identifier the view was created for; selects its pool.
    #[must_use]
    pub fn cell_type(&self) -> &str {
        &self.cell_type
    }

    /// Bound item index, or `None` while pooled.
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        self.index
    }

    /// The view.
    #[must_use]
    pub const fn view(&self) -> &V {
        &self.view
    }

    /// The view, mutably.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Consumes the wrapper and returns the view.
    pub fn into_view(self) -> V {
        self.view
    }

    pub(crate) fn bind(&mut self, index: usize) {
        self.index = Some(index);
    }

    pub(crate) fn unbind<P>(&mut self)
    where
        V: Cell<P>,
    {
        self.index = None;
        self.view.unbind();
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use super::{Cell, Recycled};

    #[derive(Default)]
    struct Label {
        shown: Vec<(usize, Option<&'static str>)>,
        unbound: usize,
    }

    impl Cell<&'static str> for Label {
        fn update_content(&mut self, index: usize, payload: Option<&'static str>) {
            self.shown.push((index, payload));
        }

        fn unbind(&mut self) {
            self.unbound += 1;
        }
    }

    #[test]
    fn binding_tracks_index_and_unbind_reaches_view() {
        let mut cell = Recycled::new(String::from("label"), Label::default());
        assert_eq!(cell.cell_type(), "label");
        assert_eq!(cell.index(), None);

        cell.bind(4);
        assert_eq!(cell.index(), Some(4));
        cell.view_mut().update_content(4, Some("four"));

        cell.unbind::<&'static str>();
        assert_eq!(cell.index(), None);

        let label = cell.into_view();
        assert_eq!(label.shown, [(4, Some("four"))]);
        assert_eq!(label.unbound, 1);
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The set of views currently bound to visible items.

use alloc::vec::Vec;
use core::fmt::{self, Debug};

use hashbrown::HashSet;

use crate::Recycled;

/// Live view-to-item bindings.
///
/// Holds at most one binding per item index. Bindings are kept in the order
/// they were created.
pub struct ActiveSet<V> {
    cells: Vec<Recycled<V>>,
    bound: HashSet<usize>,
}

impl<V> Default for ActiveSet<V> {
    fn default() -> Self {
        Self {
            cells: Vec::new(),
            bound: HashSet::new(),
        }
    }
}

impl<V> Debug for ActiveSet<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut indices: Vec<_> = self.cells.iter().filter_map(Recycled::index).collect();
        indices.sort_unstable();
        f.debug_struct("ActiveSet")
            .field("indices", &indices)
            .finish_non_exhaustive()
    }
}

impl<V> ActiveSet<V> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of active bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns `true` if a view is bound to `index`.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.bound.contains(&index)
    }

    /// The view bound to `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Recycled<V>> {
        if !self.contains(index) {
            return None;
        }
        self.cells.iter().find(|cell| cell.index() == Some(index))
    }

    /// Iterates over the bindings in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Recycled<V>> {
        self.cells.iter()
    }

    /// Iterates mutably over the bindings in creation order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Recycled<V>> {
        self.cells.iter_mut()
    }

    /// Adds a bound view.
    pub(crate) fn insert(&mut self, cell: Recycled<V>) {
        let index = cell.index();
        debug_assert!(index.is_some(), "active views must be bound");
        if let Some(index) = index {
            let fresh = self.bound.insert(index);
            debug_assert!(fresh, "item {index} already has an active binding");
        }
        self.cells.push(cell);
    }

    /// Removes and returns every binding for which `release` is `true`,
    /// keeping the others in order.
    pub(crate) fn extract_if(
        &mut self,
        mut release: impl FnMut(&mut Recycled<V>) -> bool,
    ) -> Vec<Recycled<V>> {
        let mut released = Vec::new();
        let mut kept = Vec::with_capacity(self.cells.len());
        for mut cell in self.cells.drain(..) {
            if release(&mut cell) {
                if let Some(index) = cell.index() {
                    self.bound.remove(&index);
                }
                released.push(cell);
            } else {
                kept.push(cell);
            }
        }
        self.cells = kept;
        released
    }

    /// Removes and returns every binding.
    pub(crate) fn take_all(&mut self) -> Vec<Recycled<V>> {
        self.bound.clear();
        core::mem::take(&mut self.cells)
    }
}

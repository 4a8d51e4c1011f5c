// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Free lists of released views, keyed by cell type identifier.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Debug};

use hashbrown::HashMap;

use crate::Recycled;

/// Pools of unbound views, one free list per cell type identifier.
///
/// Released views stay pooled for as long as the pool lives; they are only
/// dropped with it (or by [`ViewPool::clear`]). Free lists are LIFO, so the
/// most recently released view of a type is handed out first.
pub struct ViewPool<V> {
    free: HashMap<String, Vec<Recycled<V>>>,
}

impl<V> Default for ViewPool<V> {
    fn default() -> Self {
        Self {
            free: HashMap::new(),
        }
    }
}

impl<V> Debug for ViewPool<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewPool")
            .field("types", &self.free.len())
            .field("free", &self.len())
            .finish()
    }
}

impl<V> ViewPool<V> {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes a free view of `cell_type`, if one is available.
    pub fn acquire(&mut self, cell_type: &str) -> Option<Recycled<V>> {
        self.free.get_mut(cell_type)?.pop()
    }

    /// Returns an unbound view to the free list of its cell type.
    pub fn release(&mut self, view: Recycled<V>) {
        debug_assert!(
            view.index().is_none(),
            "only unbound views may be pooled; got index {:?}",
            view.index()
        );
        match self.free.get_mut(view.cell_type()) {
            Some(list) => list.push(view),
            None => {
                let key = String::from(view.cell_type());
                self.free.insert(key, alloc::vec![view]);
            }
        }
    }

    /// Number of free views of `cell_type`.
    #[must_use]
    pub fn free_count(&self, cell_type: &str) -> usize {
        self.free.get(cell_type).map_or(0, Vec::len)
    }

    /// Total number of free views across all types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.free.values().map(Vec::len).sum()
    }

    /// Returns `true` if no views are pooled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.free.values().all(Vec::is_empty)
    }

    /// Drops every pooled view.
    pub fn clear(&mut self) {
        self.free.clear();
    }
}

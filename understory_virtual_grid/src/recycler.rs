// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reconciliation of the active set against a newly visible line range.

use alloc::string::String;

use crate::{
    ActiveSet, Cell, DataSource, LayoutModel, LineRange, Recycled, ViewHost, ViewPool,
};

/// What a reconciliation pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Still-visible bindings whose content was refreshed.
    pub updated: usize,
    /// Bindings that left the range and were pooled.
    pub released: usize,
    /// New bindings served from the pool.
    pub reused: usize,
    /// New bindings whose view came from the data source.
    pub created: usize,
}

/// Owns the view pool, the active set, and the last reconciled range.
pub struct Recycler<V> {
    pool: ViewPool<V>,
    active: ActiveSet<V>,
    range: Option<LineRange>,
}

impl<V> Default for Recycler<V> {
    fn default() -> Self {
        Self {
            pool: ViewPool::new(),
            active: ActiveSet::new(),
            range: None,
        }
    }
}

impl<V> core::fmt::Debug for Recycler<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Recycler")
            .field("pool", &self.pool)
            .field("active", &self.active)
            .field("range", &self.range)
            .finish()
    }
}

impl<V> Recycler<V> {
    /// Creates an empty recycler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The free views.
    #[must_use]
    pub fn pool(&self) -> &ViewPool<V> {
        &self.pool
    }

    /// The bound views.
    #[must_use]
    pub fn active(&self) -> &ActiveSet<V> {
        &self.active
    }

    /// The range of the last pass that ran, if any.
    #[must_use]
    pub const fn range(&self) -> Option<LineRange> {
        self.range
    }

    /// Forgets the last range so the next pass runs even if it is unchanged.
    pub fn reset_range(&mut self) {
        self.range = None;
    }

    /// Brings the active set in line with `range`.
    ///
    /// Unless `force` is set, a range equal to the previous one is a no-op and
    /// yields `None`. Otherwise every binding whose line is still in `range`
    /// gets its content refreshed, every other binding is detached, unbound
    /// and pooled, and every item on a line in `range` without a binding gets
    /// one, reusing a pooled view of its type before asking `source` for a new
    /// one.
    pub fn reconcile<D, H>(
        &mut self,
        range: LineRange,
        force: bool,
        layout: &LayoutModel,
        source: &mut D,
        host: &mut H,
    ) -> Option<ReconcileStats>
    where
        D: DataSource<View = V>,
        V: Cell<D::Payload>,
        H: ViewHost<V>,
    {
        if !force && self.range == Some(range) {
            return None;
        }
        self.range = Some(range);

        let mut stats = ReconcileStats::default();

        let released = {
            let source = &*source;
            let updated = &mut stats.updated;
            self.active.extract_if(|cell| {
                let Some(index) = cell.index() else {
                    return true;
                };
                let line = layout.coord_of(index).map(|coord| coord.line);
                debug_assert!(
                    line.is_some(),
                    "active item {index} is outside the layout of {} items",
                    layout.item_count()
                );
                if line.is_some_and(|line| range.contains(line)) {
                    cell.view_mut().update_content(index, source.payload(index));
                    *updated += 1;
                    false
                } else {
                    true
                }
            })
        };
        stats.released = released.len();
        for cell in released {
            self.release::<D::Payload, H>(cell, host);
        }

        for line in range.lines() {
            let Some(metrics) = layout.line(line) else {
                break;
            };
            for index in metrics.indices() {
                if self.active.contains(index) {
                    continue;
                }
                let cell = match self.pool.acquire(source.cell_type(index)) {
                    Some(cell) => {
                        stats.reused += 1;
                        cell
                    }
                    None => {
                        stats.created += 1;
                        let cell_type = String::from(source.cell_type(index));
                        let view = source.create_view(index, &cell_type);
                        Recycled::new(cell_type, view)
                    }
                };
                self.bind(cell, index, layout, source, host);
            }
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(
            first = range.first,
            last = range.last,
            updated = stats.updated,
            released = stats.released,
            reused = stats.reused,
            created = stats.created,
            "reconciled visible lines"
        );

        Some(stats)
    }

    /// Detaches and pools every bound view and forgets the last range.
    pub fn release_all<P, H>(&mut self, host: &mut H) -> usize
    where
        V: Cell<P>,
        H: ViewHost<V>,
    {
        self.range = None;
        let cells = self.active.take_all();
        let count = cells.len();
        for cell in cells {
            self.release::<P, H>(cell, host);
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(released = count, "released all bound views");

        count
    }

    fn bind<D, H>(
        &mut self,
        mut cell: Recycled<V>,
        index: usize,
        layout: &LayoutModel,
        source: &D,
        host: &mut H,
    ) where
        D: DataSource<View = V>,
        V: Cell<D::Payload>,
        H: ViewHost<V>,
    {
        cell.bind(index);
        host.attach(cell.view_mut());
        if let Some(position) = layout.cell_position(index) {
            host.set_position(cell.view_mut(), position);
        }
        let payload = source.payload(index);
        cell.view_mut().update_content(index, payload);
        self.active.insert(cell);
    }

    fn release<P, H>(&mut self, mut cell: Recycled<V>, host: &mut H)
    where
        V: Cell<P>,
        H: ViewHost<V>,
    {
        host.detach(cell.view_mut());
        cell.unbind::<P>();
        self.pool.release(cell);
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;
    use core::num::NonZeroUsize;

    use kurbo::{Point, Size};

    use super::{ReconcileStats, Recycler};
    use crate::testing::{TestHost, TestSource};
    use crate::{Axis, DataSource, GridConfig, LayoutModel, LineRange, ViewHost};

    fn setup(count: usize) -> (LayoutModel, TestSource, TestHost) {
        let source = TestSource::uniform(count, Size::new(50.0, 10.0));
        let config = GridConfig::new(Axis::Vertical)
            .with_slots_per_line(NonZeroUsize::new(2).unwrap());
        let mut layout = LayoutModel::new();
        layout.build(source.sizes(), 100.0, &config);
        (layout, source, TestHost::new(Size::new(100.0, 30.0)))
    }

    fn active_indices(recycler: &Recycler<crate::testing::TestView>) -> Vec<usize> {
        let mut indices: Vec<_> = recycler.active().iter().filter_map(|c| c.index()).collect();
        indices.sort_unstable();
        indices
    }

    #[test]
    fn first_pass_binds_every_slot_of_every_line() {
        let (layout, mut source, mut host) = setup(9);
        let mut recycler = Recycler::new();

        let stats = recycler.reconcile(LineRange::new(0, 1), false, &layout, &mut source, &mut host);
        assert_eq!(
            stats,
            Some(ReconcileStats {
                created: 4,
                ..ReconcileStats::default()
            })
        );
        assert_eq!(active_indices(&recycler), [0, 1, 2, 3]);
        assert_eq!(host.attached().len(), 4);

        let cell = recycler.active().get(3).unwrap();
        assert_eq!(cell.view().shown(), [(3, Some(alloc::format!("item 3")))]);
        assert_eq!(host.position_of(cell.view().id()), Some(Point::new(75.0, -15.0)));
    }

    /// Reconciles with nothing known about the view beyond the source's bounds.
    fn reconcile_any<D, H>(
        range: LineRange,
        layout: &LayoutModel,
        source: &mut D,
        host: &mut H,
    ) -> (Recycler<D::View>, Option<ReconcileStats>)
    where
        D: DataSource,
        H: ViewHost<D::View>,
    {
        let mut recycler = Recycler::new();
        let stats = recycler.reconcile(range, false, layout, source, host);
        recycler.release_all::<D::Payload, H>(host);
        (recycler, stats)
    }

    #[test]
    fn reconcile_through_generic_source() {
        let (layout, mut source, mut host) = setup(9);
        let (recycler, stats) =
            reconcile_any(LineRange::new(0, 0), &layout, &mut source, &mut host);
        assert_eq!(stats.map(|s| s.created), Some(2));
        assert_eq!(recycler.pool().free_count("cell"), 2);
        assert!(host.attached().is_empty());
    }

    #[test]
    fn unchanged_range_is_skipped_unless_forced() {
        let (layout, mut source, mut host) = setup(9);
        let mut recycler = Recycler::new();
        let range = LineRange::new(0, 1);
        recycler.reconcile(range, false, &layout, &mut source, &mut host);

        assert_eq!(recycler.reconcile(range, false, &layout, &mut source, &mut host), None);

        let forced = recycler.reconcile(range, true, &layout, &mut source, &mut host);
        assert_eq!(
            forced,
            Some(ReconcileStats {
                updated: 4,
                ..ReconcileStats::default()
            })
        );
        assert_eq!(recycler.active().get(0).unwrap().view().shown().len(), 2);
    }

    #[test]
    fn scrolling_releases_and_reuses_views() {
        let (layout, mut source, mut host) = setup(9);
        let mut recycler = Recycler::new();
        recycler.reconcile(LineRange::new(0, 1), false, &layout, &mut source, &mut host);
        let first_ids: Vec<u32> = [0, 1]
            .map(|i| recycler.active().get(i).unwrap().view().id())
            .to_vec();

        let stats = recycler
            .reconcile(LineRange::new(1, 2), false, &layout, &mut source, &mut host)
            .unwrap();
        assert_eq!(
            stats,
            ReconcileStats {
                updated: 2,
                released: 2,
                reused: 2,
                created: 0,
            }
        );
        assert_eq!(active_indices(&recycler), [2, 3, 4, 5]);
        assert_eq!(source.created(), 4);

        let mut reused_ids: Vec<u32> = [4, 5]
            .map(|i| recycler.active().get(i).unwrap().view().id())
            .to_vec();
        reused_ids.sort_unstable();
        let mut first_ids = first_ids;
        first_ids.sort_unstable();
        assert_eq!(reused_ids, first_ids);
        assert!(recycler.pool().is_empty());
    }

    #[test]
    fn partial_last_line_binds_only_existing_items() {
        let (layout, mut source, mut host) = setup(9);
        let mut recycler = Recycler::new();
        recycler.reconcile(LineRange::new(3, 4), false, &layout, &mut source, &mut host);
        assert_eq!(active_indices(&recycler), [6, 7, 8]);
    }

    #[test]
    fn pool_is_keyed_by_cell_type() {
        let source = TestSource::uniform(4, Size::new(100.0, 10.0)).with_types(|i| {
            if i == 0 { "header" } else { "row" }
        });
        let config = GridConfig::default();
        let mut layout = LayoutModel::new();
        layout.build(source.sizes(), 100.0, &config);
        let mut source = source;
        let mut host = TestHost::new(Size::new(100.0, 10.0));
        let mut recycler = Recycler::new();

        recycler.reconcile(LineRange::new(0, 0), false, &layout, &mut source, &mut host);
        let stats = recycler
            .reconcile(LineRange::new(1, 1), false, &layout, &mut source, &mut host)
            .unwrap();
        // The pooled header cannot serve a row.
        assert_eq!(stats.created, 1);
        assert_eq!(recycler.pool().free_count("header"), 1);

        let stats = recycler
            .reconcile(LineRange::new(2, 2), false, &layout, &mut source, &mut host)
            .unwrap();
        assert_eq!(stats.reused, 1);
        assert_eq!(stats.created, 0);
        assert_eq!(recycler.pool().free_count("row"), 0);
    }

    #[test]
    fn release_all_pools_everything() {
        let (layout, mut source, mut host) = setup(9);
        let mut recycler = Recycler::new();
        recycler.reconcile(LineRange::new(0, 2), false, &layout, &mut source, &mut host);

        assert_eq!(recycler.release_all(&mut host), 6);
        assert!(recycler.active().is_empty());
        assert_eq!(recycler.pool().free_count("cell"), 6);
        assert_eq!(recycler.range(), None);
        assert!(host.attached().is_empty());
        assert_eq!(recycler.pool().len(), 6);
    }
}

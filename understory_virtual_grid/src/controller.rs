// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The grid controller: lifecycle, scroll reaction, and the public control surface.

use alloc::boxed::Box;
use core::fmt::{self, Debug};

use kurbo::Vec2;

use crate::events::Listeners;
use crate::{
    ActiveSet, DataSource, GridConfig, LayoutModel, LineRange, ListenerId, ReconcileStats,
    Recycler, ScrollEvent, ScrollEvents, ScrollSurface, ViewHost, ViewPool,
    resolve_visible_lines,
};

/// Lifecycle state of a [`GridController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridState {
    /// No scroll surface yet. A data source may already be waiting.
    Uninitialized,
    /// The scroll surface is set up but nothing has been loaded.
    Initialized,
    /// The layout is built from the data source and views are bound.
    Loaded,
}

/// Drives a recycling grid over a [`DataSource`] inside a host scroll surface.
///
/// The controller owns the layout, the view pool and the active set. Hosts
/// feed it scroll events through [`GridController::on_scroll_event`]; it
/// answers by binding views for newly visible items and pooling the ones
/// that scrolled out.
///
/// Every operation is a silent no-op until both a surface
/// ([`GridController::attach_surface`]) and a data source
/// ([`GridController::init`]) are present.
pub struct GridController<D: DataSource, H> {
    config: GridConfig,
    host: Option<H>,
    source: Option<D>,
    layout: LayoutModel,
    recycler: Recycler<D::View>,
    listeners: Listeners,
    loaded: bool,
}

impl<D: DataSource, H> Debug for GridController<D, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridController")
            .field("config", &self.config)
            .field("state", &self.state())
            .field("layout", &self.layout)
            .field("recycler", &self.recycler)
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}

impl<D: DataSource, H> GridController<D, H> {
    /// Lifecycle state.
    #[must_use]
    pub fn state(&self) -> GridState {
        match (&self.host, self.loaded) {
            (None, _) => GridState::Uninitialized,
            (Some(_), false) => GridState::Initialized,
            (Some(_), true) => GridState::Loaded,
        }
    }
}

impl<D, H> GridController<D, H>
where
    D: DataSource,
    H: ScrollSurface + ViewHost<D::View>,
{
    /// Creates a controller with no surface and no data source.
    #[must_use]
    pub fn new(config: GridConfig) -> Self {
        Self {
            config,
            host: None,
            source: None,
            layout: LayoutModel::new(),
            recycler: Recycler::new(),
            listeners: Listeners::default(),
            loaded: false,
        }
    }

    /// Sets up the scroll surface.
    ///
    /// The surface is configured for the grid's axis and elastic flag. If a
    /// data source was bound earlier, it is loaded now.
    pub fn attach_surface(&mut self, mut host: H) {
        if let Some(old) = self.host.as_mut() {
            self.recycler.release_all::<D::Payload, H>(old);
        }
        host.configure(self.config.axis, self.config.elastic);
        self.host = Some(host);
        self.loaded = false;
        if self.source.is_some() {
            self.load();
        }
    }

    /// Binds `source`, loading it immediately if the surface is set up.
    ///
    /// Views bound for a previous source are pooled first.
    pub fn init(&mut self, source: D) {
        if let Some(host) = self.host.as_mut() {
            self.recycler.release_all::<D::Payload, H>(host);
        }
        self.source = Some(source);
        if self.host.is_some() {
            self.load();
        } else {
            #[cfg(feature = "tracing")]
            tracing::debug!("data source bound before the scroll surface; deferring load");
        }
    }

    /// Rebuilds the layout from the data source and rebinds every visible item.
    ///
    /// All bound views are pooled first. Unless `keep_position` is set the
    /// scroll offset returns to the origin. Use this after the item count or
    /// any item size changed.
    pub fn reload(&mut self, keep_position: bool) {
        let (Some(host), Some(_)) = (self.host.as_mut(), self.source.as_ref()) else {
            return;
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(keep_position, "reloading grid");

        self.recycler.release_all::<D::Payload, H>(host);
        if !keep_position {
            host.set_scroll_offset(Vec2::ZERO);
        }
        self.load();
    }

    /// Re-renders the content of every bound view without touching geometry.
    ///
    /// Changes to the item count or sizes need [`GridController::reload`].
    pub fn refresh(&mut self) -> Option<ReconcileStats> {
        self.refresh_active(true)
    }

    /// Reacts to a scroll lifecycle event from the surface.
    ///
    /// [`ScrollEvent::Scrolling`] re-resolves the visible lines and reconciles
    /// the bound views; an offset outside the content leaves them untouched.
    /// The event is then forwarded to the listeners registered for it.
    pub fn on_scroll_event(&mut self, event: ScrollEvent) {
        if self.source.is_none() {
            return;
        }
        if event == ScrollEvent::Scrolling {
            self.refresh_active(false);
        }
        let offset = self.host.as_ref().map_or(Vec2::ZERO, H::scroll_offset);
        self.listeners.emit(event, offset);
    }

    /// Registers `callback` for the scroll events in `events`.
    pub fn add_scroll_listener(
        &mut self,
        events: ScrollEvents,
        callback: impl FnMut(ScrollEvent, Vec2) + 'static,
    ) -> ListenerId {
        self.listeners.add(events, Box::new(callback))
    }

    /// Unregisters a listener. Returns `false` if it was already gone.
    pub fn remove_scroll_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Asks the surface to scroll the line holding `index` to the viewport's
    /// leading edge, clamped to [`GridController::max_scroll_offset`].
    ///
    /// Indices outside the loaded items are ignored.
    pub fn scroll_to_cell(&mut self, index: usize, duration: f64, attenuated: bool) {
        let Some(coord) = self.layout.coord_of(index) else {
            return;
        };
        if self.source.is_none() {
            return;
        }
        let max = self.max_scroll_offset();
        let Some(host) = self.host.as_mut() else {
            return;
        };
        let target = self.layout.lines()[coord.line].offset.min(max).max(0.0);
        host.scroll_to(self.config.axis.offset(target), duration, attenuated);
    }

    /// Stops any scroll animation or inertia on the surface.
    pub fn stop_scrolling(&mut self) {
        if let Some(host) = self.host.as_mut() {
            host.stop_scrolling();
        }
    }

    /// Current scroll offset along the scroll axis.
    #[must_use]
    pub fn scroll_offset(&self) -> f64 {
        self.host
            .as_ref()
            .map_or(0.0, |host| self.config.axis.along_vec(host.scroll_offset()))
    }

    /// Largest scroll offset that keeps the viewport within the content.
    #[must_use]
    pub fn max_scroll_offset(&self) -> f64 {
        if !self.loaded || self.layout.is_empty() {
            return 0.0;
        }
        let viewport = self
            .host
            .as_ref()
            .map_or(0.0, |host| self.config.axis.along(host.viewport_size()));
        (self.layout.content_extent() - viewport).max(0.0)
    }

    /// The configuration.
    #[must_use]
    pub const fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Replaces the configuration and reloads, keeping the scroll position.
    pub fn set_config(&mut self, config: GridConfig) {
        self.config = config;
        if let Some(host) = self.host.as_mut() {
            host.configure(self.config.axis, self.config.elastic);
        }
        self.reload(true);
    }

    /// The layout of the last load.
    #[must_use]
    pub const fn layout(&self) -> &LayoutModel {
        &self.layout
    }

    /// The lines bound by the last reconciliation pass.
    #[must_use]
    pub fn visible_range(&self) -> Option<LineRange> {
        self.recycler.range()
    }

    /// The bound views.
    #[must_use]
    pub fn active(&self) -> &ActiveSet<D::View> {
        self.recycler.active()
    }

    /// The free views.
    #[must_use]
    pub fn pool(&self) -> &ViewPool<D::View> {
        self.recycler.pool()
    }

    /// The data source, if bound.
    #[must_use]
    pub const fn data_source(&self) -> Option<&D> {
        self.source.as_ref()
    }

    /// The data source, mutably. Call [`GridController::refresh`] or
    /// [`GridController::reload`] after changing it.
    pub fn data_source_mut(&mut self) -> Option<&mut D> {
        self.source.as_mut()
    }

    /// The scroll surface, if set up.
    #[must_use]
    pub const fn host(&self) -> Option<&H> {
        self.host.as_ref()
    }

    /// The scroll surface, mutably.
    pub fn host_mut(&mut self) -> Option<&mut H> {
        self.host.as_mut()
    }

    /// Tears the controller down.
    ///
    /// Bound views are detached from the surface first; then every view is
    /// dropped along with the pool. Dropping the controller directly skips
    /// the detach calls.
    pub fn into_parts(mut self) -> (Option<D>, Option<H>) {
        if let Some(host) = self.host.as_mut() {
            self.recycler.release_all::<D::Payload, H>(host);
        }
        (self.source, self.host)
    }

    fn load(&mut self) {
        let (Some(host), Some(source)) = (self.host.as_mut(), self.source.as_ref()) else {
            return;
        };
        let axis = self.config.axis;
        let cross_extent = axis.cross(host.viewport_size());
        let count = source.item_count();
        self.layout
            .build((0..count).map(|index| source.size(index)), cross_extent, &self.config);
        if !self.layout.is_empty() {
            host.set_content_size(self.layout.content_size());
        }
        self.loaded = true;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            items = count,
            lines = self.layout.line_count(),
            content_extent = self.layout.content_extent(),
            "grid loaded"
        );

        self.refresh_active(true);
    }

    fn refresh_active(&mut self, force: bool) -> Option<ReconcileStats> {
        let (Some(host), Some(source)) = (self.host.as_mut(), self.source.as_mut()) else {
            return None;
        };
        if !self.loaded {
            return None;
        }
        let axis = self.config.axis;
        let range = resolve_visible_lines(
            &self.layout,
            axis.along_vec(host.scroll_offset()),
            axis.along(host.viewport_size()),
        )?;
        self.recycler
            .reconcile(range, force, &self.layout, source, host)
    }
}

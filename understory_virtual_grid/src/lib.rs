// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_virtual_grid --heading-base-level=0

//! Understory Virtual Grid: a recycling controller for 2D grids of variable-size cells.
//!
//! This crate lays out a large collection of variably-sized items into lines
//! (rows in a vertical grid, columns in a horizontal one) and keeps only the
//! items on visible lines bound to views. Views that scroll out of sight are
//! pooled by cell type and reused for items that scroll in.
//!
//! The core concepts are:
//!
//! - [`GridConfig`]: scroll axis, padding, spacing, elasticity, and whether
//!   lines flow-wrap or hold a fixed number of slots.
//! - [`LayoutModel`]: the item-to-line assignment plus per-line offsets and
//!   extents, built from per-item [`kurbo::Size`]s and the viewport's cross extent.
//! - [`resolve_visible_lines`]: maps a scroll offset and viewport extent to the
//!   inclusive [`LineRange`] that intersects the viewport.
//! - [`Recycler`]: reconciles the [`ActiveSet`] of bound views against a new
//!   range, releasing views into a [`ViewPool`] and rebinding them.
//! - [`GridController`]: ties a [`DataSource`] and a host implementing
//!   [`ScrollSurface`] and [`ViewHost`] together, following the surface's
//!   scroll lifecycle.
//! - [`ProxyCell`]: a placeholder view whose real view is constructed
//!   asynchronously and attached only if it is still current.
//!
//! The crate does not render anything and does not know about any particular
//! UI framework. Hosts own the scroll container and the visual tree: they
//! attach and position views when asked to and forward scroll events back.
//!
//! Cell positions are cell centers in content space, with y increasing upward,
//! so a vertical grid places its first line at the top with negative y values
//! below it. Scroll offsets grow toward the end of the content on both axes.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size, Vec2};
//! use understory_virtual_grid::{
//!     Axis, Cell, DataSource, GridConfig, GridController, ScrollEvent, ScrollSurface,
//!     ViewHost,
//! };
//!
//! #[derive(Debug, Default)]
//! struct Label(Option<usize>);
//!
//! impl Cell<()> for Label {
//!     fn update_content(&mut self, index: usize, _: Option<()>) {
//!         self.0 = Some(index);
//!     }
//! }
//!
//! struct Tiles;
//!
//! impl DataSource for Tiles {
//!     type Payload = ();
//!     type View = Label;
//!
//!     fn item_count(&self) -> usize {
//!         1000
//!     }
//!     fn cell_type(&self, _: usize) -> &str {
//!         "tile"
//!     }
//!     fn size(&self, _: usize) -> Size {
//!         Size::new(50.0, 40.0)
//!     }
//!     fn create_view(&mut self, _: usize, _: &str) -> Label {
//!         Label::default()
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Surface {
//!     offset: Vec2,
//!     content: Size,
//! }
//!
//! impl ViewHost<Label> for Surface {
//!     fn attach(&mut self, _: &mut Label) {}
//!     fn detach(&mut self, _: &mut Label) {}
//!     fn set_position(&mut self, _: &mut Label, _: Point) {}
//! }
//!
//! impl ScrollSurface for Surface {
//!     fn viewport_size(&self) -> Size {
//!         Size::new(200.0, 100.0)
//!     }
//!     fn scroll_offset(&self) -> Vec2 {
//!         self.offset
//!     }
//!     fn set_scroll_offset(&mut self, offset: Vec2) {
//!         self.offset = offset;
//!     }
//!     fn scroll_to(&mut self, offset: Vec2, _: f64, _: bool) {
//!         self.offset = offset;
//!     }
//!     fn stop_scrolling(&mut self) {}
//!     fn set_content_size(&mut self, size: Size) {
//!         self.content = size;
//!     }
//! }
//!
//! let mut grid = GridController::new(GridConfig::new(Axis::Vertical));
//! grid.attach_surface(Surface::default());
//! grid.init(Tiles);
//!
//! // Four tiles fit on each 200-wide line, and three lines cover the viewport.
//! assert_eq!(grid.host().unwrap().content.height, 250.0 * 40.0);
//! assert_eq!(grid.active().len(), 12);
//!
//! grid.host_mut().unwrap().offset = Vec2::new(0.0, 400.0);
//! grid.on_scroll_event(ScrollEvent::Scrolling);
//! assert!(grid.active().contains(40));
//! assert!(!grid.active().contains(0));
//! // Views that left the viewport were recycled rather than created anew.
//! assert_eq!(grid.active().len() + grid.pool().len(), 12);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod active;
mod axis;
mod cell;
mod config;
mod controller;
mod events;
mod host;
mod layout;
mod pool;
mod proxy;
mod range;
mod recycler;
mod source;

#[cfg(test)]
mod testing;

pub use active::ActiveSet;
pub use axis::Axis;
pub use cell::{Cell, Recycled};
pub use config::GridConfig;
pub use controller::{GridController, GridState};
pub use events::{ListenerId, ScrollEvent, ScrollEvents};
pub use host::{ScrollSurface, ViewHost};
pub use layout::{Coord, LayoutModel, LineMetrics};
pub use pool::ViewPool;
pub use proxy::{AttachOutcome, PendingAttach, ProxyCell, StaleReason};
pub use range::{LineRange, resolve_visible_lines};
pub use recycler::{ReconcileStats, Recycler};
pub use source::DataSource;

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capabilities the host scene graph and scroll surface provide.
//!
//! The controller never creates nodes, applies transforms, or animates
//! scrolling itself. It drives a host through these two traits.

use kurbo::{Point, Size, Vec2};

use crate::Axis;

/// Attaching, detaching and positioning views inside the scrolled content.
pub trait ViewHost<V> {
    /// Makes `view` a child of the scrolled content.
    fn attach(&mut self, view: &mut V);

    /// Removes `view` from the scrolled content.
    fn detach(&mut self, view: &mut V);

    /// Places the center of `view` at `position` in content space.
    ///
    /// See [`LayoutModel::cell_position`](crate::LayoutModel::cell_position)
    /// for the coordinate convention.
    fn set_position(&mut self, view: &mut V, position: Point);
}

/// The scrolling viewport that hosts the grid.
///
/// Scroll offsets are measured in content space from the content's origin:
/// a positive component means the viewport has moved toward the end of the
/// content along that axis. Overscroll may make it negative or larger than
/// the maximum offset.
pub trait ScrollSurface {
    /// Size of the visible viewport.
    fn viewport_size(&self) -> Size;

    /// Current scroll offset.
    fn scroll_offset(&self) -> Vec2;

    /// Jumps to `offset` without animation.
    fn set_scroll_offset(&mut self, offset: Vec2);

    /// Animates to `offset` over `duration` seconds, decelerating when
    /// `attenuated` is set.
    fn scroll_to(&mut self, offset: Vec2, duration: f64, attenuated: bool);

    /// Stops any in-flight scroll animation or inertia.
    fn stop_scrolling(&mut self);

    /// Resizes the scrolled content.
    fn set_content_size(&mut self, size: Size);

    /// Restricts scrolling to `axis` and enables or disables overscroll.
    fn configure(&mut self, axis: Axis, elastic: bool) {
        let _ = (axis, elastic);
    }
}

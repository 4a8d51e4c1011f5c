// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid configuration.

use core::num::NonZeroUsize;

use kurbo::Vec2;

use crate::Axis;

/// Options recognized by the layout and the controller.
///
/// Changes take effect on the next [`GridController::reload`](crate::GridController::reload).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    /// Scroll axis.
    pub axis: Axis,
    /// Padding before the first line, along the scroll axis.
    pub padding_leading: f64,
    /// Padding after the last line, along the scroll axis.
    pub padding_trailing: f64,
    /// Gap between neighbouring cells: `x` horizontally, `y` vertically.
    pub spacing: Vec2,
    /// Whether the scroll surface may overscroll and bounce back.
    pub elastic: bool,
    /// Fixed number of slots per line.
    ///
    /// `None` selects flow-wrap packing: cells fill a line until the next one
    /// would overflow the viewport's cross extent.
    pub slots_per_line: Option<NonZeroUsize>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            axis: Axis::Vertical,
            padding_leading: 0.0,
            padding_trailing: 0.0,
            spacing: Vec2::ZERO,
            elastic: true,
            slots_per_line: None,
        }
    }
}

impl GridConfig {
    /// A default configuration scrolling along `axis`.
    #[must_use]
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            ..Self::default()
        }
    }

    /// Sets leading and trailing padding along the scroll axis.
    #[must_use]
    pub fn with_padding(mut self, leading: f64, trailing: f64) -> Self {
        self.padding_leading = leading;
        self.padding_trailing = trailing;
        self
    }

    /// Sets horizontal (`x`) and vertical (`y`) spacing between cells.
    #[must_use]
    pub fn with_spacing(mut self, x: f64, y: f64) -> Self {
        self.spacing = Vec2::new(x, y);
        self
    }

    /// Enables or disables overscroll.
    #[must_use]
    pub fn with_elastic(mut self, elastic: bool) -> Self {
        self.elastic = elastic;
        self
    }

    /// Uses a fixed grid of `slots` cells per line instead of flow-wrap packing.
    #[must_use]
    pub fn with_slots_per_line(mut self, slots: NonZeroUsize) -> Self {
        self.slots_per_line = Some(slots);
        self
    }

    /// Spacing between consecutive lines.
    #[must_use]
    pub const fn line_spacing(&self) -> f64 {
        self.axis.along_vec(self.spacing)
    }

    /// Spacing between consecutive slots within a line.
    #[must_use]
    pub const fn slot_spacing(&self) -> f64 {
        self.axis.cross_vec(self.spacing)
    }
}

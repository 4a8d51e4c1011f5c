// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line layout: assigns every item a `(line, slot)` coordinate.
//!
//! Items are packed into lines in index order. With a fixed slot count each
//! line holds exactly that many items (the last may hold fewer). Otherwise
//! items are flow-wrapped: a line accepts items until the next one would
//! overflow the cross extent, and an item that is wider than the cross extent
//! on its own occupies a line by itself.
//!
//! A line's extent along the scroll axis is the largest along-axis size among
//! its items. Line offsets are cumulative, start after the leading padding and
//! are separated by the line spacing. The last line is followed by the line
//! spacing too, then by the trailing padding.

use alloc::vec::Vec;
use core::num::NonZeroUsize;
use core::ops::Range;

use kurbo::{Point, Size};

use crate::{Axis, GridConfig};

/// Position of an item in the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    /// Line index along the scroll axis.
    pub line: usize,
    /// Position within the line, along the cross axis.
    pub slot: usize,
}

/// Geometry of a single line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMetrics {
    /// Offset of the line's leading edge from the start of the content.
    pub offset: f64,
    /// Largest along-axis size among the line's items.
    pub extent: f64,
    /// Index of the line's first item.
    pub first_index: usize,
    /// Number of items on the line.
    pub len: usize,
}

impl LineMetrics {
    /// Offset of the line's trailing edge.
    #[must_use]
    pub fn end(&self) -> f64 {
        self.offset + self.extent
    }

    /// Item indices on this line.
    #[must_use]
    pub const fn indices(&self) -> Range<usize> {
        self.first_index..self.first_index + self.len
    }
}

/// Deterministic line layout for a sequence of item sizes.
///
/// The model is rebuilt wholesale by [`LayoutModel::build`]; it is never
/// patched incrementally, so every query reflects the most recent build.
#[derive(Debug, Clone, Default)]
pub struct LayoutModel {
    axis: Axis,
    slot_spacing: f64,
    cross_extent: f64,
    content_extent: f64,
    sizes: Vec<Size>,
    line_of: Vec<usize>,
    lines: Vec<LineMetrics>,
}

impl LayoutModel {
    /// Creates an empty layout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the layout from the item sizes in index order.
    ///
    /// `cross_extent` is the viewport's size across the scroll axis; it bounds
    /// flow-wrapped lines and is ignored when `config` fixes the slot count.
    ///
    /// All previous coordinates are discarded. When there are no items, or a
    /// flow-wrapped layout gets a non-positive cross extent, the layout is left
    /// without lines and the content extent keeps its previous value.
    pub fn build<I>(&mut self, sizes: I, cross_extent: f64, config: &GridConfig)
    where
        I: IntoIterator<Item = Size>,
    {
        self.sizes.clear();
        self.line_of.clear();
        self.lines.clear();
        self.axis = config.axis;
        self.slot_spacing = config.slot_spacing();

        let fixed = config.slots_per_line.map(NonZeroUsize::get);
        if fixed.is_none() && (cross_extent.is_nan() || cross_extent <= 0.0) {
            return;
        }
        self.cross_extent = cross_extent.max(0.0);

        let axis = self.axis;
        let line_spacing = config.line_spacing();
        let mut cursor = 0.0;
        let mut force_break = false;

        for (index, size) in sizes.into_iter().enumerate() {
            let size = sanitize(size);
            let cross = axis.cross(size);

            let starts_line = match self.lines.last() {
                None => true,
                Some(line) => {
                    force_break
                        || match fixed {
                            Some(slots) => line.len >= slots,
                            None => cursor + self.slot_spacing + cross > cross_extent,
                        }
                }
            };

            if starts_line {
                let offset = self
                    .lines
                    .last()
                    .map_or(config.padding_leading, |prev| prev.end() + line_spacing);
                self.lines.push(LineMetrics {
                    offset,
                    extent: 0.0,
                    first_index: index,
                    len: 0,
                });
                cursor = cross;
            } else {
                cursor += self.slot_spacing + cross;
            }
            // An oversized first item keeps its line to itself.
            force_break = fixed.is_none() && starts_line && cross > cross_extent;

            let line_index = self.lines.len() - 1;
            let line = &mut self.lines[line_index];
            line.extent = line.extent.max(axis.along(size));
            line.len += 1;

            self.sizes.push(size);
            self.line_of.push(line_index);
        }

        // Every line, the last included, is followed by the line spacing.
        if let Some(last) = self.lines.last() {
            self.content_extent = last.end() + line_spacing + config.padding_trailing;
        }
    }

    /// Scroll axis of the most recent build.
    #[must_use]
    pub const fn axis(&self) -> Axis {
        self.axis
    }

    /// Number of laid-out items.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.sizes.len()
    }

    /// Returns `true` if the layout holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// All lines in order; offsets are non-decreasing.
    #[must_use]
    pub fn lines(&self) -> &[LineMetrics] {
        &self.lines
    }

    /// Metrics of a single line.
    #[must_use]
    pub fn line(&self, line: usize) -> Option<&LineMetrics> {
        self.lines.get(line)
    }

    /// Total extent of the content along the scroll axis, paddings included.
    #[must_use]
    pub const fn content_extent(&self) -> f64 {
        self.content_extent
    }

    /// Cross extent the layout was built for.
    #[must_use]
    pub const fn cross_extent(&self) -> f64 {
        self.cross_extent
    }

    /// Content size as a two-dimensional [`Size`].
    #[must_use]
    pub const fn content_size(&self) -> Size {
        self.axis.size(self.content_extent, self.cross_extent)
    }

    /// Coordinate of `index`, or `None` if it was not laid out.
    #[must_use]
    pub fn coord_of(&self, index: usize) -> Option<Coord> {
        let line = *self.line_of.get(index)?;
        Some(Coord {
            line,
            slot: index - self.lines[line].first_index,
        })
    }

    /// Item index at `coord`, or `None` if the line has no such slot.
    #[must_use]
    pub fn index_at(&self, coord: Coord) -> Option<usize> {
        let line = self.lines.get(coord.line)?;
        (coord.slot < line.len).then(|| line.first_index + coord.slot)
    }

    /// Size of the item at `coord`.
    #[must_use]
    pub fn cell_size(&self, coord: Coord) -> Option<Size> {
        self.index_at(coord).map(|index| self.sizes[index])
    }

    /// Size of the item at `index`.
    #[must_use]
    pub fn size_of(&self, index: usize) -> Option<Size> {
        self.sizes.get(index).copied()
    }

    /// Center of the item at `index` in content space.
    ///
    /// Content space has its origin at the leading corner of the content with
    /// `y` pointing up, so content extends toward negative `y` and positive
    /// `x`. Cells are packed contiguously from the start of their line with
    /// the slot spacing between them, and aligned to the line's leading edge.
    #[must_use]
    pub fn cell_position(&self, index: usize) -> Option<Point> {
        let coord = self.coord_of(index)?;
        let line = &self.lines[coord.line];
        let size = self.sizes[index];
        let axis = self.axis;

        let cross_end: f64 = self.sizes[line.first_index..=index]
            .iter()
            .map(|s| axis.cross(*s))
            .sum();
        let cross_gaps = self.slot_spacing * slot_factor(coord.slot);
        let cross = cross_end + cross_gaps - axis.cross(size) / 2.0;
        let along = line.offset + axis.along(size) / 2.0;

        Some(match axis {
            Axis::Vertical => Point::new(cross, -along),
            Axis::Horizontal => Point::new(along, -cross),
        })
    }
}

#[allow(
    clippy::cast_precision_loss,
    reason = "Slot indices are far below the range where f64 loses integer precision"
)]
fn slot_factor(slot: usize) -> f64 {
    slot as f64
}

fn sanitize(size: Size) -> Size {
    debug_assert!(
        size.width.is_finite() && size.height.is_finite(),
        "cell sizes must be finite; got {size:?}"
    );
    // Clamp finite negative components to `0.0`.
    Size::new(size.width.max(0.0), size.height.max(0.0))
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visible line resolution.

use core::ops::RangeInclusive;

use crate::LayoutModel;

/// An inclusive, contiguous range of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineRange {
    /// First line in the range.
    pub first: usize,
    /// Last line in the range (inclusive).
    pub last: usize,
}

impl LineRange {
    /// Creates a range covering `first..=last`.
    #[must_use]
    pub const fn new(first: usize, last: usize) -> Self {
        debug_assert!(first <= last, "LineRange bounds must be ordered");
        Self { first, last }
    }

    /// Returns `true` if `line` lies within the range.
    #[must_use]
    pub const fn contains(&self, line: usize) -> bool {
        self.first <= line && line <= self.last
    }

    /// The lines of the range as an iterator-friendly inclusive range.
    #[must_use]
    pub const fn lines(&self) -> RangeInclusive<usize> {
        self.first..=self.last
    }
}

/// Resolves which lines intersect the viewport.
///
/// - `scroll_offset`: distance the viewport's leading edge has scrolled from
///   the start of the content. It may be negative while overscrolling.
/// - `viewport_extent`: size of the viewport along the scroll axis.
///
/// The first line is the last one whose offset is at or before the viewport's
/// leading edge; the first line also owns the leading padding, so a viewport
/// that starts before it still resolves to line `0`. The last line is the last
/// one whose offset is at or before the trailing edge, where the trailing edge
/// is clamped to the content extent.
///
/// Returns `None` when the layout has no lines, or when the viewport lies
/// entirely before the content or starts after it ends.
#[must_use]
pub fn resolve_visible_lines(
    layout: &LayoutModel,
    scroll_offset: f64,
    viewport_extent: f64,
) -> Option<LineRange> {
    let lines = layout.lines();
    if lines.is_empty() {
        return None;
    }

    let content_extent = layout.content_extent();
    let leading = scroll_offset;
    let trailing = (scroll_offset + viewport_extent.max(0.0)).min(content_extent);
    if leading > content_extent || trailing < 0.0 {
        return None;
    }

    // Offsets are non-decreasing in line index, so the lines starting at or
    // before `leading` form a prefix.
    let first = lines
        .partition_point(|line| line.offset <= leading)
        .saturating_sub(1);

    let mut last = first;
    while last + 1 < lines.len() && lines[last + 1].offset <= trailing {
        last += 1;
    }

    Some(LineRange::new(first, last))
}

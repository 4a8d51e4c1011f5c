// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll axis and along/cross decomposition helpers.

use kurbo::{Size, Vec2};

/// The axis along which a grid scrolls.
///
/// Lines are rows for [`Axis::Vertical`] and columns for [`Axis::Horizontal`].
/// Slots run along the other (cross) axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Content grows downward; lines are rows.
    #[default]
    Vertical,
    /// Content grows rightward; lines are columns.
    Horizontal,
}

impl Axis {
    /// Component of `size` along the scroll axis.
    #[must_use]
    pub const fn along(self, size: Size) -> f64 {
        match self {
            Self::Vertical => size.height,
            Self::Horizontal => size.width,
        }
    }

    /// Component of `size` along the cross axis.
    #[must_use]
    pub const fn cross(self, size: Size) -> f64 {
        match self {
            Self::Vertical => size.width,
            Self::Horizontal => size.height,
        }
    }

    /// Component of `v` along the scroll axis.
    #[must_use]
    pub const fn along_vec(self, v: Vec2) -> f64 {
        match self {
            Self::Vertical => v.y,
            Self::Horizontal => v.x,
        }
    }

    /// Component of `v` along the cross axis.
    #[must_use]
    pub const fn cross_vec(self, v: Vec2) -> f64 {
        match self {
            Self::Vertical => v.x,
            Self::Horizontal => v.y,
        }
    }

    /// Builds a [`Size`] from along-axis and cross-axis components.
    #[must_use]
    pub const fn size(self, along: f64, cross: f64) -> Size {
        match self {
            Self::Vertical => Size::new(cross, along),
            Self::Horizontal => Size::new(along, cross),
        }
    }

    /// Builds a [`Vec2`] pointing `along` units down the scroll axis.
    #[must_use]
    pub const fn offset(self, along: f64) -> Vec2 {
        match self {
            Self::Vertical => Vec2::new(0.0, along),
            Self::Horizontal => Vec2::new(along, 0.0),
        }
    }
}

//! Geometric primitives shared by the engine and its hosts.

use crate::Axis;

/// An axis-aligned rectangle in the container's content coordinate space.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const ZERO: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Builds a rectangle from per-axis bounds.
    ///
    /// `main` bounds run along the scroll axis, `cross` bounds along the
    /// lane axis.
    pub fn from_axis_bounds(
        axis: Axis,
        main_start: f32,
        main_end: f32,
        cross_start: f32,
        cross_end: f32,
    ) -> Self {
        if axis.is_vertical() {
            Self::new(
                cross_start,
                main_start,
                cross_end - cross_start,
                main_end - main_start,
            )
        } else {
            Self::new(
                main_start,
                cross_start,
                main_end - main_start,
                cross_end - cross_start,
            )
        }
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            width: self.width,
            height: self.height,
        }
    }

    /// Translates the rectangle along the scroll axis only.
    pub fn translate_main(&self, axis: Axis, delta: f32) -> Self {
        if axis.is_vertical() {
            self.translate(0.0, delta)
        } else {
            self.translate(delta, 0.0)
        }
    }

    /// Near edge along the scroll axis.
    #[inline]
    pub fn main_start(&self, axis: Axis) -> f32 {
        if axis.is_vertical() { self.y } else { self.x }
    }

    /// Far edge along the scroll axis.
    #[inline]
    pub fn main_end(&self, axis: Axis) -> f32 {
        self.main_start(axis) + self.main_extent(axis)
    }

    /// Extent along the scroll axis.
    #[inline]
    pub fn main_extent(&self, axis: Axis) -> f32 {
        if axis.is_vertical() {
            self.height
        } else {
            self.width
        }
    }

    /// Near edge along the lane (cross) axis.
    #[inline]
    pub fn cross_start(&self, axis: Axis) -> f32 {
        if axis.is_vertical() { self.x } else { self.y }
    }

    /// Far edge along the lane (cross) axis.
    #[inline]
    pub fn cross_end(&self, axis: Axis) -> f32 {
        self.cross_start(axis) + self.cross_extent(axis)
    }

    /// Extent along the lane (cross) axis.
    #[inline]
    pub fn cross_extent(&self, axis: Axis) -> f32 {
        if axis.is_vertical() {
            self.width
        } else {
            self.height
        }
    }

    /// Returns true if the two rectangles overlap with positive area.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

//! Geometric primitives for the timeline drawing surface.

use serde::{Deserialize, Serialize};

/// 2D vector.
pub type Vec2 = glam::Vec2;

/// Axis-aligned rectangle in surface (content) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle spanning `[left, right]` horizontally.
    pub fn from_x_span(left: f32, right: f32, y: f32, height: f32) -> Self {
        Self::new(left, y, right - left, height)
    }

    /// Minimum corner (top-left).
    #[inline]
    pub fn min(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Maximum corner (bottom-right).
    #[inline]
    pub fn max(self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.height)
    }

    /// Right edge.
    #[inline]
    pub fn right(self) -> f32 {
        self.x + self.width
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub fn contains(self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    /// Shift the rectangle by `offset`.
    #[inline]
    pub fn translate(self, offset: Vec2) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.width, self.height)
    }
}

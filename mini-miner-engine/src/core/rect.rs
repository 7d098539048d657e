//! Screen rectangle the board is laid out in.

use serde::{Serialize, Deserialize};

use super::vec2::Vec2;

/// Axis-aligned rectangle: origin (top-left) plus dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width (x) and height (y)
    pub dim: Vec2,
}

impl Rect {
    /// Create a rectangle from origin and size.
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            dim: Vec2::new(width, height),
        }
    }

    /// Width of the rectangle.
    #[inline]
    pub fn width(&self) -> f32 {
        self.dim.x
    }

    /// Height of the rectangle.
    #[inline]
    pub fn height(&self) -> f32 {
        self.dim.y
    }

    /// Check if a point lies inside (right and bottom edges exclusive).
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.pos.x
            && point.y >= self.pos.y
            && point.x < self.pos.x + self.dim.x
            && point.y < self.pos.y + self.dim.y
    }
}

impl Default for Rect {
    /// Full 800x600 window.
    fn default() -> Self {
        Self::new(0.0, 0.0, 800.0, 600.0)
    }
}

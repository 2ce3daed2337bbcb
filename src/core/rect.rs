//! Axis-Aligned Rectangles
//!
//! Every body in the arena (head, segments, hitbox, walls, player) is an
//! axis-aligned rectangle anchored at its top-left corner.

use std::fmt;
use glam::Vec2;
use serde::{Serialize, Deserialize};

/// Axis-aligned rectangle: top-left `position` plus `size`.
#[derive(Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub position: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    /// Create a rectangle from its top-left corner and dimensions.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Create a rectangle from vector parts.
    #[inline]
    pub const fn from_parts(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }

    /// Top-left corner.
    #[inline]
    pub fn min(&self) -> Vec2 {
        self.position
    }

    /// Bottom-right corner.
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.position + self.size
    }

    /// Center point.
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }

    /// Distance between the centers of two rectangles.
    #[inline]
    pub fn distance(&self, other: &Rect) -> f32 {
        self.center().distance(other.center())
    }

    /// Check if two rectangles overlap.
    ///
    /// Rectangles that only share an edge do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());

        a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
    }

    /// Check if a point lies inside the rectangle.
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        let (min, max) = (self.min(), self.max());
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }

    /// Same size, moved by `delta`.
    #[inline]
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            position: self.position + delta,
            size: self.size,
        }
    }

    /// Same size, placed at `position`.
    #[inline]
    pub fn with_position(&self, position: Vec2) -> Self {
        Self {
            position,
            size: self.size,
        }
    }

    /// Grow the rectangle by `margin` on every side.
    #[inline]
    pub fn inflated(&self, margin: f32) -> Self {
        Self {
            position: self.position - Vec2::splat(margin),
            size: self.size + Vec2::splat(margin * 2.0),
        }
    }
}

impl fmt::Debug for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rect({:.2}, {:.2}, {:.2}x{:.2})",
            self.position.x, self.position.y, self.size.x, self.size.y
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_center() {
        let rect = Rect::new(10.0, 20.0, 22.0, 22.0);
        assert_eq!(rect.center(), Vec2::new(21.0, 31.0));
    }

    #[test]
    fn test_rect_distance_uses_centers() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(30.0, 40.0, 10.0, 10.0);
        assert!((a.distance(&b) - 50.0).abs() < 1e-4);

        // Different sizes at the same corner are not at distance zero
        let c = Rect::new(0.0, 0.0, 20.0, 20.0);
        assert!((a.distance(&c) - 50.0_f32.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn test_rect_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);

        assert!(a.overlaps(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(a.overlaps(&Rect::new(2.0, 2.0, 2.0, 2.0)));

        // Touching edges only
        assert!(!a.overlaps(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(0.0, 10.0, 10.0, 10.0)));

        // Far away
        assert!(!a.overlaps(&Rect::new(50.0, 50.0, 1.0, 1.0)));
    }

    #[test]
    fn test_rect_translate_and_inflate() {
        let rect = Rect::new(1.0, 2.0, 3.0, 4.0);

        let moved = rect.translated(Vec2::new(1.0, -2.0));
        assert_eq!(moved.position, Vec2::new(2.0, 0.0));
        assert_eq!(moved.size, rect.size);

        let grown = rect.inflated(1.0);
        assert_eq!(grown, Rect::new(0.0, 1.0, 5.0, 6.0));
        assert!(grown.contains(rect.center()));
    }
}

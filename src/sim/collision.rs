//! Collision detection between falling entities and the basket
//!
//! Entities are circles and the basket is an axis-aligned rectangle, so one
//! closest-point test covers every case.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A circle in playfield space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// An axis-aligned rectangle (top-left origin, y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Closest point of the rectangle to `p`
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        // Component-wise max/min instead of Vec2::clamp, which asserts on
        // degenerate (negative-size) rectangles.
        p.max(self.min).min(self.max())
    }
}

/// Circle vs rectangle overlap, touching counts as a hit
pub fn circle_rect_intersects(circle: Circle, rect: Rect) -> bool {
    let nearest = rect.closest_point(circle.center);
    circle.center.distance_squared(nearest) <= circle.radius * circle.radius
}

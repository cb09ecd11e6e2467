//! Collision detection for rectangles and circles
//!
//! Everything on screen collides as an axis-aligned box, except the bomb
//! ring which is a circle.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }
}

/// Circle (center + radius)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub const fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Closest-point test between a circle and a rectangle
///
/// Distances are measured from the circle center to the rectangle center,
/// so the test is symmetric under swapping axes.
pub fn circle_intersects_rect(circle: &Circle, rect: &Rect) -> bool {
    let dist = (circle.center - rect.center()).abs();
    let half = rect.half_extents();
    let r = circle.radius;

    if dist.x > half.x + r || dist.y > half.y + r {
        return false;
    }
    if dist.x <= half.x || dist.y <= half.y {
        return true;
    }

    let corner = dist - half;
    corner.length_squared() <= r * r
}

/// Open-interval AABB overlap. Touching edges do not intersect.
pub fn rect_intersects_rect(a: &Rect, b: &Rect) -> bool {
    a.pos.x < b.pos.x + b.size.x
        && a.pos.x + a.size.x > b.pos.x
        && a.pos.y < b.pos.y + b.size.y
        && a.pos.y + a.size.y > b.pos.y
}

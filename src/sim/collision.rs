//! Collision detection for the rectangular playfield
//!
//! Every body is an axis-aligned box anchored at its top-left corner, with y
//! growing downward. Explosions and healer auras use center distances instead.

use glam::Vec2;

/// Axis-aligned hit-box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// Square box (enemies, projectiles, pickups)
    pub fn square(pos: Vec2, size: f32) -> Self {
        Self::new(pos, Vec2::splat(size))
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Strict overlap test; touching edges do not collide
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.pos.x < other.right()
            && self.right() > other.pos.x
            && self.pos.y < other.bottom()
            && self.bottom() > other.pos.y
    }

    /// True once the box has fully left the playfield on any side
    pub fn outside(&self, width: f32, height: f32) -> bool {
        self.pos.x < -self.size.x
            || self.pos.x > width
            || self.pos.y < -self.size.y
            || self.pos.y > height
    }
}

/// Check whether a vertical beam hits a box
///
/// The beam is centered on `beam_x`, `width` wide, and runs from `origin_y`
/// up to the top of the playfield. Only targets above the origin are hit.
pub fn beam_hits(beam_x: f32, width: f32, origin_y: f32, target: &Rect) -> bool {
    beam_x - width / 2.0 < target.right()
        && beam_x + width / 2.0 > target.pos.x
        && target.pos.y < origin_y
}

/// Check whether a box center lies strictly inside a circle
#[inline]
pub fn within_radius(center: Vec2, radius: f32, target: &Rect) -> bool {
    center.distance(target.center()) < radius
}

//! Axis-aligned rectangle geometry
//!
//! Two tests drive all collision in the game: a symmetric AABB overlap, and
//! an asymmetric velocity-aware landing test that only resolves the
//! bottom-of-A-onto-top-of-B case. The landing test is what lets the player
//! jump up through a block (to trigger it from below) yet still stand on it
//! on the way down; there is deliberately no side or ceiling response.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::LAND_TOLERANCE;

/// An axis-aligned rectangle. `y` grows downward (canvas coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    /// Bottom edge y coordinate
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Right edge x coordinate
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Standard AABB overlap test
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }

    /// Whether a point lies inside this rectangle (edges inclusive)
    #[inline]
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

/// Velocity-aware top-landing test: is `body`, with pending vertical
/// velocity `dy`, coming to rest on top of `solid` this frame?
///
/// True when the horizontal spans overlap, the body's feet sit no more than
/// [`LAND_TOLERANCE`] past the solid's top, and applying `dy` would carry
/// them to or beyond the top.
#[inline]
pub fn lands_on(body: &Rect, dy: f32, solid: &Rect) -> bool {
    body.x < solid.right()
        && body.right() > solid.x
        && body.bottom() <= solid.y + LAND_TOLERANCE
        && body.bottom() + dy >= solid.y
}

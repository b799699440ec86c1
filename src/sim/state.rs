//! Player entity
//!
//! Exactly one per session. Owned by the session and mutated only by `tick`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::error::Result;

/// The controllable entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Local bounds, centered on the origin
    body: Rect,
    /// Sprite mirroring hint, follows the last nonzero horizontal input
    pub facing_right: bool,
}

impl Player {
    /// Spawn a player of the given full size
    pub fn spawn(position: Vec2, size: Vec2) -> Result<Self> {
        Ok(Self {
            position,
            velocity: Vec2::ZERO,
            body: Rect::checked("player", Vec2::ZERO, size * 0.5)?,
            facing_right: true,
        })
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.body.half_extents()
    }

    /// World-space bounds at the current position
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.body.with_center(self.position)
    }

    /// Bounds the player would have at `position`
    #[inline]
    pub fn bounds_at(&self, position: Vec2) -> Rect {
        self.body.with_center(position)
    }

    /// Update facing from a desired horizontal speed; zero keeps the
    /// previous facing
    pub fn face(&mut self, vx: f32) {
        if vx > 0.0 {
            self.facing_right = true;
        } else if vx < 0.0 {
            self.facing_right = false;
        }
    }
}

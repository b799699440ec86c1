//! Axis-aligned box geometry
//!
//! Every shape in the arena (player, walls, furniture, decorations) is an
//! AABB stored as center + half extents.

use glam::{BVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// An axis-aligned box with strictly positive half extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RectDef")]
pub struct Rect {
    center: Vec2,
    half_extents: Vec2,
}

#[derive(Deserialize)]
struct RectDef {
    center: Vec2,
    half_extents: Vec2,
}

impl TryFrom<RectDef> for Rect {
    type Error = ConfigError;

    fn try_from(def: RectDef) -> Result<Self> {
        Rect::new(def.center, def.half_extents)
    }
}

impl Rect {
    /// Create a box from its center and half extents
    pub fn new(center: Vec2, half_extents: Vec2) -> Result<Self> {
        Self::checked("rect", center, half_extents)
    }

    /// Create a box from its center and full size
    pub fn from_size(center: Vec2, size: Vec2) -> Result<Self> {
        Self::checked("rect", center, size * 0.5)
    }

    /// Bounding box of a circle (circles collide as their bounds)
    pub fn circle_bounds(center: Vec2, radius: f32) -> Result<Self> {
        Self::checked("circle", center, Vec2::splat(radius))
    }

    /// Validate and build, naming the shape in the error
    pub fn checked(label: &str, center: Vec2, half_extents: Vec2) -> Result<Self> {
        if !center.is_finite() {
            return Err(ConfigError::NonFiniteCenter {
                label: label.to_string(),
                center,
            });
        }
        if !half_extents.is_finite() || half_extents.x <= 0.0 || half_extents.y <= 0.0 {
            return Err(ConfigError::DegenerateShape {
                label: label.to_string(),
                half_extents,
            });
        }
        Ok(Self {
            center,
            half_extents,
        })
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.center
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.half_extents
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.half_extents * 2.0
    }

    /// Top-left corner (smallest x and y)
    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents
    }

    /// Bottom-right corner (largest x and y)
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents
    }

    /// Same box moved to a new center (half extents are untouched, so the
    /// invariant still holds)
    #[inline]
    pub fn with_center(&self, center: Vec2) -> Self {
        Self {
            center,
            half_extents: self.half_extents,
        }
    }

    /// Strict overlap test: touching edges do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        let pen = self.penetration(other);
        pen.x > 0.0 && pen.y > 0.0
    }

    /// Per-axis penetration depth against `other`
    ///
    /// Positive on an axis means the projections overlap by that amount;
    /// zero or negative means they are separated on that axis.
    #[inline]
    pub fn penetration(&self, other: &Rect) -> Vec2 {
        let delta = (self.center - other.center).abs();
        self.half_extents + other.half_extents - delta
    }
}

/// The arena extent `[0, width] x [0, height]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
}

impl WorldBounds {
    pub fn new(width: f32, height: f32) -> Result<Self> {
        let bounds = Self { width, height };
        bounds.validate()?;
        Ok(bounds)
    }

    pub fn validate(&self) -> Result<()> {
        let ok = |v: f32| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(ConfigError::InvalidWorld {
                width: self.width,
                height: self.height,
            })
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Whether a box of the given half extents can be placed inside at all
    pub fn fits(&self, half_extents: Vec2) -> bool {
        half_extents.x * 2.0 <= self.width && half_extents.y * 2.0 <= self.height
    }

    /// Clamp a center so a box of `half_extents` stays fully inside.
    /// Returns the clamped center and which axes were clamped.
    pub fn clamp_center(&self, center: Vec2, half_extents: Vec2) -> (Vec2, BVec2) {
        let lo = half_extents;
        let hi = self.size() - half_extents;
        let clamped = center.clamp(lo, hi.max(lo));
        (clamped, clamped.cmpne(center))
    }

    /// Whether the box lies fully inside (edges may touch the bounds)
    pub fn contains(&self, rect: &Rect) -> bool {
        let min = rect.min();
        let max = rect.max();
        min.x >= 0.0 && min.y >= 0.0 && max.x <= self.width && max.y <= self.height
    }
}

//! Static arena contents
//!
//! The collider set is assembled once when a session starts (tilemap walls,
//! procedural border, furniture) and is read-only for the rest of the
//! session.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, WorldBounds};
use super::tilemap::TileGrid;
use crate::config::SessionConfig;
use crate::error::Result;

/// What a collider represents (informational, for the render side)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColliderKind {
    /// Wall tile from the tilemap
    Wall,
    /// Wall tile from the procedural border
    Border,
    /// Fixed furniture piece
    Furniture,
    /// Visual only
    Decoration,
}

/// A non-moving shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaticCollider {
    shape: Rect,
    blocking: bool,
    /// Fraction of incoming speed reflected on contact (0 = dead stop)
    bounce: f32,
    kind: ColliderKind,
}

impl StaticCollider {
    pub fn blocking(shape: Rect, kind: ColliderKind, bounce: f32) -> Self {
        Self {
            shape,
            blocking: true,
            bounce,
            kind,
        }
    }

    /// A shape that is drawn but never collides
    pub fn decorative(shape: Rect) -> Self {
        Self {
            shape,
            blocking: false,
            bounce: 0.0,
            kind: ColliderKind::Decoration,
        }
    }

    #[inline]
    pub fn shape(&self) -> &Rect {
        &self.shape
    }

    #[inline]
    pub fn is_blocking(&self) -> bool {
        self.blocking
    }

    #[inline]
    pub fn bounce(&self) -> f32 {
        self.bounce
    }

    #[inline]
    pub fn kind(&self) -> ColliderKind {
        self.kind
    }
}

/// Immutable set of static colliders
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColliderSet {
    colliders: Vec<StaticCollider>,
}

impl ColliderSet {
    pub fn new(colliders: Vec<StaticCollider>) -> Self {
        Self { colliders }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StaticCollider> {
        self.colliders.iter()
    }

    /// Colliders that take part in resolution
    pub fn blocking(&self) -> impl Iterator<Item = &StaticCollider> {
        self.colliders.iter().filter(|c| c.blocking)
    }

    pub fn as_slice(&self) -> &[StaticCollider] {
        &self.colliders
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// First blocking collider overlapping `rect`
    pub fn first_overlap(&self, rect: &Rect) -> Option<&StaticCollider> {
        self.blocking().find(|c| c.shape.overlaps(rect))
    }
}

impl<'a> IntoIterator for &'a ColliderSet {
    type Item = &'a StaticCollider;
    type IntoIter = std::slice::Iter<'a, StaticCollider>;

    fn into_iter(self) -> Self::IntoIter {
        self.colliders.iter()
    }
}

/// Outline of a furniture piece
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FurnitureShape {
    Box { size: Vec2 },
    /// Collides as its bounding box
    Circle { radius: f32 },
}

/// A fixed blocking obstacle placed by hand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Furniture {
    pub name: String,
    pub center: Vec2,
    pub shape: FurnitureShape,
    /// Overrides the interior bounce coefficient
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounce: Option<f32>,
}

impl Furniture {
    pub fn boxed(name: &str, center: Vec2, size: Vec2) -> Self {
        Self {
            name: name.to_string(),
            center,
            shape: FurnitureShape::Box { size },
            bounce: None,
        }
    }

    pub fn round(name: &str, center: Vec2, radius: f32) -> Self {
        Self {
            name: name.to_string(),
            center,
            shape: FurnitureShape::Circle { radius },
            bounce: None,
        }
    }

    pub fn bounds(&self) -> Result<Rect> {
        match self.shape {
            FurnitureShape::Box { size } => Rect::checked(&self.name, self.center, size * 0.5),
            FurnitureShape::Circle { radius } => {
                Rect::checked(&self.name, self.center, Vec2::splat(radius))
            }
        }
    }

    pub fn collider(&self, interior_bounce: f32) -> Result<StaticCollider> {
        Ok(StaticCollider::blocking(
            self.bounds()?,
            ColliderKind::Furniture,
            self.bounce.unwrap_or(interior_bounce),
        ))
    }
}

/// The office furniture set: desk with a computer, two chairs, a plant
pub fn office_furniture() -> Vec<Furniture> {
    vec![
        Furniture::boxed("desk", Vec2::new(500.0, 200.0), Vec2::new(128.0, 64.0)),
        Furniture::boxed("computer", Vec2::new(500.0, 180.0), Vec2::new(64.0, 32.0)),
        Furniture::boxed("chair", Vec2::new(450.0, 250.0), Vec2::new(32.0, 32.0)),
        Furniture::boxed("chair", Vec2::new(550.0, 250.0), Vec2::new(32.0, 32.0)),
        Furniture::round("plant", Vec2::new(300.0, 150.0), 20.0),
    ]
}

/// Everything static in a session: bounds, colliders, decorations
#[derive(Debug, Clone, PartialEq)]
pub struct Arena {
    pub world: WorldBounds,
    pub colliders: ColliderSet,
    pub decorations: Vec<Rect>,
}

impl Arena {
    /// An arena with nothing in it but its bounds
    pub fn open(world: WorldBounds) -> Self {
        Self {
            world,
            colliders: ColliderSet::default(),
            decorations: Vec::new(),
        }
    }

    /// Assemble the static contents described by a config.
    ///
    /// Order: tilemap walls, border walls, furniture.
    pub fn build(config: &SessionConfig) -> Result<Self> {
        let world = WorldBounds::new(config.world.width, config.world.height)?;
        let mut colliders = Vec::new();
        let mut decorations = Vec::new();

        if let Some(tilemap) = &config.tilemap {
            let map = tilemap.to_grid()?.generate(ColliderKind::Wall, config.bounce.interior)?;
            colliders.extend(map.colliders);
            decorations.extend(map.decorations);
        }

        if let Some(border) = &config.border {
            let cols = (world.width / border.tile_size).floor() as usize;
            let rows = (world.height / border.tile_size).floor() as usize;
            let map = TileGrid::border(cols, rows, border.tile_size)?
                .generate(ColliderKind::Border, config.bounce.border)?;
            colliders.extend(map.colliders);
            decorations.extend(map.decorations);
        }

        for piece in &config.furniture {
            colliders.push(piece.collider(config.bounce.interior)?);
        }

        log::info!(
            "Arena {}x{}: {} colliders, {} decorations",
            world.width,
            world.height,
            colliders.len(),
            decorations.len()
        );

        Ok(Self {
            world,
            colliders: ColliderSet::new(colliders),
            decorations,
        })
    }
}

//! Session configuration and arena presets
//!
//! A session is configured once at startup. The four arena layouts (open
//! floor, furnished office, walled border, tilemap) are presets of the same
//! config rather than separate scenes.

use std::path::Path;
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, Result};
use crate::sim::arena::{Furniture, office_furniture};
use crate::sim::geometry::{Rect, WorldBounds};
use crate::sim::tick::Motion;
use crate::sim::tilemap::{TileGrid, TilemapConfig};

/// Built-in arena layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ArenaPreset {
    /// Empty floor, faster player
    Open,
    /// Desk, computer, chairs and a plant
    #[default]
    Office,
    /// Procedural ring of wall tiles with a springy edge
    Bordered,
    /// Walls from the built-in tile grid
    Tilemap,
}

impl ArenaPreset {
    pub const ALL: [ArenaPreset; 4] = [
        ArenaPreset::Open,
        ArenaPreset::Office,
        ArenaPreset::Bordered,
        ArenaPreset::Tilemap,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArenaPreset::Open => "open",
            ArenaPreset::Office => "office",
            ArenaPreset::Bordered => "bordered",
            ArenaPreset::Tilemap => "tilemap",
        }
    }
}

impl FromStr for ArenaPreset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "open" | "empty" => Ok(ArenaPreset::Open),
            "office" | "furniture" => Ok(ArenaPreset::Office),
            "bordered" | "border" => Ok(ArenaPreset::Bordered),
            "tilemap" | "map" => Ok(ArenaPreset::Tilemap),
            _ => Err(ConfigError::UnknownPreset(s.to_string())),
        }
    }
}

/// Built-in tile layout (12x9 tiles of 64 units)
pub const OFFICE_MAP: [&str; 9] = [
    "############",
    "#....#.....#",
    "#....#.....#",
    "#..........#",
    "#..........#",
    "#...##..#..#",
    "#.......#..#",
    "#.......#..#",
    "############",
];

/// Bounce coefficients (fraction of incoming speed kept on contact)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BounceConfig {
    /// Tilemap walls and furniture
    pub interior: f32,
    /// World bounds and procedural border tiles
    pub border: f32,
}

/// Procedural border around the world edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BorderConfig {
    pub tile_size: f32,
}

/// Everything a session needs at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub world: WorldBounds,
    /// Player spawn (center)
    pub spawn: Vec2,
    /// Player full size
    pub player_size: Vec2,
    /// Player speed (units per second)
    pub speed: f32,
    pub bounce: BounceConfig,
    /// Wall grid; `None` means no interior walls
    pub tilemap: Option<TilemapConfig>,
    pub border: Option<BorderConfig>,
    pub furniture: Vec<Furniture>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            world: WorldBounds {
                width: WORLD_WIDTH,
                height: WORLD_HEIGHT,
            },
            spawn: Vec2::new(SPAWN_X, SPAWN_Y),
            player_size: Vec2::splat(PLAYER_SIZE),
            speed: PLAYER_SPEED,
            bounce: BounceConfig::default(),
            tilemap: None,
            border: None,
            furniture: Vec::new(),
        }
    }
}

fn check_bounce(b: f32) -> Result<()> {
    if (0.0..=1.0).contains(&b) {
        Ok(())
    } else {
        Err(ConfigError::InvalidBounce(b))
    }
}

impl SessionConfig {
    /// Config for one of the built-in layouts
    pub fn preset(preset: ArenaPreset) -> Self {
        let base = Self::default();
        match preset {
            ArenaPreset::Open => Self {
                speed: OPEN_ARENA_SPEED,
                ..base
            },
            ArenaPreset::Office => Self {
                furniture: office_furniture(),
                ..base
            },
            ArenaPreset::Bordered => Self {
                border: Some(BorderConfig {
                    tile_size: BORDER_TILE_SIZE,
                }),
                bounce: BounceConfig {
                    interior: 0.0,
                    border: BORDER_BOUNCE,
                },
                ..base
            },
            ArenaPreset::Tilemap => Self {
                tilemap: Some(TilemapConfig {
                    rows: OFFICE_MAP.iter().map(|r| r.to_string()).collect(),
                    tile_size: TILE_SIZE,
                }),
                ..base
            },
        }
    }

    /// Check everything that can be checked without building the arena
    pub fn validate(&self) -> Result<()> {
        self.world.validate()?;

        let body = Rect::checked("player", self.spawn, self.player_size * 0.5)?;
        if !self.world.fits(body.half_extents()) {
            return Err(ConfigError::PlayerTooLarge {
                size: body.size(),
                width: self.world.width,
                height: self.world.height,
            });
        }

        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(ConfigError::InvalidSpeed(self.speed));
        }

        check_bounce(self.bounce.interior)?;
        check_bounce(self.bounce.border)?;
        for piece in &self.furniture {
            if let Some(b) = piece.bounce {
                check_bounce(b)?;
            }
            piece.bounds()?;
        }

        if let Some(tilemap) = &self.tilemap {
            tilemap.to_grid()?;
        }
        if let Some(border) = &self.border {
            TileGrid::check_tile_size(border.tile_size)?;
            let cols = (self.world.width / border.tile_size).floor() as usize;
            let rows = (self.world.height / border.tile_size).floor() as usize;
            if cols < 3 || rows < 3 {
                return Err(ConfigError::BorderTooSmall { cols, rows });
            }
        }
        Ok(())
    }

    pub fn motion(&self) -> Motion {
        Motion {
            speed: self.speed,
            border_bounce: self.bounce.border,
        }
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded session config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Session config saved to {}", path.as_ref().display());
        Ok(())
    }
}

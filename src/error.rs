//! Configuration errors
//!
//! Everything inside a running session is infallible; all failures are caught
//! while a session is being set up.

use glam::Vec2;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("degenerate shape '{label}': half extents {half_extents} must be positive and finite")]
    DegenerateShape { label: String, half_extents: Vec2 },
    #[error("non-finite center {center} for shape '{label}'")]
    NonFiniteCenter { label: String, center: Vec2 },
    #[error("world size {width}x{height} must be positive and finite")]
    InvalidWorld { width: f32, height: f32 },
    #[error("player size {size} does not fit in a {width}x{height} world")]
    PlayerTooLarge { size: Vec2, width: f32, height: f32 },
    #[error("tile size {0} must be finite and greater than 1")]
    InvalidTileSize(f32),
    #[error("unknown tile code '{code}' at row {row}, column {col}")]
    UnknownTileCode { row: usize, col: usize, code: char },
    #[error("border grid {cols}x{rows} is too small (need at least 3x3 tiles)")]
    BorderTooSmall { cols: usize, rows: usize },
    #[error("player speed {0} must be finite and non-negative")]
    InvalidSpeed(f32),
    #[error("bounce coefficient {0} must be within [0, 1]")]
    InvalidBounce(f32),
    #[error("unknown arena preset '{0}'")]
    UnknownPreset(String),
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T, E = ConfigError> = std::result::Result<T, E>;

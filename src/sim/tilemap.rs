//! Grid layouts to colliders
//!
//! A tile grid is read once at session setup. Wall cells become blocking
//! colliders; empty cells become inset floor decorations that never collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arena::{ColliderKind, StaticCollider};
use super::geometry::Rect;
use crate::error::{ConfigError, Result};

/// Code of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileCell {
    Empty,
    Wall,
}

impl TileCell {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '#' => Some(TileCell::Wall),
            '.' | ' ' => Some(TileCell::Empty),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            TileCell::Wall => '#',
            TileCell::Empty => '.',
        }
    }
}

/// A grid of cells at a fixed tile size. Rows may be ragged.
#[derive(Debug, Clone, PartialEq)]
pub struct TileGrid {
    rows: Vec<Vec<TileCell>>,
    tile_size: f32,
}

/// Output of one generation pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tilemap {
    /// Blocking wall colliders
    pub colliders: Vec<StaticCollider>,
    /// Floor decorations (never collide)
    pub decorations: Vec<Rect>,
}

/// Gap between neighbouring floor decorations
const DECORATION_INSET: f32 = 1.0;

impl TileGrid {
    /// Tiles must be wider than the decoration inset
    pub fn check_tile_size(tile_size: f32) -> Result<()> {
        if tile_size.is_finite() && tile_size > DECORATION_INSET {
            Ok(())
        } else {
            Err(ConfigError::InvalidTileSize(tile_size))
        }
    }

    pub fn new(rows: Vec<Vec<TileCell>>, tile_size: f32) -> Result<Self> {
        Self::check_tile_size(tile_size)?;
        Ok(Self { rows, tile_size })
    }

    /// Parse text rows: `#` is a wall, `.` or space is floor
    pub fn parse<S: AsRef<str>>(lines: &[S], tile_size: f32) -> Result<Self> {
        let rows = lines
            .iter()
            .enumerate()
            .map(|(row, line)| {
                line.as_ref()
                    .chars()
                    .enumerate()
                    .map(|(col, code)| {
                        TileCell::from_char(code).ok_or(ConfigError::UnknownTileCode { row, col, code })
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(rows, tile_size)
    }

    /// A `cols` x `rows` grid with a ring of walls and an empty interior
    pub fn border(cols: usize, rows: usize, tile_size: f32) -> Result<Self> {
        if cols < 3 || rows < 3 {
            return Err(ConfigError::BorderTooSmall { cols, rows });
        }
        let grid = (0..rows)
            .map(|r| {
                (0..cols)
                    .map(|c| {
                        if r == 0 || r == rows - 1 || c == 0 || c == cols - 1 {
                            TileCell::Wall
                        } else {
                            TileCell::Empty
                        }
                    })
                    .collect()
            })
            .collect();
        Self::new(grid, tile_size)
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn rows(&self) -> &[Vec<TileCell>] {
        &self.rows
    }

    /// Widest row, in cells
    pub fn width_cells(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn height_cells(&self) -> usize {
        self.rows.len()
    }

    /// World-space center of cell `(col, row)`
    #[inline]
    pub fn cell_center(&self, col: usize, row: usize) -> Vec2 {
        let ts = self.tile_size;
        Vec2::new(col as f32 * ts + ts / 2.0, row as f32 * ts + ts / 2.0)
    }

    /// Text form, one string per row
    pub fn to_lines(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| row.iter().map(TileCell::as_char).collect())
            .collect()
    }

    /// Generate wall colliders and floor decorations.
    ///
    /// Walls are tagged `kind` and carry `bounce`. Cells are visited
    /// top-to-bottom, left-to-right.
    pub fn generate(&self, kind: ColliderKind, bounce: f32) -> Result<Tilemap> {
        let ts = self.tile_size;
        let wall_size = Vec2::splat(ts);
        let floor_size = Vec2::splat(ts - DECORATION_INSET);

        let mut out = Tilemap::default();
        for (row, cells) in self.rows.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let center = self.cell_center(col, row);
                match cell {
                    TileCell::Wall => {
                        let shape = Rect::checked("wall tile", center, wall_size * 0.5)?;
                        out.colliders.push(StaticCollider::blocking(shape, kind, bounce));
                    }
                    TileCell::Empty => {
                        out.decorations
                            .push(Rect::checked("floor tile", center, floor_size * 0.5)?);
                    }
                }
            }
        }

        log::debug!(
            "Tilemap {}x{} @ {}: {} walls, {} floor tiles",
            self.width_cells(),
            self.height_cells(),
            ts,
            out.colliders.len(),
            out.decorations.len()
        );
        Ok(out)
    }
}

/// Serializable text form of a grid, used in config files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TilemapConfig {
    pub rows: Vec<String>,
    pub tile_size: f32,
}

impl TilemapConfig {
    pub fn to_grid(&self) -> Result<TileGrid> {
        TileGrid::parse(&self.rows, self.tile_size)
    }
}

impl From<&TileGrid> for TilemapConfig {
    fn from(grid: &TileGrid) -> Self {
        Self {
            rows: grid.to_lines(),
            tile_size: grid.tile_size,
        }
    }
}

//! Office Arena - top-down arena movement core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (input, movement, collisions, tilemaps)
//! - `session`: Session lifecycle and the render/input seams
//! - `config`: Session configuration and arena presets
//! - `error`: Configuration errors

pub mod config;
pub mod error;
pub mod session;
pub mod sim;

pub use config::{ArenaPreset, SessionConfig};
pub use error::ConfigError;
pub use session::{PlayerFrame, RecordingSink, RenderSink, Session, SessionHost};

/// Simulation configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame accepted by the host (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Arena dimensions
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const SPAWN_X: f32 = 400.0;
    pub const SPAWN_Y: f32 = 300.0;
    pub const PLAYER_SIZE: f32 = 32.0;
    pub const PLAYER_SPEED: f32 = 160.0;
    /// Nothing to bump into on the open floor, so move faster
    pub const OPEN_ARENA_SPEED: f32 = 200.0;

    /// Tilemap defaults
    pub const TILE_SIZE: f32 = 64.0;
    pub const BORDER_TILE_SIZE: f32 = 40.0;
    /// Border walls give a little
    pub const BORDER_BOUNCE: f32 = 0.2;
}

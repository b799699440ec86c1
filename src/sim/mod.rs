//! Deterministic movement simulation
//!
//! All movement and collision logic lives here. This module must be pure
//! and deterministic:
//! - No rendering, input devices or platform dependencies
//! - Colliders are built once and never mutated during a session
//! - Same inputs from the same state give bit-identical results

pub mod arena;
pub mod collision;
pub mod geometry;
pub mod input;
pub mod movement;
pub mod state;
pub mod tick;
pub mod tilemap;

pub use arena::{Arena, ColliderKind, ColliderSet, Furniture, FurnitureShape, StaticCollider, office_furniture};
pub use collision::{Contacts, Resolution, is_clear, resolve};
pub use geometry::{Rect, WorldBounds};
pub use input::{InputSnapshot, InputSource, ScriptedInput, WanderInput, poll};
pub use movement::desired_velocity;
pub use state::Player;
pub use tick::{Motion, tick};
pub use tilemap::{TileCell, TileGrid, Tilemap, TilemapConfig};

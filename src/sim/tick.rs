//! One simulation step
//!
//! Input -> desired velocity -> collision resolution -> player update.
//! No business logic beyond sequencing.

use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::collision::{Contacts, resolve};
use super::input::InputSnapshot;
use super::movement::desired_velocity;
use super::state::Player;

/// Per-session movement tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    /// Player speed (units per second)
    pub speed: f32,
    /// Bounce off the world bounds
    pub border_bounce: f32,
}

/// Advance the player by one step of `dt` seconds.
///
/// Non-finite or negative `dt` is treated as zero, which still resolves
/// any overlap left over from spawning.
pub fn tick(player: &mut Player, arena: &Arena, motion: &Motion, input: &InputSnapshot, dt: f32) -> Contacts {
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

    let desired = desired_velocity(input, motion.speed);
    player.face(desired.x);

    let resolved = resolve(
        &player.bounds(),
        desired,
        dt,
        &arena.colliders,
        &arena.world,
        motion.border_bounce,
    );
    player.position = resolved.position;
    player.velocity = resolved.velocity;

    if resolved.contacts.any() {
        log::debug!(
            "contact at ({:.2}, {:.2}): bounds={:?} blocked={:?} pushes={}",
            resolved.position.x,
            resolved.position.y,
            resolved.contacts.bounds,
            resolved.contacts.blocked,
            resolved.contacts.pushes
        );
    }
    resolved.contacts
}

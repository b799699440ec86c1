//! Directional input snapshots and input sources
//!
//! The core never reads a keyboard. An external collaborator hands it one
//! `InputSnapshot` per tick through the `InputSource` trait.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Held directions for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl InputSnapshot {
    /// No keys held
    pub const NONE: Self = Self {
        up: false,
        down: false,
        left: false,
        right: false,
    };

    pub fn is_idle(&self) -> bool {
        *self == Self::NONE
    }
}

/// Source of per-tick input
pub trait InputSource {
    /// Current input, or `None` when no device data is available
    fn snapshot(&mut self) -> Option<InputSnapshot>;
}

/// Treat missing device data as "nothing pressed"
pub fn poll(source: &mut dyn InputSource) -> InputSnapshot {
    source.snapshot().unwrap_or_default()
}

/// A held snapshot repeats every tick
impl InputSource for InputSnapshot {
    fn snapshot(&mut self) -> Option<InputSnapshot> {
        Some(*self)
    }
}

/// `None` models a missing keyboard
impl InputSource for Option<InputSnapshot> {
    fn snapshot(&mut self) -> Option<InputSnapshot> {
        *self
    }
}

/// Replays a recorded sequence, then reports no input
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: Vec<InputSnapshot>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn new(frames: Vec<InputSnapshot>) -> Self {
        Self { frames, cursor: 0 }
    }

    /// Hold `input` for `ticks` ticks, appended to the script
    pub fn hold(mut self, input: InputSnapshot, ticks: usize) -> Self {
        self.frames.extend(std::iter::repeat_n(input, ticks));
        self
    }

    pub fn remaining(&self) -> usize {
        self.frames.len().saturating_sub(self.cursor)
    }

    pub fn rewind(&mut self) {
        self.cursor = 0;
    }
}

impl InputSource for ScriptedInput {
    fn snapshot(&mut self) -> Option<InputSnapshot> {
        let frame = self.frames.get(self.cursor).copied();
        if frame.is_some() {
            self.cursor += 1;
        }
        frame
    }
}

/// Seeded random walk: picks a key combination and holds it for a while.
///
/// Same seed, same sequence.
#[derive(Debug, Clone)]
pub struct WanderInput {
    rng: Pcg32,
    current: InputSnapshot,
    hold_ticks: u32,
}

/// Shortest and longest hold of one combination (ticks)
const WANDER_HOLD_MIN: u32 = 10;
const WANDER_HOLD_MAX: u32 = 60;

/// Per-key chance of being held in a new combination
const WANDER_KEY_CHANCE: f64 = 0.35;

impl WanderInput {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            current: InputSnapshot::NONE,
            hold_ticks: 0,
        }
    }

    fn reroll(&mut self) {
        self.current = InputSnapshot {
            up: self.rng.random_bool(WANDER_KEY_CHANCE),
            down: self.rng.random_bool(WANDER_KEY_CHANCE),
            left: self.rng.random_bool(WANDER_KEY_CHANCE),
            right: self.rng.random_bool(WANDER_KEY_CHANCE),
        };
        self.hold_ticks = self.rng.random_range(WANDER_HOLD_MIN..=WANDER_HOLD_MAX);
    }
}

impl InputSource for WanderInput {
    fn snapshot(&mut self) -> Option<InputSnapshot> {
        if self.hold_ticks == 0 {
            self.reroll();
        }
        self.hold_ticks -= 1;
        Some(self.current)
    }
}

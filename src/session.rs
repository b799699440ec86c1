//! Session lifecycle
//!
//! A `Session` owns the player and the static arena for as long as the
//! simulation runs. It is driven from outside: each tick pulls input from an
//! `InputSource` and pushes the result to a `RenderSink`. `SessionHost`
//! owns at most one session and runs the fixed-timestep accumulator.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;
use crate::consts::*;
use crate::error::Result;
use crate::sim::{Arena, InputSnapshot, InputSource, Motion, Player, poll, tick};

/// What the render side needs about the player after a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerFrame {
    /// Ticks completed so far
    pub tick: u64,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Sprite mirroring hint
    pub facing_right: bool,
}

/// Receives the static scene once and a player frame every tick
pub trait RenderSink {
    /// Called once when a session is mounted
    fn scene(&mut self, arena: &Arena, spawn: &PlayerFrame);
    fn frame(&mut self, frame: &PlayerFrame);
}

/// Keeps everything it is sent (headless runs and tests)
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub scenes: Vec<Arena>,
    pub frames: Vec<PlayerFrame>,
}

impl RecordingSink {
    pub fn last(&self) -> Option<&PlayerFrame> {
        self.frames.last()
    }
}

impl RenderSink for RecordingSink {
    fn scene(&mut self, arena: &Arena, spawn: &PlayerFrame) {
        self.scenes.push(arena.clone());
        self.frames.push(*spawn);
    }

    fn frame(&mut self, frame: &PlayerFrame) {
        self.frames.push(*frame);
    }
}

/// A running simulation
#[derive(Debug, Clone)]
pub struct Session {
    arena: Arena,
    player: Player,
    motion: Motion,
    time_ticks: u64,
}

impl Session {
    /// Validate the config and build the arena and player
    pub fn create(config: SessionConfig) -> Result<Self> {
        config.validate()?;
        let arena = Arena::build(&config)?;
        let player = Player::spawn(config.spawn, config.player_size)?;

        if let Some(blocker) = arena.colliders.first_overlap(&player.bounds()) {
            log::warn!(
                "Spawn ({}, {}) overlaps a {:?} collider; it will be corrected on the first tick",
                config.spawn.x,
                config.spawn.y,
                blocker.kind()
            );
        } else if !arena.world.contains(&player.bounds()) {
            log::warn!(
                "Spawn ({}, {}) is outside the world; it will be corrected on the first tick",
                config.spawn.x,
                config.spawn.y
            );
        }
        log::info!(
            "Session created: spawn=({}, {}) speed={} colliders={}",
            config.spawn.x,
            config.spawn.y,
            config.speed,
            arena.colliders.len()
        );

        Ok(Self {
            arena,
            player,
            motion: config.motion(),
            time_ticks: 0,
        })
    }

    /// Tear the session down
    pub fn destroy(self) {
        log::info!("Session destroyed after {} ticks", self.time_ticks);
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn motion(&self) -> &Motion {
        &self.motion
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Current player frame
    pub fn frame(&self) -> PlayerFrame {
        PlayerFrame {
            tick: self.time_ticks,
            position: self.player.position,
            velocity: self.player.velocity,
            facing_right: self.player.facing_right,
        }
    }

    /// Advance one tick with the given input
    pub fn step(&mut self, input: &InputSnapshot, dt: f32) -> PlayerFrame {
        tick(&mut self.player, &self.arena, &self.motion, input, dt);
        self.time_ticks += 1;
        self.frame()
    }

    /// Pull input, advance one tick, publish the result
    pub fn tick(&mut self, input: &mut dyn InputSource, sink: &mut dyn RenderSink, dt: f32) -> PlayerFrame {
        let snapshot = poll(input);
        let frame = self.step(&snapshot, dt);
        sink.frame(&frame);
        frame
    }

    /// Send the static scene to the render side
    pub fn publish_scene(&self, sink: &mut dyn RenderSink) {
        sink.scene(&self.arena, &self.frame());
    }
}

/// Owner of the current session, if any
#[derive(Debug, Default)]
pub struct SessionHost {
    session: Option<Session>,
    accumulator: f32,
}

impl SessionHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new session, replacing (and destroying) any current one.
    ///
    /// On error the current session is left untouched.
    pub fn mount(&mut self, config: SessionConfig, sink: &mut dyn RenderSink) -> Result<&mut Session> {
        let session = Session::create(config)?;
        self.unmount();
        session.publish_scene(sink);
        Ok(self.session.insert(session))
    }

    /// Destroy the current session. Returns false if there was none.
    pub fn unmount(&mut self) -> bool {
        self.accumulator = 0.0;
        match self.session.take() {
            Some(session) => {
                session.destroy();
                true
            }
            None => false,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut Session> {
        self.session.as_mut()
    }

    /// Run as many fixed ticks as `frame_dt` covers.
    ///
    /// Returns the number of ticks run (0 when nothing is mounted).
    pub fn frame(&mut self, frame_dt: f32, input: &mut dyn InputSource, sink: &mut dyn RenderSink) -> u32 {
        let Some(session) = self.session.as_mut() else {
            return 0;
        };

        let dt = if frame_dt.is_finite() { frame_dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            session.tick(input, sink, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        substeps
    }
}

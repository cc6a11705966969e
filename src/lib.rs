//! Neon Runner - side-scrolling arcade combat simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, physics, combat)
//! - `session`: Menu / play / perk choice / game over control around the sim
//! - `highscores`: Persisted high score behind a storage trait
//! - `settings`: Runtime configuration

pub mod highscores;
pub mod session;
pub mod settings;
pub mod sim;

pub use highscores::{HighScore, MemoryStorage, ScoreStorage};
pub use session::{Session, SessionPhase};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Host frame rate the simulation is tuned for (one tick per frame)
    pub const FRAMES_PER_SECOND: u32 = 60;

    /// Playfield dimensions
    pub const CANVAS_WIDTH: f32 = 1200.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;
    pub const GROUND_HEIGHT: f32 = 80.0;
    /// Y coordinate of the ground surface
    pub const GROUND_Y: f32 = CANVAS_HEIGHT - GROUND_HEIGHT;

    /// Entities further than this outside the viewport are culled
    pub const CULL_MARGIN: f32 = 300.0;

    /// World scroll speed (units per frame)
    pub const BASE_SCROLL_SPEED: f32 = 9.0;
    /// Frames between spawn rolls at speed multiplier 1.0
    pub const SPAWN_RATE_FRAMES: u32 = 70;

    /// Player body
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 70.0;
    /// Distance from the player's center at which projectiles appear
    pub const MUZZLE_OFFSET: f32 = 40.0;

    /// Score rewards
    pub const ENEMY_KILL_SCORE: f64 = 200.0;
    pub const BOSS_KILL_SCORE: f64 = 10_000.0;
    pub const SHARD_SCORE: f64 = 50.0;
    pub const MEDKIT_SCORE: f64 = 100.0;
    pub const MEDKIT_HEAL: f32 = 30.0;

    /// Shard progression
    pub const START_SHARD_TARGET: u32 = 10;
    pub const SHARD_TARGET_GROWTH: f64 = 1.5;
}

/// Center point of an axis-aligned rectangle given its top-left corner and size
#[inline]
pub fn rect_center(pos: Vec2, size: Vec2) -> Vec2 {
    pos + size * 0.5
}

/// Angle (radians) of the ray from `from` toward `to`, in screen space (y down)
#[inline]
pub fn aim_angle(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Unit vector for an angle
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

//! Astro Blaster - clear the asteroid field, then take down the boss
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, boss AI, game status, demo AI)
//! - `timers`: Fixed-interval / fixed-delay scheduler with total cancellation
//! - `session`: Owns the simulation, its clock and timers; ends the game cleanly
//! - `hud`: Counters and banners shown over the playfield
//! - `render`: Drawing through a pluggable 2D scene (Canvas 2D in the browser)
//! - `tuning`: Data-driven game balance

pub mod hud;
pub mod render;
pub mod session;
pub mod sim;
pub mod timers;
pub mod tuning;

pub use session::Session;
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per display refresh)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    /// Ship
    pub const SHIP_WIDTH: f32 = 80.0;
    pub const SHIP_HEIGHT: f32 = 100.0;
    /// Distance from the bottom edge to the ship center
    pub const SHIP_BOTTOM_OFFSET: f32 = 70.0;
    /// Horizontal step per arrow key press
    pub const SHIP_STEP: f32 = 20.0;

    /// Player bullets
    pub const BULLET_WIDTH: f32 = 10.0;
    pub const BULLET_HEIGHT: f32 = 20.0;
    /// Pixels per tick, upward
    pub const BULLET_SPEED: f32 = 15.0;
    /// Shots per round (refilled when the boss arrives)
    pub const SHOT_BUDGET: u32 = 10;

    /// Asteroid field
    pub const ASTEROID_COUNT: usize = 10;
    pub const ASTEROID_SIZE: f32 = 70.0;
    /// Strip at the bottom of the screen kept free of asteroids
    pub const ASTEROID_CLEAR_ZONE: f32 = 250.0;

    /// Round timer (seconds)
    pub const TIME_LIMIT_SECS: u32 = 60;

    /// Boss
    pub const BOSS_WIDTH: f32 = 250.0;
    pub const BOSS_HEIGHT: f32 = 200.0;
    pub const BOSS_Y: f32 = 160.0;
    pub const BOSS_MAX_HP: u32 = 4;
    /// Pixels per tick while moving
    pub const BOSS_SPEED: f32 = 2.0;
    pub const BOSS_IDLE_MS: f64 = 4000.0;
    pub const BOSS_MOVE_MS: f64 = 4000.0;
    /// Delay between the "FINAL BOSS!" banner and the fight
    pub const BOSS_INTRO_MS: f64 = 3000.0;

    /// Boss projectiles
    pub const BOSS_SHOT_INTERVAL_MS: f64 = 2000.0;
    pub const BOSS_SHOT_RADIUS: f32 = 20.0;
    /// Pixels per tick
    pub const BOSS_SHOT_SPEED: f32 = 4.0;
    /// Spawn distance from the boss center along the aim line
    pub const BOSS_SHOT_MUZZLE: f32 = 50.0;

    /// Boss health bar
    pub const HP_BAR_WIDTH: f32 = 200.0;
    pub const HP_BAR_HEIGHT: f32 = 10.0;
    pub const HP_BAR_PADDING: f32 = 10.0;
}

/// Unit vector for an angle in radians
#[inline]
pub fn direction_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Angle (radians) of the line from `from` to `to`
#[inline]
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, timer or platform dependencies

pub mod autopilot;
pub mod boss;
pub mod geometry;
pub mod spawn;
pub mod state;
pub mod status;
pub mod tick;

pub use autopilot::autopilot_action;
pub use boss::{activate_boss, fire_boss_shot};
pub use geometry::{Bounds, HasBounds, overlaps, proximity_hit};
pub use spawn::{SpawnError, spawn_asteroid_field};
pub use state::{
    Asteroid, Boss, BossMotion, BossPhase, BossShot, Bullet, GameEvent, GameState, LossReason,
    Outcome, Ship, SpendReason,
};
pub use status::{StatusDecision, check_game_status, countdown_tick, evaluate};
pub use tick::{PlayerAction, TickInput, apply_action, can_fire, tick};

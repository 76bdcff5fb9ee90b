//! Asteroid field generation
//!
//! Asteroids are dropped at random positions in the upper part of the
//! screen; a candidate whose box overlaps an existing asteroid is thrown
//! away and re-rolled.

use glam::Vec2;
use rand::Rng;
use thiserror::Error;

use super::geometry::overlaps;
use super::state::{Asteroid, GameState};

/// Re-rolls allowed per asteroid before giving up
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 10_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpawnError {
    #[error("no free spot for asteroid {index} of {requested} after {attempts} attempts")]
    NoFreeSpot {
        index: usize,
        requested: usize,
        attempts: u32,
    },
}

/// Fill the field with `tuning.asteroid_count` non-overlapping asteroids
pub fn spawn_asteroid_field(state: &mut GameState) -> Result<(), SpawnError> {
    let requested = state.tuning.asteroid_count;
    for index in 0..requested {
        spawn_asteroid(state).map_err(|attempts| SpawnError::NoFreeSpot {
            index,
            requested,
            attempts,
        })?;
    }
    log::info!(
        "Spawned {} asteroids (seed {})",
        state.asteroid_count(),
        state.seed
    );
    Ok(())
}

/// Place a single asteroid. On failure returns the number of attempts made.
fn spawn_asteroid(state: &mut GameState) -> Result<u32, u32> {
    let size = state.tuning.asteroid_size;
    let span_x = state.tuning.screen_width - size;
    let span_y = state.tuning.screen_height - state.tuning.asteroid_clear_zone - size;

    for attempt in 1..=MAX_PLACEMENT_ATTEMPTS {
        let pos = Vec2::new(
            state.rng.random::<f32>() * span_x + size / 2.0,
            state.rng.random::<f32>() * span_y + size / 2.0,
        );
        let candidate = Asteroid {
            id: 0,
            pos,
            size: Vec2::splat(size),
        };

        if state.asteroids.iter().any(|a| overlaps(&candidate, a)) {
            continue;
        }

        let id = state.next_entity_id();
        state.asteroids.push(Asteroid { id, ..candidate });
        return Ok(attempt);
    }

    Err(MAX_PLACEMENT_ATTEMPTS)
}

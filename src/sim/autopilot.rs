//! Demo mode: a simple AI that plays the game
//!
//! Each step it picks at most one command. Incoming boss shots are dodged
//! first; otherwise the ship lines up under an unclaimed target and fires.

use super::geometry::HasBounds;
use super::state::{BossShot, GameState};
use super::tick::{PlayerAction, can_fire};

/// How far above the ship a boss shot is worth dodging
const DODGE_RANGE: f32 = 260.0;

/// Next command for the demo player, if any
pub fn autopilot_action(state: &GameState) -> Option<PlayerAction> {
    if state.is_over() {
        return None;
    }

    if let Some(action) = dodge(state) {
        return Some(action);
    }

    let bullet_reach = state.tuning.bullet_width.min(state.tuning.bullet_height) / 2.0;

    let (target_x, reach) = if state.boss.is_engaged() {
        // One bullet per remaining hit point is enough
        if state.bullets.len() as u32 >= state.boss.hp {
            return None;
        }
        (state.boss.pos.x, state.boss.bounds().hit_radius() + bullet_reach)
    } else {
        let asteroid = state
            .asteroids
            .iter()
            .filter(|a| {
                !is_claimed(state, a.pos.x, a.pos.y, a.bounds().hit_radius() + bullet_reach)
            })
            .min_by(|a, b| {
                let da = (a.pos.x - state.ship.pos.x).abs();
                let db = (b.pos.x - state.ship.pos.x).abs();
                da.total_cmp(&db)
            })?;
        (asteroid.pos.x, asteroid.bounds().hit_radius() + bullet_reach)
    };

    let dx = target_x - state.ship.pos.x;
    if dx.abs() < reach.min(state.tuning.ship_step) {
        can_fire(state).then_some(PlayerAction::Fire)
    } else if dx < 0.0 {
        Some(PlayerAction::MoveLeft)
    } else {
        Some(PlayerAction::MoveRight)
    }
}

/// A bullet already in flight below this point and within its column
fn is_claimed(state: &GameState, x: f32, y: f32, reach: f32) -> bool {
    state
        .bullets
        .iter()
        .any(|b| (b.pos.x - x).abs() < reach && b.pos.y > y)
}

fn dodge(state: &GameState) -> Option<PlayerAction> {
    let ship = &state.ship;
    let margin = ship.bounds().hit_radius() + state.tuning.ship_step;

    let threat = state
        .boss_shots
        .iter()
        .filter(|s| s.vel.y > 0.0 && s.pos.y < ship.pos.y && ship.pos.y - s.pos.y < DODGE_RANGE)
        .map(|s| (s, projected_x(s, ship.pos.y)))
        .filter(|(s, x)| (x - ship.pos.x).abs() < margin + s.radius)
        .min_by(|a, b| b.0.pos.y.total_cmp(&a.0.pos.y))?;

    let (_, impact_x) = threat;
    let half = ship.size.x / 2.0;
    let can_go_left = ship.pos.x - half > state.tuning.ship_step;
    let can_go_right = ship.pos.x + half < state.tuning.screen_width - state.tuning.ship_step;

    let go_left = if impact_x >= ship.pos.x { can_go_left } else { !can_go_right };
    Some(if go_left {
        PlayerAction::MoveLeft
    } else {
        PlayerAction::MoveRight
    })
}

/// Where a shot will cross the ship's row
fn projected_x(shot: &BossShot, row_y: f32) -> f32 {
    let ticks = (row_y - shot.pos.y) / shot.vel.y;
    shot.pos.x + shot.vel.x * ticks
}

//! Boss behavior
//!
//! Motion alternates between `Idle` and `Moving` on fixed durations measured
//! from the moment each state was entered. Firing is driven separately by a
//! repeating timer owned by the session, which calls [`fire_boss_shot`].

use glam::Vec2;
use rand::Rng;

use super::geometry::proximity_hit;
use super::state::{
    BossMotion, BossPhase, BossShot, GameEvent, GameState, LossReason, Outcome, SpendReason,
};
use super::status::{check_game_status, declare_outcome};
use crate::{angle_between, direction_from_angle};

/// Bring the boss on stage: full health, fresh round counters, `Moving`.
///
/// Called when the intro delay elapses. Does nothing unless the boss has
/// been announced.
pub fn activate_boss(state: &mut GameState) {
    if state.boss.phase != BossPhase::Announced || state.is_over() {
        return;
    }

    // New round: refill the shot budget and restart the clock
    state.time_remaining = state.tuning.time_limit_secs;
    state.shots_available = state.tuning.shot_budget;
    state.remaining_shots = state.tuning.shot_budget;

    state.boss.phase = BossPhase::Engaged;
    state.boss.hp = state.boss.max_hp;
    enter_motion(state, BossMotion::Moving);

    state.push_event(GameEvent::TimeChanged {
        remaining: state.time_remaining,
    });
    state.push_event(GameEvent::BossEngaged);
    log::info!("Boss engaged with {} hp", state.boss.hp);
}

fn enter_motion(state: &mut GameState, motion: BossMotion) {
    state.boss.motion = motion;
    state.boss.state_entered_ms = state.now_ms;
    if motion == BossMotion::Moving {
        state.boss.direction = if state.rng.random_bool(0.5) { 1.0 } else { -1.0 };
    }
    log::debug!(
        "Boss -> {:?} at {:.0}ms (direction {})",
        motion,
        state.now_ms,
        state.boss.direction
    );
    state.push_event(GameEvent::BossMotionChanged {
        motion,
        direction: state.boss.direction,
    });
}

/// Advance the boss motion state machine by one tick
pub fn update_boss(state: &mut GameState) {
    if !state.boss.is_engaged() {
        return;
    }

    let elapsed = state.now_ms - state.boss.state_entered_ms;

    match state.boss.motion {
        BossMotion::Idle => {
            if elapsed > state.tuning.boss_idle_ms {
                enter_motion(state, BossMotion::Moving);
            }
        }
        BossMotion::Moving => {
            if elapsed > state.tuning.boss_move_ms {
                enter_motion(state, BossMotion::Idle);
            } else {
                let screen_width = state.tuning.screen_width;
                let speed = state.tuning.boss_speed;
                let boss = &mut state.boss;
                let half_width = boss.size.x / 2.0;

                boss.pos.x += boss.direction * speed;

                if boss.pos.x - half_width < 0.0 {
                    boss.pos.x = half_width;
                    boss.direction = 1.0;
                } else if boss.pos.x + half_width > screen_width {
                    boss.pos.x = screen_width - half_width;
                    boss.direction = -1.0;
                }
            }
        }
    }
}

/// Fire one shot from the boss at the ship's current position.
///
/// The angle is fixed at the moment of firing; the shot never re-aims.
pub fn fire_boss_shot(state: &mut GameState) {
    if !state.boss.is_engaged() || state.is_over() {
        return;
    }

    let angle = angle_between(state.boss.pos, state.ship.pos);
    let dir = direction_from_angle(angle);
    let id = state.next_entity_id();

    state.boss_shots.push(BossShot {
        id,
        pos: state.boss.pos + dir * state.tuning.boss_shot_muzzle,
        vel: dir * state.tuning.boss_shot_speed,
        radius: state.tuning.boss_shot_radius,
    });
    state.push_event(GameEvent::BossShotFired { id, angle });
}

/// Move boss shots along their fixed heading and drop the ones off screen
pub fn update_boss_shots(state: &mut GameState) {
    let screen = state.screen();
    let mut gone = Vec::new();

    for shot in &mut state.boss_shots {
        shot.pos += shot.vel;
        if is_off_screen(shot.pos, screen) {
            gone.push(shot.id);
        }
    }

    for id in gone {
        state.remove_boss_shot(id);
    }
}

fn is_off_screen(pos: Vec2, screen: Vec2) -> bool {
    pos.x < 0.0 || pos.x > screen.x || pos.y < 0.0 || pos.y > screen.y
}

/// Resolve bullets against the boss and boss shots against the ship
pub fn check_boss_collisions(state: &mut GameState) {
    if !state.boss.is_engaged() {
        return;
    }

    // Bullets hitting the boss, oldest first
    let hits: Vec<u32> = state
        .bullets
        .iter()
        .filter(|b| proximity_hit(*b, &state.boss))
        .map(|b| b.id)
        .collect();

    for id in hits {
        if !state.boss.is_engaged() || state.is_over() {
            break;
        }
        if !state.spend_bullet(id, SpendReason::HitBoss) {
            continue;
        }

        state.boss.hp = state.boss.hp.saturating_sub(1);
        state.push_event(GameEvent::BossHit { hp: state.boss.hp });

        if state.boss.hp == 0 {
            state.boss.phase = BossPhase::Defeated;
            state.push_event(GameEvent::BossDefeated);
            log::info!("Boss defeated");
        }
        check_game_status(state);
    }

    if state.is_over() {
        return;
    }

    // Boss shots reaching the ship
    if state.boss_shots.iter().any(|s| proximity_hit(s, &state.ship)) {
        declare_outcome(state, Outcome::Lost(LossReason::ShipHit));
    }
}

//! Per-frame simulation tick
//!
//! The update steps run in a fixed order every frame:
//! 1. queued player input
//! 2. player bullets move, off-screen bullets are spent
//! 3. bullets collide with asteroids and boss shots
//! 4. boss moves, boss shots move
//! 5. bullets collide with the boss, boss shots with the ship
//!
//! Bullets always move before anything is tested against them, and a bullet
//! consumed in a collision leaves every pool before the next test runs.

use glam::Vec2;

use super::boss::{check_boss_collisions, update_boss, update_boss_shots};
use super::geometry::proximity_hit;
use super::state::{Bullet, GameEvent, GameState, SpendReason};
use super::status::check_game_status;

/// A discrete player command (one key press)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    MoveLeft,
    MoveRight,
    Fire,
}

/// Input commands for a single tick, in the order they arrived
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub actions: Vec<PlayerAction>,
}

impl TickInput {
    pub fn push(&mut self, action: PlayerAction) {
        self.actions.push(action);
    }

    pub fn clear(&mut self) {
        self.actions.clear();
    }
}

/// Advance the game by one frame of `dt_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f64) {
    if state.is_over() {
        return;
    }

    state.now_ms += dt_ms;
    state.time_ticks += 1;

    for action in &input.actions {
        apply_action(state, *action);
    }

    update_bullets(state);
    check_collisions(state);
    update_boss(state);
    update_boss_shots(state);
    check_boss_collisions(state);
}

/// Apply one player command. Returns true if it changed anything.
///
/// Commands are ignored once the game is over.
pub fn apply_action(state: &mut GameState, action: PlayerAction) -> bool {
    if state.is_over() {
        return false;
    }
    match action {
        PlayerAction::MoveLeft => move_ship(state, -1.0),
        PlayerAction::MoveRight => move_ship(state, 1.0),
        PlayerAction::Fire => fire_bullet(state),
    }
}

/// Step the ship left (-1) or right (+1), clamped to the screen
pub fn move_ship(state: &mut GameState, direction: f32) -> bool {
    let half_width = state.ship.size.x / 2.0;
    let max_x = state.tuning.screen_width - half_width;
    let old_x = state.ship.pos.x;

    state.ship.pos.x = (old_x + direction * state.tuning.ship_step).clamp(half_width, max_x);
    state.ship.pos.x != old_x
}

/// Whether a bullet may be fired right now.
///
/// Needs a free slot (fewer bullets in flight than shots not yet fired)
/// and at least one unspent shot.
pub fn can_fire(state: &GameState) -> bool {
    !state.is_over()
        && state.bullets.len() < state.shots_available as usize
        && state.remaining_shots > 0
}

/// Fire a bullet from the ship's nose. No-op when firing isn't allowed.
pub fn fire_bullet(state: &mut GameState) -> bool {
    if !can_fire(state) {
        return false;
    }

    state.shots_available -= 1;
    let id = state.next_entity_id();
    let nose = state.ship.pos - Vec2::new(0.0, state.ship.size.y / 2.0);
    state.bullets.push(Bullet {
        id,
        pos: nose,
        vel: Vec2::new(0.0, -state.tuning.bullet_speed),
        size: Vec2::new(state.tuning.bullet_width, state.tuning.bullet_height),
    });
    state.push_event(GameEvent::BulletFired { id });
    true
}

/// Move player bullets and spend the ones that left the top of the screen
pub fn update_bullets(state: &mut GameState) {
    let mut gone = Vec::new();
    for bullet in &mut state.bullets {
        bullet.pos += bullet.vel;
        if bullet.pos.y < 0.0 {
            gone.push(bullet.id);
        }
    }

    for id in gone {
        if state.spend_bullet(id, SpendReason::OffScreen) {
            check_game_status(state);
        }
    }
}

/// Resolve bullets against asteroids, then against boss shots.
///
/// Each bullet takes out at most one target.
pub fn check_collisions(state: &mut GameState) {
    let bullet_ids: Vec<u32> = state.bullets.iter().map(|b| b.id).collect();

    for id in &bullet_ids {
        let Some(bullet) = state.bullets.iter().find(|b| b.id == *id) else {
            continue;
        };
        let Some(asteroid_id) = state
            .asteroids
            .iter()
            .rev()
            .find(|a| proximity_hit(bullet, *a))
            .map(|a| a.id)
        else {
            continue;
        };

        state.spend_bullet(*id, SpendReason::HitAsteroid);
        state.remove_asteroid(asteroid_id);
        check_game_status(state);
    }

    for id in &bullet_ids {
        let Some(bullet) = state.bullets.iter().find(|b| b.id == *id) else {
            continue;
        };
        let Some(shot_id) = state
            .boss_shots
            .iter()
            .rev()
            .find(|s| proximity_hit(bullet, *s))
            .map(|s| s.id)
        else {
            continue;
        };

        state.spend_bullet(*id, SpendReason::HitBossShot);
        state.remove_boss_shot(shot_id);
        check_game_status(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::boss::activate_boss;
    use crate::sim::state::{Asteroid, BossPhase, BossShot, LossReason, Outcome};
    use crate::tuning::Tuning;

    const TICK_MS: f64 = 1000.0 / 60.0;

    fn empty_state() -> GameState {
        GameState::new(1234, Tuning::default())
    }

    fn add_asteroid(state: &mut GameState, pos: Vec2) -> u32 {
        let id = state.next_entity_id();
        state.asteroids.push(Asteroid {
            id,
            pos,
            size: Vec2::splat(70.0),
        });
        id
    }

    fn run_ticks(state: &mut GameState, n: usize) {
        let input = TickInput::default();
        for _ in 0..n {
            tick(state, &input, TICK_MS);
        }
    }

    #[test]
    fn test_move_left_and_right() {
        let mut state = empty_state();
        move_ship(&mut state, -1.0);
        assert_eq!(state.ship.pos.x, 620.0);
        move_ship(&mut state, 1.0);
        move_ship(&mut state, 1.0);
        assert_eq!(state.ship.pos.x, 660.0);
    }

    #[test]
    fn test_move_clamps_to_screen() {
        let mut state = empty_state();
        for _ in 0..100 {
            move_ship(&mut state, -1.0);
        }
        assert_eq!(state.ship.pos.x, 40.0);
        assert!(!move_ship(&mut state, -1.0));

        for _ in 0..100 {
            move_ship(&mut state, 1.0);
        }
        assert_eq!(state.ship.pos.x, 1240.0);
    }

    #[test]
    fn test_fire_consumes_one_slot() {
        let mut state = empty_state();
        assert!(fire_bullet(&mut state));
        assert_eq!(state.shots_available, 9);
        assert_eq!(state.bullets.len(), 1);
        // Spent only once the bullet is used up
        assert_eq!(state.remaining_shots, 10);

        let b = &state.bullets[0];
        assert_eq!(b.pos, Vec2::new(640.0, 600.0));
        assert_eq!(b.vel, Vec2::new(0.0, -15.0));
    }

    #[test]
    fn test_fire_is_noop_without_slots() {
        let mut state = empty_state();
        state.shots_available = 0;
        assert!(!fire_bullet(&mut state));
        assert!(state.bullets.is_empty());
        assert_eq!(state.shots_available, 0);
    }

    #[test]
    fn test_fire_is_noop_without_budget() {
        let mut state = empty_state();
        state.remaining_shots = 0;
        assert!(!fire_bullet(&mut state));
        assert!(state.bullets.is_empty());
        assert_eq!(state.shots_available, 10);
    }

    #[test]
    fn test_in_flight_bullets_occupy_slots() {
        let mut state = empty_state();
        add_asteroid(&mut state, Vec2::new(100.0, 100.0));
        // Each fire shrinks the pool while bullets stay in flight: 5 fit
        let fired = (0..10).filter(|_| fire_bullet(&mut state)).count();
        assert_eq!(fired, 5);
        assert_eq!(state.shots_available, 5);
    }

    #[test]
    fn test_off_screen_bullet_is_spent() {
        let mut state = empty_state();
        add_asteroid(&mut state, Vec2::new(100.0, 100.0));
        fire_bullet(&mut state);

        // 600px at 15px/tick
        run_ticks(&mut state, 41);

        assert!(state.bullets.is_empty());
        assert_eq!(state.remaining_shots, 9);
        assert!(state.events().iter().any(|e| matches!(
            e,
            GameEvent::BulletSpent { reason: SpendReason::OffScreen, .. }
        )));
    }

    #[test]
    fn test_bullet_destroys_asteroid() {
        let mut state = empty_state();
        let target = add_asteroid(&mut state, Vec2::new(640.0, 400.0));
        add_asteroid(&mut state, Vec2::new(100.0, 100.0));
        fire_bullet(&mut state);

        run_ticks(&mut state, 20);

        assert!(state.asteroids.iter().all(|a| a.id != target));
        assert_eq!(state.asteroid_count(), 1);
        assert_eq!(state.remaining_shots, 9);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_bullet_takes_out_only_one_asteroid() {
        let mut state = empty_state();
        // Two asteroids stacked in the bullet's path
        add_asteroid(&mut state, Vec2::new(640.0, 400.0));
        add_asteroid(&mut state, Vec2::new(660.0, 420.0));
        add_asteroid(&mut state, Vec2::new(100.0, 100.0));
        fire_bullet(&mut state);

        run_ticks(&mut state, 20);

        assert_eq!(state.asteroid_count(), 2);
        assert_eq!(state.remaining_shots, 9);
    }

    #[test]
    fn test_bullet_shoots_down_boss_shot() {
        let mut state = empty_state();
        add_asteroid(&mut state, Vec2::new(100.0, 100.0));
        state.boss_shots.push(BossShot {
            id: 500,
            pos: Vec2::new(640.0, 570.0),
            vel: Vec2::ZERO,
            radius: 20.0,
        });
        fire_bullet(&mut state);

        run_ticks(&mut state, 1);

        assert!(state.boss_shots.is_empty());
        assert!(state.bullets.is_empty());
        assert_eq!(state.remaining_shots, 9);
    }

    #[test]
    fn test_clearing_field_with_exact_budget_starts_intro() {
        let mut state = empty_state();
        // Ten asteroids lined up above the ship, one per shot
        for i in 0..10 {
            add_asteroid(&mut state, Vec2::new(640.0, 80.0 + i as f32 * 40.0));
        }

        for _ in 0..10 {
            while !fire_bullet(&mut state) {
                run_ticks(&mut state, 1);
            }
            run_ticks(&mut state, 1);
        }
        run_ticks(&mut state, 60);

        assert_eq!(state.asteroid_count(), 0);
        assert_eq!(state.remaining_shots, 0);
        assert_eq!(state.boss.phase, BossPhase::Announced);
        assert_eq!(state.outcome, None);
    }

    #[test]
    fn test_exhausted_budget_with_asteroids_loses() {
        let mut state = empty_state();
        add_asteroid(&mut state, Vec2::new(100.0, 100.0));
        state.ship.pos.x = 1000.0;

        for _ in 0..10 {
            while !fire_bullet(&mut state) {
                run_ticks(&mut state, 1);
            }
            run_ticks(&mut state, 1);
        }
        run_ticks(&mut state, 60);

        assert_eq!(state.remaining_shots, 0);
        assert_eq!(state.outcome, Some(Outcome::Lost(LossReason::OutOfShots)));
    }

    #[test]
    fn test_stray_bullets_spending_the_budget_during_announcement_lose() {
        let mut state = GameState::new(
            1234,
            Tuning {
                shot_budget: 15,
                ..Tuning::default()
            },
        );
        check_game_status(&mut state);
        assert_eq!(state.boss.phase, BossPhase::Announced);

        // Two misses still climbing when the last asteroid went down
        for x in [300.0, 900.0] {
            let id = state.next_entity_id();
            state.bullets.push(Bullet {
                id,
                pos: Vec2::new(x, 10.0),
                vel: Vec2::new(0.0, -15.0),
                size: Vec2::new(10.0, 20.0),
            });
        }
        state.remaining_shots = 2;
        run_ticks(&mut state, 1);

        assert_eq!(state.remaining_shots, 0);
        assert_eq!(state.outcome, Some(Outcome::Lost(LossReason::OutOfShots)));
    }

    #[test]
    fn test_loss_is_declared_on_the_tick_of_the_last_spend() {
        let mut state = empty_state();
        add_asteroid(&mut state, Vec2::new(100.0, 100.0));
        state.remaining_shots = 1;
        state.shots_available = 1;
        fire_bullet(&mut state);

        let input = TickInput::default();
        while state.remaining_shots > 0 {
            tick(&mut state, &input, TICK_MS);
        }
        assert!(state.is_over());
    }

    #[test]
    fn test_input_is_ignored_after_game_over() {
        let mut state = empty_state();
        state.outcome = Some(Outcome::Won);
        let x = state.ship.pos.x;

        let input = TickInput {
            actions: vec![PlayerAction::MoveLeft, PlayerAction::Fire],
        };
        tick(&mut state, &input, TICK_MS);

        assert_eq!(state.ship.pos.x, x);
        assert!(state.bullets.is_empty());
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_tick_applies_queued_actions_in_order() {
        let mut state = empty_state();
        add_asteroid(&mut state, Vec2::new(100.0, 100.0));
        let input = TickInput {
            actions: vec![PlayerAction::MoveRight, PlayerAction::MoveRight, PlayerAction::Fire],
        };
        tick(&mut state, &input, TICK_MS);

        assert_eq!(state.ship.pos.x, 680.0);
        // Fired from the new position, then moved once
        assert_eq!(state.bullets[0].pos, Vec2::new(680.0, 585.0));
    }

    #[test]
    fn test_boss_fight_full_sequence() {
        let mut state = empty_state();
        state.boss.phase = BossPhase::Announced;
        activate_boss(&mut state);
        state.boss.pos.x = 640.0;
        state.boss.motion = crate::sim::state::BossMotion::Idle;
        state.boss.state_entered_ms = state.now_ms;

        for _ in 0..4 {
            while !fire_bullet(&mut state) {
                run_ticks(&mut state, 1);
            }
            run_ticks(&mut state, 40);
        }

        assert_eq!(state.boss.hp, 0);
        assert_eq!(state.outcome, Some(Outcome::Won));
    }

    #[test]
    fn test_controls_stay_live_after_the_clock_stops_in_boss_fight() {
        let mut state = empty_state();
        state.boss.phase = BossPhase::Announced;
        activate_boss(&mut state);
        state.time_remaining = 1;
        crate::sim::status::countdown_tick(&mut state);
        assert_eq!(state.time_remaining, 0);
        assert_eq!(state.outcome, None);

        let x = state.ship.pos.x;
        let input = TickInput {
            actions: vec![PlayerAction::MoveLeft, PlayerAction::Fire],
        };
        tick(&mut state, &input, TICK_MS);

        assert_eq!(state.ship.pos.x, x - state.tuning.ship_step);
        assert_eq!(state.bullets.len(), 1);
    }
}

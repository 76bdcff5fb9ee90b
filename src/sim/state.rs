//! Game state and core simulation types
//!
//! Everything that changes during a game lives in [`GameState`]. The
//! presentation layer only ever reads it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::geometry::{Bounds, HasBounds};
use crate::tuning::Tuning;

/// Boss motion pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossMotion {
    /// Stationary
    Idle,
    /// Sliding horizontally, bouncing off the screen edges
    Moving,
}

/// Where the boss encounter stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossPhase {
    /// Asteroids still on the field
    Hidden,
    /// "FINAL BOSS!" banner is up, fight starts after the intro delay
    Announced,
    /// Boss is on stage: moving, shooting and taking hits
    Engaged,
    /// HP reached zero, boss removed from the stage
    Defeated,
}

/// Why a game was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LossReason {
    /// Every shot was spent while threats remained
    OutOfShots,
    /// The round timer ran out with asteroids left
    OutOfTime,
    /// A boss projectile reached the ship
    ShipHit,
}

/// Terminal result of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost(LossReason),
}

/// How a player bullet was used up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpendReason {
    OffScreen,
    HitAsteroid,
    HitBossShot,
    HitBoss,
}

/// Things that happened during a tick, in order.
///
/// The session reacts to some of these (starting and stopping timers); the
/// rest are for the presentation layer and logs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    BulletFired { id: u32 },
    BulletSpent { id: u32, reason: SpendReason },
    AsteroidDestroyed { id: u32 },
    BossShotFired { id: u32, angle: f32 },
    BossShotGone { id: u32 },
    BossIntroStarted,
    BossEngaged,
    BossMotionChanged { motion: BossMotion, direction: f32 },
    BossHit { hp: u32 },
    BossDefeated,
    TimeChanged { remaining: u32 },
    Ended(Outcome),
}

/// The player's ship (center-anchored)
#[derive(Debug, Clone)]
pub struct Ship {
    pub pos: Vec2,
    pub size: Vec2,
}

impl HasBounds for Ship {
    fn bounds(&self) -> Bounds {
        Bounds::new(self.pos, self.size)
    }
}

/// A player bullet
#[derive(Debug, Clone)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
}

impl HasBounds for Bullet {
    fn bounds(&self) -> Bounds {
        Bounds::new(self.pos, self.size)
    }
}

/// An asteroid (stationary target)
#[derive(Debug, Clone)]
pub struct Asteroid {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
}

impl HasBounds for Asteroid {
    fn bounds(&self) -> Bounds {
        Bounds::new(self.pos, self.size)
    }
}

/// A boss projectile. Velocity is fixed at spawn; shots never re-aim.
#[derive(Debug, Clone)]
pub struct BossShot {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl HasBounds for BossShot {
    fn bounds(&self) -> Bounds {
        Bounds::new(self.pos, Vec2::splat(self.radius * 2.0))
    }
}

/// The boss (singleton, created hidden)
#[derive(Debug, Clone)]
pub struct Boss {
    pub pos: Vec2,
    pub size: Vec2,
    pub hp: u32,
    pub max_hp: u32,
    pub phase: BossPhase,
    pub motion: BossMotion,
    /// Sim clock (ms) when the current motion state was entered
    pub state_entered_ms: f64,
    /// +1.0 = right, -1.0 = left
    pub direction: f32,
}

impl Boss {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.screen_width / 2.0, tuning.boss_y),
            size: Vec2::new(tuning.boss_width, tuning.boss_height),
            hp: tuning.boss_max_hp,
            max_hp: tuning.boss_max_hp,
            phase: BossPhase::Hidden,
            motion: BossMotion::Moving,
            state_entered_ms: 0.0,
            direction: 1.0,
        }
    }

    /// True once the asteroid field has been cleared at least once
    pub fn is_visible(&self) -> bool {
        self.phase != BossPhase::Hidden
    }

    /// On stage and part of the fight
    pub fn is_engaged(&self) -> bool {
        self.phase == BossPhase::Engaged
    }

    /// Health as a fraction of max (for the health bar)
    pub fn hp_fraction(&self) -> f32 {
        if self.max_hp == 0 {
            0.0
        } else {
            self.hp as f32 / self.max_hp as f32
        }
    }
}

impl HasBounds for Boss {
    fn bounds(&self) -> Bounds {
        Bounds::new(self.pos, self.size)
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Balance values this game runs with
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG (asteroid placement, boss direction)
    pub rng: Pcg32,
    /// Simulation clock in milliseconds
    pub now_ms: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub ship: Ship,
    /// Live player bullets (in firing order)
    pub bullets: Vec<Bullet>,
    /// Live asteroids (in spawn order)
    pub asteroids: Vec<Asteroid>,
    /// Live boss projectiles (in firing order)
    pub boss_shots: Vec<BossShot>,
    pub boss: Boss,
    /// Shots not yet spent; the run is lost when this hits 0 with threats left
    pub remaining_shots: u32,
    /// Shots not yet fired; also caps how many bullets may be in flight
    pub shots_available: u32,
    /// Round timer (seconds)
    pub time_remaining: u32,
    /// Set once, on win or loss
    pub outcome: Option<Outcome>,
    /// Events since the last drain
    events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game with an empty asteroid field
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let ship = Ship {
            pos: Vec2::new(
                tuning.screen_width / 2.0,
                tuning.screen_height - tuning.ship_bottom_offset,
            ),
            size: Vec2::new(tuning.ship_width, tuning.ship_height),
        };
        let boss = Boss::new(&tuning);

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            now_ms: 0.0,
            time_ticks: 0,
            ship,
            bullets: Vec::new(),
            asteroids: Vec::with_capacity(tuning.asteroid_count),
            boss_shots: Vec::new(),
            boss,
            remaining_shots: tuning.shot_budget,
            shots_available: tuning.shot_budget,
            time_remaining: tuning.time_limit_secs,
            outcome: None,
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Live asteroid count
    pub fn asteroid_count(&self) -> usize {
        self.asteroids.len()
    }

    /// True once the game has been won or lost
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Peek at pending events without consuming them
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Remove a bullet by id and charge it against the shot budget.
    ///
    /// Returns false if the bullet was already gone; the budget is only
    /// charged once per bullet.
    pub fn spend_bullet(&mut self, id: u32, reason: SpendReason) -> bool {
        let Some(idx) = self.bullets.iter().position(|b| b.id == id) else {
            return false;
        };
        self.bullets.remove(idx);
        self.remaining_shots = self.remaining_shots.saturating_sub(1);
        self.push_event(GameEvent::BulletSpent { id, reason });
        true
    }

    /// Remove an asteroid by id. Returns false if it was already gone.
    pub fn remove_asteroid(&mut self, id: u32) -> bool {
        let Some(idx) = self.asteroids.iter().position(|a| a.id == id) else {
            return false;
        };
        self.asteroids.remove(idx);
        self.push_event(GameEvent::AsteroidDestroyed { id });
        true
    }

    /// Remove a boss shot by id. Returns false if it was already gone.
    pub fn remove_boss_shot(&mut self, id: u32) -> bool {
        let Some(idx) = self.boss_shots.iter().position(|s| s.id == id) else {
            return false;
        };
        self.boss_shots.remove(idx);
        self.push_event(GameEvent::BossShotGone { id });
        true
    }

    /// Playfield rectangle
    pub fn screen(&self) -> Vec2 {
        Vec2::new(self.tuning.screen_width, self.tuning.screen_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_counters() {
        let state = GameState::new(1, Tuning::default());
        assert_eq!(state.remaining_shots, 10);
        assert_eq!(state.shots_available, 10);
        assert_eq!(state.time_remaining, 60);
        assert_eq!(state.boss.phase, BossPhase::Hidden);
        assert_eq!(state.boss.hp, 4);
        assert!(!state.boss.is_visible());
        assert!(!state.is_over());
    }

    #[test]
    fn test_ship_starts_bottom_center() {
        let state = GameState::new(1, Tuning::default());
        assert_eq!(state.ship.pos, Vec2::new(640.0, 650.0));
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut state = GameState::new(1, Tuning::default());
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_spend_bullet_only_charges_once() {
        let mut state = GameState::new(1, Tuning::default());
        let id = state.next_entity_id();
        state.bullets.push(Bullet {
            id,
            pos: Vec2::new(100.0, 100.0),
            vel: Vec2::new(0.0, -15.0),
            size: Vec2::new(10.0, 20.0),
        });

        assert!(state.spend_bullet(id, SpendReason::OffScreen));
        assert!(!state.spend_bullet(id, SpendReason::HitAsteroid));
        assert_eq!(state.remaining_shots, 9);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_boss_shot_bounds_are_diameter_square() {
        let shot = BossShot {
            id: 1,
            pos: Vec2::new(10.0, 20.0),
            vel: Vec2::ZERO,
            radius: 20.0,
        };
        assert_eq!(shot.bounds().size, Vec2::splat(40.0));
    }

    #[test]
    fn test_drain_events_empties_queue() {
        let mut state = GameState::new(1, Tuning::default());
        state.push_event(GameEvent::BossIntroStarted);
        assert_eq!(state.drain_events(), vec![GameEvent::BossIntroStarted]);
        assert!(state.events().is_empty());
    }
}

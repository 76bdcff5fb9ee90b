//! Game session: the simulation plus its clock, timers and input queue
//!
//! The browser (or the headless runner) feeds wall-clock frame deltas into
//! [`Session::advance`], which runs fixed-size simulation steps. Each step
//! ticks the world, fires due timers, then reacts to what happened:
//! the boss announcement schedules the fight, the fight schedules boss fire,
//! and the end of the game tears everything down exactly once.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::sim::{
    GameEvent, GameState, Outcome, PlayerAction, SpawnError, TickInput, activate_boss,
    autopilot_action, countdown_tick, fire_boss_shot, spawn_asteroid_field, tick,
};
use crate::timers::{TimerKind, Timers};
use crate::tuning::Tuning;

/// Round timer resolution
const COUNTDOWN_PERIOD_MS: f64 = 1000.0;

/// One playthrough, from asteroid field to win or loss
pub struct Session {
    state: GameState,
    timers: Timers,
    input: TickInput,
    accumulator: f32,
    running: bool,
    /// Demo mode: the AI picks one command per step
    autopilot: bool,
    /// Events since the last `take_events`, for the presentation layer
    events: Vec<GameEvent>,
}

impl Session {
    /// Start a new game: spawn the field and start the round timer
    pub fn new(seed: u64, tuning: Tuning) -> Result<Self, SpawnError> {
        let mut state = GameState::new(seed, tuning);
        spawn_asteroid_field(&mut state)?;

        let mut timers = Timers::new();
        timers.set_interval(TimerKind::Countdown, state.now_ms, COUNTDOWN_PERIOD_MS);

        log::info!(
            "New game (seed {}, {} asteroids, {} shots, {}s)",
            seed,
            state.asteroid_count(),
            state.remaining_shots,
            state.time_remaining
        );

        Ok(Self {
            state,
            timers,
            input: TickInput::default(),
            accumulator: 0.0,
            running: true,
            autopilot: false,
            events: Vec::new(),
        })
    }

    /// Throw the current game away and start over with the same tuning
    pub fn restart(&mut self, seed: u64) -> Result<(), SpawnError> {
        let tuning = self.state.tuning.clone();
        let autopilot = self.autopilot;
        *self = Self::new(seed, tuning)?;
        self.autopilot = autopilot;
        Ok(())
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        if self.autopilot != enabled {
            log::info!("Autopilot: {}", enabled);
        }
        self.autopilot = enabled;
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// False once the game has ended and been torn down
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.state.outcome
    }

    /// Queue a player command for the next step. Dropped after the game ends.
    pub fn queue_action(&mut self, action: PlayerAction) {
        if self.running {
            self.input.push(action);
        }
    }

    /// Take everything that happened since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Run as many fixed steps as `dt` seconds of wall time cover.
    /// Returns the number of steps taken.
    pub fn advance(&mut self, dt: f32) -> u32 {
        if !self.running {
            return 0;
        }

        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        substeps
    }

    /// One fixed simulation step
    pub fn step(&mut self) {
        if !self.running {
            return;
        }

        let mut input = std::mem::take(&mut self.input);
        if self.autopilot {
            input.actions.extend(autopilot_action(&self.state));
        }
        tick(&mut self.state, &input, f64::from(SIM_DT) * 1000.0);

        for kind in self.timers.advance_to(self.state.now_ms) {
            match kind {
                TimerKind::Countdown => countdown_tick(&mut self.state),
                TimerKind::BossIntro => activate_boss(&mut self.state),
                TimerKind::BossShot => fire_boss_shot(&mut self.state),
            }
        }

        self.handle_events();
    }

    fn handle_events(&mut self) {
        let events = self.state.drain_events();
        let now = self.state.now_ms;

        for event in &events {
            match event {
                GameEvent::BossIntroStarted => {
                    self.timers
                        .set_timeout(TimerKind::BossIntro, now, self.state.tuning.boss_intro_ms);
                }
                GameEvent::BossEngaged => {
                    // One emitter for the whole fight
                    if !self.timers.is_scheduled(TimerKind::BossShot) {
                        self.timers.set_interval(
                            TimerKind::BossShot,
                            now,
                            self.state.tuning.boss_shot_interval_ms,
                        );
                    }
                }
                GameEvent::Ended(outcome) => self.teardown(*outcome),
                _ => {}
            }
        }

        self.events.extend(events);
    }

    /// Stop every timer and halt the step loop
    fn teardown(&mut self, outcome: Outcome) {
        if !self.running {
            return;
        }
        self.timers.cancel_all();
        self.running = false;
        self.accumulator = 0.0;
        self.input.clear();
        log::info!(
            "Session ended: {:?} after {} ticks ({:.1}s)",
            outcome,
            self.state.time_ticks,
            self.state.now_ms / 1000.0
        );
    }
}

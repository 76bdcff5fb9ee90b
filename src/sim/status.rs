//! Win/lose/progression rules
//!
//! [`evaluate`] is a pure decision over the current counters;
//! [`check_game_status`] applies it. The simulation calls the latter after
//! every event that can end or advance the game: a bullet spent, a collision
//! resolved, the countdown expiring.

use super::state::{BossPhase, GameEvent, GameState, LossReason, Outcome};

/// What the status rules ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusDecision {
    Continue,
    /// Field cleared for the first time: announce the boss
    BeginBossIntro,
    Win,
    Lose,
}

/// Decide what happens next. First matching rule wins.
pub fn evaluate(state: &GameState) -> StatusDecision {
    if state.is_over() {
        return StatusDecision::Continue;
    }

    let asteroids = state.asteroid_count();
    let boss = &state.boss;
    let out_of_shots = state.remaining_shots == 0;

    if asteroids == 0 && !boss.is_visible() {
        StatusDecision::BeginBossIntro
    } else if asteroids == 0 && boss.is_visible() && boss.hp == 0 {
        StatusDecision::Win
    } else if out_of_shots && asteroids > 0 {
        StatusDecision::Lose
    } else if out_of_shots && boss.is_visible() && boss.hp > 0 {
        StatusDecision::Lose
    } else {
        StatusDecision::Continue
    }
}

/// Apply the status rules to the state
pub fn check_game_status(state: &mut GameState) {
    match evaluate(state) {
        StatusDecision::Continue => {}
        StatusDecision::BeginBossIntro => begin_boss_intro(state),
        StatusDecision::Win => declare_outcome(state, Outcome::Won),
        StatusDecision::Lose => declare_outcome(state, Outcome::Lost(LossReason::OutOfShots)),
    }
}

fn begin_boss_intro(state: &mut GameState) {
    state.boss.phase = BossPhase::Announced;
    state.push_event(GameEvent::BossIntroStarted);
    log::info!("Asteroid field cleared at {:.0}ms, boss incoming", state.now_ms);
}

/// Record the final result. Only the first call has any effect.
pub fn declare_outcome(state: &mut GameState, outcome: Outcome) {
    if state.is_over() {
        return;
    }
    state.outcome = Some(outcome);
    state.push_event(GameEvent::Ended(outcome));
    log::info!(
        "Game over: {:?} (shots left {}, time left {}s, asteroids {})",
        outcome,
        state.remaining_shots,
        state.time_remaining,
        state.asteroid_count()
    );
}

/// One second of the round timer.
///
/// Reaching zero with asteroids still on the field loses the game. Once the
/// field is clear the timer just stops at zero: it never ends the boss
/// phase and, unlike a declared outcome, it does not block input.
pub fn countdown_tick(state: &mut GameState) {
    if state.is_over() {
        return;
    }

    if state.time_remaining > 0 {
        state.time_remaining -= 1;
        state.push_event(GameEvent::TimeChanged {
            remaining: state.time_remaining,
        });
    }

    if state.time_remaining == 0 && state.asteroid_count() > 0 {
        declare_outcome(state, Outcome::Lost(LossReason::OutOfTime));
    }
}

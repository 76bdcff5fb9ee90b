//! HUD presentation model
//!
//! A plain snapshot of what the overlay shows, built from [`GameState`] each
//! frame. Renderers draw it; they never read counters from the sim directly.

use glam::Vec2;

use crate::consts::{HP_BAR_HEIGHT, HP_BAR_PADDING, HP_BAR_WIDTH};
use crate::sim::{Bounds, BossPhase, GameState, Outcome};

/// Centered message over the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    FinalBoss,
    YouWin,
    YouLose,
}

impl Banner {
    pub fn text(self) -> &'static str {
        match self {
            Banner::FinalBoss => "FINAL BOSS!",
            Banner::YouWin => "YOU WIN!",
            Banner::YouLose => "YOU LOSE!",
        }
    }
}

/// Boss health bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HpBar {
    /// Full-width frame
    pub frame: Bounds,
    /// Filled share, 0..=1
    pub fraction: f32,
}

impl HpBar {
    /// The filled part, anchored to the left edge of the frame
    pub fn fill(&self) -> Bounds {
        let width = self.frame.size.x * self.fraction.clamp(0.0, 1.0);
        let left = self.frame.min().x;
        Bounds::new(
            Vec2::new(left + width / 2.0, self.frame.center.y),
            Vec2::new(width, self.frame.size.y),
        )
    }
}

pub const RESTART_HINT: &str = "Press R to play again";

/// Everything the overlay shows for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct HudSnapshot {
    pub shots_left: u32,
    pub time_left: u32,
    pub hp_bar: Option<HpBar>,
    pub banner: Option<Banner>,
    /// Shown under the end-of-game banner
    pub hint: Option<&'static str>,
}

impl HudSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        let boss = &state.boss;

        let hp_bar = boss.is_engaged().then(|| {
            let bottom = boss.pos.y - boss.size.y / 2.0 - HP_BAR_PADDING;
            HpBar {
                frame: Bounds::new(
                    Vec2::new(boss.pos.x, bottom - HP_BAR_HEIGHT / 2.0),
                    Vec2::new(HP_BAR_WIDTH, HP_BAR_HEIGHT),
                ),
                fraction: boss.hp_fraction(),
            }
        });

        let banner = match state.outcome {
            Some(Outcome::Won) => Some(Banner::YouWin),
            Some(Outcome::Lost(_)) => Some(Banner::YouLose),
            None if boss.phase == BossPhase::Announced => Some(Banner::FinalBoss),
            None => None,
        };

        Self {
            shots_left: state.remaining_shots,
            time_left: state.time_remaining,
            hp_bar,
            banner,
            hint: state.is_over().then_some(RESTART_HINT),
        }
    }

    pub fn shots_text(&self) -> String {
        format!("Shots Left: {}", self.shots_left)
    }

    pub fn time_text(&self) -> String {
        format!("Time Left: {}", self.time_left)
    }
}

//! Game balance values
//!
//! Every number the simulation depends on lives here so a round can be
//! re-tuned without touching gameplay code. Overrides are plain JSON and may
//! be partial; missing fields keep their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Why a tuning override was rejected
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Balance values for one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Ship ===
    pub ship_width: f32,
    pub ship_height: f32,
    pub ship_bottom_offset: f32,
    pub ship_step: f32,

    // === Player fire ===
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub bullet_speed: f32,
    pub shot_budget: u32,

    // === Asteroids ===
    pub asteroid_count: usize,
    pub asteroid_size: f32,
    pub asteroid_clear_zone: f32,

    // === Round ===
    pub time_limit_secs: u32,

    // === Boss ===
    pub boss_width: f32,
    pub boss_height: f32,
    pub boss_y: f32,
    pub boss_max_hp: u32,
    pub boss_speed: f32,
    pub boss_idle_ms: f64,
    pub boss_move_ms: f64,
    pub boss_intro_ms: f64,

    // === Boss fire ===
    pub boss_shot_interval_ms: f64,
    pub boss_shot_radius: f32,
    pub boss_shot_speed: f32,
    pub boss_shot_muzzle: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            ship_width: SHIP_WIDTH,
            ship_height: SHIP_HEIGHT,
            ship_bottom_offset: SHIP_BOTTOM_OFFSET,
            ship_step: SHIP_STEP,

            bullet_width: BULLET_WIDTH,
            bullet_height: BULLET_HEIGHT,
            bullet_speed: BULLET_SPEED,
            shot_budget: SHOT_BUDGET,

            asteroid_count: ASTEROID_COUNT,
            asteroid_size: ASTEROID_SIZE,
            asteroid_clear_zone: ASTEROID_CLEAR_ZONE,

            time_limit_secs: TIME_LIMIT_SECS,

            boss_width: BOSS_WIDTH,
            boss_height: BOSS_HEIGHT,
            boss_y: BOSS_Y,
            boss_max_hp: BOSS_MAX_HP,
            boss_speed: BOSS_SPEED,
            boss_idle_ms: BOSS_IDLE_MS,
            boss_move_ms: BOSS_MOVE_MS,
            boss_intro_ms: BOSS_INTRO_MS,

            boss_shot_interval_ms: BOSS_SHOT_INTERVAL_MS,
            boss_shot_radius: BOSS_SHOT_RADIUS,
            boss_shot_speed: BOSS_SHOT_SPEED,
            boss_shot_muzzle: BOSS_SHOT_MUZZLE,
        }
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), TuningError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::Invalid {
            field,
            reason: format!("must be a positive number, got {value}"),
        })
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate the result
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Serialize to pretty JSON (for editing overrides by hand)
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot work with
    pub fn validate(&self) -> Result<(), TuningError> {
        positive("screen_width", self.screen_width as f64)?;
        positive("screen_height", self.screen_height as f64)?;
        positive("ship_width", self.ship_width as f64)?;
        positive("ship_height", self.ship_height as f64)?;
        positive("ship_step", self.ship_step as f64)?;
        positive("bullet_width", self.bullet_width as f64)?;
        positive("bullet_height", self.bullet_height as f64)?;
        positive("bullet_speed", self.bullet_speed as f64)?;
        positive("asteroid_size", self.asteroid_size as f64)?;
        positive("boss_width", self.boss_width as f64)?;
        positive("boss_height", self.boss_height as f64)?;
        positive("boss_speed", self.boss_speed as f64)?;
        positive("boss_idle_ms", self.boss_idle_ms)?;
        positive("boss_move_ms", self.boss_move_ms)?;
        positive("boss_intro_ms", self.boss_intro_ms)?;
        positive("boss_shot_interval_ms", self.boss_shot_interval_ms)?;
        positive("boss_shot_radius", self.boss_shot_radius as f64)?;
        positive("boss_shot_speed", self.boss_shot_speed as f64)?;

        if !(self.boss_shot_muzzle.is_finite() && self.boss_shot_muzzle >= 0.0) {
            return Err(TuningError::Invalid {
                field: "boss_shot_muzzle",
                reason: format!("must be zero or more, got {}", self.boss_shot_muzzle),
            });
        }
        if self.asteroid_count == 0 {
            return Err(TuningError::Invalid {
                field: "asteroid_count",
                reason: "the field needs at least one asteroid".into(),
            });
        }
        if self.shot_budget == 0 {
            return Err(TuningError::Invalid {
                field: "shot_budget",
                reason: "at least one shot is required".into(),
            });
        }
        if self.boss_max_hp == 0 {
            return Err(TuningError::Invalid {
                field: "boss_max_hp",
                reason: "boss needs at least 1 hp".into(),
            });
        }
        if self.time_limit_secs == 0 {
            return Err(TuningError::Invalid {
                field: "time_limit_secs",
                reason: "round must last at least one second".into(),
            });
        }
        if self.boss_width >= self.screen_width {
            return Err(TuningError::Invalid {
                field: "boss_width",
                reason: format!(
                    "boss ({}) must be narrower than the screen ({})",
                    self.boss_width, self.screen_width
                ),
            });
        }
        if self.ship_width >= self.screen_width {
            return Err(TuningError::Invalid {
                field: "ship_width",
                reason: format!(
                    "ship ({}) must be narrower than the screen ({})",
                    self.ship_width, self.screen_width
                ),
            });
        }
        let boss_half = self.boss_height / 2.0;
        if !self.boss_y.is_finite()
            || self.boss_y - boss_half < 0.0
            || self.boss_y + boss_half > self.screen_height
        {
            return Err(TuningError::Invalid {
                field: "boss_y",
                reason: format!(
                    "boss at y={} (height {}) must fit on the screen ({})",
                    self.boss_y, self.boss_height, self.screen_height
                ),
            });
        }
        let field_height = self.screen_height - self.asteroid_clear_zone;
        if self.asteroid_size >= self.screen_width || self.asteroid_size >= field_height {
            return Err(TuningError::Invalid {
                field: "asteroid_size",
                reason: format!(
                    "asteroids ({}) do not fit the asteroid field ({}x{})",
                    self.asteroid_size, self.screen_width, field_height
                ),
            });
        }
        Ok(())
    }

    /// LocalStorage key for a JSON override
    pub const STORAGE_KEY: &'static str = "astro_blaster_tuning";

    /// Load tuning overrides from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning overrides from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::error!("Ignoring tuning overrides: {}", e),
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Environment variable naming a JSON override file (native only)
    pub const ENV_VAR: &'static str = "ASTRO_BLASTER_TUNING";

    /// Load tuning overrides from the file named by `ASTRO_BLASTER_TUNING`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_VAR) else {
            log::debug!("{} not set, using default tuning", Self::ENV_VAR);
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning overrides from {}", path);
                    return tuning;
                }
                Err(e) => log::error!("Ignoring tuning overrides in {}: {}", path, e),
            },
            Err(e) => log::error!("Could not read {}: {}", path, e),
        }

        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        Tuning::default().validate().unwrap();
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "shot_budget": 15, "boss_max_hp": 6 }"#).unwrap();
        assert_eq!(tuning.shot_budget, 15);
        assert_eq!(tuning.boss_max_hp, 6);
        assert_eq!(tuning.asteroid_count, ASTEROID_COUNT);
        assert_eq!(tuning.screen_width, SCREEN_WIDTH);
    }

    #[test]
    fn test_json_round_trip() {
        let mut tuning = Tuning::default();
        tuning.time_limit_secs = 90;
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ shot_budget: ").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_rejects_zero_budget() {
        let err = Tuning::from_json(r#"{ "shot_budget": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "shot_budget", .. }));
    }

    #[test]
    fn test_rejects_negative_speed() {
        let err = Tuning::from_json(r#"{ "bullet_speed": -3.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "bullet_speed", .. }));
    }

    #[test]
    fn test_rejects_boss_wider_than_screen() {
        let err = Tuning::from_json(r#"{ "boss_width": 2000.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "boss_width", .. }));
        assert!(err.to_string().contains("narrower"));
    }

    #[test]
    fn test_rejects_empty_asteroid_field() {
        let err = Tuning::from_json(r#"{ "asteroid_count": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "asteroid_count", .. }));
    }

    #[test]
    fn test_rejects_boss_off_screen() {
        let err = Tuning::from_json(r#"{ "boss_y": -40.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "boss_y", .. }));

        let err = Tuning::from_json(r#"{ "boss_y": 700.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "boss_y", .. }));
    }

    #[test]
    fn test_muzzle_may_be_zero_but_not_negative() {
        Tuning::from_json(r#"{ "boss_shot_muzzle": 0.0 }"#).unwrap();
        let err = Tuning::from_json(r#"{ "boss_shot_muzzle": -5.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "boss_shot_muzzle", .. }));
    }
}

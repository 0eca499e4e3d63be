//! Data-driven game balance
//!
//! Every gameplay constant lives here so a run can be rebalanced from a JSON
//! document without recompiling. Missing keys fall back to [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{GameError, GameResult};
use crate::sim::{FruitKind, PowerKind};

/// One row of the fruit spawn table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FruitSpec {
    pub kind: FruitKind,
    /// Points before combo bonus and doubling
    pub score: u32,
    /// 0xRRGGBB, inherited by catch particles
    pub color: u32,
    pub radius: f32,
    /// Relative spawn weight (table need not sum to 1)
    pub weight: f32,
}

/// One row of the power token table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerSpec {
    pub kind: PowerKind,
    pub color: u32,
    pub radius: f32,
    /// Effect duration once caught (milliseconds)
    pub duration_ms: f32,
    /// Short HUD label
    pub label: String,
}

fn default_fruit_table() -> Vec<FruitSpec> {
    vec![
        FruitSpec { kind: FruitKind::Apple, score: 10, color: 0xff5b5b, radius: 20.0, weight: 0.29 },
        FruitSpec { kind: FruitKind::Banana, score: 8, color: 0xffd756, radius: 20.0, weight: 0.29 },
        FruitSpec { kind: FruitKind::Orange, score: 12, color: 0xff9f43, radius: 20.0, weight: 0.24 },
        FruitSpec { kind: FruitKind::Strawberry, score: 15, color: 0xff4f84, radius: 19.0, weight: 0.18 },
    ]
}

fn default_power_table() -> Vec<PowerSpec> {
    vec![
        PowerSpec {
            kind: PowerKind::SlowMotion,
            color: 0x52b6ff,
            radius: 18.0,
            duration_ms: 6000.0,
            label: "SLOW".to_string(),
        },
        PowerSpec {
            kind: PowerKind::DoubleScore,
            color: 0xf2c84b,
            radius: 18.0,
            duration_ms: 7500.0,
            label: "2X".to_string(),
        },
    ]
}

/// Gameplay balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Run ===
    pub max_lives: u32,

    // === Spawn cadence ===
    pub start_spawn_delay_ms: f32,
    pub min_spawn_delay_ms: f32,
    pub spawn_delay_ramp_ms: f32,

    // === Difficulty ===
    pub base_fall_speed: f32,
    pub fall_speed_ramp: f32,
    pub difficulty_ramp: f32,

    // === Power tokens ===
    pub power_chance_base: f32,
    pub power_chance_ramp: f32,
    pub power_chance_max: f32,
    pub slow_motion_factor: f32,

    // === Frame timing ===
    pub max_frame_dt: f32,
    pub fallback_frame_dt: f32,

    // === Scoring ===
    pub combo_step: u32,
    pub combo_step_bonus: u32,
    pub power_catch_points: u32,

    // === Basket ===
    pub basket_speed: f32,
    pub basket_min_width: f32,
    pub basket_width_ratio: f32,
    pub basket_aspect: f32,
    pub basket_bottom_margin: f32,

    // === Particles ===
    pub particle_burst_count: usize,
    pub particle_gravity: f32,

    // === Spawn tables ===
    pub fruits: Vec<FruitSpec>,
    pub powers: Vec<PowerSpec>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_lives: MAX_LIVES,

            start_spawn_delay_ms: START_SPAWN_DELAY_MS,
            min_spawn_delay_ms: MIN_SPAWN_DELAY_MS,
            spawn_delay_ramp_ms: SPAWN_DELAY_RAMP_MS,

            base_fall_speed: BASE_FALL_SPEED,
            fall_speed_ramp: FALL_SPEED_RAMP,
            difficulty_ramp: DIFFICULTY_RAMP,

            power_chance_base: POWER_CHANCE_BASE,
            power_chance_ramp: POWER_CHANCE_RAMP,
            power_chance_max: POWER_CHANCE_MAX,
            slow_motion_factor: SLOW_MOTION_FACTOR,

            max_frame_dt: MAX_FRAME_DT,
            fallback_frame_dt: FALLBACK_FRAME_DT,

            combo_step: COMBO_STEP,
            combo_step_bonus: COMBO_STEP_BONUS,
            power_catch_points: POWER_CATCH_POINTS,

            basket_speed: BASKET_SPEED,
            basket_min_width: BASKET_MIN_WIDTH,
            basket_width_ratio: BASKET_WIDTH_RATIO,
            basket_aspect: BASKET_ASPECT,
            basket_bottom_margin: BASKET_BOTTOM_MARGIN,

            particle_burst_count: PARTICLE_BURST_COUNT,
            particle_gravity: PARTICLE_GRAVITY,

            fruits: default_fruit_table(),
            powers: default_power_table(),
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning document
    pub fn from_json(json: &str) -> GameResult<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a tuning document from disk
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> GameResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Spawn interval (ms) after `elapsed` seconds of play
    pub fn spawn_delay_at(&self, elapsed: f32) -> f32 {
        (self.start_spawn_delay_ms - elapsed * self.spawn_delay_ramp_ms).max(self.min_spawn_delay_ms)
    }

    /// Base fall speed after `elapsed` seconds of play
    pub fn fall_speed_at(&self, elapsed: f32) -> f32 {
        self.base_fall_speed + elapsed * self.fall_speed_ramp
    }

    /// Look up the table row for a power kind
    pub fn power_spec(&self, kind: PowerKind) -> Option<&PowerSpec> {
        self.powers.iter().find(|p| p.kind == kind)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> GameResult<()> {
        fn invalid(field: &'static str, reason: &str) -> GameResult<()> {
            Err(GameError::InvalidTuning {
                field,
                reason: reason.to_string(),
            })
        }

        if self.max_lives == 0 {
            return invalid("max_lives", "must be at least 1");
        }
        if self.min_spawn_delay_ms <= 0.0 {
            return invalid("min_spawn_delay_ms", "must be positive");
        }
        if self.start_spawn_delay_ms < self.min_spawn_delay_ms {
            return invalid("start_spawn_delay_ms", "must not be below min_spawn_delay_ms");
        }
        if self.spawn_delay_ramp_ms < 0.0 {
            return invalid("spawn_delay_ramp_ms", "must not be negative");
        }
        if self.slow_motion_factor <= 0.0 {
            return invalid("slow_motion_factor", "must be positive");
        }
        if self.max_frame_dt <= 0.0 || self.fallback_frame_dt <= 0.0 {
            return invalid("max_frame_dt", "frame deltas must be positive");
        }
        if self.combo_step == 0 {
            return invalid("combo_step", "must be at least 1");
        }
        if self.fruits.is_empty() {
            return invalid("fruits", "table is empty");
        }
        if self.fruits.iter().any(|f| f.weight < 0.0) {
            return invalid("fruits", "weights must not be negative");
        }
        if self.fruits.iter().map(|f| f.weight).sum::<f32>() <= 0.0 {
            return invalid("fruits", "total weight must be positive");
        }
        if self.powers.is_empty() {
            return invalid("powers", "table is empty");
        }
        Ok(())
    }
}

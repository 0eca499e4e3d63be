//! Fruit Catcher - an arcade reflex game
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (spawning, physics, collisions, scoring, power-ups)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences (sound, music, theme)
//! - `highscores`: Best score persistence
//! - `error`: Errors for the fallible outer surfaces (config, persistence)

pub mod error;
pub mod highscores;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{GameError, GameResult};
pub use highscores::HighScore;
pub use settings::{Settings, Theme};
pub use tuning::Tuning;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Lives at the start of a run
    pub const MAX_LIVES: u32 = 3;

    /// Spawn interval at t=0 (milliseconds)
    pub const START_SPAWN_DELAY_MS: f32 = 900.0;
    /// Spawn interval floor (milliseconds)
    pub const MIN_SPAWN_DELAY_MS: f32 = 260.0;
    /// Spawn interval shrink per elapsed second (milliseconds)
    pub const SPAWN_DELAY_RAMP_MS: f32 = 30.0;

    /// Base fall speed at t=0 (pixels/second)
    pub const BASE_FALL_SPEED: f32 = 150.0;
    /// Base fall speed gain per elapsed second
    pub const FALL_SPEED_RAMP: f32 = 11.0;
    /// Difficulty scale gain per elapsed second
    pub const DIFFICULTY_RAMP: f32 = 0.075;

    /// Probability of a power token at t=0
    pub const POWER_CHANCE_BASE: f32 = 0.07;
    /// Power token probability gain per elapsed second
    pub const POWER_CHANCE_RAMP: f32 = 0.004;
    /// Power token probability cap
    pub const POWER_CHANCE_MAX: f32 = 0.18;

    /// Movement time scale while slow-motion is active
    pub const SLOW_MOTION_FACTOR: f32 = 0.62;

    /// Largest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.05;
    /// Frame delta used when the measured one is unusable (seconds)
    pub const FALLBACK_FRAME_DT: f32 = 0.016;

    /// Consecutive catches per combo bonus step
    pub const COMBO_STEP: u32 = 3;
    /// Points added per combo bonus step
    pub const COMBO_STEP_BONUS: u32 = 4;
    /// Points for catching a power token
    pub const POWER_CATCH_POINTS: u32 = 20;

    /// Basket horizontal speed (pixels/second)
    pub const BASKET_SPEED: f32 = 560.0;
    pub const BASKET_MIN_WIDTH: f32 = 70.0;
    /// Basket width as a share of playfield width
    pub const BASKET_WIDTH_RATIO: f32 = 0.11;
    /// Basket height / width
    pub const BASKET_ASPECT: f32 = 0.5;
    /// Gap between basket bottom and playfield bottom
    pub const BASKET_BOTTOM_MARGIN: f32 = 14.0;

    /// Particles per catch burst
    pub const PARTICLE_BURST_COUNT: usize = 14;
    /// Downward acceleration on particles (pixels/s²)
    pub const PARTICLE_GRAVITY: f32 = 300.0;

    /// Spawn heights (above the visible playfield)
    pub const FRUIT_SPAWN_Y: f32 = -45.0;
    pub const POWER_SPAWN_Y: f32 = -40.0;
    /// Max |spin| in radians/second
    pub const FRUIT_MAX_SPIN: f32 = 2.5;
    pub const POWER_MAX_SPIN: f32 = 2.3;
}

/// Clamp that tolerates `min > max` by preferring `min` (like `Math.max(min, Math.min(max, v))`)
#[inline]
pub fn clamp_lenient(value: f32, min: f32, max: f32) -> f32 {
    min.max(max.min(value))
}

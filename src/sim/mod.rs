//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of I/O:
//! - One explicit `GameState` per session, no globals
//! - Randomness only through the state's seedable RNG
//! - Side effects leave as `GameEvent`s for the presentation layer
//! - No rendering or platform dependencies

pub mod collision;
pub mod effects;
pub mod hud;
pub mod particles;
pub mod scoring;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Circle, Rect, circle_rect_intersects};
pub use effects::PowerTimers;
pub use hud::HudSnapshot;
pub use particles::{burst, update_particles};
pub use scoring::{CatchOutcome, MissOutcome, ScoreBoard, combo_bonus};
pub use spawn::{difficulty_scale, pick_power, pick_weighted, power_chance, spawn_entity};
pub use state::{
    Basket, Body, Entity, EntityKind, Fruit, FruitKind, GameEvent, GameState, Particle, Playfield,
    PowerKind, PowerToken, RunPhase,
};
pub use tick::{TickInput, clamp_frame_dt, tick};

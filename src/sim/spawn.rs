//! Entity generation
//!
//! Each spawn first rolls fruit vs. power token (power chance grows with play
//! time up to a cap), then picks a type and a difficulty-scaled fall speed.

use glam::Vec2;
use rand::Rng;

use super::state::{Body, Entity, Fruit, PowerToken};
use crate::consts::{FRUIT_MAX_SPIN, FRUIT_SPAWN_Y, POWER_MAX_SPIN, POWER_SPAWN_Y};
use crate::tuning::{FruitSpec, PowerSpec, Tuning};

/// Fall speed multiplier after `elapsed` seconds
pub fn difficulty_scale(tuning: &Tuning, elapsed: f32) -> f32 {
    1.0 + elapsed * tuning.difficulty_ramp
}

/// Probability that a spawn is a power token
pub fn power_chance(tuning: &Tuning, elapsed: f32) -> f32 {
    (tuning.power_chance_base + elapsed * tuning.power_chance_ramp).min(tuning.power_chance_max)
}

/// Weighted pick over the fruit table.
///
/// Weights are normalised by their total. Rounding can leave a sliver of the
/// roll unspent after the last row, in which case the last row wins.
pub fn pick_weighted<'a, R: Rng + ?Sized>(rng: &mut R, table: &'a [FruitSpec]) -> Option<&'a FruitSpec> {
    let total: f32 = table.iter().map(|f| f.weight).sum();
    let mut roll = rng.random::<f32>() * total;
    for spec in table {
        roll -= spec.weight;
        if roll <= 0.0 {
            return Some(spec);
        }
    }
    table.last()
}

/// Uniform pick over the power table
pub fn pick_power<'a, R: Rng + ?Sized>(rng: &mut R, table: &'a [PowerSpec]) -> Option<&'a PowerSpec> {
    if table.is_empty() {
        return None;
    }
    Some(&table[rng.random_range(0..table.len())])
}

/// Random centre x keeping the whole circle inside the playfield
fn spawn_x<R: Rng + ?Sized>(rng: &mut R, radius: f32, playfield_width: f32) -> f32 {
    rng.random::<f32>() * (playfield_width - radius * 2.0).max(0.0) + radius
}

/// Generate one entity above the top of the playfield.
///
/// Returns `None` only when the relevant spawn table is empty.
pub fn spawn_entity<R: Rng + ?Sized>(
    rng: &mut R,
    tuning: &Tuning,
    elapsed: f32,
    base_fall_speed: f32,
    playfield_width: f32,
) -> Option<Entity> {
    let scale = difficulty_scale(tuning, elapsed);

    if rng.random::<f32>() < power_chance(tuning, elapsed) {
        let spec = pick_power(rng, &tuning.powers)?;
        let x = spawn_x(rng, spec.radius, playfield_width);
        let speed = (base_fall_speed + 70.0 + rng.random::<f32>() * 90.0) * (0.8 + scale * 0.1);
        let spin = (rng.random::<f32>() * 2.0 - 1.0) * POWER_MAX_SPIN;
        log::debug!("Spawned {:?} token at x={:.0}", spec.kind, x);
        Some(Entity::Power(PowerToken {
            kind: spec.kind,
            duration_ms: spec.duration_ms,
            color: spec.color,
            body: Body {
                pos: Vec2::new(x, POWER_SPAWN_Y),
                radius: spec.radius,
                speed,
                rotation: 0.0,
                spin,
            },
        }))
    } else {
        let spec = pick_weighted(rng, &tuning.fruits)?;
        let x = spawn_x(rng, spec.radius, playfield_width);
        let speed = (base_fall_speed + rng.random::<f32>() * 120.0) * scale;
        let spin = (rng.random::<f32>() * 2.0 - 1.0) * FRUIT_MAX_SPIN;
        Some(Entity::Fruit(Fruit {
            kind: spec.kind,
            base_score: spec.score,
            color: spec.color,
            body: Body {
                pos: Vec2::new(x, FRUIT_SPAWN_Y),
                radius: spec.radius,
                speed,
                rotation: 0.0,
                spin,
            },
        }))
    }
}

//! Per-frame simulation tick
//!
//! Core game loop that advances one frame of a running session.

use super::collision::circle_rect_intersects;
use super::hud::HudSnapshot;
use super::particles::update_particles;
use super::spawn::spawn_entity;
use super::state::{GameState, RunPhase};
use crate::tuning::Tuning;

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Move-left held
    pub left: bool,
    /// Move-right held
    pub right: bool,
    /// Pointer drag target x (basket centres on it)
    pub pointer_x: Option<f32>,
    /// Pause toggle
    pub pause: bool,
    /// Demo mode - basket steers itself
    pub autopilot: bool,
}

impl TickInput {
    /// Keyboard intent as -1, 0 or 1
    pub fn direction(&self) -> f32 {
        (self.right as i32 - self.left as i32) as f32
    }
}

/// Sanitise a measured frame delta (seconds).
///
/// Unusable deltas (zero, negative, NaN) become the fallback; everything is
/// capped so a stalled tab resumes without a huge jump.
pub fn clamp_frame_dt(raw_dt: f32, tuning: &Tuning) -> f32 {
    let dt = if raw_dt.is_finite() && raw_dt > 0.0 {
        raw_dt
    } else {
        tuning.fallback_frame_dt
    };
    dt.min(tuning.max_frame_dt)
}

/// Advance the game state by one frame of `raw_dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, raw_dt: f32) {
    if input.pause {
        state.toggle_pause();
    }

    // Idle, paused and finished runs are frozen
    if state.phase != RunPhase::Running {
        return;
    }

    let dt = clamp_frame_dt(raw_dt, &state.tuning);
    let hud_before = HudSnapshot::capture(state);

    // Difficulty ramp
    state.elapsed += dt;
    state.spawn_delay_ms = state.tuning.spawn_delay_at(state.elapsed);
    state.base_fall_speed = state.tuning.fall_speed_at(state.elapsed);

    // Power timers run on real time
    state.timers.tick(dt * 1000.0);
    let effective_dt = dt * state.timers.time_scale(state.tuning.slow_motion_factor);

    // Basket
    let width = state.playfield.width;
    if let Some(x) = input.pointer_x {
        state.basket.center_on(x, width);
    }
    let direction = if input.autopilot {
        autopilot_direction(state)
    } else {
        input.direction()
    };
    state.basket.steer(direction, effective_dt, width);

    // Spawn cadence; several spawns per frame are possible after a stall
    let spawn_delay = state.spawn_delay_ms.max(1.0);
    state.spawn_clock_ms += dt * 1000.0;
    while state.spawn_clock_ms >= spawn_delay {
        state.spawn_clock_ms -= spawn_delay;
        let spawned = spawn_entity(
            &mut state.rng,
            &state.tuning,
            state.elapsed,
            state.base_fall_speed,
            width,
        );
        if let Some(entity) = spawned {
            state.entities.push(entity);
        }
    }

    // Move, catch, miss
    let basket = state.basket.rect();
    let floor = state.playfield.height;
    let entities = std::mem::take(&mut state.entities);
    let mut survivors = Vec::with_capacity(entities.len());
    for mut entity in entities {
        // Whatever is left on screen freezes with the run
        if state.phase != RunPhase::Running {
            survivors.push(entity);
            continue;
        }

        entity.body_mut().advance(effective_dt);
        if circle_rect_intersects(entity.body().circle(), basket) {
            state.resolve_catch(&entity);
        } else if entity.body().is_below(floor) {
            state.resolve_miss(&entity);
        } else {
            survivors.push(entity);
        }
    }
    state.entities = survivors;

    update_particles(&mut state.particles, dt, state.tuning.particle_gravity);

    let hud_after = HudSnapshot::capture(state);
    for event in hud_before.changes(&hud_after) {
        state.emit(event);
    }
}

/// Chase the lowest entity still above the basket
fn autopilot_direction(state: &GameState) -> f32 {
    const DEADZONE: f32 = 6.0;

    let basket_top = state.basket.pos.y;
    let target = state
        .entities
        .iter()
        .map(|e| e.body())
        .filter(|b| b.pos.y < basket_top)
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let Some(target) = target else {
        return 0.0;
    };
    let offset = target.pos.x - state.basket.center_x();
    if offset > DEADZONE {
        1.0
    } else if offset < -DEADZONE {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::sim::state::{Body, Entity, Fruit, FruitKind, GameEvent, Playfield, PowerKind, PowerToken};

    fn running() -> GameState {
        let mut state = GameState::with_seed(Tuning::default(), Playfield::new(800.0, 600.0), 12345);
        state.start();
        state.drain_events();
        state
    }

    fn apple_at(x: f32, y: f32) -> Entity {
        Entity::Fruit(Fruit {
            kind: FruitKind::Apple,
            base_score: 10,
            color: 0xff5b5b,
            body: Body {
                pos: Vec2::new(x, y),
                radius: 20.0,
                speed: 100.0,
                rotation: 0.0,
                spin: 1.0,
            },
        })
    }

    fn token_at(kind: PowerKind, x: f32, y: f32) -> Entity {
        Entity::Power(PowerToken {
            kind,
            duration_ms: 6000.0,
            color: 0x52b6ff,
            body: Body {
                pos: Vec2::new(x, y),
                radius: 18.0,
                speed: 100.0,
                rotation: 0.0,
                spin: 0.0,
            },
        })
    }

    #[test]
    fn test_clamp_frame_dt() {
        let tuning = Tuning::default();
        assert_eq!(clamp_frame_dt(0.016, &tuning), 0.016);
        assert_eq!(clamp_frame_dt(3.0, &tuning), 0.05);
        assert_eq!(clamp_frame_dt(0.0, &tuning), 0.016);
        assert_eq!(clamp_frame_dt(-1.0, &tuning), 0.016);
        assert_eq!(clamp_frame_dt(f32::NAN, &tuning), 0.016);
    }

    #[test]
    fn test_idle_does_not_tick() {
        let mut state = GameState::with_seed(Tuning::default(), Playfield::new(800.0, 600.0), 1);
        tick(&mut state, &TickInput::default(), 0.016);
        assert_eq!(state.elapsed, 0.0);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_tick_pause() {
        let mut state = running();
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, 0.016);
        assert_eq!(state.phase, RunPhase::Paused);
        let frozen = state.elapsed;

        tick(&mut state, &TickInput::default(), 0.016);
        assert_eq!(state.elapsed, frozen);

        // Unpause and the same frame runs
        tick(&mut state, &pause, 0.016);
        assert_eq!(state.phase, RunPhase::Running);
        assert!(state.elapsed > frozen);
    }

    #[test]
    fn test_elapsed_uses_clamped_dt() {
        let mut state = running();
        tick(&mut state, &TickInput::default(), 10.0);
        assert!((state.elapsed - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_spawn_after_interval() {
        let mut state = running();
        // 900ms at the start; 18 frames of 50ms
        for _ in 0..17 {
            tick(&mut state, &TickInput::default(), 0.05);
        }
        assert!(state.entities.is_empty());
        tick(&mut state, &TickInput::default(), 0.05);
        assert_eq!(state.entities.len(), 1);
    }

    #[test]
    fn test_multiple_spawns_in_one_frame() {
        let mut state = running();
        state.spawn_clock_ms = 2000.0;
        tick(&mut state, &TickInput::default(), 0.016);
        assert_eq!(state.entities.len(), 2);
        assert!(state.spawn_clock_ms < state.spawn_delay_ms);
    }

    #[test]
    fn test_catch_scores_and_bursts() {
        let mut state = running();
        let center = state.basket.center_x();
        let top = state.basket.pos.y;
        state.entities.push(apple_at(center, top - 5.0));
        tick(&mut state, &TickInput::default(), 0.016);

        assert!(state.entities.is_empty());
        assert_eq!(state.score(), 10);
        assert_eq!(state.combo(), 1);
        assert_eq!(state.particles.len(), 14);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Catch {
            kind: crate::sim::state::EntityKind::Fruit(FruitKind::Apple),
            points: 10
        }));
        assert!(events.contains(&GameEvent::ScoreChanged(10)));
    }

    #[test]
    fn test_miss_costs_life() {
        let mut state = running();
        state.scoring.combo = 5;
        // Far from the basket and about to leave the bottom
        state.entities.push(apple_at(20.0, 619.0));
        tick(&mut state, &TickInput::default(), 0.016);

        assert!(state.entities.is_empty());
        assert_eq!(state.lives(), 2);
        assert_eq!(state.combo(), 0);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Miss));
        assert!(events.contains(&GameEvent::LivesChanged(2)));
    }

    #[test]
    fn test_missed_token_has_no_penalty() {
        let mut state = running();
        state.entities.push(token_at(PowerKind::DoubleScore, 20.0, 619.0));
        tick(&mut state, &TickInput::default(), 0.016);
        assert!(state.entities.is_empty());
        assert_eq!(state.lives(), 3);
    }

    #[test]
    fn test_slow_motion_scales_fall_not_timer() {
        let mut state = running();
        state.timers.activate(PowerKind::SlowMotion, 6000.0);
        state.entities.push(apple_at(20.0, 100.0));
        tick(&mut state, &TickInput::default(), 0.05);

        let body = state.entities[0].body();
        // 100 px/s * 0.05s * 0.62
        assert!((body.pos.y - 103.1).abs() < 1e-3);
        assert!((state.timers.slow_motion_ms - 5950.0).abs() < 1e-3);
    }

    #[test]
    fn test_keyboard_moves_basket() {
        let mut state = running();
        let start = state.basket.pos.x;
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut state, &right, 0.05);
        assert!((state.basket.pos.x - (start + 28.0)).abs() < 1e-3);
    }

    #[test]
    fn test_slow_motion_scales_basket() {
        let mut state = running();
        state.timers.activate(PowerKind::SlowMotion, 6000.0);
        let start = state.basket.pos.x;
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut state, &right, 0.05);
        // 560 px/s * 0.05s * 0.62
        assert!((state.basket.pos.x - (start + 17.36)).abs() < 1e-3);
    }

    #[test]
    fn test_slow_motion_keeps_spawn_cadence() {
        let mut state = running();
        state.timers.activate(PowerKind::SlowMotion, 6000.0);
        for _ in 0..17 {
            tick(&mut state, &TickInput::default(), 0.05);
        }
        assert!(state.entities.is_empty());
        tick(&mut state, &TickInput::default(), 0.05);
        assert_eq!(state.entities.len(), 1);
        assert!(state.timers.slow_motion());
    }

    #[test]
    fn test_doubled_catch_with_huge_score_table() {
        let mut tuning = Tuning::default();
        for fruit in &mut tuning.fruits {
            fruit.score = u32::MAX;
        }
        tuning.validate().unwrap();
        let mut state = GameState::with_seed(tuning, Playfield::new(800.0, 600.0), 7);
        state.start();
        state.timers.activate(PowerKind::DoubleScore, 7500.0);

        let mut apple = apple_at(state.basket.center_x(), state.basket.pos.y - 5.0);
        if let Entity::Fruit(fruit) = &mut apple {
            fruit.base_score = u32::MAX;
        }
        state.entities.push(apple);
        tick(&mut state, &TickInput::default(), 0.016);
        assert_eq!(state.score(), u64::from(u32::MAX) * 2);
    }

    #[test]
    fn test_pointer_centres_basket() {
        let mut state = running();
        let input = TickInput {
            pointer_x: Some(200.0),
            ..Default::default()
        };
        tick(&mut state, &input, 0.016);
        assert!((state.basket.center_x() - 200.0).abs() < 1e-3);
    }

    #[test]
    fn test_autopilot_steers_toward_lowest() {
        let mut state = running();
        state.entities.push(apple_at(700.0, 300.0));
        state.entities.push(apple_at(50.0, 100.0));
        let start = state.basket.pos.x;
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        tick(&mut state, &input, 0.016);
        assert!(state.basket.pos.x > start);
    }

    #[test]
    fn test_game_over_freezes_remaining_entities() {
        let mut state = running();
        state.scoring.lives = 1;
        state.entities.push(apple_at(20.0, 619.0));
        state.entities.push(apple_at(60.0, 619.0));
        tick(&mut state, &TickInput::default(), 0.016);

        assert_eq!(state.phase, RunPhase::GameOver);
        assert_eq!(state.lives(), 0);
        assert_eq!(state.entities.len(), 1);
        let events = state.drain_events();
        let game_overs = events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = running();
        let mut state2 = running();
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..600 {
            tick(&mut state1, &input, 1.0 / 60.0);
            tick(&mut state2, &input, 1.0 / 60.0);
        }
        assert_eq!(state1.score(), state2.score());
        assert_eq!(state1.entities, state2.entities);
        assert_eq!(state1.basket, state2.basket);
    }
}

//! Game state and core simulation types
//!
//! One `GameState` is one independent play session. It owns every mutable
//! piece of the run; renderers read it between ticks and never write to it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Circle, Rect};
use super::effects::PowerTimers;
use super::hud::HudSnapshot;
use super::particles;
use super::scoring::{MissOutcome, ScoreBoard};
use crate::clamp_lenient;
use crate::tuning::Tuning;

/// Run state machine: Idle -> Running <-> Paused, Running -> GameOver -> Running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Waiting for the first start command
    Idle,
    /// Active gameplay
    Running,
    /// Frozen, resumable
    Paused,
    /// Lives exhausted; frozen until restart
    GameOver,
}

/// Fruit types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FruitKind {
    Apple,
    Banana,
    Orange,
    Strawberry,
}

/// Power token effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerKind {
    /// Scales movement time down while active
    SlowMotion,
    /// Doubles catch points while active
    DoubleScore,
}

/// Falling motion shared by every entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Centre position (y grows downward)
    pub pos: Vec2,
    pub radius: f32,
    /// Fall speed in pixels/second
    pub speed: f32,
    /// Cosmetic rotation (radians)
    pub rotation: f32,
    /// Cosmetic angular velocity (radians/second)
    pub spin: f32,
}

impl Body {
    /// Fall and spin for `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        self.pos.y += self.speed * dt;
        self.rotation += self.spin * dt;
    }

    pub fn circle(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }

    /// True once the whole body is below `floor`
    pub fn is_below(&self, floor: f32) -> bool {
        self.pos.y - self.radius > floor
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fruit {
    pub kind: FruitKind,
    pub base_score: u32,
    pub color: u32,
    pub body: Body,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerToken {
    pub kind: PowerKind,
    /// Effect duration once caught (milliseconds)
    pub duration_ms: f32,
    pub color: u32,
    pub body: Body,
}

/// A falling collectible
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Entity {
    Fruit(Fruit),
    Power(PowerToken),
}

/// What was caught, for notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Fruit(FruitKind),
    Power(PowerKind),
}

impl Entity {
    pub fn body(&self) -> &Body {
        match self {
            Entity::Fruit(f) => &f.body,
            Entity::Power(p) => &p.body,
        }
    }

    pub fn body_mut(&mut self) -> &mut Body {
        match self {
            Entity::Fruit(f) => &mut f.body,
            Entity::Power(p) => &mut p.body,
        }
    }

    pub fn color(&self) -> u32 {
        match self {
            Entity::Fruit(f) => f.color,
            Entity::Power(p) => p.color,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Fruit(f) => EntityKind::Fruit(f.kind),
            Entity::Power(p) => EntityKind::Power(p.kind),
        }
    }

    pub fn is_fruit(&self) -> bool {
        matches!(self, Entity::Fruit(_))
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds left
    pub life: f32,
    /// Seconds at birth, for fading
    pub max_life: f32,
    pub size: f32,
    pub color: u32,
}

impl Particle {
    /// Opacity hint for the renderer, in [0, 1]
    pub fn life_ratio(&self) -> f32 {
        if self.max_life <= 0.0 {
            return 0.0;
        }
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}

/// Playfield size in pixels, supplied by the layout owner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    /// Unusable dimensions collapse to 1px
    pub fn new(width: f32, height: f32) -> Self {
        let sane = |v: f32| if v.is_finite() && v > 0.0 { v } else { 1.0 };
        Self {
            width: sane(width),
            height: sane(height),
        }
    }
}

/// The player's basket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Basket {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Horizontal speed (pixels/second)
    pub speed: f32,
}

impl Basket {
    /// A basket sized for `playfield`, centred horizontally
    pub fn new(playfield: Playfield, tuning: &Tuning) -> Self {
        let mut basket = Self {
            pos: Vec2::ZERO,
            width: 0.0,
            height: 0.0,
            speed: tuning.basket_speed,
        };
        basket.refit(playfield, tuning);
        basket.pos.x = playfield.width / 2.0 - basket.width / 2.0;
        basket.clamp_x(playfield.width);
        basket
    }

    /// Re-derive size and height from the playfield, keeping x in bounds
    pub fn refit(&mut self, playfield: Playfield, tuning: &Tuning) {
        self.width = tuning
            .basket_min_width
            .max(playfield.width * tuning.basket_width_ratio);
        self.height = self.width * tuning.basket_aspect;
        self.pos.y = playfield.height - self.height - tuning.basket_bottom_margin;
        self.clamp_x(playfield.width);
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(self.width, self.height))
    }

    /// Centre on a pointer x coordinate
    pub fn center_on(&mut self, x: f32, playfield_width: f32) {
        self.pos.x = x - self.width / 2.0;
        self.clamp_x(playfield_width);
    }

    /// Move by `direction` (-1, 0, 1) for `dt` seconds
    pub fn steer(&mut self, direction: f32, dt: f32, playfield_width: f32) {
        if direction != 0.0 {
            self.pos.x += direction * self.speed * dt;
            self.clamp_x(playfield_width);
        }
    }

    pub fn clamp_x(&mut self, playfield_width: f32) {
        self.pos.x = clamp_lenient(self.pos.x, 0.0, playfield_width - self.width);
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }
}

/// One-way notifications for audio, HUD and persistence collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A run (re)started
    Started,
    Paused,
    Resumed,
    /// Something was caught; `points` already includes bonus and doubling
    Catch { kind: EntityKind, points: u64 },
    /// A power effect was (re)armed to its full duration
    PowerActivated { kind: PowerKind, duration_ms: f32 },
    /// A fruit fell past the bottom
    Miss,
    GameOver { final_score: u64, best: u64 },
    /// The best score was beaten; persist it
    NewHighScore(u64),
    ScoreChanged(u64),
    HighScoreChanged(u64),
    /// Combo label, e.g. "4x"
    ComboChanged(String),
    /// Active power label, e.g. "2X 7s | SLOW 6s"
    PowerStateChanged(String),
    LivesChanged(u32),
}

/// Complete state of one play session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the run RNG was created from
    pub seed: u64,
    pub tuning: Tuning,
    pub playfield: Playfield,
    pub phase: RunPhase,
    /// Real seconds played
    pub elapsed: f32,
    /// Milliseconds banked toward the next spawn
    pub spawn_clock_ms: f32,
    /// Current spawn interval (milliseconds)
    pub spawn_delay_ms: f32,
    /// Current base fall speed (pixels/second)
    pub base_fall_speed: f32,
    pub scoring: ScoreBoard,
    /// Best score, loaded from persistence by the caller
    pub high_score: u64,
    pub timers: PowerTimers,
    pub basket: Basket,
    pub entities: Vec<Entity>,
    pub particles: Vec<Particle>,
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle session with a fresh random seed
    pub fn new(tuning: Tuning, playfield: Playfield) -> Self {
        let seed = rand::rng().random();
        Self::with_seed(tuning, playfield, seed)
    }

    /// Create an idle session with a fixed seed
    pub fn with_seed(tuning: Tuning, playfield: Playfield, seed: u64) -> Self {
        let basket = Basket::new(playfield, &tuning);
        Self {
            seed,
            playfield,
            phase: RunPhase::Idle,
            elapsed: 0.0,
            spawn_clock_ms: 0.0,
            spawn_delay_ms: tuning.start_spawn_delay_ms,
            base_fall_speed: tuning.base_fall_speed,
            scoring: ScoreBoard::new(tuning.max_lives),
            high_score: 0,
            timers: PowerTimers::default(),
            basket,
            entities: Vec::new(),
            particles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            tuning,
        }
    }

    /// Seed the best score from persistence
    pub fn with_high_score(mut self, best: u64) -> Self {
        self.high_score = best;
        self
    }

    /// Start (or restart) a run with fresh run state
    pub fn start(&mut self) {
        self.elapsed = 0.0;
        self.spawn_clock_ms = 0.0;
        self.spawn_delay_ms = self.tuning.start_spawn_delay_ms;
        self.base_fall_speed = self.tuning.base_fall_speed;
        self.scoring = ScoreBoard::new(self.tuning.max_lives);
        self.timers = PowerTimers::default();
        self.basket = Basket::new(self.playfield, &self.tuning);
        self.entities.clear();
        self.particles.clear();
        self.phase = RunPhase::Running;

        log::info!("Started new run with seed: {}", self.seed);
        self.events.push(GameEvent::Started);
        let hud = HudSnapshot::capture(self);
        self.events.extend(hud.full_refresh());
    }

    /// Alias for [`GameState::start`], used from the game over screen
    pub fn restart(&mut self) {
        self.start();
    }

    /// Pause or resume; ignored unless a run is in progress
    pub fn set_paused(&mut self, paused: bool) {
        match (self.phase, paused) {
            (RunPhase::Running, true) => {
                self.phase = RunPhase::Paused;
                self.events.push(GameEvent::Paused);
            }
            (RunPhase::Paused, false) => {
                self.phase = RunPhase::Running;
                self.events.push(GameEvent::Resumed);
            }
            _ => {}
        }
    }

    pub fn toggle_pause(&mut self) {
        let paused = self.phase == RunPhase::Paused;
        self.set_paused(!paused);
    }

    /// Pause on visibility loss (tab hidden, window blur)
    pub fn auto_pause(&mut self) {
        if self.phase == RunPhase::Running {
            log::info!("Auto-paused (visibility lost)");
            self.set_paused(true);
        }
    }

    /// Apply new playfield geometry
    pub fn resize(&mut self, width: f32, height: f32) {
        self.playfield = Playfield::new(width, height);
        self.basket.refit(self.playfield, &self.tuning);
    }

    /// Take all notifications emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Pending notifications, without consuming them
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn score(&self) -> u64 {
        self.scoring.score
    }

    pub fn combo(&self) -> u32 {
        self.scoring.combo
    }

    pub fn lives(&self) -> u32 {
        self.scoring.lives
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == RunPhase::GameOver
    }

    /// Score a caught entity and burst particles at it
    pub(crate) fn resolve_catch(&mut self, entity: &Entity) {
        let outcome = self
            .scoring
            .on_catch(entity, &mut self.timers, &self.tuning);

        let burst = particles::burst(
            &mut self.rng,
            entity.body().pos,
            entity.color(),
            self.tuning.particle_burst_count,
        );
        self.particles.extend(burst);

        self.events.push(GameEvent::Catch {
            kind: entity.kind(),
            points: outcome.points,
        });
        if let Some((kind, duration_ms)) = outcome.activated {
            log::debug!("{:?} armed for {}ms", kind, duration_ms);
            self.events
                .push(GameEvent::PowerActivated { kind, duration_ms });
        }
    }

    /// Apply the miss penalty for an entity that fell off the bottom
    pub(crate) fn resolve_miss(&mut self, entity: &Entity) {
        match self.scoring.on_miss(entity) {
            MissOutcome::Ignored => {}
            MissOutcome::LifeLost { .. } => self.events.push(GameEvent::Miss),
            MissOutcome::GameOver => {
                self.events.push(GameEvent::Miss);
                self.end_game();
            }
        }
    }

    fn end_game(&mut self) {
        self.phase = RunPhase::GameOver;
        let score = self.scoring.score;
        if score > self.high_score {
            self.high_score = score;
            log::info!("New best score: {}", score);
            self.events.push(GameEvent::NewHighScore(score));
        }
        log::info!(
            "Game over after {:.1}s: score {} (best {})",
            self.elapsed,
            score,
            self.high_score
        );
        self.events.push(GameEvent::GameOver {
            final_score: score,
            best: self.high_score,
        });
    }
}

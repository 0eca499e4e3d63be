//! Scoring, combo streaks and lives

use serde::{Deserialize, Serialize};

use super::effects::PowerTimers;
use super::state::{Entity, PowerKind};
use crate::tuning::Tuning;

/// Combo bonus for the `combo`-th consecutive catch.
///
/// Grows by `step_bonus` every `step` catches: with the default 3/4,
/// combos 1-3 give 0, 4-6 give 4, 7-9 give 8.
pub fn combo_bonus(combo: u32, step: u32, step_bonus: u32) -> u32 {
    if combo == 0 || step == 0 {
        return 0;
    }
    ((combo - 1) / step).saturating_mul(step_bonus)
}

/// Result of catching an entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatchOutcome {
    /// Points added to the score
    pub points: u64,
    /// Combo after the catch
    pub combo: u32,
    /// Power effect armed by this catch and its duration (ms)
    pub activated: Option<(PowerKind, f32)>,
}

/// Result of an entity leaving the bottom of the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissOutcome {
    /// No penalty (power token, or the run is already over)
    Ignored,
    LifeLost { lives_left: u32 },
    /// The last life was lost
    GameOver,
}

/// Score, combo and lives for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBoard {
    pub score: u64,
    pub combo: u32,
    pub lives: u32,
}

impl ScoreBoard {
    pub fn new(lives: u32) -> Self {
        Self {
            score: 0,
            combo: 0,
            lives,
        }
    }

    /// Award points for a catch; power tokens also arm their effect
    pub fn on_catch(
        &mut self,
        entity: &Entity,
        timers: &mut PowerTimers,
        tuning: &Tuning,
    ) -> CatchOutcome {
        self.combo = self.combo.saturating_add(1);
        let multiplier: u64 = if timers.double_score() { 2 } else { 1 };

        // Widened so that any u32 score table stays panic-free
        let (base, activated) = match entity {
            Entity::Fruit(fruit) => {
                let bonus = combo_bonus(self.combo, tuning.combo_step, tuning.combo_step_bonus);
                (u64::from(fruit.base_score) + u64::from(bonus), None)
            }
            Entity::Power(token) => {
                timers.activate(token.kind, token.duration_ms);
                (
                    u64::from(tuning.power_catch_points),
                    Some((token.kind, token.duration_ms)),
                )
            }
        };
        let points = base * multiplier;

        self.score = self.score.saturating_add(points);
        CatchOutcome {
            points,
            combo: self.combo,
            activated,
        }
    }

    /// Penalise a fruit falling past the basket
    pub fn on_miss(&mut self, entity: &Entity) -> MissOutcome {
        if !entity.is_fruit() || self.lives == 0 {
            return MissOutcome::Ignored;
        }
        self.combo = 0;
        self.lives -= 1;
        if self.lives == 0 {
            MissOutcome::GameOver
        } else {
            MissOutcome::LifeLost {
                lives_left: self.lives,
            }
        }
    }
}

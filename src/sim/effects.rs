//! Timed power-up effects
//!
//! Two independent countdowns. They run on real frame time even while
//! slow-motion is scaling everything else, and catching a token re-arms its
//! timer to full duration instead of extending it.

use serde::{Deserialize, Serialize};

use super::state::PowerKind;

/// Remaining time on each power effect (milliseconds, never negative)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerTimers {
    pub double_score_ms: f32,
    pub slow_motion_ms: f32,
}

impl PowerTimers {
    /// Count both timers down by `dt_ms` of real time
    pub fn tick(&mut self, dt_ms: f32) {
        self.double_score_ms = (self.double_score_ms - dt_ms).max(0.0);
        self.slow_motion_ms = (self.slow_motion_ms - dt_ms).max(0.0);
    }

    /// Overwrite the timer for `kind` with a full duration
    pub fn activate(&mut self, kind: PowerKind, duration_ms: f32) {
        let duration_ms = duration_ms.max(0.0);
        match kind {
            PowerKind::SlowMotion => self.slow_motion_ms = duration_ms,
            PowerKind::DoubleScore => self.double_score_ms = duration_ms,
        }
    }

    pub fn remaining(&self, kind: PowerKind) -> f32 {
        match kind {
            PowerKind::SlowMotion => self.slow_motion_ms,
            PowerKind::DoubleScore => self.double_score_ms,
        }
    }

    pub fn is_active(&self, kind: PowerKind) -> bool {
        self.remaining(kind) > 0.0
    }

    pub fn double_score(&self) -> bool {
        self.is_active(PowerKind::DoubleScore)
    }

    pub fn slow_motion(&self) -> bool {
        self.is_active(PowerKind::SlowMotion)
    }

    /// Multiplier for movement time: `slow_factor` under slow-motion, else 1
    pub fn time_scale(&self, slow_factor: f32) -> f32 {
        if self.slow_motion() { slow_factor } else { 1.0 }
    }
}

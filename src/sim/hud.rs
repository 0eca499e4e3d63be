//! HUD values and change detection
//!
//! The tick captures a snapshot before and after each frame and only emits
//! change events for fields that actually moved, so the HUD layer never has
//! to poll or diff on its own.

use super::state::{GameEvent, GameState, PowerKind};

/// Everything the HUD shows, as displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudSnapshot {
    pub score: u64,
    pub high_score: u64,
    /// e.g. "3x"; never below "1x"
    pub combo_text: String,
    /// e.g. "2X 7s | SLOW 6s", or "None"
    pub power_text: String,
    pub lives: u32,
}

impl HudSnapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            score: state.scoring.score,
            high_score: state.high_score,
            combo_text: format!("{}x", state.scoring.combo.max(1)),
            power_text: power_text(state),
            lives: state.scoring.lives,
        }
    }

    /// Events for every field, used when a run (re)starts
    pub fn full_refresh(&self) -> Vec<GameEvent> {
        vec![
            GameEvent::ScoreChanged(self.score),
            GameEvent::HighScoreChanged(self.high_score),
            GameEvent::ComboChanged(self.combo_text.clone()),
            GameEvent::PowerStateChanged(self.power_text.clone()),
            GameEvent::LivesChanged(self.lives),
        ]
    }

    /// Events for the fields that differ in `next`
    pub fn changes(&self, next: &HudSnapshot) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.score != next.score {
            events.push(GameEvent::ScoreChanged(next.score));
        }
        if self.high_score != next.high_score {
            events.push(GameEvent::HighScoreChanged(next.high_score));
        }
        if self.combo_text != next.combo_text {
            events.push(GameEvent::ComboChanged(next.combo_text.clone()));
        }
        if self.power_text != next.power_text {
            events.push(GameEvent::PowerStateChanged(next.power_text.clone()));
        }
        if self.lives != next.lives {
            events.push(GameEvent::LivesChanged(next.lives));
        }
        events
    }
}

fn power_text(state: &GameState) -> String {
    let label = |kind: PowerKind, fallback: &str| {
        state
            .tuning
            .power_spec(kind)
            .map(|spec| spec.label.clone())
            .unwrap_or_else(|| fallback.to_string())
    };

    let mut parts = Vec::new();
    for (kind, fallback) in [(PowerKind::DoubleScore, "2X"), (PowerKind::SlowMotion, "SLOW")] {
        let remaining = state.timers.remaining(kind);
        if remaining > 0.0 {
            let secs = (remaining / 1000.0).ceil() as u32;
            parts.push(format!("{} {}s", label(kind, fallback), secs));
        }
    }

    if parts.is_empty() {
        "None".to_string()
    } else {
        parts.join(" | ")
    }
}

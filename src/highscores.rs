//! Best score persistence
//!
//! A single number: LocalStorage on the web, a small JSON file natively.
//! Failures are reported to the caller, which logs them and plays on.

use serde::{Deserialize, Serialize};

use crate::error::GameResult;

/// The persisted best score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "fruitCatcherHighScore";

    pub fn new(best: u64) -> Self {
        Self { best }
    }

    /// Record a finished run's score. Returns true if it is a new best.
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Parse the stored representation (a bare number)
    pub fn parse(raw: &str) -> GameResult<Self> {
        Ok(serde_json::from_str(raw.trim())?)
    }

    /// Stored representation
    pub fn encode(&self) -> String {
        self.best.to_string()
    }

    /// Load the best score from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> GameResult<Self> {
        use crate::error::GameError;

        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| GameError::Storage("localStorage unavailable".to_string()))?;

        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(raw)) => {
                let score = Self::parse(&raw)?;
                log::info!("Loaded best score {}", score.best);
                Ok(score)
            }
            Ok(None) => {
                log::info!("No best score found, starting fresh");
                Ok(Self::default())
            }
            Err(_) => Err(GameError::Storage("read rejected".to_string())),
        }
    }

    /// Save the best score to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) -> GameResult<()> {
        use crate::error::GameError;

        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| GameError::Storage("localStorage unavailable".to_string()))?;
        storage
            .set_item(Self::STORAGE_KEY, &self.encode())
            .map_err(|_| GameError::Storage("write rejected".to_string()))?;
        log::info!("Best score saved ({})", self.best);
        Ok(())
    }

    /// Load the best score from a file; a missing file means no best yet
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> GameResult<Self> {
        match std::fs::read_to_string(path) {
            Ok(raw) => {
                let score = Self::parse(&raw)?;
                log::info!("Loaded best score {} from {}", score.best, path.display());
                Ok(score)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No best score at {}, starting fresh", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Save the best score to a file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) -> GameResult<()> {
        std::fs::write(path, self.encode())?;
        log::info!("Best score saved to {} ({})", path.display(), self.best);
        Ok(())
    }
}

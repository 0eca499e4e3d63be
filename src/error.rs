//! Error types for the fallible outer surfaces.
//!
//! The simulation itself never fails; only loading configuration and talking
//! to persistence can. Callers are expected to log and fall back to defaults.

use std::fmt;

#[derive(Debug)]
pub enum GameError {
    /// Reading or writing a file failed.
    Io(std::io::Error),

    /// A JSON document could not be parsed or produced.
    Json(serde_json::Error),

    /// A tuning value is outside its usable range.
    InvalidTuning {
        /// Name of the offending field.
        field: &'static str,
        /// Human-readable description of the problem.
        reason: String,
    },

    /// Browser storage was unavailable or rejected the write.
    Storage(String),

    /// Bad command line.
    Usage(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Io(e) => write!(f, "i/o error: {}", e),
            GameError::Json(e) => write!(f, "json error: {}", e),
            GameError::InvalidTuning { field, reason } => {
                write!(f, "invalid tuning '{}': {}", field, reason)
            }
            GameError::Storage(msg) => write!(f, "storage error: {}", msg),
            GameError::Usage(msg) => write!(f, "usage: {}", msg),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Io(e) => Some(e),
            GameError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GameError {
    fn from(e: std::io::Error) -> Self {
        GameError::Io(e)
    }
}

impl From<serde_json::Error> for GameError {
    fn from(e: serde_json::Error) -> Self {
        GameError::Json(e)
    }
}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_tuning() {
        let err = GameError::InvalidTuning {
            field: "slow_motion_factor",
            reason: "must be positive".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid tuning 'slow_motion_factor': must be positive"
        );
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<u64>("not a number").unwrap_err();
        let err: GameError = json_err.into();
        assert!(matches!(err, GameError::Json(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}

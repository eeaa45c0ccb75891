use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StreakError {
    #[error("tracker record at {} is unreadable: {reason}", path.display())]
    Storage { path: PathBuf, reason: String },

    #[error("invalid date '{0}': expected a calendar date in YYYY-MM-DD form")]
    InvalidDate(String),

    #[error("store lock poisoned by a panicked writer")]
    LockPoisoned,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl StreakError {
    pub fn storage(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        StreakError::Storage {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StreakError>;

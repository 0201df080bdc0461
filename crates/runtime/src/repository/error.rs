//! Error types raised by repository implementations.

use thiserror::Error;

use game_core::{ErrorSeverity, GameError};

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("preference store lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no preference directory available on this platform")]
    NoHomeDirectory,
}

impl GameError for RepositoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::LockPoisoned => ErrorSeverity::Internal,
            Self::Io(_) | Self::NoHomeDirectory => ErrorSeverity::Recoverable,
            Self::Json(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::LockPoisoned => "REPOSITORY_LOCK_POISONED",
            Self::Io(_) => "REPOSITORY_IO",
            Self::Json(_) => "REPOSITORY_JSON",
            Self::NoHomeDirectory => "REPOSITORY_NO_HOME_DIRECTORY",
        }
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;

//! Unified error types surfaced by the runtime API.

use thiserror::Error;

use game_core::{Archetype, ErrorSeverity, GameError, SelectionError};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("no hero data for archetype {0}")]
    MissingHero(Archetype),

    #[error("failed to load built-in content: {0}")]
    Content(String),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MissingHero(_) | Self::Content(_) => ErrorSeverity::Validation,
            Self::Selection(error) => error.severity(),
            Self::Repository(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingHero(_) => "RUNTIME_MISSING_HERO",
            Self::Content(_) => "RUNTIME_CONTENT",
            Self::Selection(error) => error.error_code(),
            Self::Repository(error) => error.error_code(),
        }
    }
}

//! Error types for protocol-core.

use thiserror::Error;

/// Result type alias using QuizError.
pub type Result<T> = std::result::Result<T, QuizError>;

/// Errors that can occur while assembling a quiz question or prompt.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("need at least {needed} distinct drugs for multiple choice, found {available}")]
    NotEnoughCards { needed: usize, available: usize },

    #[error("no cards match the current filter")]
    EmptyPool,
}

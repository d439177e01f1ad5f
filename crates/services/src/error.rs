//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::RequestError;
use quiz_core::{ParseError, SessionError};

/// The generation collaborator could not produce text.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerationError {
    #[error("question generation is not configured")]
    Disabled,
    #[error("question generation returned an empty response")]
    EmptyResponse,
    #[error("question generation failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("failed to read question source: {0}")]
    Source(#[from] std::io::Error),
}

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl QuizServiceError {
    /// Whether asking the generator again could plausibly succeed.
    #[must_use]
    pub fn should_regenerate(&self) -> bool {
        match self {
            Self::Parse(ParseError::InsufficientValidQuestions { .. }) => true,
            Self::Generation(err) => matches!(
                err,
                GenerationError::EmptyResponse
                    | GenerationError::HttpStatus(_)
                    | GenerationError::Http(_)
            ),
            _ => false,
        }
    }
}

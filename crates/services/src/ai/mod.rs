//! The text-generation collaborator.

mod chat;
mod config;
mod prompt;

use async_trait::async_trait;

use quiz_core::model::QuizRequest;

use crate::error::GenerationError;

pub use chat::ChatQuestionGenerator;
pub use config::GeneratorConfig;
pub use prompt::build_prompt;

/// Produces raw question text for a topic.
///
/// Implementations return one complete blob; the parser absorbs format drift.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    /// # Errors
    ///
    /// Returns `GenerationError` when no text could be produced.
    async fn generate(&self, request: &QuizRequest) -> Result<String, GenerationError>;
}

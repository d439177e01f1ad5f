#![forbid(unsafe_code)]

pub mod ai;
pub mod error;
pub mod quiz_service;

pub use quiz_core::Clock;

pub use ai::{ChatQuestionGenerator, GeneratorConfig, QuestionGenerator, build_prompt};
pub use error::{GenerationError, QuizServiceError};
pub use quiz_service::{QuizService, StartedQuiz};

//! Quiz session state machine: `Idle -> Active -> Complete`, back to `Idle` on restart.

mod report;
mod snapshot;
mod state;
mod view;

use thiserror::Error;

pub use report::{QuizReport, ReviewEntry, Tier, percentage};
pub use snapshot::SessionSnapshot;
pub use state::QuizSession;
pub use view::{AnswerOutcome, QuestionView, SessionProgress, SessionState};

/// A session operation was invoked in a state that forbids it.
///
/// These indicate caller bugs rather than user-facing conditions. A failed
/// transition never leaves the session partially modified.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("cannot start a quiz with no questions")]
    EmptyQuestionSet,

    #[error("a quiz is already in progress")]
    AlreadyActive,

    #[error("no quiz is in progress")]
    NotActive,

    #[error("question {index} has already been answered")]
    AlreadyAnswered { index: usize },

    #[error("quiz is not complete")]
    NotComplete,

    #[error("invalid session snapshot: {0}")]
    InvalidSnapshot(&'static str),
}

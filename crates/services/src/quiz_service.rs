use std::sync::Arc;

use tracing::{info, warn};

use quiz_core::model::{OptionKey, QuizRequest};
use quiz_core::session::{AnswerOutcome, SessionSnapshot, SessionState};
use quiz_core::{MalformedBlock, ParsedQuestions, QuizSession, SessionError, parse_questions};

use crate::Clock;
use crate::ai::QuestionGenerator;
use crate::error::{GenerationError, QuizServiceError};

/// What the parser left behind when a quiz started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartedQuiz {
    pub total: usize,
    pub discarded: Vec<MalformedBlock>,
    pub surplus: usize,
}

/// Drives generate, parse, and session transitions for a caller-owned session.
#[derive(Clone)]
pub struct QuizService {
    clock: Clock,
    generator: Arc<dyn QuestionGenerator>,
}

impl QuizService {
    #[must_use]
    pub fn new(clock: Clock, generator: Arc<dyn QuestionGenerator>) -> Self {
        Self { clock, generator }
    }

    /// Ask the generator for questions and parse exactly `request.count()` of them.
    ///
    /// No retry happens here; see [`QuizServiceError::should_regenerate`].
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Generation` if no text was produced and
    /// `QuizServiceError::Parse` if too few valid questions were recovered.
    pub async fn generate_questions(
        &self,
        request: &QuizRequest,
    ) -> Result<ParsedQuestions, QuizServiceError> {
        let raw = self.generator.generate(request).await?;
        if raw.trim().is_empty() {
            return Err(GenerationError::EmptyResponse.into());
        }

        match parse_questions(&raw, request.count()) {
            Ok(parsed) => {
                info!(
                    topic = request.topic(),
                    count = parsed.questions.len(),
                    discarded = parsed.discarded.len(),
                    surplus = parsed.surplus,
                    "generated questions"
                );
                Ok(parsed)
            }
            Err(err) => {
                warn!(topic = request.topic(), %err, "generated text did not yield enough questions");
                Err(err.into())
            }
        }
    }

    /// Generate questions and start `session` on them.
    ///
    /// The session is checked before the generator is called, and left
    /// untouched on any failure.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadyActive` (wrapped) for a session mid-quiz,
    /// plus anything [`Self::generate_questions`] returns.
    pub async fn start_quiz(
        &self,
        session: &mut QuizSession,
        request: &QuizRequest,
    ) -> Result<StartedQuiz, QuizServiceError> {
        if session.state() == SessionState::Active {
            return Err(SessionError::AlreadyActive.into());
        }

        let ParsedQuestions {
            questions,
            discarded,
            surplus,
        } = self.generate_questions(request).await?;
        let total = questions.len();
        session.start(questions, self.clock.now())?;
        info!(topic = request.topic(), total, "quiz started");

        Ok(StartedQuiz {
            total,
            discarded,
            surplus,
        })
    }

    /// Answer the current question at the clock's current time.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Session` when no question is awaiting an answer.
    pub fn answer_current(
        &self,
        session: &mut QuizSession,
        key: OptionKey,
    ) -> Result<AnswerOutcome, QuizServiceError> {
        let outcome = session.submit_answer(key, self.clock.now())?;
        if outcome.is_complete {
            info!(
                score = session.score(),
                total = session.total(),
                elapsed_ms = session.elapsed().map_or(0, |d| d.num_milliseconds()),
                "quiz complete"
            );
        }
        Ok(outcome)
    }

    /// Resume a parked session, completing it if its pointer ran off the end.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Session` for inconsistent snapshots.
    pub fn resume(&self, snapshot: SessionSnapshot) -> Result<QuizSession, QuizServiceError> {
        Ok(QuizSession::restore(snapshot, self.clock.now())?)
    }
}

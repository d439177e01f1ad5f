use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;
use std::mem;

use super::SessionError;
use super::report::QuizReport;
use super::snapshot::SessionSnapshot;
use super::view::{AnswerOutcome, QuestionView, SessionProgress, SessionState};
use crate::model::{OptionKey, Question, QuestionSet};
use crate::time::elapsed_between;

//
// ─── ATTEMPT ──────────────────────────────────────────────────────────────────
//

/// One pass through a question set.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Attempt {
    pub(super) questions: QuestionSet,
    pub(super) current: usize,
    pub(super) score: usize,
    pub(super) answers: BTreeMap<usize, OptionKey>,
    pub(super) started_at: DateTime<Utc>,
}

impl Attempt {
    fn new(questions: QuestionSet, started_at: DateTime<Utc>) -> Self {
        Self {
            questions,
            current: 0,
            score: 0,
            answers: BTreeMap::new(),
            started_at,
        }
    }

    fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(super) enum Phase {
    #[default]
    Idle,
    Active(Attempt),
    Complete { attempt: Attempt, elapsed: Duration },
}

//
// ─── SESSION ──────────────────────────────────────────────────────────────────
//

/// A single quiz run, owned by one interactive flow.
///
/// Timestamps are passed in by the caller so timing stays deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuizSession {
    pub(super) phase: Phase,
}

impl QuizSession {
    /// An idle session with no questions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        match self.phase {
            Phase::Idle => SessionState::Idle,
            Phase::Active(_) => SessionState::Active,
            Phase::Complete { .. } => SessionState::Complete,
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self.phase, Phase::Complete { .. })
    }

    fn attempt(&self) -> Option<&Attempt> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Active(attempt) | Phase::Complete { attempt, .. } => Some(attempt),
        }
    }

    /// Begin a quiz over `questions`.
    ///
    /// Starting from `Complete` discards the finished attempt first.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadyActive` while a quiz is in progress and
    /// `SessionError::EmptyQuestionSet` when `questions` is empty.
    pub fn start(
        &mut self,
        questions: QuestionSet,
        started_at: DateTime<Utc>,
    ) -> Result<(), SessionError> {
        if matches!(self.phase, Phase::Active(_)) {
            return Err(SessionError::AlreadyActive);
        }
        if questions.is_empty() {
            return Err(SessionError::EmptyQuestionSet);
        }
        self.phase = Phase::Active(Attempt::new(questions, started_at));
        Ok(())
    }

    /// Record `key` as the answer to the current question and advance.
    ///
    /// Answering the last question completes the session and fixes the
    /// elapsed time at `answered_at`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotActive` unless a quiz is in progress and
    /// `SessionError::AlreadyAnswered` if the current question already has an answer.
    pub fn submit_answer(
        &mut self,
        key: OptionKey,
        answered_at: DateTime<Utc>,
    ) -> Result<AnswerOutcome, SessionError> {
        self.settle(answered_at);

        let Phase::Active(attempt) = &mut self.phase else {
            return Err(SessionError::NotActive);
        };
        let index = attempt.current;
        if attempt.answers.contains_key(&index) {
            return Err(SessionError::AlreadyAnswered { index });
        }
        let Some(question) = attempt.current_question() else {
            return Err(SessionError::NotActive);
        };
        let correct_key = question.correct_key();
        let is_correct = question.is_correct(key);

        attempt.answers.insert(index, key);
        if is_correct {
            attempt.score += 1;
        }
        attempt.current += 1;

        let is_complete = attempt.current >= attempt.questions.len();
        if is_complete {
            self.complete(answered_at);
        }

        Ok(AnswerOutcome {
            index,
            submitted: key,
            correct_key,
            is_correct,
            is_complete,
        })
    }

    /// Drop everything and return to `Idle`.
    pub fn restart(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Complete an active session whose pointer ran past the last question.
    pub(super) fn settle(&mut self, now: DateTime<Utc>) {
        let overrun = matches!(
            &self.phase,
            Phase::Active(attempt) if attempt.current >= attempt.questions.len()
        );
        if overrun {
            self.complete(now);
        }
    }

    fn complete(&mut self, at: DateTime<Utc>) {
        self.phase = match mem::take(&mut self.phase) {
            Phase::Active(attempt) => {
                let elapsed = elapsed_between(attempt.started_at, at);
                Phase::Complete { attempt, elapsed }
            }
            other => other,
        };
    }

    //
    // ─── READ ACCESS ─────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn total(&self) -> usize {
        self.attempt().map_or(0, |a| a.questions.len())
    }

    /// 0-based pointer to the next question; equals `total()` once complete.
    #[must_use]
    pub fn current_index(&self) -> usize {
        match &self.phase {
            Phase::Idle => 0,
            Phase::Active(attempt) => attempt.current,
            Phase::Complete { attempt, .. } => attempt.questions.len(),
        }
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.attempt().map_or(0, |a| a.score)
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.attempt().map_or(0, |a| a.answers.len())
    }

    /// Time from start to the final answer. Set only once complete.
    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        match &self.phase {
            Phase::Complete { elapsed, .. } => Some(*elapsed),
            _ => None,
        }
    }

    /// The question awaiting an answer, if a quiz is in progress.
    #[must_use]
    pub fn current_question(&self) -> Option<QuestionView<'_>> {
        let Phase::Active(attempt) = &self.phase else {
            return None;
        };
        attempt
            .current_question()
            .map(|q| QuestionView::new(attempt.current, attempt.questions.len(), q))
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.total();
        let answered = self.answered_count();
        SessionProgress {
            total,
            answered,
            remaining: total.saturating_sub(self.current_index()),
            is_complete: self.is_complete(),
        }
    }

    /// Score, tier, and per-question review of a finished quiz.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotComplete` before the last answer is in.
    pub fn report(&self) -> Result<QuizReport, SessionError> {
        let Phase::Complete { attempt, elapsed } = &self.phase else {
            return Err(SessionError::NotComplete);
        };
        Ok(QuizReport::build(
            &attempt.questions,
            &attempt.answers,
            attempt.score,
            *elapsed,
        ))
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(self)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

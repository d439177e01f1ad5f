use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::SessionError;
use super::state::{Attempt, Phase, QuizSession};
use crate::model::{OptionKey, QuestionSet};
use crate::time::elapsed_between;

/// Flat, serializable copy of a session.
///
/// Lets a presenter park a session between requests and hand it back later.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub questions: QuestionSet,
    pub current_index: usize,
    pub score: usize,
    pub answers: BTreeMap<usize, OptionKey>,
    pub started: bool,
    pub complete: bool,
    pub started_at: Option<DateTime<Utc>>,
    pub elapsed_ms: Option<i64>,
}

impl SessionSnapshot {
    pub(super) fn capture(session: &QuizSession) -> Self {
        let (attempt, elapsed) = match &session.phase {
            Phase::Idle => return Self::default(),
            Phase::Active(attempt) => (attempt, None),
            Phase::Complete { attempt, elapsed } => (attempt, Some(*elapsed)),
        };
        Self {
            questions: attempt.questions.clone(),
            current_index: session.current_index(),
            score: attempt.score,
            answers: attempt.answers.clone(),
            started: true,
            complete: elapsed.is_some(),
            started_at: Some(attempt.started_at),
            elapsed_ms: elapsed.map(|d| d.num_milliseconds()),
        }
    }
}

impl QuizSession {
    /// Rebuild a session from a snapshot.
    ///
    /// An in-progress snapshot whose index has run past the last question is
    /// restored as complete, timed up to `now`. Every question before the
    /// current one must have an answer, none after it may, and the score must
    /// match the answers that were correct.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidSnapshot` when the fields contradict each
    /// other and `SessionError::EmptyQuestionSet` for a started quiz without questions.
    pub fn restore(snapshot: SessionSnapshot, now: DateTime<Utc>) -> Result<Self, SessionError> {
        if !snapshot.started {
            if snapshot.complete {
                return Err(SessionError::InvalidSnapshot("complete but never started"));
            }
            return Ok(Self::new());
        }

        let total = snapshot.questions.len();
        if total == 0 {
            return Err(SessionError::EmptyQuestionSet);
        }
        let started_at = snapshot
            .started_at
            .ok_or(SessionError::InvalidSnapshot("started without a start time"))?;
        let answered_up_to = if snapshot.complete {
            total
        } else {
            snapshot.current_index.min(total)
        };
        if snapshot.answers.len() != answered_up_to
            || snapshot.answers.keys().any(|&index| index >= answered_up_to)
        {
            return Err(SessionError::InvalidSnapshot(
                "answers do not cover exactly the questions before the current one",
            ));
        }
        let correct = snapshot
            .answers
            .iter()
            .filter(|&(&index, &key)| {
                snapshot
                    .questions
                    .get(index)
                    .is_some_and(|question| question.is_correct(key))
            })
            .count();
        if snapshot.score != correct {
            return Err(SessionError::InvalidSnapshot("score does not match recorded answers"));
        }
        let elapsed = match snapshot.elapsed_ms {
            Some(ms) => Some(
                Duration::try_milliseconds(ms)
                    .filter(|d| *d >= Duration::zero())
                    .ok_or(SessionError::InvalidSnapshot("elapsed out of range"))?,
            ),
            None => None,
        };

        let attempt = Attempt {
            questions: snapshot.questions,
            current: answered_up_to,
            score: snapshot.score,
            answers: snapshot.answers,
            started_at,
        };

        let phase = if snapshot.complete {
            let elapsed = elapsed.unwrap_or_else(|| elapsed_between(started_at, now));
            Phase::Complete { attempt, elapsed }
        } else {
            Phase::Active(attempt)
        };

        let mut session = Self { phase };
        session.settle(now);
        Ok(session)
    }
}

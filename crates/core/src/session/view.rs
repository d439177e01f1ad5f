use crate::model::{OptionKey, Question};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Active,
    Complete,
}

/// What a presenter needs to show the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView<'a> {
    /// 1-based position for display.
    pub number: usize,
    pub total: usize,
    pub prompt: &'a str,
    pub options: Vec<(OptionKey, &'a str)>,
}

impl<'a> QuestionView<'a> {
    pub(crate) fn new(index: usize, total: usize, question: &'a Question) -> Self {
        Self {
            number: index + 1,
            total,
            prompt: question.text(),
            options: question.options().iter().collect(),
        }
    }
}

/// Result of submitting one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    /// 0-based index of the answered question.
    pub index: usize,
    pub submitted: OptionKey,
    pub correct_key: OptionKey,
    pub is_correct: bool,
    pub is_complete: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub is_complete: bool,
}

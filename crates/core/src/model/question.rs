use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use super::option_key::OptionKey;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt must not be empty")]
    EmptyPrompt,

    #[error("expected exactly 4 options, found {found}")]
    WrongOptionCount { found: usize },

    #[error("option {0} appears more than once")]
    DuplicateOption(OptionKey),

    #[error("option {0} has no text")]
    EmptyOption(OptionKey),

    #[error("explanation must not be empty")]
    EmptyExplanation,

    #[error("not an option key: {0:?}")]
    InvalidKey(String),
}

//
// ─── OPTIONS ──────────────────────────────────────────────────────────────────
//

/// The four answer texts of a question, always complete and in A-D order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    into = "BTreeMap<OptionKey, String>",
    try_from = "BTreeMap<OptionKey, String>"
)]
pub struct QuestionOptions([String; 4]);

impl QuestionOptions {
    /// Build options from `(key, text)` pairs in any order.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::WrongOptionCount` unless exactly four pairs are given,
    /// `QuestionError::DuplicateOption` if a letter repeats, and
    /// `QuestionError::EmptyOption` if any text is blank.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, QuestionError>
    where
        I: IntoIterator<Item = (OptionKey, S)>,
        S: Into<String>,
    {
        let pairs: Vec<(OptionKey, String)> =
            pairs.into_iter().map(|(k, s)| (k, s.into())).collect();
        if pairs.len() != OptionKey::ALL.len() {
            return Err(QuestionError::WrongOptionCount { found: pairs.len() });
        }

        let mut slots: [Option<String>; 4] = Default::default();
        for (key, text) in pairs {
            let slot = &mut slots[key.index()];
            if slot.is_some() {
                return Err(QuestionError::DuplicateOption(key));
            }
            let text = text.trim();
            if text.is_empty() {
                return Err(QuestionError::EmptyOption(key));
            }
            *slot = Some(text.to_string());
        }

        // Four distinct keys fill all four slots.
        let [a, b, c, d] = slots;
        match (a, b, c, d) {
            (Some(a), Some(b), Some(c), Some(d)) => Ok(Self([a, b, c, d])),
            _ => Err(QuestionError::WrongOptionCount { found: 4 }),
        }
    }

    #[must_use]
    pub fn get(&self, key: OptionKey) -> &str {
        &self.0[key.index()]
    }

    /// Options in A, B, C, D order.
    pub fn iter(&self) -> impl Iterator<Item = (OptionKey, &str)> {
        OptionKey::ALL
            .into_iter()
            .map(move |key| (key, self.0[key.index()].as_str()))
    }
}

impl From<QuestionOptions> for BTreeMap<OptionKey, String> {
    fn from(options: QuestionOptions) -> Self {
        OptionKey::ALL.into_iter().zip(options.0).collect()
    }
}

impl TryFrom<BTreeMap<OptionKey, String>> for QuestionOptions {
    type Error = QuestionError;

    fn try_from(map: BTreeMap<OptionKey, String>) -> Result<Self, Self::Error> {
        Self::from_pairs(map)
    }
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// A validated multiple-choice question. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuestionRecord")]
pub struct Question {
    text: String,
    options: QuestionOptions,
    correct_key: OptionKey,
    explanation: String,
}

#[derive(Deserialize)]
struct QuestionRecord {
    text: String,
    options: QuestionOptions,
    correct_key: OptionKey,
    explanation: String,
}

impl TryFrom<QuestionRecord> for Question {
    type Error = QuestionError;

    fn try_from(record: QuestionRecord) -> Result<Self, Self::Error> {
        Self::new(
            record.text,
            record.options,
            record.correct_key,
            record.explanation,
        )
    }
}

impl Question {
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyPrompt` or `QuestionError::EmptyExplanation`
    /// when either text is blank.
    pub fn new(
        text: impl Into<String>,
        options: QuestionOptions,
        correct_key: OptionKey,
        explanation: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let text = text.into().trim().to_string();
        if text.is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        let explanation = explanation.into().trim().to_string();
        if explanation.is_empty() {
            return Err(QuestionError::EmptyExplanation);
        }

        Ok(Self {
            text,
            options,
            correct_key,
            explanation,
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &QuestionOptions {
        &self.options
    }

    #[must_use]
    pub fn correct_key(&self) -> OptionKey {
        self.correct_key
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn is_correct(&self, key: OptionKey) -> bool {
        self.correct_key == key
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

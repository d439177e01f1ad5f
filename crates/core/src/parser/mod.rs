//! Recovers structured questions from free-form generated text.
//!
//! Generated text is expected to look roughly like:
//!
//! ```text
//! Q1: What is 2+2?
//! A. 3
//! B. 4
//! C. 5
//! D. 6
//! Answer: B
//! Explanation: Basic arithmetic.
//! ```
//!
//! with one blank line between questions. The parser tolerates stray
//! whitespace, extra blank lines, preamble text, and broken blocks; broken
//! blocks are dropped and reported as [`MalformedBlock`] diagnostics.

mod block;
mod normalize;

use thiserror::Error;
use tracing::{debug, trace};

use crate::model::QuestionSet;

pub use block::DiscardReason;
pub use normalize::{normalize, split_blocks};

/// A question block that was dropped during parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedBlock {
    /// 1-based position of the block among all blocks in the text.
    pub position: usize,
    /// First line of the block, for identifying it in logs.
    pub heading: String,
    pub reason: DiscardReason,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    #[error("recovered {achieved} valid questions but {requested} were requested")]
    InsufficientValidQuestions {
        achieved: usize,
        requested: usize,
        discarded: Vec<MalformedBlock>,
    },
}

/// Successful parse: exactly the requested number of questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuestions {
    pub questions: QuestionSet,
    pub discarded: Vec<MalformedBlock>,
    /// Valid questions beyond the requested count that were dropped.
    pub surplus: usize,
}

/// Parse `raw` into exactly `expected` questions.
///
/// Valid questions are kept in text order. A surplus is truncated to the
/// first `expected`; a shortfall fails the whole parse.
///
/// # Errors
///
/// Returns `ParseError::InsufficientValidQuestions` when fewer than `expected`
/// blocks resolve into valid questions.
pub fn parse_questions(raw: &str, expected: usize) -> Result<ParsedQuestions, ParseError> {
    let normalized = normalize(raw);
    let blocks = split_blocks(&normalized);

    let mut questions = Vec::new();
    let mut discarded = Vec::new();

    for (position, lines) in blocks.iter().enumerate().map(|(i, b)| (i + 1, b)) {
        let Some(first) = lines.first() else {
            continue;
        };
        if !block::is_question_heading(first) {
            trace!(position, "skipping non-question block");
            continue;
        }

        match block::parse_block(lines) {
            Ok(question) => questions.push(question),
            Err(reason) => {
                debug!(position, heading = %first, %reason, "discarding question block");
                discarded.push(MalformedBlock {
                    position,
                    heading: (*first).to_string(),
                    reason,
                });
            }
        }
    }

    let achieved = questions.len();
    debug!(
        blocks = blocks.len(),
        achieved,
        expected,
        discarded = discarded.len(),
        "parsed generated questions"
    );

    if achieved < expected {
        return Err(ParseError::InsufficientValidQuestions {
            achieved,
            requested: expected,
            discarded,
        });
    }

    questions.truncate(expected);
    Ok(ParsedQuestions {
        questions: QuestionSet::new(questions),
        discarded,
        surplus: achieved - expected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OptionKey, QuestionError};

    fn block(n: usize, answer: &str) -> String {
        format!(
            "Q{n}: Question number {n}?\nA. alpha {n}\nB. beta {n}\nC. gamma {n}\nD. delta {n}\nAnswer: {answer}\nExplanation: Because {n}."
        )
    }

    fn text(blocks: &[String], separator: &str) -> String {
        blocks.join(separator)
    }

    fn prompts(parsed: &ParsedQuestions) -> Vec<&str> {
        parsed.questions.iter().map(|q| q.text()).collect()
    }

    #[test]
    fn parses_reference_block() {
        let raw = "Q1: What is 2+2?\nA. 3\nB. 4\nC. 5\nD. 6\nAnswer: B\nExplanation: Basic arithmetic.";
        let parsed = parse_questions(raw, 1).unwrap();

        assert_eq!(parsed.questions.len(), 1);
        let q = &parsed.questions[0];
        assert_eq!(q.text(), "What is 2+2?");
        let options: Vec<_> = q.options().iter().collect();
        assert_eq!(
            options,
            [
                (OptionKey::A, "3"),
                (OptionKey::B, "4"),
                (OptionKey::C, "5"),
                (OptionKey::D, "6"),
            ]
        );
        assert_eq!(q.correct_key(), OptionKey::B);
        assert_eq!(q.explanation(), "Basic arithmetic.");
        assert!(parsed.discarded.is_empty());
        assert_eq!(parsed.surplus, 0);
    }

    #[test]
    fn invalid_answer_letter_fails_single_question_parse() {
        let raw = "Q1: What is 2+2?\nA. 3\nB. 4\nC. 5\nD. 6\nAnswer: E\nExplanation: Basic arithmetic.";
        let err = parse_questions(raw, 1).unwrap_err();

        let ParseError::InsufficientValidQuestions {
            achieved,
            requested,
            discarded,
        } = err;
        assert_eq!((achieved, requested), (0, 1));
        assert_eq!(discarded.len(), 1);
        assert_eq!(discarded[0].position, 1);
        assert_eq!(discarded[0].reason, DiscardReason::InvalidAnswer("E".into()));
    }

    #[test]
    fn exact_yield_succeeds_in_order() {
        let blocks: Vec<_> = (1..=3).map(|n| block(n, "A")).collect();
        let parsed = parse_questions(&text(&blocks, "\n\n"), 3).unwrap();
        assert_eq!(
            prompts(&parsed),
            ["Question number 1?", "Question number 2?", "Question number 3?"]
        );
    }

    #[test]
    fn surplus_is_truncated_to_first_valid() {
        let blocks: Vec<_> = (1..=5).map(|n| block(n, "C")).collect();
        let parsed = parse_questions(&text(&blocks, "\n\n"), 2).unwrap();
        assert_eq!(prompts(&parsed), ["Question number 1?", "Question number 2?"]);
        assert_eq!(parsed.surplus, 3);
    }

    #[test]
    fn shortfall_reports_counts() {
        let blocks: Vec<_> = (1..=2).map(|n| block(n, "D")).collect();
        let err = parse_questions(&text(&blocks, "\n\n"), 4).unwrap_err();
        assert!(matches!(
            err,
            ParseError::InsufficientValidQuestions {
                achieved: 2,
                requested: 4,
                ..
            }
        ));
    }

    #[test]
    fn empty_text_yields_nothing() {
        let err = parse_questions("", 1).unwrap_err();
        assert!(matches!(
            err,
            ParseError::InsufficientValidQuestions { achieved: 0, .. }
        ));
    }

    #[test]
    fn malformed_blocks_are_skipped_wherever_they_appear() {
        let mut blocks: Vec<_> = (1..=4).map(|n| block(n, "B")).collect();
        blocks.insert(0, block(90, "E"));
        blocks.insert(3, block(91, "B").replace("C. gamma 91\n", ""));
        blocks.push(block(92, "B").replace("\nExplanation: Because 92.", ""));

        let parsed = parse_questions(&text(&blocks, "\n\n"), 4).unwrap();
        assert_eq!(
            prompts(&parsed),
            [
                "Question number 1?",
                "Question number 2?",
                "Question number 3?",
                "Question number 4?",
            ]
        );

        let reasons: Vec<_> = parsed
            .discarded
            .iter()
            .map(|b| (b.position, b.reason.clone()))
            .collect();
        assert_eq!(
            reasons,
            [
                (1, DiscardReason::InvalidAnswer("E".into())),
                (
                    4,
                    DiscardReason::Question(QuestionError::WrongOptionCount { found: 3 })
                ),
                (7, DiscardReason::MissingExplanation),
            ]
        );
    }

    #[test]
    fn extra_blank_lines_do_not_lose_blocks() {
        let blocks: Vec<_> = (1..=3).map(|n| block(n, "A")).collect();
        let tight = parse_questions(&text(&blocks, "\n\n"), 3).unwrap();
        let loose = parse_questions(&text(&blocks, "\n\n\n\n\n"), 3).unwrap();
        assert_eq!(tight.questions, loose.questions);
    }

    #[test]
    fn tolerates_preamble_crlf_and_indentation() {
        let raw = "Sure! Here are your questions:\r\n\r\n   Q1: Capital of France?  \r\n  A. Paris\r\nB. Rome\r\nC. Madrid\r\nD. Berlin\r\nAnswer: A\r\nExplanation: Paris is the capital.\r\n";
        let parsed = parse_questions(raw, 1).unwrap();
        assert_eq!(parsed.questions[0].text(), "Capital of France?");
        assert_eq!(parsed.questions[0].options().get(OptionKey::A), "Paris");
        assert!(parsed.discarded.is_empty());
    }

    #[test]
    fn dotted_and_worded_headings_are_questions() {
        let body = "A. 3\nB. 4\nC. 5\nD. 6\nAnswer: B\nExplanation: Basic arithmetic.";
        for heading in ["Q1. What is 2+2?", "Q1) What is 2+2?", "Question 1: What is 2+2?"] {
            let parsed = parse_questions(&format!("{heading}\n{body}"), 1).unwrap();
            assert_eq!(parsed.questions[0].text(), "What is 2+2?", "{heading}");
        }
    }

    #[test]
    fn q_prefixed_preamble_shows_up_as_discarded() {
        let raw = format!("Quiz on arithmetic\n\n{}", block(1, "A"));
        let parsed = parse_questions(&raw, 1).unwrap();
        assert_eq!(parsed.discarded.len(), 1);
        assert_eq!(parsed.discarded[0].heading, "Quiz on arithmetic");
    }
}

use thiserror::Error;

use crate::model::{OptionKey, Question, QuestionError, QuestionOptions};

const ANSWER_MARKER: &str = "Answer:";
const EXPLANATION_MARKER: &str = "Explanation:";

/// Why a candidate question block was thrown away.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DiscardReason {
    #[error(transparent)]
    Question(#[from] QuestionError),

    #[error("missing `Answer:` line")]
    MissingAnswer,

    #[error("answer {0:?} is not one of A, B, C, D")]
    InvalidAnswer(String),

    #[error("missing `Explanation:` line")]
    MissingExplanation,
}

/// Whether `line` opens a question block: anything starting with `Q`.
pub(crate) fn is_question_heading(line: &str) -> bool {
    line.starts_with('Q')
}

/// The heading with its marker removed: `Q` or `Question`, any digits, and
/// one `.`, `)` or `:` separator.
fn strip_question_marker(line: &str) -> &str {
    let rest = line
        .strip_prefix("Question")
        .or_else(|| line.strip_prefix('Q'))
        .unwrap_or(line)
        .trim_start();
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_digit());
    rest.strip_prefix(['.', ')', ':']).unwrap_or(rest)
}

/// Extract the prompt from a block's first line.
///
/// Text after the first colon wins when the line has one; otherwise the
/// marker is removed and the remainder used.
fn prompt_of(first_line: &str) -> &str {
    match first_line.split_once(':') {
        Some((_, after)) => after.trim(),
        None => strip_question_marker(first_line).trim(),
    }
}

/// `A. text` style option lines. The letter must be the first character.
fn option_of(line: &str) -> Option<(OptionKey, &str)> {
    let mut chars = line.chars();
    let key = OptionKey::from_char(chars.next()?)?;
    let rest = chars.as_str().strip_prefix('.')?;
    Some((key, rest.trim()))
}

fn marker_value<'a>(lines: &[&'a str], marker: &str) -> Option<&'a str> {
    lines
        .iter()
        .find_map(|line| line.strip_prefix(marker))
        .map(str::trim)
}

/// Turn one question block into a `Question`, or say why it cannot be one.
pub(crate) fn parse_block(lines: &[&str]) -> Result<Question, DiscardReason> {
    let Some(first) = lines.first() else {
        return Err(QuestionError::EmptyPrompt.into());
    };
    let prompt = prompt_of(first);
    if prompt.is_empty() {
        return Err(QuestionError::EmptyPrompt.into());
    }

    let options = QuestionOptions::from_pairs(lines.iter().filter_map(|line| option_of(line)))?;

    let answer = marker_value(lines, ANSWER_MARKER).ok_or(DiscardReason::MissingAnswer)?;
    let correct_key: OptionKey = answer
        .parse()
        .map_err(|_| DiscardReason::InvalidAnswer(answer.to_string()))?;

    let explanation =
        marker_value(lines, EXPLANATION_MARKER).ok_or(DiscardReason::MissingExplanation)?;

    Ok(Question::new(prompt, options, correct_key, explanation)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(text: &str) -> Vec<&str> {
        text.lines().collect()
    }

    const GOOD: &str = "Q1: What is 2+2?\nA. 3\nB. 4\nC. 5\nD. 6\nAnswer: B\nExplanation: Basic arithmetic.";

    #[test]
    fn any_line_starting_with_q_is_a_heading() {
        for line in ["Q: hi", "Q12: hi", "Q3 hi", "Q1. hi", "Q2) hi", "Question 1: hi", "Quiz time"] {
            assert!(is_question_heading(line), "{line:?}");
        }
        assert!(!is_question_heading("Here are your questions"));
        assert!(!is_question_heading("q1: lowercase"));
    }

    #[test]
    fn prompt_uses_text_after_first_colon() {
        assert_eq!(prompt_of("Q1: Ratio of 2:1?"), "Ratio of 2:1?");
        assert_eq!(prompt_of("Question 4: Which planet?"), "Which planet?");
    }

    #[test]
    fn prompt_without_colon_drops_marker_and_separator() {
        assert_eq!(prompt_of("Q7 Which planet?"), "Which planet?");
        assert_eq!(prompt_of("Q1. What is 2+2?"), "What is 2+2?");
        assert_eq!(prompt_of("Q2) Pick a colour"), "Pick a colour");
        assert_eq!(prompt_of("Question 3. Largest ocean?"), "Largest ocean?");
        assert_eq!(prompt_of("Q"), "");
    }

    #[test]
    fn parses_well_formed_block() {
        let q = parse_block(&block(GOOD)).unwrap();
        assert_eq!(q.text(), "What is 2+2?");
        assert_eq!(q.correct_key(), OptionKey::B);
        assert_eq!(q.options().get(OptionKey::D), "6");
        assert_eq!(q.explanation(), "Basic arithmetic.");
    }

    #[test]
    fn line_order_inside_block_does_not_matter() {
        let shuffled =
            "Q: Pick one\nExplanation: because\nC. c\nAnswer: C\nA. a\nD. d\nB. b";
        let q = parse_block(&block(shuffled)).unwrap();
        assert_eq!(q.correct_key(), OptionKey::C);
        let letters: String = q.options().iter().map(|(k, _)| k.as_char()).collect();
        assert_eq!(letters, "ABCD");
    }

    #[test]
    fn reports_each_discard_reason() {
        let missing_option = GOOD.replace("C. 5\n", "");
        assert_eq!(
            parse_block(&block(&missing_option)).unwrap_err(),
            DiscardReason::Question(QuestionError::WrongOptionCount { found: 3 })
        );

        let duplicate = GOOD.replace("C. 5", "B. 5");
        assert_eq!(
            parse_block(&block(&duplicate)).unwrap_err(),
            DiscardReason::Question(QuestionError::DuplicateOption(OptionKey::B))
        );

        let no_answer = GOOD.replace("Answer: B\n", "");
        assert_eq!(
            parse_block(&block(&no_answer)).unwrap_err(),
            DiscardReason::MissingAnswer
        );

        let bad_answer = GOOD.replace("Answer: B", "Answer: E");
        assert_eq!(
            parse_block(&block(&bad_answer)).unwrap_err(),
            DiscardReason::InvalidAnswer("E".into())
        );

        let no_explanation = GOOD.replace("\nExplanation: Basic arithmetic.", "");
        assert_eq!(
            parse_block(&block(&no_explanation)).unwrap_err(),
            DiscardReason::MissingExplanation
        );

        let empty_explanation = GOOD.replace("Basic arithmetic.", "");
        assert_eq!(
            parse_block(&block(&empty_explanation)).unwrap_err(),
            DiscardReason::Question(QuestionError::EmptyExplanation)
        );

        let empty_prompt = GOOD.replace("What is 2+2?", "");
        assert_eq!(
            parse_block(&block(&empty_prompt)).unwrap_err(),
            DiscardReason::Question(QuestionError::EmptyPrompt)
        );
    }

    #[test]
    fn answer_value_must_be_exact_letter() {
        for value in ["b", "B.", "B) 4", "A or B", ""] {
            let text = GOOD.replace("Answer: B", &format!("Answer: {value}"));
            assert!(
                matches!(
                    parse_block(&block(&text)).unwrap_err(),
                    DiscardReason::InvalidAnswer(_)
                ),
                "answer {value:?} should be rejected"
            );
        }
    }
}

use chrono::Duration;
use std::collections::BTreeMap;

use crate::model::{OptionKey, QuestionSet};

/// Feedback band for a finished quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// More than half correct. Earns the reward badge.
    Excellent,
    /// Exactly half correct.
    Pass,
    /// Less than half correct.
    Retry,
}

impl Tier {
    /// Band a score without going through floating point, so exactly-half
    /// scores always land in `Pass`.
    #[must_use]
    pub fn from_score(score: usize, total: usize) -> Self {
        match (score * 2).cmp(&total) {
            std::cmp::Ordering::Greater => Self::Excellent,
            std::cmp::Ordering::Equal => Self::Pass,
            std::cmp::Ordering::Less => Self::Retry,
        }
    }

    #[must_use]
    pub fn reward_badge(self) -> bool {
        matches!(self, Self::Excellent)
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent! You earned a reward badge!",
            Self::Pass => "Good job! Try again for a reward!",
            Self::Retry => "Keep learning! You can do better next time.",
        }
    }
}

/// Score as a percentage of `total`. Zero when there are no questions.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn percentage(score: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    100.0 * score as f64 / total as f64
}

/// One line of the post-quiz review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewEntry {
    pub number: usize,
    pub prompt: String,
    pub options: Vec<(OptionKey, String)>,
    pub correct_key: OptionKey,
    /// `None` when the question was never answered.
    pub submitted: Option<OptionKey>,
    pub is_correct: bool,
    pub explanation: String,
}

/// Everything shown once a quiz is complete.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizReport {
    pub score: usize,
    pub total: usize,
    pub percentage: f64,
    pub tier: Tier,
    pub reward_badge: bool,
    pub elapsed: Duration,
    pub entries: Vec<ReviewEntry>,
}

impl QuizReport {
    pub(crate) fn build(
        questions: &QuestionSet,
        answers: &BTreeMap<usize, OptionKey>,
        score: usize,
        elapsed: Duration,
    ) -> Self {
        let total = questions.len();
        let tier = Tier::from_score(score, total);
        Self {
            score,
            total,
            percentage: percentage(score, total),
            tier,
            reward_badge: tier.reward_badge(),
            elapsed,
            entries: review_entries(questions, answers),
        }
    }
}

fn review_entries(
    questions: &QuestionSet,
    answers: &BTreeMap<usize, OptionKey>,
) -> Vec<ReviewEntry> {
    questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let submitted = answers.get(&index).copied();
            ReviewEntry {
                number: index + 1,
                prompt: question.text().to_string(),
                options: question
                    .options()
                    .iter()
                    .map(|(key, text)| (key, text.to_string()))
                    .collect(),
                correct_key: question.correct_key(),
                submitted,
                is_correct: submitted == Some(question.correct_key()),
                explanation: question.explanation().to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Question, QuestionOptions};

    fn question(correct: OptionKey) -> Question {
        let options = QuestionOptions::from_pairs(OptionKey::ALL.map(|k| (k, format!("opt {k}"))))
            .unwrap();
        Question::new("Prompt?", options, correct, "Because.").unwrap()
    }

    #[test]
    fn tiers_split_at_half() {
        assert_eq!(Tier::from_score(2, 3), Tier::Excellent);
        assert_eq!(Tier::from_score(1, 2), Tier::Pass);
        assert_eq!(Tier::from_score(2, 4), Tier::Pass);
        assert_eq!(Tier::from_score(1, 3), Tier::Retry);
        assert_eq!(Tier::from_score(0, 5), Tier::Retry);
        assert!(Tier::Excellent.reward_badge());
        assert!(!Tier::Pass.reward_badge());
    }

    #[test]
    fn percentage_handles_empty_total() {
        assert!((percentage(3, 4) - 75.0).abs() < f64::EPSILON);
        assert!(percentage(0, 0).abs() < f64::EPSILON);
    }

    #[test]
    fn unanswered_questions_review_as_incorrect() {
        let questions = QuestionSet::new(vec![question(OptionKey::A), question(OptionKey::B)]);
        let answers = BTreeMap::from([(0, OptionKey::A)]);
        let report = QuizReport::build(&questions, &answers, 1, Duration::seconds(3));

        assert_eq!(report.entries.len(), 2);
        assert!(report.entries[0].is_correct);
        assert_eq!(report.entries[1].submitted, None);
        assert!(!report.entries[1].is_correct);
        assert_eq!(report.tier, Tier::Pass);
        assert_eq!(report.entries[1].number, 2);
    }
}

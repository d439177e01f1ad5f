use thiserror::Error;

/// Upper bound on questions per quiz.
pub const MAX_QUESTIONS: usize = 30;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RequestError {
    #[error("topic must not be empty")]
    EmptyTopic,

    #[error("question count must be between 1 and {max}, got {count}")]
    CountOutOfRange { count: usize, max: usize },
}

/// What to ask the generator for: a topic and how many questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizRequest {
    topic: String,
    count: usize,
}

impl QuizRequest {
    /// # Errors
    ///
    /// Returns `RequestError::EmptyTopic` for a blank topic and
    /// `RequestError::CountOutOfRange` unless `1 <= count <= MAX_QUESTIONS`.
    pub fn new(topic: impl Into<String>, count: usize) -> Result<Self, RequestError> {
        let topic = topic.into().trim().to_string();
        if topic.is_empty() {
            return Err(RequestError::EmptyTopic);
        }
        if count == 0 || count > MAX_QUESTIONS {
            return Err(RequestError::CountOutOfRange {
                count,
                max: MAX_QUESTIONS,
            });
        }
        Ok(Self { topic, count })
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }
}

use thiserror::Error;

use crate::model::{QuestionError, RequestError};
use crate::parser::ParseError;
use crate::session::SessionError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuizRequest;
    use crate::parse_questions;

    fn request_then_parse(raw: &str) -> Result<usize, Error> {
        let request = QuizRequest::new("topic", 2)?;
        Ok(parse_questions(raw, request.count())?.questions.len())
    }

    #[test]
    fn component_errors_convert() {
        let err = request_then_parse("").unwrap_err();
        assert!(matches!(
            err,
            Error::Parse(ParseError::InsufficientValidQuestions { requested: 2, .. })
        ));
        assert_eq!(
            err.to_string(),
            "recovered 0 valid questions but 2 were requested"
        );
    }
}

mod option_key;
mod question;
mod question_set;
mod request;

pub use option_key::OptionKey;
pub use question::{Question, QuestionError, QuestionOptions};
pub use question_set::QuestionSet;
pub use request::{MAX_QUESTIONS, QuizRequest, RequestError};

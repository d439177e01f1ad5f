#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod parser;
pub mod session;
pub mod time;

pub use error::Error;
pub use parser::{DiscardReason, MalformedBlock, ParseError, ParsedQuestions, parse_questions};
pub use session::{QuizSession, SessionError};
pub use time::Clock;

mod terminal;

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use quiz_core::model::{QuizRequest, RequestError};
use quiz_core::session::QuizSession;
use services::{
    ChatQuestionGenerator, Clock, GenerationError, QuestionGenerator, QuizService,
};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::terminal::Terminal;

const DEFAULT_COUNT: usize = 3;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidCount { raw: String },
    NoGenerator,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidCount { raw } => write!(f, "invalid --count value: {raw}"),
            ArgsError::NoGenerator => {
                write!(f, "no question source: set QUIZ_AI_API_KEY or pass --input")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--topic <text>] [--count <n>] [--input <file>]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --topic   quiz topic (asked interactively when omitted)");
    eprintln!("  --count   number of questions, 1-30 (default {DEFAULT_COUNT})");
    eprintln!("  --input   read generated question text from a file instead of the AI service");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_TOPIC, QUIZ_COUNT");
    eprintln!("  QUIZ_AI_API_KEY, QUIZ_AI_BASE_URL, QUIZ_AI_MODEL, QUIZ_AI_TEMPERATURE");
    eprintln!("  RUST_LOG (default: warn)");
}

struct Args {
    topic: Option<String>,
    count: usize,
    input: Option<PathBuf>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Option<Self>, ArgsError> {
        let mut topic = std::env::var("QUIZ_TOPIC")
            .ok()
            .filter(|value| !value.trim().is_empty());
        let mut count = match std::env::var("QUIZ_COUNT") {
            Ok(raw) => parse_count(&raw)?,
            Err(_) => DEFAULT_COUNT,
        };
        let mut input = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--topic" => topic = Some(require_value(args, "--topic")?),
                "--count" => count = parse_count(&require_value(args, "--count")?)?,
                "--input" => input = Some(PathBuf::from(require_value(args, "--input")?)),
                "--help" | "-h" => return Ok(None),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Some(Self {
            topic,
            count,
            input,
        }))
    }
}

fn parse_count(raw: &str) -> Result<usize, ArgsError> {
    raw.trim().parse().map_err(|_| ArgsError::InvalidCount {
        raw: raw.to_string(),
    })
}

/// Serves pre-generated question text from a file.
struct FileQuestionSource {
    path: PathBuf,
}

#[async_trait]
impl QuestionGenerator for FileQuestionSource {
    async fn generate(&self, request: &QuizRequest) -> Result<String, GenerationError> {
        debug!(path = %self.path.display(), topic = request.topic(), "reading questions from file");
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }
}

fn question_source(input: Option<PathBuf>) -> Result<Arc<dyn QuestionGenerator>, ArgsError> {
    if let Some(path) = input {
        return Ok(Arc::new(FileQuestionSource { path }));
    }
    let generator = ChatQuestionGenerator::from_env();
    if !generator.enabled() {
        return Err(ArgsError::NoGenerator);
    }
    Ok(Arc::new(generator))
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let Some(args) = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?
    else {
        print_usage();
        return Ok(());
    };

    let service = QuizService::new(Clock::System, question_source(args.input)?);
    let stdin = io::stdin();
    let mut terminal = Terminal::new(stdin.lock(), io::stdout());

    let topic = match args.topic {
        Some(topic) => topic,
        None => terminal
            .prompt("Enter a topic to begin:")?
            .unwrap_or_default(),
    };
    let request = match QuizRequest::new(topic, args.count) {
        Ok(request) => request,
        Err(err @ RequestError::EmptyTopic) => {
            terminal.notice(&err.to_string())?;
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let mut session = QuizSession::new();
    loop {
        terminal.notice(&format!(
            "Generating {} questions about {}...",
            request.count(),
            request.topic()
        ))?;
        match service.start_quiz(&mut session, &request).await {
            Ok(started) => {
                info!(
                    discarded = started.discarded.len(),
                    surplus = started.surplus,
                    "questions ready"
                );
            }
            Err(err) if err.should_regenerate() => {
                terminal.notice(&format!("Could not build the quiz: {err}"))?;
                if terminal.confirm("Try generating again?")? {
                    continue;
                }
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        }

        loop {
            let answer = match session.current_question() {
                Some(view) => terminal.ask_answer(&view)?,
                None => break,
            };
            let Some(key) = answer else {
                return Ok(());
            };
            let outcome = service.answer_current(&mut session, key)?;
            terminal.show_outcome(&outcome)?;
            let progress = session.progress();
            debug!(
                answered = progress.answered,
                remaining = progress.remaining,
                "answer recorded"
            );
        }

        terminal.show_report(&session.report()?)?;
        if !terminal.confirm("Restart with new questions?")? {
            return Ok(());
        }
        session.restart();
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

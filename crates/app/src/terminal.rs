//! Line-oriented presenter: prints questions, reads option letters.

use std::io::{self, BufRead, Write};

use quiz_core::model::OptionKey;
use quiz_core::session::{AnswerOutcome, QuestionView, QuizReport};

pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Next input line without its line ending. `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    pub fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{message} ")?;
        self.output.flush()?;
        self.read_line()
    }

    /// Yes/no question; anything but `y`/`yes` is no.
    pub fn confirm(&mut self, message: &str) -> io::Result<bool> {
        Ok(self
            .prompt(&format!("{message} [y/N]"))?
            .is_some_and(|answer| matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes")))
    }

    pub fn notice(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{message}")
    }

    /// Show a question and keep asking until a valid letter arrives.
    pub fn ask_answer(&mut self, view: &QuestionView<'_>) -> io::Result<Option<OptionKey>> {
        writeln!(self.output)?;
        writeln!(self.output, "Question {} of {}", view.number, view.total)?;
        writeln!(self.output, "{}", view.prompt)?;
        for (key, text) in &view.options {
            writeln!(self.output, "  {key}. {text}")?;
        }

        loop {
            let Some(line) = self.prompt("Your answer (A-D):")? else {
                return Ok(None);
            };
            match parse_choice(&line) {
                Some(key) => return Ok(Some(key)),
                None => writeln!(self.output, "Please enter A, B, C or D.")?,
            }
        }
    }

    pub fn show_outcome(&mut self, outcome: &AnswerOutcome) -> io::Result<()> {
        if outcome.is_correct {
            writeln!(self.output, "Correct!")
        } else {
            writeln!(
                self.output,
                "Not quite. The answer was {}.",
                outcome.correct_key
            )
        }
    }

    pub fn show_report(&mut self, report: &QuizReport) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Quiz complete!")?;
        writeln!(self.output, "Your score: {} / {}", report.score, report.total)?;
        writeln!(self.output, "{:.0}%  {}", report.percentage, report.tier.message())?;
        #[allow(clippy::cast_precision_loss)]
        let seconds = report.elapsed.num_milliseconds() as f64 / 1000.0;
        writeln!(self.output, "Time taken: {seconds:.1} seconds")?;

        writeln!(self.output)?;
        writeln!(self.output, "Review your answers:")?;
        for entry in &report.entries {
            writeln!(self.output, "Q{}: {}", entry.number, entry.prompt)?;
            for (key, text) in &entry.options {
                let marker = if *key == entry.correct_key {
                    "*"
                } else if Some(*key) == entry.submitted {
                    "x"
                } else {
                    " "
                };
                writeln!(self.output, " {marker} {key}. {text}")?;
            }
            let submitted = entry
                .submitted
                .map_or_else(|| "unanswered".to_string(), |key| key.to_string());
            if entry.is_correct {
                writeln!(self.output, "  Your answer: {submitted} (correct)")?;
            } else {
                writeln!(
                    self.output,
                    "  Your answer: {submitted} | Correct: {}",
                    entry.correct_key
                )?;
            }
            writeln!(self.output, "  Explanation: {}", entry.explanation)?;
        }
        Ok(())
    }
}

/// Accepts a single option letter in either case.
fn parse_choice(line: &str) -> Option<OptionKey> {
    line.trim().to_ascii_uppercase().parse().ok()
}

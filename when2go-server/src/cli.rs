//! Input handling for the terminal client.
//!
//! Prompts read a line from any async reader so the question/answer flow
//! can be driven from tests as well as from stdin.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::domain::{DomainError, TravelMode};

/// Printed when the route number is a number but out of range.
pub const INVALID_ROUTE_NUMBER: &str = "⚠️ Invalid route number. Showing all routes instead.";

/// Printed when the route number is not a number.
pub const INVALID_ROUTE_INPUT: &str = "⚠️ Invalid input. Showing all routes instead.";

/// Which routes to draw on the overview map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteChoice {
    All,
    /// Zero-based route index
    One(usize),
    OutOfRange,
    NotANumber,
}

impl RouteChoice {
    /// Index to highlight, if a single valid route was chosen.
    pub fn highlight(&self) -> Option<usize> {
        match self {
            RouteChoice::One(i) => Some(*i),
            _ => None,
        }
    }

    /// Message explaining why all routes are shown instead.
    pub fn rejection(&self) -> Option<&'static str> {
        match self {
            RouteChoice::OutOfRange => Some(INVALID_ROUTE_NUMBER),
            RouteChoice::NotANumber => Some(INVALID_ROUTE_INPUT),
            _ => None,
        }
    }
}

/// Interpret a 1-based route number typed by the user.
pub fn parse_route_choice(input: &str, count: usize) -> RouteChoice {
    match input.trim().parse::<i64>() {
        Ok(n) if n >= 1 && (n as u64) <= count as u64 => RouteChoice::One(n as usize - 1),
        Ok(_) => RouteChoice::OutOfRange,
        Err(_) => RouteChoice::NotANumber,
    }
}

/// Only an exact (case-insensitive) "yes" counts as yes.
pub fn parse_yes(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("yes")
}

/// Mode typed at a prompt; blank means the default mode.
pub fn parse_mode_or_default(input: &str) -> Result<TravelMode, DomainError> {
    match input.trim() {
        "" => Ok(TravelMode::default()),
        mode => mode.parse(),
    }
}

/// Minutes typed at a prompt; blank means `default`.
pub fn parse_minutes_or(input: &str, default: u32) -> Result<u32, std::num::ParseIntError> {
    let input = input.trim();
    if input.is_empty() {
        Ok(default)
    } else {
        input.parse()
    }
}

/// Line-oriented question/answer over a reader and writer.
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: AsyncBufRead + Unpin, W: AsyncWrite + Unpin> Prompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Print `question` (no newline) and read one line, without the line ending.
    /// End of input reads as an empty answer.
    pub async fn ask(&mut self, question: &str) -> std::io::Result<String> {
        self.writer.write_all(question.as_bytes()).await?;
        self.writer.flush().await?;

        let mut line = String::new();
        self.reader.read_line(&mut line).await?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    pub async fn ask_yes(&mut self, question: &str) -> std::io::Result<bool> {
        Ok(parse_yes(&self.ask(question).await?))
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

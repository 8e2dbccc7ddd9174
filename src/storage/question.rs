//! Reading question files.
//!
//! A question file is free-form text whose final line carries the answer:
//!
//! ```text
//! Quanto fa 2+2?
//! 1) 4  2) 5  3) 22
//! Risposta corretta: 1
//! ```
//!
//! The final line is always treated as metadata and never becomes part of the
//! body, whether or not it matches the expected pattern.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
    sync::LazyLock,
};

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::domain::{Answer, ParsedQuestion};

static ANSWER_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Risposta\s+corretta:\s*([1-5])").expect("hard-coded regex is valid")
});

/// Reads and parses the question file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read (including invalid
/// UTF-8), or if it is empty.
pub fn parse_question(path: &Path) -> Result<ParsedQuestion, ParseError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    read(&mut reader)
}

pub(crate) fn read<R: BufRead>(reader: &mut R) -> Result<ParsedQuestion, ParseError> {
    let mut lines = reader.lines().collect::<Result<Vec<_>, _>>()?;

    let metadata = lines.pop().ok_or(ParseError::Empty)?;
    let answer = parse_answer(&metadata);
    if answer == Answer::Unknown {
        tracing::debug!("No answer metadata in final line: {metadata:?}");
    }

    let body = lines.join("\n").trim().nfc().collect();

    Ok(ParsedQuestion { body, answer })
}

/// Extracts the answer letter from a metadata line.
///
/// The line must contain `Risposta corretta: <1-5>` (case-insensitive);
/// anything else yields [`Answer::Unknown`].
#[must_use]
pub fn parse_answer(line: &str) -> Answer {
    ANSWER_LINE
        .captures(line.trim())
        .and_then(|captures| captures.get(1))
        .and_then(|digit| digit.as_str().chars().next())
        .map_or(Answer::Unknown, Answer::from_digit)
}

/// Errors that can occur while reading a question file.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The file could not be read.
    #[error("failed to read question file: {0}")]
    Io(#[from] io::Error),

    /// The file has no lines at all.
    #[error("question file is empty")]
    Empty,
}

use std::{fmt, path::PathBuf};

use super::{Subject, Topic};

/// The correct option of a multiple-choice question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Answer {
    /// First option.
    A,
    /// Second option.
    B,
    /// Third option.
    C,
    /// Fourth option.
    D,
    /// Fifth option.
    E,
    /// The answer metadata was missing or out of range.
    Unknown,
}

impl Answer {
    /// Maps an option number (`'1'` to `'5'`) to its letter.
    ///
    /// Any other character yields [`Answer::Unknown`].
    #[must_use]
    pub const fn from_digit(digit: char) -> Self {
        match digit {
            '1' => Self::A,
            '2' => Self::B,
            '3' => Self::C,
            '4' => Self::D,
            '5' => Self::E,
            _ => Self::Unknown,
        }
    }

    /// The letter printed in answer keys, `?` when unknown.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
            Self::E => 'E',
            Self::Unknown => '?',
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A reference to one question file discovered in the bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionFile {
    /// Location of the file on disk.
    pub path: PathBuf,
    /// The subject whose directory contains the file.
    pub subject: Subject,
    /// The topic taken from the file name.
    pub topic: Topic,
    /// Display name taken from the file name, without any `#n` variant suffix.
    pub name: String,
}

impl QuestionFile {
    /// The file name, used as the natural-sort key within a topic.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
    }
}

/// The content of a question file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuestion {
    /// Question text, NFC-normalised and trimmed. Not yet escaped.
    pub body: String,
    /// The correct option.
    pub answer: Answer,
}

/// One row of an answer key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionRecord {
    /// 1-based position within the subject, when numbered per subject.
    pub subject_sequence: Option<usize>,
    /// 1-based position across the whole document set.
    pub global_sequence: usize,
    /// Subject of the question.
    pub subject: Subject,
    /// Topic of the question.
    pub topic: Topic,
    /// Display name of the question.
    pub name: String,
    /// Correct option.
    pub answer: Answer,
}

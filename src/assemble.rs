//! Document assembly.
//!
//! Turns the question files of a bank into LaTeX sources: full workbooks with
//! answer keys, or randomly sampled tests.

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

/// LaTeX rendering.
pub mod latex;
/// Randomized tests.
pub mod test_paper;
/// Exercise books.
pub mod workbook;

pub use test_paper::{generate_test, Selection, TestOutcome, TestReport};
pub use workbook::{generate_workbook, WorkbookReport};

use crate::{
    domain::{ParsedQuestion, QuestionFile},
    storage::parse_question,
};

/// Errors that abort a generation call.
///
/// Files written before the failure are left on disk.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The requested subject is not configured.
    #[error("unknown subject '{0}'")]
    UnknownSubject(String),

    /// The output directory could not be created.
    #[error("failed to create output directory {}: {source}", path.display())]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },

    /// An output file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// File that could not be written.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
}

/// Parses a question file, logging and skipping it on failure.
fn parse_or_skip(file: &QuestionFile) -> Option<ParsedQuestion> {
    match parse_question(&file.path) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::warn!("Skipping {}: {e}", file.path.display());
            None
        }
    }
}

fn create_output_dir(path: &Path) -> Result<(), GenerateError> {
    fs::create_dir_all(path).map_err(|source| GenerateError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

fn write_document(path: &Path, document: impl fmt::Display) -> Result<(), GenerateError> {
    fs::write(path, document.to_string()).map_err(|source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}

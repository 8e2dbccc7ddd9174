//! Plain-text Question Bank Compiler
//!
//! Questions are text files stored in one directory per subject. They are
//! compiled into LaTeX workbooks with answer keys, or into randomly sampled
//! tests.

pub mod domain;
pub use domain::{Answer, Config, ParsedQuestion, QuestionFile, SolutionRecord, Subject, Topic};

/// Filesystem discovery and parsing of question files.
pub mod storage;
pub use storage::{Bank, Catalog};

pub mod assemble;
pub use assemble::{generate_test, generate_workbook, GenerateError, Selection, TestOutcome};

//! Domain models for the question bank.
//!
//! This module contains the core value types: subjects and topics, question
//! file references, parsed questions, answer-key records and configuration.

mod config;
pub use config::Config;

/// Natural ("human") string ordering.
pub mod natural;
pub use natural::natural_cmp;

/// Question files, parsed questions and answer letters.
pub mod question;
pub use question::{Answer, ParsedQuestion, QuestionFile, SolutionRecord};

/// Subjects and topics.
pub mod subject;
pub use subject::{InvalidSubjectError, Subject, Topic};

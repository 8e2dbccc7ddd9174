/// The question bank handle.
pub mod bank;
/// Discovery of question files.
pub mod catalog;
mod path_parser;
/// Reading question files.
pub mod question;

pub use bank::{Bank, OpenError};
pub use catalog::{Catalog, Topics};
pub use path_parser::{parse_question_path, strip_variant, PathError, QuestionName};
pub use question::{parse_answer, parse_question, ParseError};

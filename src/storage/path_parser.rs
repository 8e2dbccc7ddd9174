//! Path parsing utilities for question files
//!
//! Question file names encode their topic and display name:
//!
//! `<tag> - <topic> - <name>[ #<n>].<ext>`
//!
//! - The first segment is reserved for a subject tag and ignored.
//! - The second segment is the topic.
//! - The third segment, when present, is the display name. A trailing `#<n>`
//!   marks a variant of an existing question and is dropped.
//!
//! For example `01 - Algebra - Linear Systems #2.txt` has topic `Algebra` and
//! display name `Linear Systems`.

use std::{path::Path, sync::LazyLock};

use regex::Regex;

use crate::domain::Topic;

/// Separator between file name segments.
pub const SEGMENT_SEPARATOR: &str = " - ";

static VARIANT_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*#\d+\s*$").expect("hard-coded regex is valid"));

/// The parts of a question file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionName {
    /// The topic segment.
    pub topic: Topic,
    /// The display name, or the whole file stem when there is no third
    /// segment.
    pub name: String,
}

/// Parse the topic and display name from a question file path.
///
/// # Errors
///
/// Returns an error if:
/// - The path has no file stem, or it is not valid UTF-8
/// - The stem has fewer than two segments
pub fn parse_question_path(path: &Path) -> Result<QuestionName, PathError> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or(PathError::InvalidPath)?;

    let segments: Vec<&str> = stem.split(SEGMENT_SEPARATOR).map(str::trim).collect();
    if segments.len() < 2 {
        return Err(PathError::TooFewSegments(segments.len()));
    }

    let name = segments.get(2).map_or_else(
        || stem.to_string(),
        |segment| strip_variant(segment).to_string(),
    );

    Ok(QuestionName {
        topic: Topic::new(segments[1]),
        name,
    })
}

/// Removes a trailing `#<n>` variant marker from a display name.
#[must_use]
pub fn strip_variant(name: &str) -> &str {
    VARIANT_SUFFIX
        .find(name)
        .map_or(name, |suffix| &name[..suffix.start()])
}

/// Errors that can occur during path parsing
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PathError {
    /// The path has no usable file stem.
    #[error("Invalid file path")]
    InvalidPath,

    /// The file stem does not contain a topic segment.
    #[error("Expected at least 2 ' - ' separated segments, found {0}")]
    TooFewSegments(usize),
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use test_case::test_case;

    use super::*;

    #[test]
    fn topic_and_name_with_variant() {
        let path = PathBuf::from("/bank/01 - Algebra - Linear Systems #2.txt");

        let parsed = parse_question_path(&path).unwrap();
        assert_eq!(parsed.topic.as_str(), "Algebra");
        assert_eq!(parsed.name, "Linear Systems");
    }

    #[test]
    fn topic_without_name_uses_stem() {
        let path = PathBuf::from("/bank/M - Geometria.txt");

        let parsed = parse_question_path(&path).unwrap();
        assert_eq!(parsed.topic.as_str(), "Geometria");
        assert_eq!(parsed.name, "M - Geometria");
    }

    #[test]
    fn single_segment_is_rejected() {
        let path = PathBuf::from("/bank/justonefield.txt");

        let result = parse_question_path(&path);
        assert_eq!(result, Err(PathError::TooFewSegments(1)));
    }

    #[test]
    fn dash_without_spaces_is_not_a_separator() {
        let path = PathBuf::from("/bank/Q-Algebra-Frazioni.txt");

        assert!(parse_question_path(&path).is_err());
    }

    #[test]
    fn segments_are_trimmed() {
        let path = PathBuf::from("/bank/01 -  Logica  - Sillogismi .txt");

        let parsed = parse_question_path(&path).unwrap();
        assert_eq!(parsed.topic.as_str(), "Logica");
        assert_eq!(parsed.name, "Sillogismi");
    }

    #[test]
    fn extra_segments_are_ignored() {
        let path = PathBuf::from("/bank/01 - Chimica - Moli - bis.txt");

        let parsed = parse_question_path(&path).unwrap();
        assert_eq!(parsed.topic.as_str(), "Chimica");
        assert_eq!(parsed.name, "Moli");
    }

    #[test_case("Linear Systems #2", "Linear Systems"; "variant suffix")]
    #[test_case("Linear Systems#12", "Linear Systems"; "suffix without space")]
    #[test_case("Linear Systems", "Linear Systems"; "no suffix")]
    #[test_case("Issue #3 revisited", "Issue #3 revisited"; "marker not at end")]
    #[test_case("Percentuali #", "Percentuali #"; "hash without digits")]
    fn variant_stripping(input: &str, expected: &str) {
        assert_eq!(strip_variant(input), expected);
    }
}

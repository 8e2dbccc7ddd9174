use std::{fmt, ops::Deref, str::FromStr};

use non_empty_string::NonEmptyString;
use serde::{Deserialize, Serialize};

/// A top-level subject of the question bank, such as "Matematica".
///
/// Subjects are declared in the configuration and fixed for the lifetime of a
/// run. A subject name must not be blank and must not contain path
/// separators, since it is used to build directory and file names.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Subject(NonEmptyString);

impl Subject {
    /// Creates a new `Subject`.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidSubjectError`] if the name is blank or contains a path
    /// separator.
    pub fn new(name: impl Into<String>) -> Result<Self, InvalidSubjectError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.contains(['/', '\\']) {
            return Err(InvalidSubjectError(name));
        }
        NonEmptyString::new(trimmed.to_string())
            .map(Self)
            .map_err(|_| InvalidSubjectError(name))
    }

    /// Returns the subject name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// The lower-cased name used in output file names.
    #[must_use]
    pub fn slug(&self) -> String {
        self.as_str().to_lowercase()
    }

    /// Whether `name` refers to this subject, ignoring case.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.as_str().to_lowercase() == name.trim().to_lowercase()
    }
}

impl TryFrom<String> for Subject {
    type Error = InvalidSubjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Subject {
    type Error = InvalidSubjectError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Subject> for String {
    fn from(subject: Subject) -> Self {
        subject.as_str().to_owned()
    }
}

impl FromStr for Subject {
    type Err = InvalidSubjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Deref for Subject {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Error returned when a subject name is blank or contains a path separator.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid subject '{0}': must be non-blank and must not contain path separators")]
pub struct InvalidSubjectError(String);

/// A topic within a subject.
///
/// Topics are discovered from file names rather than declared. The raw
/// string is kept as-is; escaping for output happens only when it is written.
/// Topics order by code point, so "Parte 10" comes before "Parte 2" and
/// upper case sorts before lower case.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Topic(String);

impl Topic {
    /// Creates a topic from its raw label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Returns the raw label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Topic {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl Deref for Topic {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(&self.0)
    }
}

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::Subject;

/// Configuration for a question bank.
///
/// This struct holds the subject list and the directory layout used to find
/// question files and to place generated documents. Every path is relative to
/// the bank's base directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Versions", into = "Versions")]
pub struct Config {
    /// The subjects of the bank, in processing order.
    subjects: Vec<Subject>,

    /// Directory holding one subdirectory per subject.
    questions_dir: PathBuf,

    /// Prefix of each subject's directory name.
    ///
    /// For example, with prefix `"Q - "` the questions for "Logica" live in
    /// `questions/Q - Logica/`.
    subject_dir_prefix: String,

    /// Extension of question files, without the leading dot.
    extension: String,

    /// Output directory for workbooks.
    workbook_dir: PathBuf,

    /// Output directory for randomized tests.
    test_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            subjects: default_subjects(),
            questions_dir: default_questions_dir(),
            subject_dir_prefix: default_subject_dir_prefix(),
            extension: default_extension(),
            workbook_dir: default_workbook_dir(),
            test_dir: default_test_dir(),
        }
    }
}

impl Config {
    /// Reads a bank configuration from `path`.
    ///
    /// Fields missing from the file take their default values.
    ///
    /// # Errors
    ///
    /// Fails when the file is unreadable, is not valid TOML, or lists an
    /// unusable set of subjects.
    pub fn load(path: &Path) -> Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&text).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Writes every field, defaults included, to `path`.
    ///
    /// # Errors
    ///
    /// Fails when serialisation or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let text =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, text).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// The default layout with a custom subject list.
    ///
    /// # Errors
    ///
    /// Returns an error if `subjects` is empty or names a subject twice
    /// (ignoring case).
    pub fn with_subjects(subjects: Vec<Subject>) -> Result<Self, String> {
        validate_subjects(&subjects)?;
        Ok(Self {
            subjects,
            ..Self::default()
        })
    }

    /// Returns the subjects, in processing order.
    #[must_use]
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    /// Looks up a configured subject by name, ignoring case.
    #[must_use]
    pub fn subject(&self, name: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.matches(name))
    }

    /// Directory containing the question files of `subject`.
    #[must_use]
    pub fn subject_dir(&self, base: &Path, subject: &Subject) -> PathBuf {
        base.join(&self.questions_dir)
            .join(format!("{}{subject}", self.subject_dir_prefix))
    }

    /// Extension of question files.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Output directory for workbooks.
    #[must_use]
    pub fn workbook_dir(&self, base: &Path) -> PathBuf {
        base.join(&self.workbook_dir)
    }

    /// Output directory for randomized tests.
    #[must_use]
    pub fn test_dir(&self, base: &Path) -> PathBuf {
        base.join(&self.test_dir)
    }
}

fn validate_subjects(subjects: &[Subject]) -> Result<(), String> {
    if subjects.is_empty() {
        return Err("at least one subject must be configured".to_string());
    }
    // Output file names use the lower-cased name, so subjects must be
    // distinct ignoring case.
    for (i, subject) in subjects.iter().enumerate() {
        if subjects[..i].iter().any(|other| other.matches(subject)) {
            return Err(format!("duplicate subject '{subject}'"));
        }
    }
    Ok(())
}

fn default_subjects() -> Vec<Subject> {
    ["Matematica", "Logica", "Scienze"]
        .into_iter()
        .filter_map(|name| Subject::new(name).ok())
        .collect()
}

fn default_questions_dir() -> PathBuf {
    PathBuf::from("questions")
}

fn default_subject_dir_prefix() -> String {
    "Q - ".to_string()
}

fn default_extension() -> String {
    "txt".to_string()
}

fn default_workbook_dir() -> PathBuf {
    PathBuf::from("eserciziario")
}

fn default_test_dir() -> PathBuf {
    PathBuf::from("test")
}

/// On-disk layouts of `config.toml`, tagged by `_version`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_subjects")]
        subjects: Vec<Subject>,

        #[serde(default = "default_questions_dir")]
        questions_dir: PathBuf,

        #[serde(default = "default_subject_dir_prefix")]
        subject_dir_prefix: String,

        #[serde(default = "default_extension")]
        extension: String,

        #[serde(default = "default_workbook_dir")]
        workbook_dir: PathBuf,

        #[serde(default = "default_test_dir")]
        test_dir: PathBuf,
    },
}

impl TryFrom<Versions> for Config {
    type Error = String;

    fn try_from(versions: Versions) -> Result<Self, Self::Error> {
        match versions {
            Versions::V1 {
                subjects,
                questions_dir,
                subject_dir_prefix,
                extension,
                workbook_dir,
                test_dir,
            } => {
                validate_subjects(&subjects)?;

                Ok(Self {
                    subjects,
                    questions_dir,
                    subject_dir_prefix,
                    extension: extension.trim_start_matches('.').to_string(),
                    workbook_dir,
                    test_dir,
                })
            }
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            subjects: config.subjects,
            questions_dir: config.questions_dir,
            subject_dir_prefix: config.subject_dir_prefix,
            extension: config.extension,
            workbook_dir: config.workbook_dir,
            test_dir: config.test_dir,
        }
    }
}

//! Discovery of question files.
//!
//! A [`Catalog`] maps every configured subject to its topics, and every topic
//! to its question files in natural order. It is rebuilt from disk on each
//! scan and never cached.

use std::{
    collections::BTreeMap,
    ffi::OsStr,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

use crate::{
    domain::{natural_cmp, Config, QuestionFile, Subject, Topic},
    storage::path_parser::parse_question_path,
};

/// The topics of one subject, each with its question files in natural order.
pub type Topics = BTreeMap<Topic, Vec<QuestionFile>>;

/// The question files of a bank, grouped by subject and topic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    subjects: Vec<(Subject, Topics)>,
}

impl Catalog {
    /// Scans the question directories below `base`.
    ///
    /// Subjects whose directory does not exist get an empty topic map. Files
    /// are included when they have the configured extension, are not hidden,
    /// and their name has at least two segments; everything else is silently
    /// left out.
    #[must_use]
    pub fn scan(base: &Path, config: &Config) -> Self {
        let subjects = config
            .subjects()
            .iter()
            .map(|subject| {
                let dir = config.subject_dir(base, subject);
                let topics = scan_subject(&dir, subject, config.extension());
                tracing::debug!(
                    "Found {} topics for {subject} in {}",
                    topics.len(),
                    dir.display()
                );
                (subject.clone(), topics)
            })
            .collect();

        Self { subjects }
    }

    /// Iterates over subjects in configured order.
    pub fn subjects(&self) -> impl Iterator<Item = (&Subject, &Topics)> {
        self.subjects.iter().map(|(subject, topics)| (subject, topics))
    }

    /// The topics of `subject`, if it is part of the catalog.
    #[must_use]
    pub fn topics(&self, subject: &Subject) -> Option<&Topics> {
        self.subjects
            .iter()
            .find(|(s, _)| s == subject)
            .map(|(_, topics)| topics)
    }

    /// The question files of a topic. Empty if the pair is unknown.
    #[must_use]
    pub fn files(&self, subject: &Subject, topic: &Topic) -> &[QuestionFile] {
        self.topics(subject)
            .and_then(|topics| topics.get(topic))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total number of question files across all subjects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subjects
            .iter()
            .flat_map(|(_, topics)| topics.values())
            .map(Vec::len)
            .sum()
    }

    /// Whether the catalog contains no question files at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn scan_subject(dir: &Path, subject: &Subject, extension: &str) -> Topics {
    let mut topics = Topics::new();

    for path in collect_question_paths(dir, extension) {
        let Ok(parsed) = parse_question_path(&path) else {
            continue;
        };

        topics.entry(parsed.topic.clone()).or_default().push(QuestionFile {
            path,
            subject: subject.clone(),
            topic: parsed.topic,
            name: parsed.name,
        });
    }

    for files in topics.values_mut() {
        files.sort_by(|a, b| natural_cmp(a.file_name(), b.file_name()));
    }

    topics
}

fn collect_question_paths(dir: &Path, extension: &str) -> Vec<PathBuf> {
    if !dir.is_dir() {
        return Vec::new();
    }

    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| !entry.file_name().to_string_lossy().starts_with('.'))
        .filter(|entry| entry.path().extension() == Some(OsStr::new(extension)))
        .map(walkdir::DirEntry::into_path)
        .collect()
}

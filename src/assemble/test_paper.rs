//! Randomized tests.
//!
//! A test draws a requested number of questions from chosen topics, without
//! replacement, and writes them as a single standalone document followed by
//! its answer key. The random source is supplied by the caller.

use std::{collections::BTreeMap, path::PathBuf};

use rand::{seq::SliceRandom, Rng};

use crate::{
    assemble::{
        create_output_dir, latex::TestDocument, parse_or_skip, write_document, GenerateError,
    },
    domain::{SolutionRecord, Subject, Topic},
    storage::{Bank, Catalog},
};

/// Title used when none is given.
pub const DEFAULT_TITLE: &str = "Test_Senza_Titolo";

/// How many questions to draw from each (subject, topic) pair.
///
/// Pairs that are not listed, or listed with a count of zero, are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    counts: BTreeMap<(Subject, Topic), usize>,
}

impl Selection {
    /// An empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests the same number of questions from every topic in `catalog`.
    #[must_use]
    pub fn each(catalog: &Catalog, count: usize) -> Self {
        let mut selection = Self::new();
        for (subject, topics) in catalog.subjects() {
            for topic in topics.keys() {
                selection.set(subject.clone(), topic.clone(), count);
            }
        }
        selection
    }

    /// Sets the number of questions to draw from a topic.
    pub fn set(&mut self, subject: Subject, topic: Topic, count: usize) {
        self.counts.insert((subject, topic), count);
    }

    /// The number of questions requested from a topic.
    #[must_use]
    pub fn get(&self, subject: &Subject, topic: &Topic) -> usize {
        self.counts
            .get(&(subject.clone(), topic.clone()))
            .copied()
            .unwrap_or_default()
    }

    /// Iterates over pairs with a positive request.
    pub fn requested(&self) -> impl Iterator<Item = (&Subject, &Topic, usize)> {
        self.counts
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|((subject, topic), count)| (subject, topic, *count))
    }
}

/// The questions drawn for a test, before anything is written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawnTest {
    /// Subjects with at least one question, with their raw bodies.
    pub sections: Vec<(Subject, Vec<String>)>,
    /// The answer key, in global sequence order.
    pub key: Vec<SolutionRecord>,
    /// Drawn files that could not be parsed.
    pub skipped: usize,
}

/// Draws the questions for a test.
///
/// Subjects and topics are visited in catalog order. From each topic a
/// uniform sample of `min(requested, available)` files is drawn; the order of
/// the sample is kept. Every successfully parsed question gets the next
/// global sequence number.
pub fn draw_test<R: Rng + ?Sized>(
    catalog: &Catalog,
    selection: &Selection,
    rng: &mut R,
) -> DrawnTest {
    for (subject, topic, _) in selection.requested() {
        if catalog.files(subject, topic).is_empty() {
            tracing::warn!("No questions available for {subject} / {topic}");
        }
    }

    let mut drawn = DrawnTest::default();

    for (subject, topics) in catalog.subjects() {
        let mut bodies = Vec::new();

        for (topic, files) in topics {
            let requested = selection.get(subject, topic);
            if requested == 0 {
                continue;
            }
            if requested > files.len() {
                tracing::info!(
                    "Requested {requested} questions from {subject} / {topic}, only {} available",
                    files.len()
                );
            }

            for file in files.choose_multiple(rng, requested) {
                let Some(parsed) = parse_or_skip(file) else {
                    drawn.skipped += 1;
                    continue;
                };
                bodies.push(parsed.body);
                drawn.key.push(SolutionRecord {
                    subject_sequence: None,
                    global_sequence: drawn.key.len() + 1,
                    subject: subject.clone(),
                    topic: topic.clone(),
                    name: file.name.clone(),
                    answer: parsed.answer,
                });
            }
        }

        if !bodies.is_empty() {
            drawn.sections.push((subject.clone(), bodies));
        }
    }

    drawn
}

/// File name of the test document for `title`.
///
/// Spaces and path separators become underscores.
#[must_use]
pub fn test_file_name(title: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| if matches!(c, ' ' | '/' | '\\') { '_' } else { c })
        .collect();
    format!("Test_{stem}.tex")
}

/// Summary of a written test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestReport {
    /// The test document.
    pub path: PathBuf,
    /// Number of questions in the test.
    pub questions: usize,
    /// Drawn files that could not be parsed and were left out.
    pub skipped: usize,
}

/// The result of a test generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestOutcome {
    /// The test document was written.
    Written(TestReport),
    /// No question was selected; nothing was written.
    NothingSelected,
}

/// Draws a randomized test and writes it below the configured test
/// directory.
///
/// A blank `title` is replaced by [`DEFAULT_TITLE`]. When no question ends up
/// selected, nothing is written and [`TestOutcome::NothingSelected`] is
/// returned.
///
/// # Errors
///
/// Returns an error if the output directory or the test file cannot be
/// written.
pub fn generate_test<R: Rng + ?Sized>(
    bank: &Bank,
    selection: &Selection,
    title: &str,
    date: &str,
    rng: &mut R,
) -> Result<TestOutcome, GenerateError> {
    let title = match title.trim() {
        "" => DEFAULT_TITLE,
        title => title,
    };

    let drawn = draw_test(&bank.scan(), selection, rng);
    if drawn.key.is_empty() {
        tracing::warn!("No questions selected, test not written");
        return Ok(TestOutcome::NothingSelected);
    }

    let out_dir = bank.config().test_dir(bank.root());
    create_output_dir(&out_dir)?;

    let path = out_dir.join(test_file_name(title));
    write_document(
        &path,
        TestDocument {
            title,
            date,
            sections: &drawn.sections,
            key: &drawn.key,
        },
    )?;

    Ok(TestOutcome::Written(TestReport {
        path,
        questions: drawn.key.len(),
        skipped: drawn.skipped,
    }))
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, fs, path::Path};

    use rand::{rngs::StdRng, SeedableRng};
    use tempfile::TempDir;

    use super::*;
    use crate::domain::Config;

    fn write_question(base: &Path, subject: &str, file_name: &str) {
        let dir = base.join("questions").join(format!("Q - {subject}"));
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(file_name),
            format!("Testo di {file_name}\nRisposta corretta: 4\n"),
        )
        .unwrap();
    }

    fn seeded_bank() -> (TempDir, Bank) {
        let tmp = TempDir::new().unwrap();
        for i in 1..=4 {
            write_question(tmp.path(), "Matematica", &format!("M - Algebra - Eq {i}.txt"));
        }
        write_question(tmp.path(), "Matematica", "M - Geometria - Aree.txt");
        write_question(tmp.path(), "Scienze", "S - Chimica - Moli.txt");
        write_question(tmp.path(), "Scienze", "S - Chimica - Gas.txt");

        let bank = Bank::with_config(tmp.path().to_path_buf(), Config::default());
        (tmp, bank)
    }

    fn subject(name: &str) -> Subject {
        Subject::new(name).unwrap()
    }

    #[test]
    fn request_is_capped_at_available_files() {
        let (_tmp, bank) = seeded_bank();
        let mut selection = Selection::new();
        selection.set(subject("Matematica"), Topic::from("Algebra"), 10);

        let drawn = draw_test(&bank.scan(), &selection, &mut StdRng::seed_from_u64(1));

        assert_eq!(drawn.key.len(), 4);
        let names: HashSet<&str> = drawn.key.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names.len(), 4);
    }

    #[test]
    fn global_numbers_follow_subject_and_topic_order() {
        let (_tmp, bank) = seeded_bank();
        let mut selection = Selection::new();
        selection.set(subject("Scienze"), Topic::from("Chimica"), 1);
        selection.set(subject("Matematica"), Topic::from("Geometria"), 1);
        selection.set(subject("Matematica"), Topic::from("Algebra"), 2);

        let drawn = draw_test(&bank.scan(), &selection, &mut StdRng::seed_from_u64(2));

        let rows: Vec<(usize, &str, &str)> = drawn
            .key
            .iter()
            .map(|r| (r.global_sequence, r.subject.as_str(), r.topic.as_str()))
            .collect();
        assert_eq!(
            rows,
            vec![
                (1, "Matematica", "Algebra"),
                (2, "Matematica", "Algebra"),
                (3, "Matematica", "Geometria"),
                (4, "Scienze", "Chimica"),
            ]
        );
        assert!(drawn.key.iter().all(|r| r.subject_sequence.is_none()));
        let sections: Vec<&str> = drawn.sections.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(sections, vec!["Matematica", "Scienze"]);
    }

    #[test]
    fn same_seed_draws_same_questions() {
        let (_tmp, bank) = seeded_bank();
        let catalog = bank.scan();
        let selection = Selection::each(&catalog, 2);

        let first = draw_test(&catalog, &selection, &mut StdRng::seed_from_u64(42));
        let second = draw_test(&catalog, &selection, &mut StdRng::seed_from_u64(42));

        assert_eq!(first, second);
        assert_eq!(first.key.len(), 2 + 1 + 2);
    }

    #[test]
    fn empty_selection_writes_nothing() {
        let (tmp, bank) = seeded_bank();
        let selection = Selection::each(&bank.scan(), 0);

        let outcome = generate_test(
            &bank,
            &selection,
            "Vuoto",
            "01/01/2026",
            &mut StdRng::seed_from_u64(3),
        )
        .unwrap();

        assert_eq!(outcome, TestOutcome::NothingSelected);
        assert!(!tmp.path().join("test").exists());
    }

    #[test]
    fn unknown_pair_is_ignored() {
        let (_tmp, bank) = seeded_bank();
        let mut selection = Selection::new();
        selection.set(subject("Logica"), Topic::from("Inesistente"), 3);

        let drawn = draw_test(&bank.scan(), &selection, &mut StdRng::seed_from_u64(4));

        assert!(drawn.key.is_empty());
        assert!(drawn.sections.is_empty());
    }

    #[test]
    fn writes_test_document() {
        let (tmp, bank) = seeded_bank();
        let mut selection = Selection::new();
        selection.set(subject("Matematica"), Topic::from("Geometria"), 1);
        selection.set(subject("Scienze"), Topic::from("Chimica"), 1);

        let outcome = generate_test(
            &bank,
            &selection,
            "Simulazione 1",
            "19/10/2026",
            &mut StdRng::seed_from_u64(5),
        )
        .unwrap();

        let expected_path = tmp.path().join("test").join("Test_Simulazione_1.tex");
        assert_eq!(
            outcome,
            TestOutcome::Written(TestReport {
                path: expected_path.clone(),
                questions: 2,
                skipped: 0,
            })
        );

        let document = fs::read_to_string(expected_path).unwrap();
        assert!(document.contains("\\section*{Matematica}"));
        assert!(document.contains("Testo di M - Geometria - Aree.txt"));
        assert!(document.contains("\\section*{Scienze}"));
        assert!(!document.contains("\\section*{Logica}"));
        assert!(document.contains("1 & Matematica & Geometria & Aree & \\centering \\textbf{D}"));
    }

    #[test]
    fn blank_title_uses_default() {
        let (tmp, bank) = seeded_bank();
        let selection = Selection::each(&bank.scan(), 1);

        generate_test(&bank, &selection, "  ", "", &mut StdRng::seed_from_u64(6)).unwrap();

        assert!(tmp
            .path()
            .join("test")
            .join("Test_Test_Senza_Titolo.tex")
            .exists());
    }

    #[test]
    fn unwritable_test_dir_aborts() {
        let (tmp, bank) = seeded_bank();
        // A regular file where the output directory should be.
        fs::write(tmp.path().join("test"), "").unwrap();
        let selection = Selection::each(&bank.scan(), 1);

        let result = generate_test(
            &bank,
            &selection,
            "Prova",
            "19/10/2026",
            &mut StdRng::seed_from_u64(7),
        );

        assert!(matches!(result, Err(GenerateError::CreateDir { .. })));
    }

    #[test]
    fn unwritable_test_file_aborts() {
        let (tmp, bank) = seeded_bank();
        // A directory where the test file should be.
        fs::create_dir_all(tmp.path().join("test").join("Test_Prova.tex")).unwrap();
        let selection = Selection::each(&bank.scan(), 1);

        let result = generate_test(
            &bank,
            &selection,
            "Prova",
            "19/10/2026",
            &mut StdRng::seed_from_u64(8),
        );

        assert!(matches!(result, Err(GenerateError::Write { .. })));
    }

    #[test]
    fn file_name_replaces_spaces_and_separators() {
        assert_eq!(test_file_name("Prova a/b c"), "Test_Prova_a_b_c.tex");
    }
}

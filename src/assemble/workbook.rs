//! Exercise books.
//!
//! A workbook holds every question of a subject, grouped by topic, plus an
//! answer key. Questions are numbered per subject (restarting at 1 for each
//! subject) and globally (running across all subjects of one call).
//!
//! Output, relative to the configured workbook directory:
//!
//! - `quesiti_<subject>.tex`: the questions of one subject
//! - `soluzioni_<subject>.tex`: its answer key, numbered per subject
//! - `soluzioni_completo.tex`: the key of every subject, numbered globally;
//!   only written when no subject filter was given

use std::path::PathBuf;

use crate::{
    assemble::{
        create_output_dir,
        latex::{QuestionsDocument, SolutionsTable, TableLayout, TopicSection},
        parse_or_skip, write_document, GenerateError,
    },
    domain::{SolutionRecord, Subject},
    storage::{Bank, Catalog},
};

/// File name of the combined answer key.
pub const COMBINED_SOLUTIONS_FILE: &str = "soluzioni_completo.tex";

/// The compiled content of one subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectWorkbook {
    /// The subject.
    pub subject: Subject,
    /// Topics with their question bodies, in output order.
    pub sections: Vec<TopicSection>,
    /// Answer-key rows, in output order.
    pub solutions: Vec<SolutionRecord>,
}

/// The compiled content of a workbook run, before anything is written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workbook {
    /// Subjects with at least one topic, in processing order.
    pub subjects: Vec<SubjectWorkbook>,
    /// Question files that could not be parsed.
    pub skipped: usize,
}

impl Workbook {
    /// Answer-key rows of every subject, in global order.
    pub fn all_solutions(&self) -> impl Iterator<Item = &SolutionRecord> {
        self.subjects.iter().flat_map(|part| &part.solutions)
    }

    /// Number of questions included.
    #[must_use]
    pub fn questions(&self) -> usize {
        self.subjects.iter().map(|part| part.solutions.len()).sum()
    }
}

/// Summary of a completed workbook run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkbookReport {
    /// Files written, in order.
    pub files: Vec<PathBuf>,
    /// Number of questions included.
    pub questions: usize,
    /// Question files that could not be parsed and were left out.
    pub skipped: usize,
}

/// Parses and numbers the questions of `subjects`.
///
/// Subjects without topics are left out. Files that cannot be parsed are
/// logged and skipped without consuming a sequence number.
#[must_use]
pub fn compile_workbook(catalog: &Catalog, subjects: &[&Subject]) -> Workbook {
    let mut workbook = Workbook::default();
    let mut global_sequence = 0;

    for &subject in subjects {
        let Some(topics) = catalog.topics(subject).filter(|topics| !topics.is_empty()) else {
            tracing::debug!("No questions for {subject}");
            continue;
        };

        let mut subject_sequence = 0;
        let mut sections = Vec::with_capacity(topics.len());
        let mut solutions = Vec::new();

        for (topic, files) in topics {
            let mut bodies = Vec::with_capacity(files.len());
            for file in files {
                let Some(parsed) = parse_or_skip(file) else {
                    workbook.skipped += 1;
                    continue;
                };
                subject_sequence += 1;
                global_sequence += 1;
                bodies.push(parsed.body);
                solutions.push(SolutionRecord {
                    subject_sequence: Some(subject_sequence),
                    global_sequence,
                    subject: subject.clone(),
                    topic: topic.clone(),
                    name: file.name.clone(),
                    answer: parsed.answer,
                });
            }
            sections.push(TopicSection {
                topic: topic.clone(),
                bodies,
            });
        }

        workbook.subjects.push(SubjectWorkbook {
            subject: subject.clone(),
            sections,
            solutions,
        });
    }

    workbook
}

/// Generates workbooks for one subject, or for all subjects when `subject` is
/// `None`.
///
/// With no subject filter, the combined answer key is written as well.
///
/// # Errors
///
/// Returns an error if `subject` names no configured subject, or if the
/// output directory or any output file cannot be written. Files written
/// before the failure remain on disk.
pub fn generate_workbook(
    bank: &Bank,
    subject: Option<&str>,
) -> Result<WorkbookReport, GenerateError> {
    let config = bank.config();
    let subjects: Vec<&Subject> = match subject {
        Some(name) => vec![
            config
                .subject(name)
                .ok_or_else(|| GenerateError::UnknownSubject(name.to_string()))?,
        ],
        None => config.subjects().iter().collect(),
    };

    let out_dir = config.workbook_dir(bank.root());
    create_output_dir(&out_dir)?;

    let workbook = compile_workbook(&bank.scan(), &subjects);
    let mut files = Vec::new();

    for part in &workbook.subjects {
        let slug = part.subject.slug();

        let questions_path = out_dir.join(format!("quesiti_{slug}.tex"));
        write_document(
            &questions_path,
            QuestionsDocument {
                sections: &part.sections,
            },
        )?;
        files.push(questions_path);

        let solutions_path = out_dir.join(format!("soluzioni_{slug}.tex"));
        let title = format!("Soluzioni - {}", part.subject);
        write_document(
            &solutions_path,
            SolutionsTable {
                title: &title,
                records: &part.solutions,
                layout: TableLayout::Subject,
            },
        )?;
        files.push(solutions_path);
    }

    if subject.is_none() {
        let combined: Vec<SolutionRecord> = workbook.all_solutions().cloned().collect();
        let combined_path = out_dir.join(COMBINED_SOLUTIONS_FILE);
        write_document(
            &combined_path,
            SolutionsTable {
                title: "Soluzioni Complete (Tutte le materie)",
                records: &combined,
                layout: TableLayout::Combined,
            },
        )?;
        files.push(combined_path);
    }

    Ok(WorkbookReport {
        files,
        questions: workbook.questions(),
        skipped: workbook.skipped,
    })
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use tempfile::TempDir;

    use super::*;
    use crate::domain::{Answer, Config};

    fn write_question(base: &Path, subject: &str, file_name: &str, content: &str) {
        let dir = base.join("questions").join(format!("Q - {subject}"));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(file_name), content).unwrap();
    }

    /// Matematica: 3 questions over 2 topics. Logica: 2 questions.
    fn seeded_bank() -> (TempDir, Bank) {
        let tmp = TempDir::new().unwrap();
        let base = tmp.path();
        write_question(base, "Matematica", "M - Algebra - Eq 10.txt", "Dieci\nRisposta corretta: 3");
        write_question(base, "Matematica", "M - Algebra - Eq 2.txt", "Due\nRisposta corretta: 2");
        write_question(base, "Matematica", "M - Geometria - Aree #1.txt", "Area\nRisposta corretta: 1");
        write_question(base, "Logica", "L - Serie - Numeri.txt", "Serie\nRisposta corretta: 5");
        write_question(base, "Logica", "L - Sillogismi - Tutti.txt", "Tutti\nnessuna risposta");

        let bank = Bank::with_config(base.to_path_buf(), Config::default());
        (tmp, bank)
    }

    fn numbers(part: &SubjectWorkbook) -> Vec<(Option<usize>, usize)> {
        part.solutions
            .iter()
            .map(|r| (r.subject_sequence, r.global_sequence))
            .collect()
    }

    #[test]
    fn subject_numbers_reset_and_global_numbers_continue() {
        let (_tmp, bank) = seeded_bank();
        let subjects: Vec<&Subject> = bank.config().subjects().iter().collect();

        let workbook = compile_workbook(&bank.scan(), &subjects);

        assert_eq!(workbook.subjects.len(), 2);
        assert_eq!(
            numbers(&workbook.subjects[0]),
            vec![(Some(1), 1), (Some(2), 2), (Some(3), 3)]
        );
        assert_eq!(
            numbers(&workbook.subjects[1]),
            vec![(Some(1), 4), (Some(2), 5)]
        );
        assert_eq!(workbook.questions(), 5);
    }

    #[test]
    fn questions_follow_topic_then_natural_file_order() {
        let (_tmp, bank) = seeded_bank();
        let subjects: Vec<&Subject> = bank.config().subjects().iter().collect();

        let workbook = compile_workbook(&bank.scan(), &subjects);
        let matematica = &workbook.subjects[0];

        let bodies: Vec<&str> = matematica
            .sections
            .iter()
            .flat_map(|s| s.bodies.iter().map(String::as_str))
            .collect();
        assert_eq!(bodies, vec!["Due", "Dieci", "Area"]);

        let answers: Vec<Answer> = matematica.solutions.iter().map(|r| r.answer).collect();
        assert_eq!(answers, vec![Answer::B, Answer::C, Answer::A]);
        assert_eq!(matematica.solutions[2].name, "Aree");
    }

    #[test]
    fn topics_follow_code_point_order() {
        let tmp = TempDir::new().unwrap();
        for topic in ["Parte 10", "Parte 2", "algebra", "Geometria"] {
            write_question(
                tmp.path(),
                "Matematica",
                &format!("M - {topic} - Uno.txt"),
                "Testo\nRisposta corretta: 1",
            );
        }
        let bank = Bank::with_config(tmp.path().to_path_buf(), Config::default());
        let matematica = Subject::new("Matematica").unwrap();

        let workbook = compile_workbook(&bank.scan(), &[&matematica]);

        let topics: Vec<&str> = workbook.subjects[0]
            .sections
            .iter()
            .map(|s| s.topic.as_str())
            .collect();
        assert_eq!(topics, vec!["Geometria", "Parte 10", "Parte 2", "algebra"]);
        let numbered: Vec<(usize, &str)> = workbook.subjects[0]
            .solutions
            .iter()
            .map(|r| (r.global_sequence, r.topic.as_str()))
            .collect();
        assert_eq!(
            numbered,
            vec![(1, "Geometria"), (2, "Parte 10"), (3, "Parte 2"), (4, "algebra")]
        );
    }

    #[test]
    fn unparseable_files_are_skipped_without_a_number() {
        let (tmp, bank) = seeded_bank();
        write_question(tmp.path(), "Logica", "L - Serie - Vuota.txt", "");

        let subjects: Vec<&Subject> = bank.config().subjects().iter().collect();
        let workbook = compile_workbook(&bank.scan(), &subjects);

        assert_eq!(workbook.skipped, 1);
        assert_eq!(
            numbers(&workbook.subjects[1]),
            vec![(Some(1), 4), (Some(2), 5)]
        );
    }

    #[test]
    fn generates_all_subjects_with_combined_key() {
        let (tmp, bank) = seeded_bank();

        let report = generate_workbook(&bank, None).unwrap();

        let out = tmp.path().join("eserciziario");
        assert_eq!(
            report.files,
            vec![
                out.join("quesiti_matematica.tex"),
                out.join("soluzioni_matematica.tex"),
                out.join("quesiti_logica.tex"),
                out.join("soluzioni_logica.tex"),
                out.join(COMBINED_SOLUTIONS_FILE),
            ]
        );
        assert_eq!(report.questions, 5);
        assert!(!out.join("quesiti_scienze.tex").exists());

        let combined = fs::read_to_string(out.join(COMBINED_SOLUTIONS_FILE)).unwrap();
        assert!(combined.contains("5 & Logica & Sillogismi & Tutti & \\centering \\textbf{?}"));

        let logica = fs::read_to_string(out.join("soluzioni_logica.tex")).unwrap();
        assert!(logica.starts_with("\\section{Soluzioni - Logica}"));
        assert!(logica.contains("2 & Sillogismi & Tutti & \\centering \\textbf{?}"));
    }

    #[test]
    fn single_subject_skips_combined_key() {
        let (tmp, bank) = seeded_bank();

        let report = generate_workbook(&bank, Some("logica")).unwrap();

        let out = tmp.path().join("eserciziario");
        assert_eq!(
            report.files,
            vec![out.join("quesiti_logica.tex"), out.join("soluzioni_logica.tex")]
        );
        assert!(!out.join(COMBINED_SOLUTIONS_FILE).exists());

        let questions = fs::read_to_string(out.join("quesiti_logica.tex")).unwrap();
        assert!(questions.starts_with("\\subsection{Serie}\n"));
        assert!(questions.contains("\\subsection{Sillogismi}"));
    }

    #[test]
    fn unknown_subject_is_an_error() {
        let (_tmp, bank) = seeded_bank();

        let result = generate_workbook(&bank, Some("Storia"));

        assert!(matches!(result, Err(GenerateError::UnknownSubject(name)) if name == "Storia"));
    }

    #[test]
    fn empty_bank_still_writes_combined_key() {
        let tmp = TempDir::new().unwrap();
        let bank = Bank::with_config(tmp.path().to_path_buf(), Config::default());

        let report = generate_workbook(&bank, None).unwrap();

        assert_eq!(
            report.files,
            vec![tmp.path().join("eserciziario").join(COMBINED_SOLUTIONS_FILE)]
        );
        assert_eq!(report.questions, 0);
    }

    #[test]
    fn unwritable_output_aborts() {
        let (tmp, bank) = seeded_bank();
        // A regular file where the output directory should be.
        fs::write(tmp.path().join("eserciziario"), "").unwrap();

        let result = generate_workbook(&bank, None);

        assert!(matches!(result, Err(GenerateError::CreateDir { .. })));
    }
}

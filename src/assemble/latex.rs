//! LaTeX rendering.
//!
//! Every document is a [`fmt::Display`] value, so it can be rendered into a
//! `String` or written straight to a file. Text coming from question files is
//! wrapped in [`Escaped`] at the point it is written.

use std::fmt;

use unicode_normalization::UnicodeNormalization;

use crate::domain::{SolutionRecord, Subject, Topic};

/// Text that is NFC-normalised and has `_`, `#`, `&` and `%` escaped when
/// displayed.
///
/// No other markup is touched: question bodies may carry their own LaTeX.
#[derive(Debug, Clone, Copy)]
pub struct Escaped<'a>(pub &'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.nfc() {
            if matches!(c, '_' | '#' | '&' | '%') {
                f.write_str("\\")?;
            }
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

/// Escapes `text` for LaTeX output.
///
/// ```
/// assert_eq!(vti::assemble::latex::escape("A_B#C&D%E"), r"A\_B\#C\&D\%E");
/// ```
#[must_use]
pub fn escape(text: &str) -> String {
    Escaped(text).to_string()
}

/// The questions of one topic, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicSection {
    /// The topic heading.
    pub topic: Topic,
    /// Raw question bodies, in output order.
    pub bodies: Vec<String>,
}

/// The questions document of one subject in a workbook.
///
/// Each topic becomes a subsection with its questions in two columns,
/// followed by a page break.
#[derive(Debug, Clone, Copy)]
pub struct QuestionsDocument<'a> {
    /// Topics in output order.
    pub sections: &'a [TopicSection],
}

impl fmt::Display for QuestionsDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in self.sections {
            writeln!(f, "\\subsection{{{}}}", Escaped(&section.topic))?;
            writeln!(f, "\\begin{{multicols}}{{2}}")?;
            writeln!(f, "\\begin{{itemize}}[leftmargin=*]")?;
            for body in &section.bodies {
                write!(f, "{}\n\n", Escaped(body))?;
            }
            writeln!(f, "\\end{{itemize}}")?;
            writeln!(f, "\\end{{multicols}}")?;
            write!(f, "\\newpage\n\n")?;
        }
        Ok(())
    }
}

/// How an answer-key table is numbered and laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableLayout {
    /// One subject, numbered per subject.
    Subject,
    /// Several subjects, numbered globally, with a subject column.
    Combined,
    /// The key at the end of a test: like [`TableLayout::Combined`] under an
    /// unnumbered heading.
    TestKey,
}

/// An answer-key table.
#[derive(Debug, Clone, Copy)]
pub struct SolutionsTable<'a> {
    /// Section heading.
    pub title: &'a str,
    /// Rows, in output order.
    pub records: &'a [SolutionRecord],
    /// Numbering and columns.
    pub layout: TableLayout,
}

impl SolutionsTable<'_> {
    const fn with_subject_column(&self) -> bool {
        !matches!(self.layout, TableLayout::Subject)
    }

    fn header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\\rowcolor{{headercolor}} \\textbf{{N.}} & ")?;
        if self.with_subject_column() {
            write!(f, "\\textbf{{Materia}} & ")?;
        }
        writeln!(
            f,
            "\\textbf{{Argomento}} & \\textbf{{Nome Quesito}} & \\textbf{{Risp.}} \\\\ \\hline"
        )
    }
}

impl fmt::Display for SolutionsTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (section, columns) = match self.layout {
            TableLayout::Subject => ("section", "|p{1cm}|p{4cm}|p{8.5cm}|p{1cm}|"),
            TableLayout::Combined => ("section", "|p{1cm}|p{2.5cm}|p{3.5cm}|p{6.5cm}|p{1cm}|"),
            TableLayout::TestKey => ("section*", "|p{1cm}|p{2.5cm}|p{3.5cm}|p{6.5cm}|p{1cm}|"),
        };

        writeln!(f, "\\{section}{{{}}}", Escaped(self.title))?;
        writeln!(f, "\\begin{{longtable}}{{{columns}}}")?;
        writeln!(f, "\\hline ")?;
        self.header(f)?;
        writeln!(f, "\\endfirsthead")?;
        writeln!(f, "\\hline ")?;
        self.header(f)?;
        writeln!(f, "\\endhead")?;

        for record in self.records {
            let number = match self.layout {
                TableLayout::Subject => record.subject_sequence.unwrap_or(record.global_sequence),
                TableLayout::Combined | TableLayout::TestKey => record.global_sequence,
            };
            write!(f, "{number} & ")?;
            if self.with_subject_column() {
                write!(f, "{} & ", Escaped(&record.subject))?;
            }
            writeln!(
                f,
                "{} & {} & \\centering \\textbf{{{}}} \\tabularnewline \\hline",
                Escaped(&record.topic),
                Escaped(&record.name),
                record.answer
            )?;
        }

        writeln!(f, "\\end{{longtable}}")?;
        writeln!(f, "\\newpage")
    }
}

/// A complete, standalone test document with its answer key.
#[derive(Debug, Clone, Copy)]
pub struct TestDocument<'a> {
    /// Test title.
    pub title: &'a str,
    /// Date printed under the title.
    pub date: &'a str,
    /// Non-empty subjects with their raw question bodies, in output order.
    pub sections: &'a [(Subject, Vec<String>)],
    /// The answer key, in global sequence order.
    pub key: &'a [SolutionRecord],
}

const TEST_PREAMBLE: &str = r"\documentclass[11pt,a4paper]{article}
\usepackage[utf8]{inputenc}
\usepackage[T1]{fontenc}
\usepackage[italian]{babel}
\usepackage[margin=2cm]{geometry}
\usepackage{enumitem}
\usepackage{longtable}
\usepackage{array}
\usepackage[table]{xcolor}
\definecolor{headercolor}{RGB}{220,230,241}
";

impl fmt::Display for TestDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(TEST_PREAMBLE)?;
        writeln!(f)?;
        writeln!(f, "\\begin{{document}}")?;
        writeln!(f)?;
        writeln!(f, "\\begin{{center}}")?;
        writeln!(f, "{{\\LARGE\\textbf{{{}}}}}\\\\[0.5em]", Escaped(self.title))?;
        writeln!(f, "{{\\large {}}}", Escaped(self.date))?;
        writeln!(f, "\\end{{center}}")?;
        writeln!(f)?;

        for (i, (subject, bodies)) in self.sections.iter().enumerate() {
            // Numbering continues across sections so that item numbers match
            // the global numbers in the key.
            let options = if i == 0 {
                "leftmargin=*"
            } else {
                writeln!(f, "\\newpage")?;
                "leftmargin=*,resume"
            };
            writeln!(f, "\\section*{{{}}}", Escaped(subject))?;
            writeln!(f, "\\begin{{enumerate}}[{options}]")?;
            for body in bodies {
                write!(f, "{}\n\n", Escaped(body))?;
            }
            writeln!(f, "\\end{{enumerate}}")?;
            writeln!(f)?;
        }

        writeln!(f, "\\newpage")?;
        let key = SolutionsTable {
            title: "Soluzioni",
            records: self.key,
            layout: TableLayout::TestKey,
        };
        write!(f, "{key}")?;
        writeln!(f, "\\end{{document}}")
    }
}

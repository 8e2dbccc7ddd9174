use std::path::PathBuf;

use tracing::instrument;
use vti::Bank;

use super::terminal::Styled;

#[derive(Debug, clap::Parser)]
pub struct Workbook {
    /// Only compile this subject (case-insensitive). The combined answer key
    /// is skipped.
    #[arg(long, short)]
    subject: Option<String>,
}

impl Workbook {
    #[instrument(skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let bank = Bank::open(root)?;

        let report = vti::generate_workbook(&bank, self.subject.as_deref())?;

        for path in &report.files {
            let shown = path.strip_prefix(bank.root()).unwrap_or(path);
            println!("{}", format!("Written {}", shown.display()).success());
        }
        println!("{} questions compiled", report.questions);
        if report.skipped > 0 {
            println!(
                "{}",
                format!("{} unreadable files skipped", report.skipped).warning()
            );
        }

        Ok(())
    }
}

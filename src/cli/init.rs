use std::{fs, path::Path};

use tracing::instrument;
use vti::{
    storage::bank::{config_path, METADATA_DIR},
    Config, Subject,
};

use super::terminal::Styled;

#[derive(Debug, clap::Parser)]
pub struct Init {
    /// Subjects of the bank, in processing order (defaults to Matematica,
    /// Logica, Scienze)
    #[arg(long, value_name = "SUBJECT", num_args = 1..)]
    subjects: Vec<String>,
}

impl Init {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let metadata_dir = root.join(METADATA_DIR);
        if metadata_dir.exists() {
            anyhow::bail!(
                "Question bank already initialized (found existing {METADATA_DIR} directory)"
            );
        }

        let config = if self.subjects.is_empty() {
            Config::default()
        } else {
            let subjects = self
                .subjects
                .into_iter()
                .map(Subject::new)
                .collect::<Result<Vec<_>, _>>()?;
            Config::with_subjects(subjects).map_err(|e| anyhow::anyhow!("Invalid subjects: {e}"))?
        };

        fs::create_dir_all(&metadata_dir)
            .map_err(|e| anyhow::anyhow!("Failed to create {METADATA_DIR} directory: {e}"))?;

        config
            .save(&config_path(root))
            .map_err(|e| anyhow::anyhow!("Failed to create config.toml: {e}"))?;

        println!("Initialized question bank in {}", root.display());
        println!("  Created: {METADATA_DIR}/config.toml");

        for subject in config.subjects() {
            let dir = config.subject_dir(root, subject);
            fs::create_dir_all(&dir)
                .map_err(|e| anyhow::anyhow!("Failed to create {}: {e}", dir.display()))?;
            let relative = dir.strip_prefix(root).unwrap_or(&dir);
            println!("  Created: {}", relative.display());
        }

        println!();
        println!("{}", "Next steps:".heading());
        println!(
            "  Add question files named '<tag> - <topic> - <name>.{}'",
            config.extension()
        );
        println!("  vti workbook");

        Ok(())
    }
}

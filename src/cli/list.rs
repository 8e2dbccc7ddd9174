use std::path::PathBuf;

use clap::Parser;
use tracing::instrument;
use vti::{Bank, Catalog};

use super::terminal::{is_narrow, Styled};

#[derive(Debug, Parser, Default)]
#[command(about = "Show subjects, topics and the number of available questions")]
pub struct List {
    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl List {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let bank = Bank::open(root)?;
        let catalog = bank.scan();

        match self.output {
            OutputFormat::Json => Self::output_json(&catalog)?,
            OutputFormat::Table => Self::output_table(&catalog),
        }

        Ok(())
    }

    fn output_json(catalog: &Catalog) -> anyhow::Result<()> {
        use serde_json::json;

        let subjects: Vec<_> = catalog
            .subjects()
            .map(|(subject, topics)| {
                let topics: Vec<_> = topics
                    .iter()
                    .map(|(topic, files)| json!({ "topic": topic.as_str(), "available": files.len() }))
                    .collect();
                json!({ "subject": subject.as_str(), "topics": topics })
            })
            .collect();

        let output = json!({
            "subjects": subjects,
            "total": catalog.len(),
        });

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    fn output_table(catalog: &Catalog) {
        if catalog.is_empty() {
            println!(
                "{}",
                "No question files found. Run 'vti init' to create the directory layout."
                    .warning()
            );
            return;
        }

        let narrow = is_narrow();

        for (subject, topics) in catalog.subjects() {
            if topics.is_empty() {
                continue;
            }
            let count: usize = topics.values().map(Vec::len).sum();
            println!("{} {}", subject.heading(), format!("({count})").muted());

            for (topic, files) in topics {
                if narrow {
                    println!("  {topic}: {}", files.len());
                } else {
                    println!("  • {topic:<40} {}", format!("{} available", files.len()).muted());
                }
            }
            println!();
        }

        println!("Total: {}", catalog.len());
    }
}

use std::path::PathBuf;

use anyhow::Context;
use rand::{rngs::StdRng, SeedableRng};
use tracing::instrument;
use vti::{Bank, Catalog, Config, Selection, Subject, TestOutcome, Topic};

use super::terminal::Styled;

#[derive(Debug, clap::Parser)]
pub struct TestPaper {
    /// Title printed on the test and used in its file name
    #[arg(long, short, default_value = "")]
    title: String,

    /// Date printed under the title (defaults to today, dd/mm/yyyy)
    #[arg(long)]
    date: Option<String>,

    /// Seed for a reproducible draw
    #[arg(long)]
    seed: Option<u64>,

    /// Questions to draw from a topic, as SUBJECT/TOPIC=COUNT
    #[arg(long, short, value_name = "SUBJECT/TOPIC=COUNT")]
    pick: Vec<String>,

    /// Draw this many questions from every topic (overridden by --pick)
    #[arg(long, value_name = "COUNT")]
    each: Option<usize>,

    /// Ask for the number of questions of each topic
    #[arg(long, short, conflicts_with_all = ["pick", "each"])]
    interactive: bool,
}

impl TestPaper {
    #[instrument(skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let bank = Bank::open(root)?;
        let catalog = bank.scan();

        let selection = if self.interactive {
            prompt_selection(&catalog)?
        } else {
            let mut selection = self
                .each
                .map_or_else(Selection::new, |count| Selection::each(&catalog, count));
            for pick in &self.pick {
                let (subject, topic, count) = parse_pick(bank.config(), pick)?;
                selection.set(subject, topic, count);
            }
            selection
        };

        let date = self
            .date
            .unwrap_or_else(|| chrono::Local::now().format("%d/%m/%Y").to_string());

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        match vti::generate_test(&bank, &selection, &self.title, &date, &mut rng)? {
            TestOutcome::Written(report) => {
                let shown = report.path.strip_prefix(bank.root()).unwrap_or(&report.path);
                println!("{}", format!("Written {}", shown.display()).success());
                println!("{} questions drawn", report.questions);
                if report.skipped > 0 {
                    println!(
                        "{}",
                        format!("{} unreadable files left out", report.skipped).warning()
                    );
                }
            }
            TestOutcome::NothingSelected => {
                println!(
                    "{}",
                    "Select at least one question (use --pick, --each or --interactive)".warning()
                );
            }
        }

        Ok(())
    }
}

/// Parses `SUBJECT/TOPIC=COUNT`.
///
/// The subject ends at the first `/` and the count starts after the last `=`,
/// so topics may contain either character.
fn parse_pick(config: &Config, pick: &str) -> anyhow::Result<(Subject, Topic, usize)> {
    let (subject, rest) = pick
        .split_once('/')
        .with_context(|| format!("Invalid pick '{pick}', expected SUBJECT/TOPIC=COUNT"))?;
    let (topic, count) = rest
        .rsplit_once('=')
        .with_context(|| format!("Invalid pick '{pick}', expected SUBJECT/TOPIC=COUNT"))?;

    let subject = config
        .subject(subject.trim())
        .with_context(|| format!("Unknown subject '{}'", subject.trim()))?
        .clone();
    let count = count
        .trim()
        .parse()
        .with_context(|| format!("Invalid count '{}' in pick '{pick}'", count.trim()))?;

    Ok((subject, Topic::from(topic.trim()), count))
}

fn prompt_selection(catalog: &Catalog) -> anyhow::Result<Selection> {
    let mut selection = Selection::new();

    for (subject, topics) in catalog.subjects() {
        if topics.is_empty() {
            continue;
        }
        println!("{}", subject.heading());
        for (topic, files) in topics {
            let count: usize = dialoguer::Input::new()
                .with_prompt(format!("  {topic} ({} available)", files.len()))
                .default(0)
                .interact_text()?;
            selection.set(subject.clone(), topic.clone(), count);
        }
    }

    Ok(selection)
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("Matematica/Algebra=3", "Matematica", "Algebra", 3; "simple")]
    #[test_case("logica / Serie numeriche = 2", "Logica", "Serie numeriche", 2; "case and spaces")]
    #[test_case("Scienze/a=b=1", "Scienze", "a=b", 1; "equals in topic")]
    #[test_case("Scienze/Chimica/Organica=0", "Scienze", "Chimica/Organica", 0; "slash in topic")]
    fn parses_pick(pick: &str, subject: &str, topic: &str, count: usize) {
        let (s, t, c) = parse_pick(&Config::default(), pick).unwrap();

        assert_eq!(s.as_str(), subject);
        assert_eq!(t.as_str(), topic);
        assert_eq!(c, count);
    }

    #[test_case("Matematica=3"; "missing topic")]
    #[test_case("Matematica/Algebra"; "missing count")]
    #[test_case("Matematica/Algebra=tre"; "non numeric count")]
    #[test_case("Storia/Roma=1"; "unknown subject")]
    fn rejects_pick(pick: &str) {
        assert!(parse_pick(&Config::default(), pick).is_err());
    }
}

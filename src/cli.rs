use std::path::PathBuf;

mod init;
mod list;
mod terminal;
mod test_paper;
mod workbook;

use clap::ArgAction;
use init::Init;
use list::List;
use test_paper::TestPaper;
use workbook::Workbook;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Log more detail (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the root of the question bank
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command
            .unwrap_or_else(|| Command::List(List::default()))
            .run(self.root)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        // Logs go to stderr so that `list --output json` stays parseable.
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Show subjects, topics and available questions (default)
    List(List),

    /// Initialize a new question bank
    Init(Init),

    /// Generate the workbook and answer keys
    ///
    /// Without --subject, every subject is compiled and a combined answer key
    /// is written as well.
    Workbook(Workbook),

    /// Generate a randomized test with its answer key
    Test(TestPaper),
}

impl Command {
    fn run(self, root: PathBuf) -> anyhow::Result<()> {
        match self {
            Self::List(command) => command.run(root)?,
            Self::Init(command) => command.run(&root)?,
            Self::Workbook(command) => command.run(root)?,
            Self::Test(command) => command.run(root)?,
        }
        Ok(())
    }
}

use std::path::PathBuf;

use architect::{export, Workspace};
use clap::Parser;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
pub struct Command {
    /// Output format
    #[arg(value_enum)]
    format: Format,

    /// Write to a file instead of stdout
    #[arg(long, short)]
    out: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum Format {
    /// Versioned JSON document with one row per item
    Json,
    /// CSV with a header line
    Csv,
}

impl Command {
    #[instrument]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let workspace = Workspace::open(root)?;
        let rows = export::rows(&workspace);

        let rendered = match self.format {
            Format::Json => export::to_json(&rows)?,
            Format::Csv => export::to_csv(&rows),
        };

        match &self.out {
            Some(path) => {
                std::fs::write(path, &rendered)?;
                println!(
                    "{}",
                    format!("✅ Exported {} rows to {}", rows.len(), path.display()).success()
                );
            }
            None => print!("{rendered}"),
        }

        Ok(())
    }
}

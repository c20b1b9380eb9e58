use std::path::PathBuf;

use architect::Workspace;
use tracing::instrument;

use crate::cli::terminal::Colorize;

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// Quiet mode: output only UUIDs (no headers)
    #[arg(long, short)]
    quiet: bool,
}

impl Command {
    #[instrument]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let workspace = Workspace::open(root)?;

        if self.quiet {
            for entry in workspace.pool().entries() {
                println!("{}", entry.uuid());
            }
            return Ok(());
        }

        if workspace.pool().is_empty() {
            println!("The pool is empty. Add entries with 'larc pool add'.");
            return Ok(());
        }

        println!("Pool entries: {}", workspace.pool().len());
        println!();

        for (position, entry) in workspace.pool().entries().iter().enumerate() {
            let linked = workspace.linked_item_count(entry.uuid());
            let linked_note = match linked {
                0 => String::new(),
                1 => " (1 linked item)".to_string(),
                n => format!(" ({n} linked items)"),
            };

            println!(
                "{:>3}. {} [{}] {}{}",
                position + 1,
                entry.uuid(),
                entry.data_unit(),
                entry.text(),
                linked_note.dim()
            );
            if let Some(sub_text) = entry.sub_text() {
                println!("     {}", sub_text.dim());
            }
            if !entry.translation().is_empty() {
                println!("     {}", entry.translation().dim());
            }
        }

        Ok(())
    }
}

use std::path::PathBuf;

use architect::Workspace;
use tracing::instrument;
use uuid::Uuid;

use crate::cli::{parse_uuid, prompt_to_proceed, terminal::Colorize};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// The UUID of the pool entry to remove
    #[clap(value_parser = parse_uuid)]
    entry: Uuid,

    /// Skip confirmation prompts
    #[arg(long, short)]
    yes: bool,
}

impl Command {
    #[instrument]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let mut workspace = Workspace::open(root)?;

        let linked = workspace.linked_item_count(self.entry);

        if !self.yes {
            println!("Will remove pool entry {}", self.entry);
            if linked > 0 {
                println!(
                    "{}",
                    format!("⚠️  {linked} page items link to this entry and will be left dangling")
                        .warning()
                );
            }
            prompt_to_proceed()?;
        }

        workspace.remove_pool_entry(self.entry)?;
        workspace.flush()?;

        println!("{}", format!("✅ Removed pool entry {}", self.entry).success());
        if linked > 0 {
            println!(
                "{}",
                "Run 'larc validate' to list the dangling links".dim()
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use architect::{domain::DataUnit, Resource};
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn pool_remove_deletes_entry() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().to_path_buf();

        let mut workspace = Workspace::open(root.clone()).unwrap();
        let entry = Resource::new(DataUnit::Word);
        let uuid = entry.uuid();
        workspace.add_pool_entry(entry).unwrap();
        workspace.flush().unwrap();

        let command = Command { entry: uuid, yes: true };
        command.run(root.clone()).expect("pool remove should succeed");

        let workspace = Workspace::open(root).unwrap();
        assert!(workspace.pool().is_empty());
    }

    #[test]
    fn pool_remove_unknown_entry_fails() {
        let tmp = tempdir().unwrap();
        let command = Command {
            entry: Uuid::new_v4(),
            yes: true,
        };
        assert!(command.run(tmp.path().to_path_buf()).is_err());
    }
}

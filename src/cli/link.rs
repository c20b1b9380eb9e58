use std::path::PathBuf;

use architect::{Locator, Workspace};
use tracing::instrument;
use uuid::Uuid;

use crate::cli::{parse_locator, parse_uuid};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// The page holding the item (e.g. chinese-2A-001-3)
    #[clap(value_parser = parse_locator)]
    locator: Locator,

    /// The stack position on the page (1-based)
    stack: usize,

    /// The item position within the stack (1-based)
    item: usize,

    /// The UUID of the pool entry to mirror
    #[clap(value_parser = parse_uuid)]
    entry: Uuid,
}

impl Command {
    #[instrument]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let mut workspace = Workspace::open(root)?;
        let digits = workspace.config().set_digits();
        let msg = format!(
            "Linked item {} of stack {} on {} to pool entry {}",
            self.item,
            self.stack,
            self.locator.display(digits),
            self.entry
        );

        workspace.link_item(&self.locator, self.stack, self.item, self.entry)?;
        workspace.flush()?;

        println!("{msg}");

        Ok(())
    }
}

use std::path::PathBuf;

use architect::{Locator, Workspace};
use tracing::instrument;

use crate::cli::{parse_locator, prompt_to_proceed, terminal::Colorize};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// The page holding the stack (e.g. chinese-2A-001-3)
    #[clap(value_parser = parse_locator)]
    locator: Locator,

    /// The stack position on the page (1-based)
    stack: usize,

    /// The item position within the stack (1-based); omit to remove the
    /// whole stack
    item: Option<usize>,

    /// Skip confirmation prompts
    #[arg(long, short)]
    yes: bool,
}

impl Command {
    #[instrument]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let mut workspace = Workspace::open(root)?;
        let digits = workspace.config().set_digits();

        if !self.yes {
            match self.item {
                Some(item) => println!(
                    "Will remove item {} from stack {} of {}",
                    item,
                    self.stack,
                    self.locator.display(digits)
                ),
                None => println!(
                    "Will remove stack {} of {} and all its items",
                    self.stack,
                    self.locator.display(digits)
                ),
            }
            prompt_to_proceed()?;
        }

        match self.item {
            Some(item) => {
                workspace.remove_item(&self.locator, self.stack, item)?;
                workspace.flush()?;
                println!("{}", format!("✅ Removed item {item}").success());
            }
            None => {
                let removed = workspace.remove_stack(&self.locator, self.stack)?;
                workspace.flush()?;
                println!(
                    "{}",
                    format!(
                        "✅ Removed stack {} ({} items)",
                        self.stack,
                        removed.len()
                    )
                    .success()
                );
            }
        }

        Ok(())
    }
}

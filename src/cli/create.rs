use std::path::PathBuf;

use architect::{domain::ActivityType, Locator, Workspace};
use tracing::instrument;

use crate::cli::{parse_activity, parse_locator};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// The page to add the stack to (e.g. chinese-2A-001-3). The page is
    /// created on first use.
    #[clap(value_parser = parse_locator)]
    locator: Locator,

    /// The activity type of the new stack
    #[clap(long, short, value_parser = parse_activity, default_value = "instruction")]
    activity: ActivityType,
}

impl Command {
    #[instrument]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let mut workspace = Workspace::open(root)?;

        let position = workspace.create_stack(&self.locator, self.activity)?;
        workspace.flush()?;

        println!(
            "Added stack {} ({}) to {}",
            position,
            self.activity,
            self.locator
                .display(workspace.config().set_digits())
        );

        Ok(())
    }
}

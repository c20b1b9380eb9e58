use std::path::PathBuf;

use architect::{Locator, Workspace};
use tracing::instrument;

use crate::cli::{parse_locator, prompt_to_proceed, terminal::Colorize};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// The page holding the item (e.g. chinese-2A-001-3)
    #[clap(value_parser = parse_locator)]
    locator: Locator,

    /// The stack position on the page (1-based)
    stack: usize,

    /// The item position within the stack (1-based)
    item: usize,

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
            println!(
                "Will unlink item {} of stack {} on {} from its pool entry; the copied \
                 content stays on the item",
                self.item,
                self.stack,
                self.locator.display(digits)
            );
            prompt_to_proceed()?;
        }

        let segmented = workspace.unlink_item(&self.locator, self.stack, self.item)?;
        workspace.flush()?;

        println!(
            "{}",
            format!(
                "✅ Unlinked item {} of stack {} on {}",
                self.item,
                self.stack,
                self.locator.display(digits)
            )
            .success()
        );

        if segmented {
            println!(
                "{}",
                "The text had no delimiters and was auto-segmented character by character".dim()
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use architect::{
        domain::{ActivityType, DataUnit},
        Resource,
    };
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn unlink_run_detaches_and_auto_segments() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().to_path_buf();
        let locator = parse_locator("chinese-2A-001-1").unwrap();

        let mut workspace = Workspace::open(root.clone()).unwrap();
        let entry = Resource::with_content(
            DataUnit::Sentence,
            "你好".to_string(),
            None,
            String::new(),
        );
        let entry_id = entry.uuid();
        workspace.add_pool_entry(entry).unwrap();
        workspace
            .create_stack(&locator, ActivityType::Listening)
            .unwrap();
        workspace
            .add_item(&locator, 1, Resource::new(DataUnit::Sentence))
            .unwrap();
        workspace.link_item(&locator, 1, 1, entry_id).unwrap();
        workspace.flush().unwrap();

        let unlink = Command {
            locator: locator.clone(),
            stack: 1,
            item: 1,
            yes: true,
        };
        unlink.run(root.clone()).expect("unlink command should succeed");

        let workspace = Workspace::open(root).unwrap();
        let item = &workspace.page(&locator).unwrap().stacks()[0].items()[0];
        assert!(!item.is_linked());
        assert_eq!(item.text(), "你/好");
    }

    #[test]
    fn unlink_run_fails_on_unlinked_item() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().to_path_buf();
        let locator = parse_locator("chinese-2A-001-1").unwrap();

        let mut workspace = Workspace::open(root.clone()).unwrap();
        workspace
            .create_stack(&locator, ActivityType::Listening)
            .unwrap();
        workspace
            .add_item(&locator, 1, Resource::new(DataUnit::Word))
            .unwrap();
        workspace.flush().unwrap();

        let unlink = Command {
            locator,
            stack: 1,
            item: 1,
            yes: true,
        };
        assert!(unlink.run(root).is_err());
    }
}

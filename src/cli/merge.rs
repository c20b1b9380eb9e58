use std::path::PathBuf;

use architect::{Locator, Workspace};
use tracing::instrument;

use crate::cli::{parse_locator, terminal::Colorize};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// The page holding the item (e.g. chinese-2A-001-3)
    #[clap(value_parser = parse_locator)]
    locator: Locator,

    /// The stack position on the page (1-based)
    stack: usize,

    /// The item position within the stack (1-based)
    item: usize,

    /// The left-hand segment of the pair to merge (1-based)
    segment: usize,
}

impl Command {
    #[instrument]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let mut workspace = Workspace::open(root)?;

        let changed =
            workspace.merge_item_segments(&self.locator, self.stack, self.item, self.segment)?;
        workspace.flush()?;

        if changed {
            let page = workspace
                .page(&self.locator)
                .expect("page exists after a successful merge");
            let item = page.stacks()[self.stack - 1].items()[self.item - 1].clone();
            println!(
                "Merged segments {} and {}: {}",
                self.segment,
                self.segment + 1,
                item.text()
            );
            if let Some(sub_text) = item.sub_text() {
                println!("Sub-text: {sub_text}");
            }
        } else {
            println!(
                "{}",
                format!("No segment pair at position {}; nothing to merge", self.segment).dim()
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

    fn root_with_sentence() -> (tempfile::TempDir, PathBuf, Locator) {
        let tmp = tempdir().unwrap();
        let root = tmp.path().to_path_buf();
        let locator = parse_locator("chinese-2A-001-1").unwrap();

        let mut workspace = Workspace::open(root.clone()).unwrap();
        workspace
            .create_stack(&locator, ActivityType::Listening)
            .unwrap();
        workspace
            .add_item(
                &locator,
                1,
                Resource::with_content(
                    DataUnit::Sentence,
                    "a/b/c".to_string(),
                    Some("x/y/z".to_string()),
                    String::new(),
                ),
            )
            .unwrap();
        workspace.flush().unwrap();

        (tmp, root, locator)
    }

    #[test]
    fn merge_run_merges_both_fields() {
        let (_tmp, root, locator) = root_with_sentence();

        let merge = Command {
            locator: locator.clone(),
            stack: 1,
            item: 1,
            segment: 1,
        };
        merge.run(root.clone()).expect("merge command should succeed");

        let workspace = Workspace::open(root).unwrap();
        let item = &workspace.page(&locator).unwrap().stacks()[0].items()[0];
        assert_eq!(item.text(), "a b/c");
        assert_eq!(item.sub_text(), Some("xy/z"));
    }

    #[test]
    fn merge_run_out_of_range_is_quiet() {
        let (_tmp, root, locator) = root_with_sentence();

        let merge = Command {
            locator: locator.clone(),
            stack: 1,
            item: 1,
            segment: 9,
        };
        merge.run(root.clone()).expect("out of range must not fail");

        let workspace = Workspace::open(root).unwrap();
        let item = &workspace.page(&locator).unwrap().stacks()[0].items()[0];
        assert_eq!(item.text(), "a/b/c");
    }
}

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

    /// New primary text; the sub-text is kept aligned as delimiters are
    /// inserted or removed
    #[clap(long, short)]
    text: Option<String>,

    /// New sub-text, replacing the current value verbatim
    #[clap(long, short = 's')]
    sub_text: Option<String>,

    /// New translation
    #[clap(long)]
    translation: Option<String>,
}

impl Command {
    #[instrument]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        if self.text.is_none() && self.sub_text.is_none() && self.translation.is_none() {
            anyhow::bail!("Nothing to edit: pass --text, --sub-text, or --translation");
        }

        let mut workspace = Workspace::open(root)?;
        let mut mismatched = false;

        if let Some(text) = &self.text {
            mismatched = workspace.set_item_text(&self.locator, self.stack, self.item, text)?;
        }
        if let Some(sub_text) = &self.sub_text {
            mismatched =
                workspace.set_item_sub_text(&self.locator, self.stack, self.item, sub_text)?;
        }
        if let Some(translation) = &self.translation {
            workspace.set_item_translation(&self.locator, self.stack, self.item, translation)?;
        }

        workspace.flush()?;

        println!(
            "Updated item {} of stack {} on {}",
            self.item,
            self.stack,
            self.locator.display(workspace.config().set_digits())
        );

        if mismatched {
            println!(
                "{}",
                "⚠️  Segment counts of text and sub-text differ; the edit was saved anyway"
                    .warning()
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

    fn root_with_item(text: &str, sub_text: Option<&str>) -> (tempfile::TempDir, PathBuf) {
        let tmp = tempdir().unwrap();
        let root = tmp.path().to_path_buf();
        let mut workspace = Workspace::open(root.clone()).unwrap();
        let locator = parse_locator("chinese-2A-001-1").unwrap();
        workspace
            .create_stack(&locator, ActivityType::Listening)
            .unwrap();
        workspace
            .add_item(
                &locator,
                1,
                Resource::with_content(
                    DataUnit::Sentence,
                    text.to_string(),
                    sub_text.map(ToString::to_string),
                    String::new(),
                ),
            )
            .unwrap();
        workspace.flush().unwrap();
        (tmp, root)
    }

    fn command(
        text: Option<&str>,
        sub_text: Option<&str>,
        translation: Option<&str>,
    ) -> Command {
        Command {
            locator: parse_locator("chinese-2A-001-1").unwrap(),
            stack: 1,
            item: 1,
            text: text.map(ToString::to_string),
            sub_text: sub_text.map(ToString::to_string),
            translation: translation.map(ToString::to_string),
        }
    }

    #[test]
    fn edit_text_syncs_sub_text() {
        let (_tmp, root) = root_with_item("a/b/c", Some("x/y/z"));

        command(Some("ab/c"), None, None)
            .run(root.clone())
            .expect("edit should succeed");

        let workspace = Workspace::open(root).unwrap();
        let locator = parse_locator("chinese-2A-001-1").unwrap();
        let item = &workspace.page(&locator).unwrap().stacks()[0].items()[0];
        assert_eq!(item.text(), "ab/c");
        assert_eq!(item.sub_text(), Some("x/y"));
    }

    #[test]
    fn edit_requires_a_field() {
        let (_tmp, root) = root_with_item("a", None);
        assert!(command(None, None, None).run(root).is_err());
    }

    #[test]
    fn edit_mismatched_sub_text_still_saves() {
        let (_tmp, root) = root_with_item("a/b/c", Some("x/y/z"));

        command(None, Some("x/y"), None)
            .run(root.clone())
            .expect("a mismatch must not block saving");

        let workspace = Workspace::open(root).unwrap();
        assert_eq!(workspace.mismatches().len(), 1);
    }
}

use std::path::PathBuf;

use architect::{AcceptResult, Workspace};
use tracing::instrument;

use crate::cli::{parse_locator, prompt_to_proceed, terminal::Colorize};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// Accept stale links (re-copy pool content and refresh fingerprints)
    #[arg(long)]
    accept: bool,

    /// Accept all stale links
    #[arg(long, requires = "accept")]
    all: bool,

    /// Skip confirmation prompts when accepting
    #[arg(long, short, requires = "accept")]
    yes: bool,

    /// Show stored and current fingerprints
    #[arg(long, conflicts_with = "accept")]
    detail: bool,

    /// Filter by page, or select the item to accept (with --accept)
    #[arg(long, value_parser = parse_locator)]
    page: Option<architect::Locator>,

    /// Stack position of the item to accept (1-based, with --accept)
    #[arg(long, requires = "page")]
    stack: Option<usize>,

    /// Item position of the item to accept (1-based, with --accept)
    #[arg(long, requires = "stack")]
    item: Option<usize>,
}

impl Command {
    #[instrument]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        if self.accept {
            return self.run_accept(root);
        }

        let workspace = Workspace::open(root)?;
        let digits = workspace.config().set_digits();
        let mut stale_links = workspace.stale_links();

        if let Some(ref page_filter) = self.page {
            stale_links.retain(|link| &link.locator == page_filter);
        }

        if stale_links.is_empty() {
            if self.page.is_some() {
                println!("No stale links matched the specified page.");
                return Ok(());
            }
            println!("{}", "✅ No stale links detected.".success());
            return Ok(());
        }

        println!("Stale Links Found: {}", stale_links.len());
        println!();

        for link in &stale_links {
            println!(
                "  {} stack {} item {}  ←  pool entry {}",
                link.locator.display(digits),
                link.stack,
                link.item,
                link.entry
            );
            if self.detail {
                println!("    STORED:  {}", link.stored_fingerprint);
                println!("    CURRENT: {}", link.current_fingerprint);
            }
        }

        println!();
        println!(
            "{}",
            "Run 'larc review --accept --all' to refresh all stale links".dim()
        );

        // Exit with code 2 to indicate stale links exist (for CI).
        std::process::exit(2);
    }

    /// Handle accepting stale links.
    #[instrument]
    fn run_accept(self, root: PathBuf) -> anyhow::Result<()> {
        let mut workspace = Workspace::open(root)?;
        let digits = workspace.config().set_digits();

        if self.all {
            let stale_links = workspace.stale_links();
            if stale_links.is_empty() {
                println!("No stale links to accept.");
                return Ok(());
            }

            if !self.yes {
                println!("Will refresh {} stale links:", stale_links.len());
                for link in &stale_links {
                    println!(
                        "  {} stack {} item {}",
                        link.locator.display(digits),
                        link.stack,
                        link.item
                    );
                }
                prompt_to_proceed()?;
            }

            let accepted = workspace.accept_all_stale_links();
            workspace.flush()?;

            println!(
                "{}",
                format!("✅ Accepted {} stale links", accepted.len()).success()
            );
        } else {
            let locator = self
                .page
                .ok_or_else(|| anyhow::anyhow!("--page is required when accepting without --all"))?;
            let stack = self
                .stack
                .ok_or_else(|| anyhow::anyhow!("--stack is required when accepting without --all"))?;
            let item = self
                .item
                .ok_or_else(|| anyhow::anyhow!("--item is required when accepting without --all"))?;

            match workspace.accept_stale_link(&locator, stack, item)? {
                AcceptResult::Updated => {
                    workspace.flush()?;
                    println!(
                        "{}",
                        format!(
                            "✅ Accepted item {} of stack {} on {}",
                            item,
                            stack,
                            locator.display(digits)
                        )
                        .success()
                    );
                }
                AcceptResult::AlreadyUpToDate => {
                    println!("No changes: link already up-to-date.");
                }
            }
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
    fn review_run_succeeds_when_no_stale_links() {
        let tmp = tempdir().unwrap();

        let review = Command {
            accept: false,
            all: false,
            yes: false,
            detail: false,
            page: None,
            stack: None,
            item: None,
        };
        review
            .run(tmp.path().to_path_buf())
            .expect("review should succeed when no links are stale");
    }

    #[test]
    fn accept_all_refreshes_stale_links() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().to_path_buf();
        let locator = parse_locator("chinese-2A-001-1").unwrap();

        let mut workspace = Workspace::open(root.clone()).unwrap();
        let entry = Resource::with_content(
            DataUnit::Sentence,
            "你/好".to_string(),
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
        workspace.set_pool_entry_text(entry_id, "你/们/好").unwrap();
        workspace.flush().unwrap();

        let accept = Command {
            accept: true,
            all: true,
            yes: true,
            detail: false,
            page: None,
            stack: None,
            item: None,
        };
        accept.run(root.clone()).expect("accept should succeed");

        let workspace = Workspace::open(root).unwrap();
        assert!(workspace.stale_links().is_empty());
        let item = &workspace.page(&locator).unwrap().stacks()[0].items()[0];
        assert_eq!(item.text(), "你/们/好");
    }

    #[test]
    fn accept_single_link_reports_up_to_date() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().to_path_buf();
        let locator = parse_locator("chinese-2A-001-1").unwrap();

        let mut workspace = Workspace::open(root.clone()).unwrap();
        let entry = Resource::new(DataUnit::Word);
        let entry_id = entry.uuid();
        workspace.add_pool_entry(entry).unwrap();
        workspace
            .create_stack(&locator, ActivityType::Listening)
            .unwrap();
        workspace
            .add_item(&locator, 1, Resource::new(DataUnit::Word))
            .unwrap();
        workspace.link_item(&locator, 1, 1, entry_id).unwrap();
        workspace.flush().unwrap();

        let accept = Command {
            accept: true,
            all: false,
            yes: true,
            detail: false,
            page: Some(locator),
            stack: Some(1),
            item: Some(1),
        };
        accept
            .run(root)
            .expect("accept should treat up-to-date link as success");
    }
}

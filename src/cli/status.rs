use std::path::PathBuf;

use architect::Workspace;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Default, clap::Parser)]
pub struct Command {}

impl Command {
    #[instrument]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let workspace = Workspace::open(root)?;

        println!("Pool entries: {}", workspace.pool().len());
        println!("Pages:        {}", workspace.page_count());
        println!("Stacks:       {}", workspace.stack_count());
        println!("Items:        {}", workspace.item_count());

        let mismatches = workspace.mismatches().len();
        let stale = workspace.stale_links().len();
        let dangling = workspace.dangling_links().len();

        println!();
        if mismatches == 0 {
            println!("{}", "✅ No segment mismatches.".success());
        } else {
            println!(
                "{}",
                format!("⚠️  {mismatches} items with mismatched segment counts").warning()
            );
        }

        if stale == 0 && dangling == 0 {
            println!("{}", "✅ All pool links are current.".success());
        } else {
            if stale > 0 {
                println!("{}", format!("⚠️  {stale} stale pool links").warning());
            }
            if dangling > 0 {
                println!("{}", format!("⚠️  {dangling} dangling pool links").warning());
            }
            println!("{}", "Run 'larc review' for details".dim());
        }

        Ok(())
    }
}

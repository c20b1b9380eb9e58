use std::path::PathBuf;

use architect::{
    storage::{DanglingLink, Mismatch, StaleLink},
    Locator, Workspace,
};
use clap::Parser;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Validate workspace health across multiple dimensions")]
pub struct Command {
    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    /// Suppress all output except errors
    #[arg(long, short)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
    Summary,
}

#[derive(Debug, Default)]
struct ValidationResult {
    mismatches: Vec<Mismatch>,
    stale: Vec<StaleLink>,
    dangling: Vec<DanglingLink>,
    misplaced: Vec<(Locator, PathBuf, PathBuf)>,
}

impl ValidationResult {
    fn count_total_issues(&self) -> usize {
        self.mismatches.len() + self.stale.len() + self.dangling.len() + self.misplaced.len()
    }
}

impl Command {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let workspace = Workspace::open(root)?;

        let result = ValidationResult {
            mismatches: workspace.mismatches(),
            stale: workspace.stale_links(),
            dangling: workspace.dangling_links(),
            misplaced: workspace.misplaced_pages(),
        };

        match self.output {
            OutputFormat::Table => self.output_table(&result, &workspace),
            OutputFormat::Json => Self::output_json(&result, &workspace)?,
            OutputFormat::Summary => Self::output_summary(&result),
        }

        // Exit with code 2 when issues exist (for CI). All checks here are
        // advisory: nothing blocks editing or saving.
        if result.count_total_issues() > 0 {
            std::process::exit(2);
        }

        Ok(())
    }

    fn output_table(&self, result: &ValidationResult, workspace: &Workspace) {
        if self.quiet {
            return;
        }

        let digits = workspace.config().set_digits();

        println!("Validating workspace...\n");

        let item_count = workspace.item_count();
        println!(
            "✓ Structure:  {} pages, {} items, all parseable",
            workspace.page_count(),
            item_count
        );

        if result.mismatches.is_empty() {
            println!("✓ Segments:   All secondary fields aligned");
        } else {
            println!(
                "{}",
                format!(
                    "✗ Segments:   {} items with mismatched segment counts",
                    result.mismatches.len()
                )
                .warning()
            );
            for mismatch in &result.mismatches {
                println!(
                    "    • {} stack {} item {}: {} primary vs {} secondary",
                    mismatch.locator.display(digits),
                    mismatch.stack,
                    mismatch.item,
                    mismatch.primary_segments,
                    mismatch.secondary_segments
                );
            }
        }

        if result.stale.is_empty() && result.dangling.is_empty() {
            println!("✓ Links:      All pool links current");
        } else {
            let mut issues_desc = Vec::new();
            if !result.stale.is_empty() {
                issues_desc.push(format!("{} stale", result.stale.len()));
            }
            if !result.dangling.is_empty() {
                issues_desc.push(format!("{} dangling", result.dangling.len()));
            }
            println!(
                "{}",
                format!(
                    "✗ Links:      {} ({})",
                    result.stale.len() + result.dangling.len(),
                    issues_desc.join(", ")
                )
                .warning()
            );
            for link in &result.dangling {
                println!(
                    "    • {} stack {} item {}: pool entry {} is gone",
                    link.locator.display(digits),
                    link.stack,
                    link.item,
                    link.entry
                );
            }
        }

        if result.misplaced.is_empty() {
            println!("✓ Paths:      All pages at canonical locations");
        } else {
            println!(
                "{}",
                format!(
                    "✗ Paths:      {} pages not at canonical locations",
                    result.misplaced.len()
                )
                .warning()
            );
            for (locator, current, canonical) in &result.misplaced {
                println!(
                    "    • {}: {} → {}",
                    locator.display(digits),
                    current.display(),
                    canonical.display()
                );
            }
        }

        let total_issues = result.count_total_issues();
        if total_issues == 0 {
            println!("\n{}", "Workspace is healthy (0 issues)".success());
        } else {
            println!(
                "\n{}",
                format!("Summary: {total_issues} issues found").warning()
            );
            if !result.stale.is_empty() {
                println!(
                    "{}",
                    "Run 'larc review --accept --all' to refresh stale links".dim()
                );
            }
            if !result.mismatches.is_empty() {
                println!(
                    "{}",
                    "Mismatches are advisory; fix the slash counts with 'larc edit'".dim()
                );
            }
        }
    }

    fn output_json(result: &ValidationResult, workspace: &Workspace) -> anyhow::Result<()> {
        use serde_json::json;

        let digits = workspace.config().set_digits();

        let mismatch_issues: Vec<_> = result
            .mismatches
            .iter()
            .map(|mismatch| {
                json!({
                    "type": "segment_mismatch",
                    "page": mismatch.locator.display(digits).to_string(),
                    "stack": mismatch.stack,
                    "item": mismatch.item,
                    "primary_segments": mismatch.primary_segments,
                    "secondary_segments": mismatch.secondary_segments,
                })
            })
            .collect();

        let link_issues: Vec<_> = result
            .stale
            .iter()
            .map(|link| {
                json!({
                    "type": "stale_link",
                    "page": link.locator.display(digits).to_string(),
                    "stack": link.stack,
                    "item": link.item,
                    "entry": link.entry,
                    "stored_fingerprint": link.stored_fingerprint,
                    "current_fingerprint": link.current_fingerprint,
                })
            })
            .chain(result.dangling.iter().map(|link| {
                json!({
                    "type": "dangling_link",
                    "page": link.locator.display(digits).to_string(),
                    "stack": link.stack,
                    "item": link.item,
                    "entry": link.entry,
                })
            }))
            .collect();

        let path_issues: Vec<_> = result
            .misplaced
            .iter()
            .map(|(locator, current, canonical)| {
                json!({
                    "type": "misplaced_page",
                    "page": locator.display(digits).to_string(),
                    "current_path": current,
                    "expected_path": canonical,
                })
            })
            .collect();

        let total_issues = result.count_total_issues();

        let output = json!({
            "status": if total_issues == 0 { "healthy" } else { "issues_found" },
            "issues": {
                "segments": mismatch_issues,
                "links": link_issues,
                "paths": path_issues,
            },
            "summary": {
                "total_issues": total_issues,
            }
        });

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    fn output_summary(result: &ValidationResult) {
        let total = result.count_total_issues();
        println!("issues={total}");
    }
}

#[cfg(test)]
mod tests {
    use architect::domain::ActivityType;
    use tempfile::tempdir;

    use super::*;
    use crate::cli::parse_locator;

    #[test]
    fn validate_run_succeeds_on_healthy_workspace() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().to_path_buf();

        let mut workspace = Workspace::open(root.clone()).unwrap();
        workspace
            .create_stack(
                &parse_locator("chinese-2A-001-1").unwrap(),
                ActivityType::Listening,
            )
            .unwrap();
        workspace.flush().unwrap();

        let validate = Command {
            output: OutputFormat::Table,
            quiet: true,
        };
        validate
            .run(root)
            .expect("validate should succeed on a healthy workspace");
    }
}

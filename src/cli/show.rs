use std::path::PathBuf;

use architect::{segment, Locator, Workspace};
use clap::Parser;
use tracing::instrument;

use super::terminal::{rule_width, Colorize};
use crate::cli::parse_locator;

#[derive(Debug, Parser)]
pub struct Command {
    /// The page to show (e.g. chinese-2A-001-3)
    #[clap(value_parser = parse_locator)]
    locator: Locator,
}

impl Command {
    #[instrument]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let workspace = Workspace::open(root)?;
        let digits = workspace.config().set_digits();

        let Some(page) = workspace.page(&self.locator) else {
            anyhow::bail!("Page {} not found", self.locator.display(digits));
        };

        let rule = "─".repeat(rule_width());

        println!("{}", self.locator.display(digits));
        if let Some(label) = self.locator.subject().annotation_label() {
            println!("{}", format!("secondary field: {label}").dim());
        }
        println!("{}", rule.dim());

        for (stack_position, stack) in page.stacks().iter().enumerate() {
            println!(
                "Stack {} [{}] — {} item(s)",
                stack_position + 1,
                stack.activity(),
                stack.len()
            );

            for (item_position, item) in stack.items().iter().enumerate() {
                let link_note = if item.is_linked() { " (linked)" } else { "" };
                println!(
                    "  {}. [{}] {}{}",
                    item_position + 1,
                    item.data_unit(),
                    item.text(),
                    link_note.dim()
                );

                if let Some(sub_text) = item.sub_text() {
                    println!("     {}", sub_text.dim());
                }
                if !item.translation().is_empty() {
                    println!("     {}", item.translation().dim());
                }
                if let Some(audio) = workspace.resolved_audio(item) {
                    println!("     {}", format!("audio: {audio}").dim());
                }
                if let Some(image) = workspace.resolved_image(item) {
                    println!("     {}", format!("image: {image}").dim());
                }

                Self::print_segment_board(item.text(), item.sub_text());

                if item.is_mismatched() {
                    let primary = segment::split(item.text()).len();
                    let secondary =
                        segment::split_preserving(item.sub_text().unwrap_or("")).len();
                    println!(
                        "     {}",
                        format!(
                            "⚠️  segment counts differ: {primary} primary vs {secondary} secondary"
                        )
                        .warning()
                    );
                }
            }

            println!();
        }

        if page.is_empty() {
            println!("{}", "This page has no stacks yet.".dim());
        }

        Ok(())
    }

    /// Render the numbered segment board for a segmented item.
    fn print_segment_board(text: &str, sub_text: Option<&str>) {
        let segments = segment::split(text);
        if segments.len() < 2 {
            return;
        }
        let sub_segments = segment::split_preserving(sub_text.unwrap_or(""));

        let board: Vec<String> = segments
            .iter()
            .enumerate()
            .map(|(i, seg)| {
                sub_segments
                    .get(i)
                    .filter(|sub| !sub.is_empty())
                    .map_or_else(
                        || format!("#{} {seg}", i + 1),
                        |sub| format!("#{} {seg} ({sub})", i + 1),
                    )
            })
            .collect();

        println!("     {}", board.join("  ").info());
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
    fn show_run_succeeds_for_existing_page() {
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
                    "你/吃/饭".to_string(),
                    Some("nǐ/chī/fàn".to_string()),
                    "Do you eat?".to_string(),
                ),
            )
            .unwrap();
        workspace.flush().unwrap();

        let show = Command { locator };
        show.run(root).expect("show should succeed");
    }

    #[test]
    fn show_run_fails_for_missing_page() {
        let tmp = tempdir().unwrap();
        let show = Command {
            locator: parse_locator("chinese-2A-001-1").unwrap(),
        };
        assert!(show.run(tmp.path().to_path_buf()).is_err());
    }
}

use std::{io::BufRead, path::PathBuf};

mod add;
mod complete;
mod create;
mod edit;
mod export;
mod init;
mod link;
mod merge;
mod pool;
mod remove;
mod review;
mod show;
mod status;
mod terminal;
mod unlink;
mod validate;

use architect::{
    domain::{ActivityType, DataUnit},
    Locator,
};
use clap::ArgAction;
use uuid::Uuid;

/// Parse a locator from a string, normalizing the subject to lowercase and
/// the level to uppercase.
///
/// This is a CLI boundary function for user convenience; the domain parser
/// itself is strict. For example: `Chinese-2a-001-3` → `chinese-2A-001-3`.
fn parse_locator(s: &str) -> Result<Locator, String> {
    let parts: Vec<&str> = s.split('-').collect();
    if parts.len() != 4 {
        return Err("Invalid locator format: expected subject-LEVEL-SET-PAGE".to_string());
    }

    let normalized = format!(
        "{}-{}-{}-{}",
        parts[0].to_lowercase(),
        parts[1].to_uppercase(),
        parts[2],
        parts[3]
    );

    normalized.parse().map_err(|e| format!("{e}"))
}

/// Parse an activity type, accepting `-` or `_` as word separator.
fn parse_activity(s: &str) -> Result<ActivityType, String> {
    s.parse().map_err(|e| format!("{e}"))
}

/// Parse a data unit.
fn parse_unit(s: &str) -> Result<DataUnit, String> {
    s.parse().map_err(|e| format!("{e}"))
}

/// Parse a pool entry UUID.
fn parse_uuid(s: &str) -> Result<Uuid, String> {
    s.parse().map_err(|e| format!("{e}"))
}

/// Ask for confirmation on stdin; exits with code 130 when declined.
fn prompt_to_proceed() -> anyhow::Result<()> {
    eprint!("\nProceed? (y/N) ");
    let stdin = std::io::stdin();
    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;
    if !line.trim().eq_ignore_ascii_case("y") {
        println!("Cancelled");
        std::process::exit(130);
    }
    Ok(())
}

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global=true)]
    verbose: u8,

    /// The path to the root of the content workspace
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command.unwrap_or_default().run(self.root)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Show workspace status (default)
    Status(status::Command),

    /// Initialize a new content workspace
    Init(init::Command),

    /// Add an activity stack to a page
    Create(create::Command),

    /// Add an item to a stack
    Add(add::Command),

    /// Edit an item's text fields
    Edit(edit::Command),

    /// Remove a stack or an item
    Remove(remove::Command),

    /// Manage the shared asset pool
    Pool(pool::Command),

    /// Link an item to a pool entry
    ///
    /// The item mirrors the pool entry's content until it is unlinked.
    Link(link::Command),

    /// Detach an item from its pool entry
    Unlink(unlink::Command),

    /// Merge two adjacent segments of an item
    Merge(merge::Command),

    /// Review stale pool links
    ///
    /// A link is stale when the pool entry has changed since the item
    /// linked to it (or last accepted its content).
    Review(review::Command),

    /// Validate workspace health
    Validate(validate::Command),

    /// Show a page with its segmentation boards
    Show(show::Command),

    /// Export the workspace as JSON or CSV
    Export(export::Command),

    /// Generate shell completion scripts
    Complete(complete::Command),
}

impl Default for Command {
    fn default() -> Self {
        Self::Status(status::Command::default())
    }
}

impl Command {
    fn run(self, root: PathBuf) -> anyhow::Result<()> {
        match self {
            Self::Status(command) => command.run(root)?,
            Self::Init(command) => command.run(&root)?,
            Self::Create(command) => command.run(root)?,
            Self::Add(command) => command.run(root)?,
            Self::Edit(command) => command.run(root)?,
            Self::Remove(command) => command.run(root)?,
            Self::Pool(command) => command.run(root)?,
            Self::Link(command) => command.run(root)?,
            Self::Unlink(command) => command.run(root)?,
            Self::Merge(command) => command.run(root)?,
            Self::Review(command) => command.run(root)?,
            Self::Validate(command) => command.run(root)?,
            Self::Show(command) => command.run(root)?,
            Self::Export(command) => command.run(root)?,
            Self::Complete(command) => command.run(),
        }
        Ok(())
    }
}

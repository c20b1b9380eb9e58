use std::path::PathBuf;

mod add;
mod list;
mod remove;

#[derive(Debug, clap::Parser)]
pub struct Command {
    #[command(subcommand)]
    command: Subcommand,
}

#[derive(Debug, clap::Parser)]
enum Subcommand {
    /// Add an entry to the shared pool
    Add(add::Command),

    /// List pool entries
    List(list::Command),

    /// Remove an entry from the shared pool
    Remove(remove::Command),
}

impl Command {
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        match self.command {
            Subcommand::Add(command) => command.run(root),
            Subcommand::List(command) => command.run(root),
            Subcommand::Remove(command) => command.run(root),
        }
    }
}

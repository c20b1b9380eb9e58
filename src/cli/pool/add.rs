use std::path::PathBuf;

use architect::{domain::DataUnit, Resource, Workspace};
use tracing::instrument;

use crate::cli::{parse_unit, terminal::Colorize};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// The primary text; slash-segmented for sentences
    #[clap(long, short)]
    text: String,

    /// The parallel annotation (pinyin, furigana)
    #[clap(long, short = 's')]
    sub_text: Option<String>,

    /// The translation
    #[clap(long)]
    translation: Option<String>,

    /// The granularity of the entry
    #[clap(long, short, value_parser = parse_unit, default_value = "word")]
    unit: DataUnit,

    /// Audio file name to attach
    #[clap(long)]
    audio: Option<String>,

    /// Image file name to attach
    #[clap(long)]
    image: Option<String>,
}

impl Command {
    #[instrument]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let mut workspace = Workspace::open(root)?;

        let mut entry = Resource::with_content(
            self.unit,
            self.text,
            self.sub_text,
            self.translation.unwrap_or_default(),
        );
        entry.set_audio(self.audio)?;
        entry.set_image(self.image)?;

        let mismatched = entry.is_mismatched();
        let uuid = entry.uuid();

        workspace.add_pool_entry(entry)?;
        workspace.flush()?;

        println!("Added pool entry {uuid}");

        if mismatched {
            println!(
                "{}",
                "⚠️  Segment counts of text and sub-text differ; the entry was saved anyway"
                    .warning()
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn pool_add_persists_entry() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().to_path_buf();

        let command = Command {
            text: "你/好".to_string(),
            sub_text: Some("ni/hao".to_string()),
            translation: Some("hello".to_string()),
            unit: DataUnit::Sentence,
            audio: None,
            image: None,
        };
        command.run(root.clone()).expect("pool add should succeed");

        let workspace = Workspace::open(root).unwrap();
        assert_eq!(workspace.pool().len(), 1);
        assert_eq!(workspace.pool().entries()[0].text(), "你/好");
    }
}

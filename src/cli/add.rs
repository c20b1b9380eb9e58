use std::path::PathBuf;

use architect::{domain::DataUnit, Locator, Resource, Workspace};
use tracing::instrument;

use crate::cli::{parse_locator, parse_unit, terminal::Colorize};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// The page holding the stack (e.g. chinese-2A-001-3)
    #[clap(value_parser = parse_locator)]
    locator: Locator,

    /// The stack position on the page (1-based, as shown by `show`)
    stack: usize,

    /// The primary text; slash-segmented for sentences (e.g. 你/吃/饭)
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

        let mut item = Resource::with_content(
            self.unit,
            self.text,
            self.sub_text,
            self.translation.unwrap_or_default(),
        );
        item.set_audio(self.audio)?;
        item.set_image(self.image)?;

        let mismatched = item.is_mismatched();
        let uuid = item.uuid();

        workspace.add_item(&self.locator, self.stack, item)?;
        workspace.flush()?;

        println!(
            "Added {} item {} to stack {} of {}",
            self.unit,
            uuid,
            self.stack,
            self.locator.display(workspace.config().set_digits())
        );

        if mismatched {
            println!(
                "{}",
                "⚠️  Segment counts of text and sub-text differ; the item was saved anyway"
                    .warning()
            );
        }

        Ok(())
    }
}

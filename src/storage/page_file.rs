use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    resource::{Content, Media, Metadata, PoolLink},
    ActivityType, DataUnit, Page, Resource, Stack,
};

/// A page serialized as a versioned JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PageFileVersion", into = "PageFileVersion")]
pub struct PageFile {
    stacks: Vec<StackRecord>,
}

impl PageFile {
    pub(crate) fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, self)?;
        writer.write_all(b"\n")
    }

    pub(crate) fn read<R: BufRead>(reader: &mut R) -> Result<Self, LoadError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Writes the page to a specific file path.
    ///
    /// Parent directories are created automatically if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written to.
    pub fn save_to_path(&self, file_path: &Path) -> io::Result<()> {
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(file_path)?;
        let mut writer = BufWriter::new(file);
        self.write(&mut writer)
    }

    /// Reads a page from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist, cannot be read, or does
    /// not parse as a page document.
    pub fn load_from_path(file_path: &Path) -> Result<Self, LoadError> {
        let file = File::open(file_path).map_err(|io_error| match io_error.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound,
            _ => LoadError::Io(io_error),
        })?;

        let mut reader = BufReader::new(file);
        Self::read(&mut reader)
    }
}

/// Errors that can occur when loading a JSON document.
#[derive(Debug, thiserror::Error)]
#[error("failed to read document")]
pub enum LoadError {
    /// The file was not found.
    NotFound,
    /// An I/O error occurred.
    Io(#[from] io::Error),
    /// The JSON could not be parsed.
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum PageFileVersion {
    #[serde(rename = "1")]
    V1 { stacks: Vec<StackRecord> },
}

impl From<PageFileVersion> for PageFile {
    fn from(version: PageFileVersion) -> Self {
        match version {
            PageFileVersion::V1 { stacks } => Self { stacks },
        }
    }
}

impl From<PageFile> for PageFileVersion {
    fn from(page_file: PageFile) -> Self {
        Self::V1 {
            stacks: page_file.stacks,
        }
    }
}

/// An activity stack in the serialized format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct StackRecord {
    uuid: Uuid,
    activity: ActivityType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    items: Vec<ResourceRecord>,
}

/// A resource entry in the serialized format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ResourceRecord {
    uuid: Uuid,
    created: DateTime<Utc>,
    data_unit: DataUnit,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sub_text: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    translation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    audio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    link: Option<LinkRecord>,
}

/// A pool link in the serialized format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct LinkRecord {
    entry: Uuid,
    fingerprint: String,
}

impl From<Page> for PageFile {
    fn from(page: Page) -> Self {
        Self {
            stacks: page.stacks.into_iter().map(StackRecord::from).collect(),
        }
    }
}

impl From<PageFile> for Page {
    fn from(page_file: PageFile) -> Self {
        Self {
            stacks: page_file.stacks.into_iter().map(Stack::from).collect(),
        }
    }
}

impl From<Stack> for StackRecord {
    fn from(stack: Stack) -> Self {
        let Stack {
            uuid,
            activity,
            items,
        } = stack;
        Self {
            uuid,
            activity,
            items: items.into_iter().map(ResourceRecord::from).collect(),
        }
    }
}

impl From<StackRecord> for Stack {
    fn from(record: StackRecord) -> Self {
        let StackRecord {
            uuid,
            activity,
            items,
        } = record;
        Self {
            uuid,
            activity,
            items: items.into_iter().map(Resource::from).collect(),
        }
    }
}

impl From<Resource> for ResourceRecord {
    fn from(resource: Resource) -> Self {
        let Resource {
            content:
                Content {
                    text,
                    sub_text,
                    translation,
                },
            metadata:
                Metadata {
                    uuid,
                    created,
                    data_unit,
                    link,
                },
            media: Media { audio, image },
        } = resource;

        Self {
            uuid,
            created,
            data_unit,
            text,
            sub_text,
            translation,
            audio,
            image,
            link: link.map(|PoolLink { entry, fingerprint }| LinkRecord { entry, fingerprint }),
        }
    }
}

impl From<ResourceRecord> for Resource {
    fn from(record: ResourceRecord) -> Self {
        let ResourceRecord {
            uuid,
            created,
            data_unit,
            text,
            sub_text,
            translation,
            audio,
            image,
            link,
        } = record;

        Self {
            content: Content {
                text,
                sub_text,
                translation,
            },
            metadata: Metadata {
                uuid,
                created,
                data_unit,
                link: link.map(|LinkRecord { entry, fingerprint }| PoolLink { entry, fingerprint }),
            },
            media: Media { audio, image },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use tempfile::TempDir;

    use super::*;
    use crate::domain::{ActivityType, DataUnit, Page, Resource, Stack};

    fn sample_page() -> Page {
        let mut page = Page::new();
        let mut stack = Stack::new(ActivityType::Listening);
        stack.push_item(Resource::with_content(
            DataUnit::Sentence,
            "你/吃/饭".to_string(),
            Some("nǐ/chī/fàn".to_string()),
            "Do you eat?".to_string(),
        ));
        stack.push_item(Resource::new(DataUnit::Word));
        page.push_stack(stack);
        page
    }

    #[test]
    fn page_round_trip() {
        let page = sample_page();
        let page_file = PageFile::from(page.clone());

        let mut bytes: Vec<u8> = vec![];
        page_file.write(&mut bytes).unwrap();

        let mut reader = Cursor::new(bytes);
        let loaded = PageFile::read(&mut reader).unwrap();

        assert_eq!(Page::from(loaded), page);
    }

    #[test]
    fn document_carries_version_tag() {
        let page_file = PageFile::from(sample_page());
        let mut bytes: Vec<u8> = vec![];
        page_file.write(&mut bytes).unwrap();

        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains(r#""_version": "1""#));
    }

    #[test]
    fn linked_item_round_trips() {
        let pool_entry = Resource::with_content(
            DataUnit::Word,
            "猫".to_string(),
            None,
            "cat".to_string(),
        );
        let mut item = Resource::new(DataUnit::Word);
        item.link_to(&pool_entry);

        let mut page = Page::new();
        let mut stack = Stack::new(ActivityType::DragDrop);
        stack.push_item(item.clone());
        page.push_stack(stack);

        let mut bytes: Vec<u8> = vec![];
        PageFile::from(page).write(&mut bytes).unwrap();
        let loaded = Page::from(PageFile::read(&mut Cursor::new(bytes)).unwrap());

        let reloaded = &loaded.stacks()[0].items()[0];
        assert_eq!(reloaded.link(), item.link());
        assert_eq!(reloaded.text(), "猫");
    }

    #[test]
    fn unknown_version_is_rejected() {
        let input = r#"{"_version": "99", "stacks": []}"#;
        let result = PageFile::read(&mut Cursor::new(input));
        assert!(matches!(result, Err(LoadError::Json(_))));
    }

    #[test]
    fn invalid_json_is_rejected() {
        let result = PageFile::read(&mut Cursor::new("not json"));
        assert!(matches!(result, Err(LoadError::Json(_))));
    }

    #[test]
    fn save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("chinese/2A/001/page-1.json");
        let page_file = PageFile::from(sample_page());

        page_file.save_to_path(&path).unwrap();
        let loaded = PageFile::load_from_path(&path).unwrap();

        assert_eq!(loaded, page_file);
    }

    #[test]
    fn load_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = PageFile::load_from_path(&temp_dir.path().join("missing.json"));
        assert!(matches!(result, Err(LoadError::NotFound)));
    }
}

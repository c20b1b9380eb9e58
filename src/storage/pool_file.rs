use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};

use super::page_file::{LoadError, ResourceRecord};
use crate::domain::{Pool, Resource};

/// The shared asset pool serialized as a versioned JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PoolFileVersion", into = "PoolFileVersion")]
pub struct PoolFile {
    entries: Vec<ResourceRecord>,
}

impl PoolFile {
    pub(crate) fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, self)?;
        writer.write_all(b"\n")
    }

    pub(crate) fn read<R: BufRead>(reader: &mut R) -> Result<Self, LoadError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Writes the pool to a specific file path.
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

    /// Reads a pool from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist, cannot be read, or does
    /// not parse as a pool document.
    pub fn load_from_path(file_path: &Path) -> Result<Self, LoadError> {
        let file = File::open(file_path).map_err(|io_error| match io_error.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound,
            _ => LoadError::Io(io_error),
        })?;

        let mut reader = BufReader::new(file);
        Self::read(&mut reader)
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum PoolFileVersion {
    #[serde(rename = "1")]
    V1 { entries: Vec<ResourceRecord> },
}

impl From<PoolFileVersion> for PoolFile {
    fn from(version: PoolFileVersion) -> Self {
        match version {
            PoolFileVersion::V1 { entries } => Self { entries },
        }
    }
}

impl From<PoolFile> for PoolFileVersion {
    fn from(pool_file: PoolFile) -> Self {
        Self::V1 {
            entries: pool_file.entries,
        }
    }
}

impl From<Pool> for PoolFile {
    fn from(pool: Pool) -> Self {
        Self {
            entries: pool.entries.into_iter().map(ResourceRecord::from).collect(),
        }
    }
}

impl From<PoolFile> for Pool {
    fn from(pool_file: PoolFile) -> Self {
        Self {
            entries: pool_file.entries.into_iter().map(Resource::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::domain::{DataUnit, Resource};

    #[test]
    fn pool_round_trip() {
        let mut pool = Pool::new();
        pool.insert(Resource::with_content(
            DataUnit::Word,
            "猫".to_string(),
            Some("māo".to_string()),
            "cat".to_string(),
        ))
        .unwrap();

        let mut bytes: Vec<u8> = vec![];
        PoolFile::from(pool.clone()).write(&mut bytes).unwrap();
        let loaded = Pool::from(PoolFile::read(&mut Cursor::new(bytes)).unwrap());

        assert_eq!(loaded, pool);
    }

    #[test]
    fn empty_pool_round_trip() {
        let mut bytes: Vec<u8> = vec![];
        PoolFile::from(Pool::new()).write(&mut bytes).unwrap();
        let loaded = Pool::from(PoolFile::read(&mut Cursor::new(bytes)).unwrap());

        assert!(loaded.is_empty());
    }
}

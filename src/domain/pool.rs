use uuid::Uuid;

use super::resource::Resource;

/// The shared asset pool: reusable entries that page items may mirror
/// instead of duplicating content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pool {
    pub(crate) entries: Vec<Resource>,
}

/// Error returned when inserting an entry whose UUID is already present.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("pool already contains an entry with id {0}")]
pub struct DuplicateEntryError(pub Uuid);

impl Pool {
    /// Create an empty pool.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// The entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[Resource] {
        &self.entries
    }

    /// The entry with the given UUID.
    #[must_use]
    pub fn get(&self, uuid: Uuid) -> Option<&Resource> {
        self.entries.iter().find(|entry| entry.uuid() == uuid)
    }

    /// Mutable access to the entry with the given UUID.
    pub fn get_mut(&mut self, uuid: Uuid) -> Option<&mut Resource> {
        self.entries.iter_mut().find(|entry| entry.uuid() == uuid)
    }

    /// Insert an entry.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateEntryError`] if an entry with the same UUID is
    /// already present.
    pub fn insert(&mut self, entry: Resource) -> Result<(), DuplicateEntryError> {
        if self.get(entry.uuid()).is_some() {
            return Err(DuplicateEntryError(entry.uuid()));
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Remove the entry with the given UUID, returning it if found.
    ///
    /// Page items linked to a removed entry keep their dangling link; the
    /// condition is reported by validation, not prevented here.
    pub fn remove(&mut self, uuid: Uuid) -> Option<Resource> {
        let position = self.entries.iter().position(|entry| entry.uuid() == uuid)?;
        Some(self.entries.remove(position))
    }

    /// The number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the pool holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DataUnit;

    #[test]
    fn insert_rejects_duplicate_uuid() {
        let mut pool = Pool::new();
        let entry = Resource::new(DataUnit::Word);
        let duplicate = entry.clone();

        pool.insert(entry).unwrap();
        assert!(matches!(
            pool.insert(duplicate),
            Err(DuplicateEntryError(_))
        ));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn get_and_remove_by_uuid() {
        let mut pool = Pool::new();
        let entry = Resource::new(DataUnit::Phrase);
        let uuid = entry.uuid();
        pool.insert(entry).unwrap();

        assert!(pool.get(uuid).is_some());
        assert!(pool.remove(uuid).is_some());
        assert!(pool.get(uuid).is_none());
    }
}

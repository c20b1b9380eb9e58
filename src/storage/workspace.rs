//! A filesystem backed store of pages and the shared asset pool.
//!
//! The [`Workspace`] eagerly loads the configuration, the pool, and every
//! page document under the root, exposes the editing operations, and writes
//! changes back on [`Workspace::flush`].

use std::{
    collections::BTreeMap,
    ffi::OsStr,
    fmt, io,
    path::{Path, PathBuf},
};

use nonempty::NonEmpty;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use uuid::Uuid;
use walkdir::WalkDir;

use super::{
    page_file::{LoadError, PageFile},
    path_parser::{locator_from_path, path_from_locator},
    pool_file::PoolFile,
};
use crate::domain::{
    ActivityType, Config, DuplicateEntryError, EditError, Locator, Page, Pool, Resource, Stack,
};
use crate::segment;

const DOT_DIR: &str = ".larc";

/// A page held in memory together with where it came from.
#[derive(Debug, Clone, PartialEq)]
struct PageState {
    page: Page,
    path: PathBuf,
    dirty: bool,
}

/// A filesystem backed content workspace.
pub struct Workspace {
    /// The root of the directory pages are stored in.
    root: PathBuf,
    config: Config,
    pool: Pool,
    pages: BTreeMap<Locator, PageState>,
    pool_dirty: bool,
}

impl Workspace {
    /// Opens the workspace at the given path, loading the configuration,
    /// the pool, and all page documents.
    ///
    /// # Errors
    ///
    /// If `allow_unrecognised` is `false` (the default), any JSON file in
    /// the tree whose path does not parse as a page locator, or that cannot
    /// be parsed as a page document, is an error. If `true`, such files are
    /// skipped with a debug log. A malformed pool document is always an
    /// error.
    pub fn open(root: PathBuf) -> Result<Self, OpenError> {
        let config = load_config(&root);
        let json_paths = collect_json_paths(&root);

        let (pages, unrecognised_paths): (Vec<_>, Vec<_>) = json_paths
            .par_iter()
            .map(|path| try_load_page(path, &root))
            .partition(Result::is_ok);

        let pages: Vec<_> = pages.into_iter().map(Result::unwrap).collect();
        let unrecognised_paths: Vec<_> = unrecognised_paths
            .into_iter()
            .map(Result::unwrap_err)
            .collect();

        if !config.allow_unrecognised && !unrecognised_paths.is_empty() {
            return Err(OpenError::UnrecognisedFiles(unrecognised_paths));
        }

        let pool_path = root.join(DOT_DIR).join("pool.json");
        let pool = match PoolFile::load_from_path(&pool_path) {
            Ok(pool_file) => Pool::from(pool_file),
            Err(LoadError::NotFound) => Pool::new(),
            Err(e) => return Err(OpenError::Pool(e)),
        };

        let pages = pages
            .into_iter()
            .map(|(locator, page, path)| {
                (
                    locator,
                    PageState {
                        page,
                        path,
                        dirty: false,
                    },
                )
            })
            .collect();

        Ok(Self {
            root,
            config,
            pool,
            pages,
            pool_dirty: false,
        })
    }

    /// The workspace root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The workspace configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The shared asset pool.
    #[must_use]
    pub const fn pool(&self) -> &Pool {
        &self.pool
    }

    /// The pages in locator order.
    pub fn pages(&self) -> impl Iterator<Item = (&Locator, &Page)> {
        self.pages.iter().map(|(locator, state)| (locator, &state.page))
    }

    /// The page at the given locator.
    #[must_use]
    pub fn page(&self, locator: &Locator) -> Option<&Page> {
        self.pages.get(locator).map(|state| &state.page)
    }

    /// The number of pages.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// The number of stacks across all pages.
    #[must_use]
    pub fn stack_count(&self) -> usize {
        self.pages
            .values()
            .map(|state| state.page.stacks().len())
            .sum()
    }

    /// The number of items across all pages.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.pages.values().map(|state| state.page.item_count()).sum()
    }

    /// Append an activity stack to a page, creating the page on first use.
    ///
    /// Returns the 1-based position of the new stack.
    ///
    /// # Errors
    ///
    /// Returns an error if the locator's level is not allowed by the
    /// configuration.
    pub fn create_stack(
        &mut self,
        locator: &Locator,
        activity: ActivityType,
    ) -> Result<usize, WorkspaceError> {
        if !self.config.is_level_allowed(locator.level()) {
            return Err(WorkspaceError::LevelNotAllowed(
                locator.level().as_str().to_string(),
            ));
        }

        let path = path_from_locator(&self.root, locator, self.config.set_digits());
        let state = self.pages.entry(locator.clone()).or_insert_with(|| PageState {
            page: Page::new(),
            path,
            dirty: false,
        });

        let position = state.page.push_stack(Stack::new(activity));
        state.dirty = true;

        tracing::info!("Added stack {} to {}", position, locator);

        Ok(position)
    }

    /// Append an item to a stack.
    ///
    /// `stack` is the 1-based position shown by listings.
    ///
    /// # Errors
    ///
    /// Returns an error if the page or stack does not exist.
    pub fn add_item(
        &mut self,
        locator: &Locator,
        stack: usize,
        item: Resource,
    ) -> Result<(), WorkspaceError> {
        let state = self.stack_mut(locator, stack)?;
        state.push_item(item);
        self.mark_dirty(locator);
        Ok(())
    }

    /// Remove a stack from a page, returning it.
    ///
    /// # Errors
    ///
    /// Returns an error if the page or stack does not exist.
    pub fn remove_stack(&mut self, locator: &Locator, stack: usize) -> Result<Stack, WorkspaceError> {
        let uuid = self.stack_mut(locator, stack)?.uuid();
        let state = self
            .pages
            .get_mut(locator)
            .ok_or_else(|| WorkspaceError::PageNotFound(locator.clone()))?;
        let removed = state
            .page
            .remove_stack(uuid)
            .ok_or(WorkspaceError::StackNotFound {
                locator: locator.clone(),
                stack,
            })?;
        state.dirty = true;
        Ok(removed)
    }

    /// Remove an item from a stack, returning it.
    ///
    /// # Errors
    ///
    /// Returns an error if the page, stack, or item does not exist.
    pub fn remove_item(
        &mut self,
        locator: &Locator,
        stack: usize,
        item: usize,
    ) -> Result<Resource, WorkspaceError> {
        let uuid = self.item_ref(locator, stack, item)?.uuid();
        let removed = self
            .stack_mut(locator, stack)?
            .remove_item(uuid)
            .ok_or(WorkspaceError::ItemNotFound {
                locator: locator.clone(),
                stack,
                item,
            })?;
        self.mark_dirty(locator);
        Ok(removed)
    }

    /// Edit an item's primary text, syncing its secondary field.
    ///
    /// Returns whether the fields are mismatched after the edit (advisory;
    /// the edit is applied regardless).
    ///
    /// # Errors
    ///
    /// Returns an error if the item does not exist or is linked.
    pub fn set_item_text(
        &mut self,
        locator: &Locator,
        stack: usize,
        item: usize,
        text: &str,
    ) -> Result<bool, WorkspaceError> {
        let resource = self.item_mut(locator, stack, item)?;
        resource.set_text(text)?;
        let mismatched = resource.is_mismatched();
        self.mark_dirty(locator);
        Ok(mismatched)
    }

    /// Replace an item's secondary field.
    ///
    /// Returns whether the fields are mismatched after the edit.
    ///
    /// # Errors
    ///
    /// Returns an error if the item does not exist or is linked.
    pub fn set_item_sub_text(
        &mut self,
        locator: &Locator,
        stack: usize,
        item: usize,
        sub_text: &str,
    ) -> Result<bool, WorkspaceError> {
        let resource = self.item_mut(locator, stack, item)?;
        resource.set_sub_text(sub_text)?;
        let mismatched = resource.is_mismatched();
        self.mark_dirty(locator);
        Ok(mismatched)
    }

    /// Replace an item's translation.
    ///
    /// # Errors
    ///
    /// Returns an error if the item does not exist or is linked.
    pub fn set_item_translation(
        &mut self,
        locator: &Locator,
        stack: usize,
        item: usize,
        translation: &str,
    ) -> Result<(), WorkspaceError> {
        self.item_mut(locator, stack, item)?
            .set_translation(translation)?;
        self.mark_dirty(locator);
        Ok(())
    }

    /// Merge two adjacent segments of an item's primary text.
    ///
    /// `segment` is the 1-based position of the left-hand segment. Returns
    /// whether anything changed (out-of-range positions are a no-op).
    ///
    /// # Errors
    ///
    /// Returns an error if the item does not exist or is linked.
    pub fn merge_item_segments(
        &mut self,
        locator: &Locator,
        stack: usize,
        item: usize,
        segment: usize,
    ) -> Result<bool, WorkspaceError> {
        let index = segment
            .checked_sub(1)
            .ok_or(WorkspaceError::SegmentOutOfRange(segment))?;
        let resource = self.item_mut(locator, stack, item)?;
        let changed = resource.merge_segments(index)?;
        if changed {
            self.mark_dirty(locator);
        }
        Ok(changed)
    }

    /// Link an item to a pool entry, mirroring its content.
    ///
    /// # Errors
    ///
    /// Returns an error if the item or the pool entry does not exist.
    pub fn link_item(
        &mut self,
        locator: &Locator,
        stack: usize,
        item: usize,
        entry: Uuid,
    ) -> Result<(), WorkspaceError> {
        let entry = self
            .pool
            .get(entry)
            .cloned()
            .ok_or(WorkspaceError::PoolEntryNotFound(entry))?;
        let resource = self.item_mut(locator, stack, item)?;
        resource.link_to(&entry);
        self.mark_dirty(locator);
        Ok(())
    }

    /// Detach an item from its pool entry, keeping the copied content.
    ///
    /// Returns whether the text changed through auto-segmentation.
    ///
    /// # Errors
    ///
    /// Returns an error if the item does not exist or is not linked.
    pub fn unlink_item(
        &mut self,
        locator: &Locator,
        stack: usize,
        item: usize,
    ) -> Result<bool, WorkspaceError> {
        let subject = locator.subject();
        let resource = self.item_mut(locator, stack, item)?;
        if !resource.is_linked() {
            return Err(WorkspaceError::NotLinked);
        }
        let changed = resource.detach(subject);
        self.mark_dirty(locator);
        Ok(changed)
    }

    /// Add an entry to the shared pool.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry with the same UUID already exists.
    pub fn add_pool_entry(&mut self, entry: Resource) -> Result<(), WorkspaceError> {
        self.pool.insert(entry)?;
        self.pool_dirty = true;
        Ok(())
    }

    /// Remove an entry from the shared pool, returning it.
    ///
    /// Items linked to the removed entry keep a dangling link, reported by
    /// [`Workspace::dangling_links`].
    ///
    /// # Errors
    ///
    /// Returns an error if no entry with the given UUID exists.
    pub fn remove_pool_entry(&mut self, uuid: Uuid) -> Result<Resource, WorkspaceError> {
        let removed = self
            .pool
            .remove(uuid)
            .ok_or(WorkspaceError::PoolEntryNotFound(uuid))?;
        self.pool_dirty = true;
        Ok(removed)
    }

    /// Edit a pool entry's primary text, syncing its secondary field.
    ///
    /// Returns whether the fields are mismatched after the edit. Linked page
    /// items are not rewritten; they become stale and are reported by
    /// [`Workspace::stale_links`].
    ///
    /// # Errors
    ///
    /// Returns an error if no entry with the given UUID exists.
    pub fn set_pool_entry_text(&mut self, uuid: Uuid, text: &str) -> Result<bool, WorkspaceError> {
        let entry = self
            .pool
            .get_mut(uuid)
            .ok_or(WorkspaceError::PoolEntryNotFound(uuid))?;
        entry.set_text(text)?;
        let mismatched = entry.is_mismatched();
        self.pool_dirty = true;
        Ok(mismatched)
    }

    /// The number of page items linked to the given pool entry.
    #[must_use]
    pub fn linked_item_count(&self, entry: Uuid) -> usize {
        self.items()
            .filter(|(_, _, _, resource)| {
                resource.link().is_some_and(|link| link.entry == entry)
            })
            .count()
    }

    /// The audio file name an item presents: its own, or the pool entry's
    /// while linked.
    #[must_use]
    pub fn resolved_audio<'a>(&'a self, resource: &'a Resource) -> Option<&'a str> {
        match resource.link() {
            Some(link) => self.pool.get(link.entry).and_then(|entry| entry.audio()),
            None => resource.audio(),
        }
    }

    /// The image file name an item presents: its own, or the pool entry's
    /// while linked.
    #[must_use]
    pub fn resolved_image<'a>(&'a self, resource: &'a Resource) -> Option<&'a str> {
        match resource.link() {
            Some(link) => self.pool.get(link.entry).and_then(|entry| entry.image()),
            None => resource.image(),
        }
    }

    /// All items whose primary and secondary fields disagree on segment
    /// count. Advisory: mismatches never block edits or saves.
    #[must_use]
    pub fn mismatches(&self) -> Vec<Mismatch> {
        self.items()
            .filter(|(_, _, _, resource)| resource.is_mismatched())
            .map(|(locator, stack, item, resource)| Mismatch {
                locator: locator.clone(),
                stack,
                item,
                primary_segments: segment::split(resource.text()).len(),
                secondary_segments: segment::split_preserving(
                    resource.sub_text().unwrap_or(""),
                )
                .len(),
            })
            .collect()
    }

    /// All links whose recorded fingerprint no longer matches the pool
    /// entry's current content.
    #[must_use]
    pub fn stale_links(&self) -> Vec<StaleLink> {
        self.items()
            .filter_map(|(locator, stack, item, resource)| {
                let link = resource.link()?;
                let entry = self.pool.get(link.entry)?;
                let current = entry.fingerprint();
                if current == link.fingerprint {
                    return None;
                }
                Some(StaleLink {
                    locator: locator.clone(),
                    stack,
                    item,
                    entry: link.entry,
                    stored_fingerprint: link.fingerprint.clone(),
                    current_fingerprint: current,
                })
            })
            .collect()
    }

    /// All links that point at a pool entry which no longer exists.
    #[must_use]
    pub fn dangling_links(&self) -> Vec<DanglingLink> {
        self.items()
            .filter_map(|(locator, stack, item, resource)| {
                let link = resource.link()?;
                if self.pool.get(link.entry).is_some() {
                    return None;
                }
                Some(DanglingLink {
                    locator: locator.clone(),
                    stack,
                    item,
                    entry: link.entry,
                })
            })
            .collect()
    }

    /// Pages whose file is not at the canonical location for the current
    /// configuration (e.g. after a `set_digits` change).
    #[must_use]
    pub fn misplaced_pages(&self) -> Vec<(Locator, PathBuf, PathBuf)> {
        self.pages
            .iter()
            .filter_map(|(locator, state)| {
                let canonical = path_from_locator(&self.root, locator, self.config.set_digits());
                if state.path == canonical {
                    None
                } else {
                    Some((locator.clone(), state.path.clone(), canonical))
                }
            })
            .collect()
    }

    /// Refresh one stale link by re-copying the pool entry's content and
    /// recording its current fingerprint.
    ///
    /// # Errors
    ///
    /// Returns an error if the item does not exist, is not linked, or its
    /// pool entry is gone.
    pub fn accept_stale_link(
        &mut self,
        locator: &Locator,
        stack: usize,
        item: usize,
    ) -> Result<AcceptResult, WorkspaceError> {
        let link = self
            .item_ref(locator, stack, item)?
            .link()
            .cloned()
            .ok_or(WorkspaceError::NotLinked)?;

        let entry = self
            .pool
            .get(link.entry)
            .cloned()
            .ok_or(WorkspaceError::PoolEntryNotFound(link.entry))?;

        if entry.fingerprint() == link.fingerprint {
            return Ok(AcceptResult::AlreadyUpToDate);
        }

        let resource = self.item_mut(locator, stack, item)?;
        resource.link_to(&entry);
        self.mark_dirty(locator);
        Ok(AcceptResult::Updated)
    }

    /// Refresh every stale link. Returns the links that were refreshed.
    pub fn accept_all_stale_links(&mut self) -> Vec<StaleLink> {
        let stale = self.stale_links();
        for link in &stale {
            // Reports carry 1-based positions, which is what accept takes.
            let _ = self.accept_stale_link(&link.locator, link.stack, link.item);
        }
        stale
    }

    /// Write dirty pages and the pool back to disk.
    ///
    /// # Errors
    ///
    /// This method does *not* fail fast: it attempts every write before
    /// returning the aggregated failures.
    pub fn flush(&mut self) -> Result<(), FlushError> {
        let mut failures = Vec::new();

        for state in self.pages.values_mut() {
            if !state.dirty {
                continue;
            }
            match PageFile::from(state.page.clone()).save_to_path(&state.path) {
                Ok(()) => state.dirty = false,
                Err(e) => failures.push((state.path.clone(), e)),
            }
        }

        if self.pool_dirty {
            let path = self.root.join(DOT_DIR).join("pool.json");
            match PoolFile::from(self.pool.clone()).save_to_path(&path) {
                Ok(()) => self.pool_dirty = false,
                Err(e) => failures.push((path, e)),
            }
        }

        NonEmpty::from_vec(failures).map_or(Ok(()), |failures| Err(FlushError { failures }))
    }

    /// All items with their locator and 1-based stack/item positions.
    fn items(&self) -> impl Iterator<Item = (&Locator, usize, usize, &Resource)> {
        self.pages.iter().flat_map(|(locator, state)| {
            state
                .page
                .stacks()
                .iter()
                .enumerate()
                .flat_map(move |(stack_idx, stack)| {
                    stack
                        .items()
                        .iter()
                        .enumerate()
                        .map(move |(item_idx, resource)| {
                            (locator, stack_idx + 1, item_idx + 1, resource)
                        })
                })
        })
    }

    fn mark_dirty(&mut self, locator: &Locator) {
        if let Some(state) = self.pages.get_mut(locator) {
            state.dirty = true;
        }
    }

    fn stack_mut(&mut self, locator: &Locator, stack: usize) -> Result<&mut Stack, WorkspaceError> {
        let index = stack
            .checked_sub(1)
            .ok_or(WorkspaceError::StackNotFound {
                locator: locator.clone(),
                stack,
            })?;
        let state = self
            .pages
            .get_mut(locator)
            .ok_or_else(|| WorkspaceError::PageNotFound(locator.clone()))?;
        state
            .page
            .stack_mut(index)
            .ok_or(WorkspaceError::StackNotFound {
                locator: locator.clone(),
                stack,
            })
    }

    fn item_ref(
        &self,
        locator: &Locator,
        stack: usize,
        item: usize,
    ) -> Result<&Resource, WorkspaceError> {
        let stack_index = stack.checked_sub(1).ok_or(WorkspaceError::StackNotFound {
            locator: locator.clone(),
            stack,
        })?;
        let page = self
            .page(locator)
            .ok_or_else(|| WorkspaceError::PageNotFound(locator.clone()))?;
        let found = page
            .stack(stack_index)
            .ok_or(WorkspaceError::StackNotFound {
                locator: locator.clone(),
                stack,
            })?;
        item.checked_sub(1)
            .and_then(|index| found.item(index))
            .ok_or(WorkspaceError::ItemNotFound {
                locator: locator.clone(),
                stack,
                item,
            })
    }

    fn item_mut(
        &mut self,
        locator: &Locator,
        stack: usize,
        item: usize,
    ) -> Result<&mut Resource, WorkspaceError> {
        let found = self.stack_mut(locator, stack)?;
        item.checked_sub(1)
            .and_then(|index| found.item_mut(index))
            .ok_or(WorkspaceError::ItemNotFound {
                locator: locator.clone(),
                stack,
                item,
            })
    }
}

/// An item whose primary and secondary fields disagree on segment count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// The page the item is on.
    pub locator: Locator,
    /// 1-based stack position.
    pub stack: usize,
    /// 1-based item position within the stack.
    pub item: usize,
    /// Segment count of the primary field.
    pub primary_segments: usize,
    /// Segment count of the secondary field.
    pub secondary_segments: usize,
}

/// A link whose pool entry has changed since the link was recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleLink {
    /// The page the item is on.
    pub locator: Locator,
    /// 1-based stack position.
    pub stack: usize,
    /// 1-based item position within the stack.
    pub item: usize,
    /// The mirrored pool entry.
    pub entry: Uuid,
    /// Fingerprint recorded at link time.
    pub stored_fingerprint: String,
    /// The pool entry's current fingerprint.
    pub current_fingerprint: String,
}

/// A link whose pool entry no longer exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingLink {
    /// The page the item is on.
    pub locator: Locator,
    /// 1-based stack position.
    pub stack: usize,
    /// 1-based item position within the stack.
    pub item: usize,
    /// The missing pool entry.
    pub entry: Uuid,
}

/// The outcome of accepting a stale link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptResult {
    /// The link was refreshed from the pool entry.
    Updated,
    /// The link was already current.
    AlreadyUpToDate,
}

/// Errors from workspace editing operations.
#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    /// No page exists at the locator.
    #[error("page {0} not found")]
    PageNotFound(Locator),

    /// The page has no stack at the given position.
    #[error("page {locator} has no stack {stack}")]
    StackNotFound {
        /// The page.
        locator: Locator,
        /// The 1-based stack position.
        stack: usize,
    },

    /// The stack has no item at the given position.
    #[error("stack {stack} on page {locator} has no item {item}")]
    ItemNotFound {
        /// The page.
        locator: Locator,
        /// The 1-based stack position.
        stack: usize,
        /// The 1-based item position.
        item: usize,
    },

    /// No pool entry with the given UUID exists.
    #[error("pool entry {0} not found")]
    PoolEntryNotFound(Uuid),

    /// The item is not linked to a pool entry.
    #[error("item is not linked to a pool entry")]
    NotLinked,

    /// Segment positions are 1-based.
    #[error("segment position {0} is out of range")]
    SegmentOutOfRange(usize),

    /// The locator's level is not in the configured allow-list.
    #[error("level '{0}' is not allowed by the workspace configuration")]
    LevelNotAllowed(String),

    /// The edit is not permitted on the item.
    #[error(transparent)]
    Edit(#[from] EditError),

    /// The pool already contains the entry.
    #[error(transparent)]
    DuplicateEntry(#[from] DuplicateEntryError),
}

/// Errors from opening a workspace.
#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    /// JSON files that are not recognisable page documents.
    UnrecognisedFiles(Vec<PathBuf>),

    /// The pool document could not be loaded.
    Pool(LoadError),
}

impl fmt::Display for OpenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognisedFiles(paths) => {
                write!(f, "Unrecognised files: ")?;
                for (i, path) in paths.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", path.display())?;
                }
                Ok(())
            }
            Self::Pool(e) => write!(f, "failed to load pool: {e}"),
        }
    }
}

/// Aggregated write failures from [`Workspace::flush`].
#[derive(Debug, thiserror::Error)]
pub struct FlushError {
    failures: NonEmpty<(PathBuf, io::Error)>,
}

impl fmt::Display for FlushError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const MAX_DISPLAY: usize = 5;

        write!(f, "failed to write workspace: ")?;

        let total = self.failures.len();

        let displayed_paths: Vec<String> = self
            .failures
            .iter()
            .take(MAX_DISPLAY)
            .map(|(p, _e)| p.display().to_string())
            .collect();

        let msg = displayed_paths.join(", ");

        if total <= MAX_DISPLAY {
            write!(f, "{msg}")
        } else {
            write!(f, "{msg}... (and {} more)", total - MAX_DISPLAY)
        }
    }
}

fn load_config(root: &Path) -> Config {
    let path = root.join(DOT_DIR).join("config.toml");
    Config::load(&path).unwrap_or_else(|e| {
        tracing::debug!("Failed to load config: {e}");
        Config::default()
    })
}

fn collect_json_paths(root: &PathBuf) -> Vec<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| {
            // Skip the .larc directory (config and pool live there).
            !entry.path().components().any(|c| c.as_os_str() == DOT_DIR)
        })
        .filter(|entry| entry.path().extension() == Some(OsStr::new("json")))
        .map(walkdir::DirEntry::into_path)
        .collect()
}

fn try_load_page(path: &Path, root: &Path) -> Result<(Locator, Page, PathBuf), PathBuf> {
    let locator = match locator_from_path(path, root) {
        Ok(locator) => locator,
        Err(e) => {
            tracing::debug!(
                "Skipping file with invalid locator at {}: {:?}",
                path.display(),
                e
            );
            return Err(path.to_path_buf());
        }
    };

    match PageFile::load_from_path(path) {
        Ok(page_file) => Ok((locator, Page::from(page_file), path.to_path_buf())),
        Err(e) => {
            tracing::debug!("Failed to load page from {}: {:?}", path.display(), e);
            Err(path.to_path_buf())
        }
    }
}

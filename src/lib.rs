//! Structured language-learning content authoring.
//!
//! Content is organised hierarchically (subject, level, set, page) into
//! activity stacks of resource entries, with a shared asset pool that page
//! items may mirror. Entries carry a slash-segmented text and an optional
//! parallel annotation kept in lockstep by the [`segment`] engine. Pages are
//! stored as JSON documents in a directory tree and can be exported as
//! flattened JSON or CSV.

pub mod domain;
pub use domain::{Config, Locator, Page, Pool, Resource, Stack, Subject};

/// Slash-delimited segmentation of paired text fields.
pub mod segment;

/// Filesystem storage and workspace management for pages and the pool.
pub mod storage;
pub use storage::{AcceptResult, Workspace};

/// Flattened JSON and CSV export.
pub mod export;

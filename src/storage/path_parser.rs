//! Path construction for pages.
//!
//! Pages are stored one JSON document per page at
//! `root/{subject}/{level}/{set}/page-{n}.json`, with the set directory
//! zero-padded to the configured digit width:
//!
//! - `chinese-2A-001-3` → `root/chinese/2A/001/page-3.json`

use std::{
    num::NonZeroUsize,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;

use crate::domain::{locator::Level, Locator, Subject};

static PAGE_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^page-([1-9][0-9]*)\.json$").expect("valid regex"));

/// Construct the file path for a page from its locator.
///
/// # Arguments
///
/// * `root` - The root directory of the workspace
/// * `locator` - The page coordinate
/// * `set_digits` - Number of digits to pad the set number (e.g. 3 for
///   "001")
#[must_use]
pub fn path_from_locator(root: &Path, locator: &Locator, set_digits: usize) -> PathBuf {
    root.join(locator.subject().as_str())
        .join(locator.level().as_str())
        .join(format!("{:0width$}", locator.set(), width = set_digits))
        .join(format!("page-{}.json", locator.page()))
}

/// Extract a page locator from a file path.
///
/// This is the inverse of [`path_from_locator`]. Set directories are
/// accepted at any padding width.
///
/// # Errors
///
/// Returns an error if the path is not under the root or any component
/// fails to parse.
pub fn locator_from_path(path: &Path, root: &Path) -> Result<Locator, ParseError> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| ParseError::NotUnderRoot {
            path: path.to_path_buf(),
            root: root.to_path_buf(),
        })?;

    let components: Vec<String> = relative
        .components()
        .map(|c| {
            c.as_os_str()
                .to_str()
                .map(ToString::to_string)
                .ok_or_else(|| ParseError::Structure(relative.to_path_buf()))
        })
        .collect::<Result<_, _>>()?;

    let [subject, level, set, filename] = components.as_slice() else {
        return Err(ParseError::Structure(relative.to_path_buf()));
    };

    let subject: Subject = subject
        .parse()
        .map_err(|_| ParseError::Subject(subject.clone()))?;

    let level = Level::new(level.clone()).map_err(|_| ParseError::Level(level.clone()))?;

    let set = set
        .parse::<usize>()
        .ok()
        .and_then(NonZeroUsize::new)
        .ok_or_else(|| ParseError::Set(set.clone()))?;

    let page = PAGE_FILE
        .captures(filename)
        .and_then(|captures| captures[1].parse::<usize>().ok())
        .and_then(NonZeroUsize::new)
        .ok_or_else(|| ParseError::Filename(filename.clone()))?;

    Ok(Locator::new(subject, level, set, page))
}

/// Errors that can occur when parsing a locator from a path.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    /// The path is not inside the workspace root.
    #[error("path {path} is not under root {root}")]
    NotUnderRoot {
        /// The offending path.
        path: PathBuf,
        /// The workspace root.
        root: PathBuf,
    },

    /// The path does not have the `subject/level/set/page-n.json` shape.
    #[error("path {0} does not match subject/level/set/page-n.json")]
    Structure(PathBuf),

    /// The subject directory is not a known subject.
    #[error("unknown subject directory '{0}'")]
    Subject(String),

    /// The level directory is malformed.
    #[error("invalid level directory '{0}'")]
    Level(String),

    /// The set directory is not a positive integer.
    #[error("invalid set directory '{0}'")]
    Set(String),

    /// The file name is not `page-<n>.json`.
    #[error("invalid page file name '{0}'")]
    Filename(String),
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use test_case::test_case;

    use super::*;

    fn locator(s: &str) -> Locator {
        s.parse().unwrap()
    }

    #[test]
    fn construct_path_pads_set() {
        let root = PathBuf::from("/root");
        let path = path_from_locator(&root, &locator("chinese-2A-1-3"), 3);
        assert_eq!(path, root.join("chinese/2A/001/page-3.json"));
    }

    #[test]
    fn construct_path_with_custom_digits() {
        let root = PathBuf::from("/root");
        let path = path_from_locator(&root, &locator("japanese-4B-17-10"), 5);
        assert_eq!(path, root.join("japanese/4B/00017/page-10.json"));
    }

    #[test]
    fn parse_locator_from_path() {
        let root = PathBuf::from("/root");
        let path = root.join("chinese/2A/001/page-3.json");

        let parsed = locator_from_path(&path, &root).unwrap();
        assert_eq!(parsed, locator("chinese-2A-001-3"));
    }

    #[test]
    fn parse_accepts_any_set_padding() {
        let root = PathBuf::from("/root");
        let unpadded = locator_from_path(&root.join("chinese/2A/1/page-3.json"), &root).unwrap();
        let padded = locator_from_path(&root.join("chinese/2A/0001/page-3.json"), &root).unwrap();
        assert_eq!(unpadded, padded);
    }

    #[test]
    fn parse_rejects_path_outside_root() {
        let root = PathBuf::from("/root");
        let path = PathBuf::from("/other/chinese/2A/001/page-3.json");
        assert!(matches!(
            locator_from_path(&path, &root),
            Err(ParseError::NotUnderRoot { .. })
        ));
    }

    #[test_case("chinese/2A/page-3.json"; "too shallow")]
    #[test_case("chinese/2A/001/extra/page-3.json"; "too deep")]
    fn parse_rejects_wrong_depth(relative: &str) {
        let root = PathBuf::from("/root");
        assert!(matches!(
            locator_from_path(&root.join(relative), &root),
            Err(ParseError::Structure(_))
        ));
    }

    #[test]
    fn parse_rejects_unknown_subject() {
        let root = PathBuf::from("/root");
        assert!(matches!(
            locator_from_path(&root.join("latin/2A/001/page-3.json"), &root),
            Err(ParseError::Subject(_))
        ));
    }

    #[test_case("page-0.json"; "zero page")]
    #[test_case("page-03.json"; "zero padded page")]
    #[test_case("page-three.json"; "non numeric page")]
    #[test_case("notes.json"; "not a page file")]
    fn parse_rejects_bad_filename(filename: &str) {
        let root = PathBuf::from("/root");
        let path = root.join("chinese/2A/001").join(filename);
        assert!(matches!(
            locator_from_path(&path, &root),
            Err(ParseError::Filename(_))
        ));
    }

    #[test_case("chinese-2A-001-3", 3; "three digits")]
    #[test_case("japanese-10B-020-1", 4; "four digits")]
    #[test_case("hanja-6A-007-9", 2; "two digits")]
    fn roundtrip(locator_str: &str, digits: usize) {
        let root = PathBuf::from("/root");
        let original = locator(locator_str);

        let path = path_from_locator(&root, &original, digits);
        let parsed = locator_from_path(&path, &root).unwrap();

        assert_eq!(original, parsed);
    }
}

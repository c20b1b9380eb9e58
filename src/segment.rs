//! Slash-delimited segmentation for paired text fields.
//!
//! A sentence entry carries a primary text (`你/吃/饭`) and, for annotated
//! subjects, a secondary text (`nǐ/chī/fàn`) that is expected to stay aligned
//! with it segment-for-segment. The functions here keep the two fields in
//! lockstep while the primary is edited, detect misalignment, merge adjacent
//! segments, and auto-segment undelimited text character by character.
//!
//! Every function is pure and total: empty input, missing delimiters, and
//! out-of-range indices degrade to empty sequences or no-ops, never panics.

use crate::domain::Subject;

/// The segment delimiter. Splitting is purely syntactic; there is no
/// escaping.
pub const DELIMITER: char = '/';

/// Splits a primary field into its non-empty, trimmed segments.
///
/// Empty input yields an empty vector, not a vector containing one empty
/// string.
///
/// ```
/// assert_eq!(architect::segment::split("a/b/c"), ["a", "b", "c"]);
/// assert_eq!(architect::segment::split(" a / b "), ["a", "b"]);
/// assert!(architect::segment::split("").is_empty());
/// ```
#[must_use]
pub fn split(s: &str) -> Vec<&str> {
    s.split(DELIMITER)
        .map(str::trim)
        .filter(|seg| !seg.is_empty())
        .collect()
}

/// Splits a secondary field, keeping empty segments as positional
/// placeholders.
///
/// Index `i` of the returned vector corresponds to segment `i` of the
/// primary field, so empties must survive. Segments are trimmed but never
/// filtered.
#[must_use]
pub fn split_preserving(s: &str) -> Vec<&str> {
    if s.is_empty() {
        return Vec::new();
    }
    s.split(DELIMITER).map(str::trim).collect()
}

/// Returns an updated secondary field after an edit to the primary field.
///
/// Called on every primary edit with the previous and next values. When the
/// delimiter count is unchanged the secondary passes through untouched. When
/// delimiters were inserted, empty placeholders are appended to the secondary
/// until its segment count matches. When delimiters were removed, the
/// trailing excess of the secondary is dropped (a lossy truncation, not a
/// merge).
///
/// One-shot promotion: at the moment the primary first gains delimiters, a
/// secondary that holds no `/` but whose space count equals the new delimiter
/// count has its spaces promoted to `/`. This catches the common case of a
/// pronunciation typed with spaces before the primary was segmented.
///
/// This is a best-effort heuristic for single-delimiter edits; a paste that
/// changes several delimiters at once can desynchronise the fields, which is
/// why [`is_mismatched`] exists as a safety net.
#[must_use]
pub fn sync_secondary(prev_primary: &str, next_primary: &str, secondary: &str) -> String {
    let prev_delims = count_delimiters(prev_primary);
    let next_delims = count_delimiters(next_primary);

    if next_delims == prev_delims {
        return secondary.to_string();
    }

    if next_delims > prev_delims {
        let promoted;
        let secondary = if !secondary.contains(DELIMITER)
            && secondary.chars().filter(|&c| c == ' ').count() == next_delims
        {
            promoted = secondary.replace(' ', "/");
            promoted.as_str()
        } else {
            secondary
        };

        let mut parts: Vec<&str> = secondary.split(DELIMITER).collect();
        if parts.len() >= next_delims + 1 {
            return secondary.to_string();
        }
        parts.resize(next_delims + 1, "");
        return parts.join("/");
    }

    // Delimiters were removed: keep the first next_delims + 1 parts.
    let parts: Vec<&str> = secondary.split(DELIMITER).collect();
    if parts.len() > next_delims + 1 {
        parts[..=next_delims].join("/")
    } else {
        secondary.to_string()
    }
}

/// Reports whether the two fields disagree on segment count.
///
/// An empty secondary never mismatches. The primary is counted with
/// [`split`] (filtered), the secondary with [`split_preserving`]
/// (placeholders count). Advisory only: a mismatch never blocks an edit or a
/// save.
#[must_use]
pub fn is_mismatched(primary: &str, secondary: &str) -> bool {
    if secondary.is_empty() {
        return false;
    }
    split(primary).len() != split_preserving(secondary).len()
}

/// The result of merging a pair of adjacent segments in both fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedPair {
    /// The primary field after the merge.
    pub primary: String,
    /// The secondary field after the merge (unchanged when unaligned).
    pub secondary: String,
}

/// Merges primary segments `index` and `index + 1` into one.
///
/// The primary segments are joined with a single space. The secondary is
/// mirrored only when its raw segment count equals the primary's, and its
/// segments are concatenated with no separator. The separator asymmetry is
/// intentional and preserved from the original behaviour.
///
/// Out-of-range indices (`index >= count - 1`) return both fields unchanged.
#[must_use]
pub fn merge_at(primary: &str, secondary: &str, index: usize) -> MergedPair {
    let parts: Vec<&str> = primary.split(DELIMITER).collect();
    if parts.len() < 2 || index >= parts.len() - 1 {
        return MergedPair {
            primary: primary.to_string(),
            secondary: secondary.to_string(),
        };
    }

    let merged_primary = merge_parts(&parts, index, " ");

    let sub_parts: Vec<&str> = secondary.split(DELIMITER).collect();
    let merged_secondary = if sub_parts.len() == parts.len() {
        merge_parts(&sub_parts, index, "")
    } else {
        secondary.to_string()
    };

    MergedPair {
        primary: merged_primary,
        secondary: merged_secondary,
    }
}

fn merge_parts(parts: &[&str], index: usize, separator: &str) -> String {
    let mut out: Vec<String> = Vec::with_capacity(parts.len() - 1);
    out.extend(parts[..index].iter().map(ToString::to_string));
    out.push(format!("{}{separator}{}", parts[index], parts[index + 1]));
    out.extend(parts[index + 2..].iter().map(ToString::to_string));
    out.join("/")
}

/// Auto-segments undelimited text character by character.
///
/// Applied when an entry is detached from the shared pool: for subjects
/// whose script is segmented per character (Chinese, Japanese), text that
/// holds no delimiter yet gains one between every non-whitespace character.
/// Already-delimited text and other subjects pass through unchanged.
#[must_use]
pub fn auto_segment(text: &str, subject: Subject) -> String {
    if !subject.uses_character_segmentation() || text.contains(DELIMITER) {
        return text.to_string();
    }
    text.chars()
        .filter(|c| !c.is_whitespace())
        .map(String::from)
        .collect::<Vec<_>>()
        .join("/")
}

fn count_delimiters(s: &str) -> usize {
    s.chars().filter(|&c| c == DELIMITER).count()
}

/// A proposed replacement for both fields of an entry, produced by an
/// external segmentation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentedPair {
    /// The proposed primary field.
    pub text: String,
    /// The proposed secondary field.
    pub sub_text: String,
}

/// Failure of an external segmentation provider.
///
/// Recoverable by design: callers leave the existing fields unchanged and
/// surface the message.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("segmentation provider failed: {0}")]
pub struct SegmenterError(pub String);

/// An external service that proposes a segmentation for a pair of fields.
///
/// The engine does not depend on the provider's internals; a successful
/// proposal replaces both fields wholesale, bypassing the sync heuristic.
pub trait Segmenter {
    /// Proposes a segmented pair for the given text and optional secondary.
    ///
    /// # Errors
    ///
    /// Returns a [`SegmenterError`] when the provider cannot produce a
    /// proposal; the caller must treat this as recoverable.
    fn propose(
        &self,
        text: &str,
        sub_text: Option<&str>,
        subject: Subject,
    ) -> Result<SegmentedPair, SegmenterError>;
}

use borsh::BorshSerialize;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::subject::{DataUnit, Subject};
use crate::segment::{self, SegmentedPair, Segmenter, SegmenterError};

/// A resource entry: one word, phrase, or sentence with its translation,
/// optional annotation, and optional media attachments.
///
/// Entries live either in the shared asset pool or inside an activity stack
/// on a page. A page entry may mirror a pool entry through a [`PoolLink`];
/// while linked, its content is read-only and media resolve through the
/// link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// The entry's content (text, annotation, translation).
    pub(crate) content: Content,
    /// The entry's metadata (UUID, data unit, creation time, pool link).
    pub(crate) metadata: Metadata,
    /// Attached media file names.
    pub(crate) media: Media,
}

/// The semantically important content of the entry.
///
/// This contributes to the 'fingerprint' of the entry.
#[derive(Debug, BorshSerialize, Clone, PartialEq, Eq)]
pub(crate) struct Content {
    /// The primary text, slash-segmented for sentences.
    pub(crate) text: String,
    /// The parallel annotation (pinyin, furigana), when present.
    pub(crate) sub_text: Option<String>,
    /// The translation.
    pub(crate) translation: String,
}

impl Content {
    /// Calculate the fingerprint of this content.
    ///
    /// The fingerprint is a SHA256 hash of the Borsh-serialized content.
    /// This is used to detect when a mirrored pool entry has changed since
    /// a page item linked to it.
    ///
    /// # Panics
    ///
    /// Panics if borsh serialization fails (which should never happen for
    /// this data structure).
    #[must_use]
    pub fn fingerprint(&self) -> String {
        #[derive(BorshSerialize)]
        struct FingerprintData<'a> {
            text: &'a str,
            sub_text: Option<&'a str>,
            translation: &'a str,
        }

        let data = FingerprintData {
            text: &self.text,
            sub_text: self.sub_text.as_deref(),
            translation: &self.translation,
        };

        let encoded = borsh::to_vec(&data).expect("this should never fail");
        let hash = Sha256::digest(encoded);
        format!("{hash:x}")
    }
}

/// Entry metadata.
///
/// Does not contribute to the entry fingerprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Metadata {
    /// Globally unique, perpetually stable identifier.
    pub(crate) uuid: Uuid,
    /// Timestamp recording when the entry was created.
    pub(crate) created: DateTime<Utc>,
    /// The granularity of the entry.
    pub(crate) data_unit: DataUnit,
    /// The pool entry this item mirrors, when linked.
    pub(crate) link: Option<PoolLink>,
}

/// Attached media file names. Upload handling and URL lifecycles belong to
/// the surrounding tooling; only the names are recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Media {
    /// Audio file name.
    pub(crate) audio: Option<String>,
    /// Image file name.
    pub(crate) image: Option<String>,
}

/// A reference from a page item to the shared pool entry it mirrors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolLink {
    /// UUID of the mirrored pool entry.
    pub entry: Uuid,
    /// Fingerprint snapshot of the pool entry's content at link time.
    pub fingerprint: String,
}

/// Error returned when an edit is not permitted.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EditError {
    /// The entry mirrors a shared pool entry and is read-only.
    #[error("entry mirrors a shared pool entry; unlink it before editing")]
    Linked,
}

impl Resource {
    /// Construct a new empty entry of the given granularity.
    ///
    /// A new UUID is automatically generated.
    #[must_use]
    pub fn new(data_unit: DataUnit) -> Self {
        Self::with_content(data_unit, String::new(), None, String::new())
    }

    /// Construct an entry with initial content.
    ///
    /// Creation sets the fields directly; the secondary-field sync heuristic
    /// only applies to subsequent edits via [`Resource::set_text`].
    #[must_use]
    pub fn with_content(
        data_unit: DataUnit,
        text: String,
        sub_text: Option<String>,
        translation: String,
    ) -> Self {
        let content = Content {
            text,
            sub_text: sub_text.filter(|s| !s.is_empty()),
            translation,
        };

        let metadata = Metadata {
            uuid: Uuid::new_v4(),
            created: Utc::now(),
            data_unit,
            link: None,
        };

        Self {
            content,
            metadata,
            media: Media::default(),
        }
    }

    /// The unique, stable identifier of this entry.
    #[must_use]
    pub const fn uuid(&self) -> Uuid {
        self.metadata.uuid
    }

    /// When the entry was first created.
    #[must_use]
    pub const fn created(&self) -> DateTime<Utc> {
        self.metadata.created
    }

    /// The granularity of the entry.
    #[must_use]
    pub const fn data_unit(&self) -> DataUnit {
        self.metadata.data_unit
    }

    /// The primary text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.content.text
    }

    /// The parallel annotation, when present.
    #[must_use]
    pub fn sub_text(&self) -> Option<&str> {
        self.content.sub_text.as_deref()
    }

    /// The translation.
    #[must_use]
    pub fn translation(&self) -> &str {
        &self.content.translation
    }

    /// The attached audio file name, if any. Linked items resolve media
    /// through the pool; see `Workspace::resolved_audio`.
    #[must_use]
    pub fn audio(&self) -> Option<&str> {
        self.media.audio.as_deref()
    }

    /// The attached image file name, if any.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.media.image.as_deref()
    }

    /// The pool link, when this item mirrors a pool entry.
    #[must_use]
    pub const fn link(&self) -> Option<&PoolLink> {
        self.metadata.link.as_ref()
    }

    /// Whether this item currently mirrors a pool entry.
    #[must_use]
    pub const fn is_linked(&self) -> bool {
        self.metadata.link.is_some()
    }

    /// Returns a value generated by hashing the content of the entry.
    ///
    /// Any content change changes the fingerprint. Links record the pool
    /// entry's fingerprint so that later pool edits are detectable as stale
    /// links.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        self.content.fingerprint()
    }

    /// Whether the primary and secondary fields disagree on segment count.
    #[must_use]
    pub fn is_mismatched(&self) -> bool {
        segment::is_mismatched(&self.content.text, self.sub_text().unwrap_or(""))
    }

    /// Edit the primary text, keeping the secondary field aligned.
    ///
    /// Runs the delimiter sync heuristic against the previous text and
    /// rewrites the secondary field with the result.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::Linked`] if the entry mirrors a pool entry.
    pub fn set_text(&mut self, text: &str) -> Result<(), EditError> {
        self.ensure_unlinked()?;

        let synced =
            segment::sync_secondary(&self.content.text, text, self.sub_text().unwrap_or(""));
        self.content.text = text.to_string();
        self.content.sub_text = Some(synced).filter(|s| !s.is_empty());
        Ok(())
    }

    /// Replace the secondary field verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::Linked`] if the entry mirrors a pool entry.
    pub fn set_sub_text(&mut self, sub_text: &str) -> Result<(), EditError> {
        self.ensure_unlinked()?;
        self.content.sub_text = Some(sub_text.to_string()).filter(|s| !s.is_empty());
        Ok(())
    }

    /// Replace the translation.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::Linked`] if the entry mirrors a pool entry.
    pub fn set_translation(&mut self, translation: &str) -> Result<(), EditError> {
        self.ensure_unlinked()?;
        self.content.translation = translation.to_string();
        Ok(())
    }

    /// Attach an audio file name.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::Linked`] if the entry mirrors a pool entry.
    pub fn set_audio(&mut self, audio: Option<String>) -> Result<(), EditError> {
        self.ensure_unlinked()?;
        self.media.audio = audio;
        Ok(())
    }

    /// Attach an image file name.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::Linked`] if the entry mirrors a pool entry.
    pub fn set_image(&mut self, image: Option<String>) -> Result<(), EditError> {
        self.ensure_unlinked()?;
        self.media.image = image;
        Ok(())
    }

    /// Merge two adjacent segments of the primary field.
    ///
    /// The secondary field is mirrored when aligned. Out-of-range indices
    /// are a no-op. Returns whether anything changed.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::Linked`] if the entry mirrors a pool entry.
    pub fn merge_segments(&mut self, index: usize) -> Result<bool, EditError> {
        self.ensure_unlinked()?;

        let merged = segment::merge_at(
            &self.content.text,
            self.sub_text().unwrap_or(""),
            index,
        );
        let changed = merged.primary != self.content.text
            || merged.secondary != self.sub_text().unwrap_or("");
        self.content.text = merged.primary;
        self.content.sub_text = Some(merged.secondary).filter(|s| !s.is_empty());
        Ok(changed)
    }

    /// Mirror a pool entry: copy its content and record its fingerprint.
    ///
    /// Media are not copied; they resolve through the link while it exists.
    pub fn link_to(&mut self, entry: &Self) {
        self.content = entry.content.clone();
        self.metadata.link = Some(PoolLink {
            entry: entry.uuid(),
            fingerprint: entry.fingerprint(),
        });
    }

    /// Detach from the pool, keeping the copied content.
    ///
    /// For character-segmented subjects, undelimited text is auto-segmented
    /// so the detached entry is immediately editable segment by segment.
    /// Returns whether the text changed.
    pub fn detach(&mut self, subject: Subject) -> bool {
        self.metadata.link = None;
        let segmented = segment::auto_segment(&self.content.text, subject);
        let changed = segmented != self.content.text;
        self.content.text = segmented;
        changed
    }

    /// Replace both text fields with a proposal from an external segmenter.
    ///
    /// A successful proposal bypasses the sync heuristic entirely. On
    /// failure the fields are left untouched and the error is returned for
    /// the caller to surface.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::Linked`] if the entry mirrors a pool entry, or
    /// the provider's error wrapped in [`ApplySegmentationError`].
    pub fn apply_segmentation(
        &mut self,
        segmenter: &dyn Segmenter,
        subject: Subject,
    ) -> Result<(), ApplySegmentationError> {
        self.ensure_unlinked().map_err(ApplySegmentationError::Edit)?;

        let SegmentedPair { text, sub_text } =
            segmenter.propose(&self.content.text, self.sub_text(), subject)?;
        self.content.text = text;
        self.content.sub_text = Some(sub_text).filter(|s| !s.is_empty());
        Ok(())
    }

    const fn ensure_unlinked(&self) -> Result<(), EditError> {
        if self.metadata.link.is_some() {
            return Err(EditError::Linked);
        }
        Ok(())
    }
}

/// Errors from applying an external segmentation proposal.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ApplySegmentationError {
    /// The entry is linked and cannot be edited.
    #[error(transparent)]
    Edit(EditError),
    /// The external provider failed; the entry is unchanged.
    #[error(transparent)]
    Provider(#[from] SegmenterError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence(text: &str, sub_text: Option<&str>) -> Resource {
        Resource::with_content(
            DataUnit::Sentence,
            text.to_string(),
            sub_text.map(ToString::to_string),
            String::new(),
        )
    }

    #[test]
    fn fingerprint_is_stable_for_equal_content() {
        let a = sentence("你/好", Some("ni/hao"));
        let b = sentence("你/好", Some("ni/hao"));
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn content_affects_fingerprint() {
        let a = sentence("你/好", Some("ni/hao"));
        let b = sentence("你/好", Some("NI/HAO"));
        let c = sentence("你/坏", Some("ni/hao"));
        assert_ne!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn field_boundaries_affect_fingerprint() {
        // The same bytes in a different field must not collide.
        let a = sentence("ni hao", None);
        let mut b = sentence("", None);
        b.set_translation("ni hao").unwrap();
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn set_text_syncs_secondary() {
        let mut entry = sentence("你", None);
        entry.set_text("你/好").unwrap();
        assert_eq!(entry.sub_text(), Some("/"));
        assert_eq!(entry.text(), "你/好");
    }

    #[test]
    fn set_text_truncates_secondary_on_delimiter_removal() {
        let mut entry = sentence("a/b/c", Some("x/y/z"));
        entry.set_text("ab/c").unwrap();
        assert_eq!(entry.sub_text(), Some("x/y"));
    }

    #[test]
    fn merge_segments_applies_to_both_fields() {
        let mut entry = sentence("a/b/c", Some("x/y/z"));
        assert!(entry.merge_segments(0).unwrap());
        assert_eq!(entry.text(), "a b/c");
        assert_eq!(entry.sub_text(), Some("xy/z"));
    }

    #[test]
    fn merge_segments_out_of_range_is_a_no_op() {
        let mut entry = sentence("a/b", Some("x/y"));
        assert!(!entry.merge_segments(5).unwrap());
        assert_eq!(entry.text(), "a/b");
    }

    #[test]
    fn linked_entry_rejects_edits() {
        let pool_entry = sentence("你/好", Some("ni/hao"));
        let mut item = Resource::new(DataUnit::Sentence);
        item.link_to(&pool_entry);

        assert_eq!(item.set_text("different"), Err(EditError::Linked));
        assert_eq!(item.set_sub_text("x"), Err(EditError::Linked));
        assert_eq!(item.merge_segments(0), Err(EditError::Linked));
        // Content was mirrored and is untouched.
        assert_eq!(item.text(), "你/好");
    }

    #[test]
    fn link_records_fingerprint_snapshot() {
        let pool_entry = sentence("你/好", Some("ni/hao"));
        let mut item = Resource::new(DataUnit::Sentence);
        item.link_to(&pool_entry);

        let link = item.link().unwrap();
        assert_eq!(link.entry, pool_entry.uuid());
        assert_eq!(link.fingerprint, pool_entry.fingerprint());
    }

    #[test]
    fn detach_keeps_copied_content_and_auto_segments() {
        let pool_entry = sentence("你好", None);
        let mut item = Resource::new(DataUnit::Sentence);
        item.link_to(&pool_entry);

        assert!(item.detach(Subject::Chinese));
        assert!(!item.is_linked());
        assert_eq!(item.text(), "你/好");
    }

    #[test]
    fn detach_leaves_delimited_text_alone() {
        let pool_entry = sentence("你/好", Some("ni/hao"));
        let mut item = Resource::new(DataUnit::Sentence);
        item.link_to(&pool_entry);

        assert!(!item.detach(Subject::Chinese));
        assert_eq!(item.text(), "你/好");
        assert_eq!(item.sub_text(), Some("ni/hao"));
    }

    struct FixedSegmenter(Result<SegmentedPair, SegmenterError>);

    impl Segmenter for FixedSegmenter {
        fn propose(
            &self,
            _text: &str,
            _sub_text: Option<&str>,
            _subject: Subject,
        ) -> Result<SegmentedPair, SegmenterError> {
            self.0.clone()
        }
    }

    #[test]
    fn segmenter_proposal_replaces_both_fields() {
        let mut entry = sentence("你吃饭了吗", None);
        let segmenter = FixedSegmenter(Ok(SegmentedPair {
            text: "你/吃/饭/了/吗".to_string(),
            sub_text: "nǐ/chī/fàn/le/ma".to_string(),
        }));

        entry.apply_segmentation(&segmenter, Subject::Chinese).unwrap();
        assert_eq!(entry.text(), "你/吃/饭/了/吗");
        assert_eq!(entry.sub_text(), Some("nǐ/chī/fàn/le/ma"));
    }

    #[test]
    fn segmenter_failure_leaves_fields_unchanged() {
        let mut entry = sentence("你吃饭了吗", Some("original"));
        let segmenter = FixedSegmenter(Err(SegmenterError("service unavailable".to_string())));

        let result = entry.apply_segmentation(&segmenter, Subject::Chinese);
        assert!(matches!(result, Err(ApplySegmentationError::Provider(_))));
        assert_eq!(entry.text(), "你吃饭了吗");
        assert_eq!(entry.sub_text(), Some("original"));
    }
}

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The subject a page of content belongs to.
///
/// The subject decides whether entries carry a secondary annotation field
/// (pinyin for Chinese, furigana for Japanese) and whether undelimited text
/// is auto-segmented character by character when an entry is detached from
/// the shared pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    /// Sino-Korean characters. No secondary annotation field.
    Hanja,
    /// Mandarin Chinese, annotated with pinyin.
    Chinese,
    /// Japanese, annotated with furigana.
    Japanese,
}

impl Subject {
    /// The label of the secondary annotation field, if the subject has one.
    #[must_use]
    pub const fn annotation_label(self) -> Option<&'static str> {
        match self {
            Self::Chinese => Some("pinyin"),
            Self::Japanese => Some("furigana"),
            Self::Hanja => None,
        }
    }

    /// Whether undelimited text in this subject is segmented character by
    /// character on detach.
    #[must_use]
    pub const fn uses_character_segmentation(self) -> bool {
        matches!(self, Self::Chinese | Self::Japanese)
    }

    /// The lowercase name used in locators and directory names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hanja => "hanja",
            Self::Chinese => "chinese",
            Self::Japanese => "japanese",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a known subject.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown subject '{0}': expected hanja, chinese or japanese")]
pub struct ParseSubjectError(String);

impl FromStr for Subject {
    type Err = ParseSubjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hanja" => Ok(Self::Hanja),
            "chinese" => Ok(Self::Chinese),
            "japanese" => Ok(Self::Japanese),
            _ => Err(ParseSubjectError(s.to_string())),
        }
    }
}

/// The kind of activity a stack presents to the learner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityType {
    /// An instruction shown to the learner.
    Instruction,
    /// Handwriting recognition.
    Handwriting,
    /// Voice recognition.
    VoiceRecognition,
    /// Drag and drop.
    DragDrop,
    /// Listening comprehension.
    Listening,
}

impl ActivityType {
    /// The kebab-case name used on the command line and in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Instruction => "instruction",
            Self::Handwriting => "handwriting",
            Self::VoiceRecognition => "voice-recognition",
            Self::DragDrop => "drag-drop",
            Self::Listening => "listening",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a known activity type.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error(
    "unknown activity type '{0}': expected instruction, handwriting, voice-recognition, \
     drag-drop or listening"
)]
pub struct ParseActivityTypeError(String);

impl FromStr for ActivityType {
    type Err = ParseActivityTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "instruction" => Ok(Self::Instruction),
            "handwriting" => Ok(Self::Handwriting),
            "voice-recognition" | "voice_recognition" => Ok(Self::VoiceRecognition),
            "drag-drop" | "drag_drop" => Ok(Self::DragDrop),
            "listening" => Ok(Self::Listening),
            _ => Err(ParseActivityTypeError(s.to_string())),
        }
    }
}

/// The granularity of a resource entry.
///
/// Only sentence entries are segmented; words and phrases are atomic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataUnit {
    /// A single word.
    Word,
    /// A short phrase.
    Phrase,
    /// A full sentence, segmented with `/`.
    Sentence,
}

impl DataUnit {
    /// The lowercase name used on the command line and in exports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Word => "word",
            Self::Phrase => "phrase",
            Self::Sentence => "sentence",
        }
    }
}

impl fmt::Display for DataUnit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a known data unit.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown data unit '{0}': expected word, phrase or sentence")]
pub struct ParseDataUnitError(String);

impl FromStr for DataUnit {
    type Err = ParseDataUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "word" => Ok(Self::Word),
            "phrase" => Ok(Self::Phrase),
            "sentence" => Ok(Self::Sentence),
            _ => Err(ParseDataUnitError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_round_trips_through_str() {
        for subject in [Subject::Hanja, Subject::Chinese, Subject::Japanese] {
            assert_eq!(subject.as_str().parse::<Subject>().unwrap(), subject);
        }
    }

    #[test]
    fn subject_parse_is_case_insensitive() {
        assert_eq!("Chinese".parse::<Subject>().unwrap(), Subject::Chinese);
    }

    #[test]
    fn unknown_subject_fails() {
        assert!("latin".parse::<Subject>().is_err());
    }

    #[test]
    fn annotation_labels() {
        assert_eq!(Subject::Chinese.annotation_label(), Some("pinyin"));
        assert_eq!(Subject::Japanese.annotation_label(), Some("furigana"));
        assert_eq!(Subject::Hanja.annotation_label(), None);
    }

    #[test]
    fn activity_type_accepts_both_separators() {
        assert_eq!(
            "voice-recognition".parse::<ActivityType>().unwrap(),
            ActivityType::VoiceRecognition
        );
        assert_eq!(
            "drag_drop".parse::<ActivityType>().unwrap(),
            ActivityType::DragDrop
        );
    }

    #[test]
    fn data_unit_round_trips_through_str() {
        for unit in [DataUnit::Word, DataUnit::Phrase, DataUnit::Sentence] {
            assert_eq!(unit.as_str().parse::<DataUnit>().unwrap(), unit);
        }
    }
}

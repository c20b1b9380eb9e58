use std::{fmt, num::NonZeroUsize, ops::Deref, str::FromStr};

use non_empty_string::NonEmptyString;

use super::subject::{ParseSubjectError, Subject};

/// A validated level string: one or more digits followed by one or more
/// uppercase letters (e.g. `2A`, `10B`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Level(NonEmptyString);

impl Level {
    /// Creates a new `Level` from a string.
    ///
    /// # Errors
    ///
    /// Returns `InvalidLevelError` if the string is empty or does not match
    /// the `digits-then-uppercase-letters` format.
    pub fn new(s: String) -> Result<Self, InvalidLevelError> {
        let non_empty = NonEmptyString::new(s.clone()).map_err(|_| InvalidLevelError(s.clone()))?;

        let digits: String = s.chars().take_while(char::is_ascii_digit).collect();
        let rest = &s[digits.len()..];
        let well_formed = !digits.is_empty()
            && !rest.is_empty()
            && rest.chars().all(|c| c.is_ascii_uppercase());
        if !well_formed {
            return Err(InvalidLevelError(s));
        }

        Ok(Self(non_empty))
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<&str> for Level {
    type Error = InvalidLevelError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

impl AsRef<str> for Level {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl Deref for Level {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0.as_str()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Level {
    type Err = InvalidLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

/// Error returned when a string does not match the level format.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid level '{0}': expected digits followed by uppercase letters, e.g. '2A'")]
pub struct InvalidLevelError(String);

/// The coordinate of a page in the content hierarchy.
///
/// Format: `{subject}-{LEVEL}-{SET}-{PAGE}`, where:
/// - `subject` is a lowercase subject name (`hanja`, `chinese`, `japanese`)
/// - `LEVEL` is a level string (e.g. `2A`)
/// - `SET` is a positive non-zero integer, displayed zero-padded (e.g. `001`)
/// - `PAGE` is a positive non-zero integer
///
/// Examples: `chinese-2A-001-3`, `japanese-4B-017-10`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Locator {
    subject: Subject,
    level: Level,
    set: NonZeroUsize,
    page: NonZeroUsize,
}

impl Locator {
    /// Create a locator from pre-validated components.
    #[must_use]
    pub const fn new(subject: Subject, level: Level, set: NonZeroUsize, page: NonZeroUsize) -> Self {
        Self {
            subject,
            level,
            set,
            page,
        }
    }

    /// Returns the subject component.
    #[must_use]
    pub const fn subject(&self) -> Subject {
        self.subject
    }

    /// Returns the level component.
    #[must_use]
    pub const fn level(&self) -> &Level {
        &self.level
    }

    /// Returns the set number.
    #[must_use]
    pub const fn set(&self) -> NonZeroUsize {
        self.set
    }

    /// Returns the page number.
    #[must_use]
    pub const fn page(&self) -> NonZeroUsize {
        self.page
    }

    /// Returns a displayable representation with the specified set digit
    /// width.
    ///
    /// # Examples
    ///
    /// ```
    /// use architect::domain::Locator;
    ///
    /// let locator: Locator = "chinese-2A-1-3".parse().unwrap();
    ///
    /// assert_eq!(locator.display(3).to_string(), "chinese-2A-001-3");
    /// assert_eq!(locator.display(4).to_string(), "chinese-2A-0001-3");
    /// ```
    #[must_use]
    pub const fn display(&self, digits: usize) -> FormattedLocator<'_> {
        FormattedLocator {
            locator: self,
            digits,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.display(3))
    }
}

/// A wrapper type that formats a locator with a specified set digit width.
///
/// Returned by [`Locator::display`].
#[derive(Debug, Clone, Copy)]
pub struct FormattedLocator<'a> {
    locator: &'a Locator,
    digits: usize,
}

impl fmt::Display for FormattedLocator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}-{}-{:0width$}-{}",
            self.locator.subject,
            self.locator.level,
            self.locator.set,
            self.locator.page,
            width = self.digits
        )
    }
}

/// Errors that can occur during locator parsing.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// Malformed locator structure.
    #[error("Invalid locator format '{0}': expected subject-LEVEL-SET-PAGE")]
    Syntax(String),

    /// Unknown subject component.
    #[error(transparent)]
    Subject(#[from] ParseSubjectError),

    /// Invalid level component.
    #[error(transparent)]
    Level(#[from] InvalidLevelError),

    /// Invalid set component (non-numeric or zero).
    #[error("Invalid set in locator '{0}': expected a non-zero integer, got {1}")]
    Set(String, String),

    /// Invalid page component (non-numeric or zero).
    #[error("Invalid page in locator '{0}': expected a non-zero integer, got {1}")]
    Page(String, String),
}

impl FromStr for Locator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() != 4 || parts.iter().any(|part| part.is_empty()) {
            return Err(Error::Syntax(s.to_string()));
        }

        let subject: Subject = parts[0].parse()?;
        let level = Level::new(parts[1].to_string())?;

        let set = parts[2]
            .parse::<usize>()
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or_else(|| Error::Set(s.to_string(), parts[2].to_string()))?;

        let page = parts[3]
            .parse::<usize>()
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or_else(|| Error::Page(s.to_string(), parts[3].to_string()))?;

        Ok(Self::new(subject, level, set, page))
    }
}

impl TryFrom<&str> for Locator {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_str(value)
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn locator(s: &str) -> Locator {
        s.parse().unwrap()
    }

    #[test]
    fn level_accepts_well_formed_strings() {
        assert_eq!(Level::try_from("2A").unwrap().as_str(), "2A");
        assert_eq!(Level::try_from("10B").unwrap().as_str(), "10B");
    }

    #[test_case(""; "empty")]
    #[test_case("A2"; "letters first")]
    #[test_case("2"; "digits only")]
    #[test_case("AA"; "letters only")]
    #[test_case("2a"; "lowercase letter")]
    #[test_case("2A3"; "trailing digit")]
    fn level_rejects_malformed_strings(s: &str) {
        assert!(Level::try_from(s).is_err());
    }

    #[test]
    fn parse_valid_locator() {
        let loc = locator("chinese-2A-001-3");
        assert_eq!(loc.subject(), Subject::Chinese);
        assert_eq!(loc.level().as_str(), "2A");
        assert_eq!(loc.set().get(), 1);
        assert_eq!(loc.page().get(), 3);
    }

    #[test]
    fn parse_accepts_unpadded_set() {
        assert_eq!(locator("chinese-2A-1-3"), locator("chinese-2A-001-3"));
    }

    #[test_case(3, "japanese-3B-007-2"; "three digits")]
    #[test_case(4, "japanese-3B-0007-2"; "four digits")]
    #[test_case(2, "japanese-3B-07-2"; "two digits")]
    #[test_case(1, "japanese-3B-7-2"; "no padding")]
    fn display_pads_set_to_width(digits: usize, expected: &str) {
        let loc = locator("japanese-3B-7-2");
        assert_eq!(loc.display(digits).to_string(), expected);
    }

    #[test]
    fn display_expands_past_width() {
        let loc = locator("chinese-2A-1234-1");
        assert_eq!(loc.display(3).to_string(), "chinese-2A-1234-1");
    }

    #[test_case("chinese"; "too few parts")]
    #[test_case("chinese-2A-001"; "missing page")]
    #[test_case("chinese-2A-001-3-9"; "too many parts")]
    #[test_case(""; "empty")]
    #[test_case("chinese--001-3"; "empty level")]
    fn parse_rejects_malformed_structure(s: &str) {
        assert!(matches!(s.parse::<Locator>(), Err(Error::Syntax(_))));
    }

    #[test]
    fn parse_rejects_unknown_subject() {
        assert!(matches!(
            "latin-2A-001-3".parse::<Locator>(),
            Err(Error::Subject(_))
        ));
    }

    #[test]
    fn parse_rejects_bad_level() {
        assert!(matches!(
            "chinese-A2-001-3".parse::<Locator>(),
            Err(Error::Level(_))
        ));
    }

    #[test_case("chinese-2A-zero-3"; "non-numeric set")]
    #[test_case("chinese-2A-0-3"; "zero set")]
    fn parse_rejects_bad_set(s: &str) {
        assert!(matches!(s.parse::<Locator>(), Err(Error::Set(_, _))));
    }

    #[test_case("chinese-2A-001-x"; "non-numeric page")]
    #[test_case("chinese-2A-001-0"; "zero page")]
    fn parse_rejects_bad_page(s: &str) {
        assert!(matches!(s.parse::<Locator>(), Err(Error::Page(_, _))));
    }

    #[test]
    fn roundtrip_through_display() {
        let original = locator("japanese-5C-020-10");
        let parsed = locator(&original.display(3).to_string());
        assert_eq!(original, parsed);
    }

    #[test]
    fn ordering_is_hierarchical() {
        assert!(locator("chinese-2A-001-1") < locator("chinese-2A-001-2"));
        assert!(locator("chinese-2A-001-9") < locator("chinese-2A-002-1"));
    }
}

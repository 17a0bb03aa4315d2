//! URL-safe slug type addressing a single note.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum number of characters in a slug.
pub const SLUG_MAX_LENGTH: usize = 100;

/// A URL-safe identifier for a note.
///
/// Slugs are globally unique across all notes; uniqueness is checked by the
/// store, not by this type.
///
/// # Validation Rules
/// - Non-empty after trimming surrounding whitespace
/// - At most [`SLUG_MAX_LENGTH`] characters
/// - Only ASCII letters, digits, hyphens and underscores
///
/// Case is preserved: `Draft` and `draft` are different slugs.
///
/// # Examples
///
/// ```
/// use notes::domain::Slug;
///
/// let slug = Slug::new("my-first_note").unwrap();
/// assert_eq!(slug.as_str(), "my-first_note");
/// assert!(Slug::new("two words").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

/// Where a note's slug came from, which decides what a clash means.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SlugOrigin {
    /// Typed by the user. A clash is a form error.
    #[default]
    Explicit,
    /// Derived from the title. A clash moves on to the next free `-N` suffix.
    Derived,
}

/// Why a string was rejected as a slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseSlugErrorKind {
    Empty,
    TooLong { length: usize },
    InvalidCharacters,
}

/// Error returned when parsing an invalid slug.
#[derive(Debug, Clone)]
pub struct ParseSlugError {
    value: String,
    kind: ParseSlugErrorKind,
}

impl ParseSlugError {
    /// Returns the rejected input.
    pub fn invalid_value(&self) -> &str {
        &self.value
    }

    /// Returns the reason the input was rejected.
    pub fn kind(&self) -> ParseSlugErrorKind {
        self.kind
    }
}

impl fmt::Display for ParseSlugError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParseSlugErrorKind::Empty => write!(f, "slug cannot be empty"),
            ParseSlugErrorKind::TooLong { length } => write!(
                f,
                "slug '{}' is {} characters long (max {})",
                self.value, length, SLUG_MAX_LENGTH
            ),
            ParseSlugErrorKind::InvalidCharacters => write!(
                f,
                "invalid slug '{}': slugs must contain only ASCII letters, digits, hyphens, and underscores",
                self.value
            ),
        }
    }
}

impl std::error::Error for ParseSlugError {}

impl Slug {
    /// Creates a new Slug, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `ParseSlugError` if the trimmed value is empty, too long, or
    /// contains characters outside `[-a-zA-Z0-9_]`.
    pub fn new(s: &str) -> Result<Self, ParseSlugError> {
        let trimmed = s.trim();
        let error = |kind| ParseSlugError {
            value: trimmed.to_string(),
            kind,
        };

        if trimmed.is_empty() {
            return Err(error(ParseSlugErrorKind::Empty));
        }

        let length = trimmed.chars().count();
        if length > SLUG_MAX_LENGTH {
            return Err(error(ParseSlugErrorKind::TooLong { length }));
        }

        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(error(ParseSlugErrorKind::InvalidCharacters));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Returns the slug as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `{self}-{n}`, shortening the base so the result still fits
    /// in [`SLUG_MAX_LENGTH`].
    pub fn with_suffix(&self, n: u32) -> Self {
        let suffix = format!("-{n}");
        let keep = SLUG_MAX_LENGTH.saturating_sub(suffix.len());
        // Slugs are ASCII, so byte offsets are char boundaries
        let base = &self.0[..self.0.len().min(keep)];
        Self(format!("{}{suffix}", base.trim_end_matches('-')))
    }

    /// First slug in `self`, `self-2`, `self-3`, ... for which `taken`
    /// answers false.
    pub fn first_free<E>(
        &self,
        mut taken: impl FnMut(&Slug) -> Result<bool, E>,
    ) -> Result<Slug, E> {
        if !taken(self)? {
            return Ok(self.clone());
        }
        let mut n = 2;
        loop {
            let candidate = self.with_suffix(n);
            if !taken(&candidate)? {
                return Ok(candidate);
            }
            n += 1;
        }
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slug(\"{}\")", self.0)
    }
}

impl FromStr for Slug {
    type Err = ParseSlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for Slug {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Slug {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

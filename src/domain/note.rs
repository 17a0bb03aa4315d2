//! Note struct: a titled text owned by one user and addressed by its slug.

use crate::domain::{NoteId, Slug, SlugOrigin, UserId};
use serde::Serialize;

/// A stored note.
///
/// # Fields
/// - `id`: system-assigned, never changes
/// - `title`, `text`: free text
/// - `slug`: URL-safe, unique across every note in the store
/// - `author`: the owning user, fixed at creation
///
/// # Examples
///
/// ```
/// use notes::domain::{Note, NoteId, Slug, UserId};
///
/// let note = Note::new(
///     NoteId::new(),
///     "Shopping",
///     "milk, bread",
///     Slug::new("shopping").unwrap(),
///     UserId::new(1),
/// );
/// assert_eq!(note.slug().as_str(), "shopping");
/// assert!(note.is_owned_by(UserId::new(1)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    id: NoteId,
    title: String,
    text: String,
    slug: Slug,
    author: UserId,
}

impl Note {
    /// Creates a Note from all of its fields.
    pub fn new(
        id: NoteId,
        title: impl Into<String>,
        text: impl Into<String>,
        slug: Slug,
        author: UserId,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            text: text.into(),
            slug,
            author,
        }
    }

    /// Returns the note's identifier.
    pub fn id(&self) -> &NoteId {
        &self.id
    }

    /// Returns the note's title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the note's body text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the note's slug.
    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    /// Returns the id of the owning user.
    pub fn author(&self) -> UserId {
        self.author
    }

    /// True when `user` wrote this note.
    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.author == user
    }
}

/// The writable fields of a note, already validated.
///
/// Used for both creation and edits; id and author are never part of a draft.
/// The slug is [`SlugOrigin::Explicit`] unless set otherwise with
/// [`NoteDraft::with_origin`].
#[derive(Debug, Clone, PartialEq)]
pub struct NoteDraft {
    pub title: String,
    pub text: String,
    pub slug: Slug,
    pub slug_origin: SlugOrigin,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, text: impl Into<String>, slug: Slug) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            slug,
            slug_origin: SlugOrigin::Explicit,
        }
    }

    pub fn with_origin(mut self, origin: SlugOrigin) -> Self {
        self.slug_origin = origin;
        self
    }
}

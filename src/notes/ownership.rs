//! Restricts note visibility to the note's author.
//!
//! A note owned by someone else is reported exactly like a note that does
//! not exist, so callers cannot probe for other users' slugs.

use crate::domain::{Note, User};
use crate::store::{NoteRepository, StoreError, StoreResult};
use thiserror::Error;

/// Why a note lookup for a user failed.
#[derive(Debug, Error)]
pub enum AccessError {
    /// No such note, or the note belongs to another user.
    #[error("note not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Returns every note authored by `user`, oldest first.
pub fn list_notes_for<R>(store: &R, user: &User) -> StoreResult<Vec<Note>>
where
    R: NoteRepository + ?Sized,
{
    store.list_by_author(user.id())
}

/// Looks up the note at `slug` on behalf of `user`.
///
/// # Errors
///
/// [`AccessError::NotFound`] when the slug is unknown or the note has a
/// different author.
pub fn get_note_for<R>(store: &R, user: &User, slug: &str) -> Result<Note, AccessError>
where
    R: NoteRepository + ?Sized,
{
    match store.find_by_slug(slug)? {
        Some(note) if note.is_owned_by(user.id()) => Ok(note),
        _ => Err(AccessError::NotFound),
    }
}

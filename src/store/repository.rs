//! Repository traits and error types for the note store.

use crate::domain::{Note, NoteDraft, NoteId, Slug, User, UserId, Username};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Another note already uses this slug.
    #[error("slug already in use: {slug}")]
    DuplicateSlug { slug: String },

    /// Another account already uses this username.
    #[error("username already in use: {username}")]
    DuplicateUsername { username: String },

    /// The note to update or delete does not exist.
    #[error("note not found: {id}")]
    NoteNotFound { id: String },

    /// A stored row could not be turned back into a domain value.
    #[error("corrupt row in {table}: {reason}")]
    InvalidRow { table: &'static str, reason: String },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// An I/O error occurred.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence for notes.
///
/// Lookups here are unfiltered; ownership is applied one layer up by
/// [`crate::notes::ownership`].
pub trait NoteRepository {
    /// Inserts a new note authored by `author`.
    ///
    /// An explicit slug that is taken fails with [`StoreError::DuplicateSlug`];
    /// a derived one is suffixed (`-2`, `-3`, ...) until it is free. The
    /// check and the insert happen in one transaction, and the returned note
    /// carries the slug actually stored.
    fn insert_note(&mut self, draft: &NoteDraft, author: UserId) -> StoreResult<Note>;

    /// Replaces title, text and slug of an existing note.
    ///
    /// Slug clashes are settled as in [`NoteRepository::insert_note`], not
    /// counting this note itself. Fails with [`StoreError::NoteNotFound`] if
    /// `id` is unknown.
    fn update_note(&mut self, id: &NoteId, draft: &NoteDraft) -> StoreResult<Note>;

    /// Deletes a note. Fails with [`StoreError::NoteNotFound`] if absent.
    fn delete_note(&mut self, id: &NoteId) -> StoreResult<()>;

    /// Retrieves a single note by slug, whoever owns it.
    fn find_by_slug(&self, slug: &str) -> StoreResult<Option<Note>>;

    /// Lists notes written by `author`, oldest first.
    fn list_by_author(&self, author: UserId) -> StoreResult<Vec<Note>>;

    /// True if some note other than `exclude` uses `slug`.
    fn slug_taken(&self, slug: &Slug, exclude: Option<&NoteId>) -> StoreResult<bool>;

    /// Total number of notes in the store.
    fn count_notes(&self) -> StoreResult<u64>;
}

/// Persistence for user accounts.
pub trait UserRepository {
    /// Creates an account. Fails with [`StoreError::DuplicateUsername`] if taken.
    fn create_user(&mut self, username: &Username, password_hash: &str) -> StoreResult<User>;

    /// Retrieves an account by id.
    fn get_user(&self, id: UserId) -> StoreResult<Option<User>>;

    /// Retrieves an account by exact username.
    fn find_user(&self, username: &str) -> StoreResult<Option<User>>;
}

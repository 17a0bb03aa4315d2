//! Core types: Note, NoteId (ULID), Slug, User

mod note;
mod note_id;
mod slug;
mod user;

pub use note::{Note, NoteDraft};
pub use note_id::{NoteId, ParseNoteIdError};
pub use slug::{ParseSlugError, ParseSlugErrorKind, SLUG_MAX_LENGTH, Slug, SlugOrigin};
pub use user::{ParseUsernameError, USERNAME_MAX_LENGTH, User, UserId, Username};

//! Note access rules: ownership filtering, slug assignment, form handling

pub mod form;
pub mod ownership;
pub mod slugs;

pub use form::{FormOutcome, NoteForm, NoteFormData, create_note, edit_note};
pub use ownership::{AccessError, get_note_for, list_notes_for};
pub use slugs::{SlugError, assign_slug, duplicate_slug_message, slug_origin};

//! Note create/edit form: validation, slug assignment and persistence.
//!
//! Create and edit share one flow. A GET renders [`NoteForm::blank`] or
//! [`NoteForm::for_note`]; a POST runs [`create_note`] or [`edit_note`],
//! which either persist the note or hand back the form with field errors.

use crate::domain::{Note, NoteDraft, NoteId, ParseSlugErrorKind, SLUG_MAX_LENGTH, User};
use crate::forms::{FieldErrors, max_length_message, required_text};
use crate::notes::slugs::{SlugError, assign_slug, duplicate_slug_message, slug_origin};
use crate::store::{NoteRepository, StoreError, StoreResult};
use serde::{Deserialize, Serialize};

/// Maximum number of characters in a note title.
pub const TITLE_MAX_LENGTH: usize = 100;

/// Message for a slug with characters outside `[-a-zA-Z0-9_]`.
pub const INVALID_SLUG: &str =
    "Значение должно состоять только из латинских букв, цифр, знаков подчеркивания или дефиса.";

/// Raw form fields as submitted. Missing fields deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NoteFormData {
    pub title: String,
    pub text: String,
    pub slug: String,
}

impl NoteFormData {
    /// Field values of an existing note, for pre-filling the edit form.
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title().to_string(),
            text: note.text().to_string(),
            slug: note.slug().to_string(),
        }
    }
}

/// The note form as handed to templates.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NoteForm {
    data: NoteFormData,
    errors: FieldErrors,
    instance: Option<Note>,
}

impl NoteForm {
    /// An empty form for creating a note.
    pub fn blank() -> Self {
        Self::default()
    }

    /// A form bound to `note` and pre-filled with its fields.
    pub fn for_note(note: &Note) -> Self {
        Self {
            data: NoteFormData::from_note(note),
            errors: FieldErrors::new(),
            instance: Some(note.clone()),
        }
    }

    pub fn data(&self) -> &NoteFormData {
        &self.data
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// The note this form edits, if any.
    pub fn instance(&self) -> Option<&Note> {
        self.instance.as_ref()
    }
}

/// Result of submitting the note form.
#[derive(Debug)]
pub enum FormOutcome {
    /// Validation passed and the note was written.
    Persisted(Note),
    /// Validation failed; nothing was written.
    Rejected(NoteForm),
}

/// Validates `data` into a draft, assigning the slug.
///
/// `editing` is the note being edited, excluded from the uniqueness check.
fn validate<R>(
    store: &R,
    data: &NoteFormData,
    editing: Option<&NoteId>,
) -> StoreResult<Result<NoteDraft, FieldErrors>>
where
    R: NoteRepository + ?Sized,
{
    let mut errors = FieldErrors::new();

    let title = required_text(&mut errors, "title", &data.title, Some(TITLE_MAX_LENGTH));
    let text = required_text(&mut errors, "text", &data.text, None);

    // Without a usable title there is nothing to derive a slug from
    let slug = if title.is_none() && data.slug.trim().is_empty() {
        None
    } else {
        let title = title.as_deref().unwrap_or_default();
        match assign_slug(store, &data.slug, title, editing) {
            Ok(slug) => Some(slug),
            Err(SlugError::Store(e)) => return Err(e),
            Err(SlugError::Invalid(e)) => {
                let message = match e.kind() {
                    ParseSlugErrorKind::TooLong { length } => {
                        max_length_message(SLUG_MAX_LENGTH, length)
                    }
                    ParseSlugErrorKind::Empty | ParseSlugErrorKind::InvalidCharacters => {
                        INVALID_SLUG.to_string()
                    }
                };
                errors.add("slug", message);
                None
            }
            Err(err @ SlugError::DuplicateSlug(_)) => {
                errors.add("slug", err.to_string());
                None
            }
        }
    };

    match (title, text, slug) {
        (Some(title), Some(text), Some(slug)) if errors.is_empty() => {
            Ok(Ok(
                NoteDraft::new(title, text, slug).with_origin(slug_origin(&data.slug))
            ))
        }
        _ => Ok(Err(errors)),
    }
}

/// Turns a store-level slug conflict into a form rejection.
fn persist(
    result: StoreResult<Note>,
    data: NoteFormData,
    instance: Option<Note>,
) -> StoreResult<FormOutcome> {
    match result {
        Ok(note) => Ok(FormOutcome::Persisted(note)),
        Err(StoreError::DuplicateSlug { slug }) => {
            let mut errors = FieldErrors::new();
            errors.add("slug", duplicate_slug_message(&slug));
            Ok(FormOutcome::Rejected(NoteForm {
                data,
                errors,
                instance,
            }))
        }
        Err(e) => Err(e),
    }
}

/// Handles a create submission by `author`.
///
/// # Errors
///
/// Only store failures; validation problems come back as
/// [`FormOutcome::Rejected`].
pub fn create_note<R>(store: &mut R, author: &User, data: NoteFormData) -> StoreResult<FormOutcome>
where
    R: NoteRepository + ?Sized,
{
    match validate(store, &data, None)? {
        Ok(draft) => persist(store.insert_note(&draft, author.id()), data, None),
        Err(errors) => Ok(FormOutcome::Rejected(NoteForm {
            data,
            errors,
            instance: None,
        })),
    }
}

/// Handles an edit submission for `note`.
///
/// The caller must already have checked that the requesting user owns
/// `note` (see [`crate::notes::get_note_for`]).
pub fn edit_note<R>(store: &mut R, note: Note, data: NoteFormData) -> StoreResult<FormOutcome>
where
    R: NoteRepository + ?Sized,
{
    match validate(store, &data, Some(note.id()))? {
        Ok(draft) => {
            let result = store.update_note(note.id(), &draft);
            persist(result, data, Some(note))
        }
        Err(errors) => Ok(FormOutcome::Rejected(NoteForm {
            data,
            errors,
            instance: Some(note),
        })),
    }
}

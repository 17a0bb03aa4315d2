//! Picks the slug a note is stored under.

use crate::domain::{NoteId, ParseSlugError, Slug, SlugOrigin};
use crate::infra::slugify;
use crate::store::{NoteRepository, StoreError};
use thiserror::Error;

const DUPLICATE_SLUG_SUFFIX: &str = " - такой slug уже существует, придумайте уникальное значение!";

/// Field message shown when `slug` is already used by another note.
///
/// ```
/// assert_eq!(
///     notes::notes::duplicate_slug_message("1"),
///     "1 - такой slug уже существует, придумайте уникальное значение!"
/// );
/// ```
pub fn duplicate_slug_message(slug: &str) -> String {
    format!("{slug}{DUPLICATE_SLUG_SUFFIX}")
}

/// Why no slug could be assigned.
#[derive(Debug, Error)]
pub enum SlugError {
    /// Another note already uses this slug.
    #[error("{}", duplicate_slug_message(.0.as_str()))]
    DuplicateSlug(Slug),

    /// The explicit candidate is not a well-formed slug.
    #[error(transparent)]
    Invalid(#[from] ParseSlugError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Whether the form's slug field was filled in or left for the title.
pub fn slug_origin(candidate: &str) -> SlugOrigin {
    if candidate.trim().is_empty() {
        SlugOrigin::Derived
    } else {
        SlugOrigin::Explicit
    }
}

/// Chooses the slug for a note being created or edited.
///
/// A non-blank `candidate` is used as given and must not belong to any note
/// other than `editing`. Otherwise the slug is derived from `title` with
/// [`slugify`]; a derived slug never fails on a clash but takes the first
/// free `-N` suffix instead. The store settles derived slugs again when
/// writing, so the answer here is what the note will most likely get.
///
/// # Errors
///
/// - [`SlugError::Invalid`] if the candidate has disallowed characters or is too long
/// - [`SlugError::DuplicateSlug`] if another note holds the explicit candidate
pub fn assign_slug<R>(
    store: &R,
    candidate: &str,
    title: &str,
    editing: Option<&NoteId>,
) -> Result<Slug, SlugError>
where
    R: NoteRepository + ?Sized,
{
    match slug_origin(candidate) {
        SlugOrigin::Derived => {
            let base = Slug::new(&slugify(title))?;
            Ok(base.first_free(|slug| store.slug_taken(slug, editing))?)
        }
        SlugOrigin::Explicit => {
            let slug = Slug::new(candidate)?;
            if store.slug_taken(&slug, editing)? {
                return Err(SlugError::DuplicateSlug(slug));
            }
            Ok(slug)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NoteDraft, ParseSlugErrorKind, Username};
    use crate::store::{SqliteStore, UserRepository};
    use pretty_assertions::assert_eq;

    fn store_with_note(slug: &str) -> (SqliteStore, NoteId) {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let user = store
            .create_user(&Username::new("testuser").unwrap(), "h")
            .unwrap();
        let note = store
            .insert_note(
                &NoteDraft::new("Test Note", "text", Slug::new(slug).unwrap()),
                user.id(),
            )
            .unwrap();
        (store, note.id().clone())
    }

    #[test]
    fn explicit_candidate_is_used_verbatim() {
        let (store, _) = store_with_note("1");
        let slug = assign_slug(&store, "My_Slug-2", "ignored", None).unwrap();
        assert_eq!(slug.as_str(), "My_Slug-2");
    }

    #[test]
    fn blank_candidate_derives_from_title() {
        let (store, _) = store_with_note("1");
        let slug = assign_slug(&store, "  ", "Заметка 1", None).unwrap();
        assert_eq!(slug.as_str(), "zametka-1");
    }

    #[test]
    fn duplicate_candidate_is_rejected_with_message() {
        let (store, _) = store_with_note("1");
        let err = assign_slug(&store, "1", "Duplicate Note", None).unwrap_err();
        assert!(matches!(&err, SlugError::DuplicateSlug(s) if s.as_str() == "1"));
        assert_eq!(
            err.to_string(),
            "1 - такой slug уже существует, придумайте уникальное значение!"
        );
    }

    #[test]
    fn derived_slug_takes_next_free_suffix() {
        let (mut store, _) = store_with_note("test-note");
        let slug = assign_slug(&store, "", "Test Note", None).unwrap();
        assert_eq!(slug.as_str(), "test-note-2");

        let author = store.find_user("testuser").unwrap().unwrap();
        let note = store
            .insert_note(
                &NoteDraft::new("Test Note", "text", slug).with_origin(SlugOrigin::Derived),
                author.id(),
            )
            .unwrap();
        assert_eq!(note.slug().as_str(), "test-note-2");
        assert_eq!(
            assign_slug(&store, "", "Test Note", None).unwrap().as_str(),
            "test-note-3"
        );
    }

    #[test]
    fn derived_slug_of_edited_note_is_not_a_clash() {
        let (store, id) = store_with_note("test-note");
        let slug = assign_slug(&store, "", "Test Note", Some(&id)).unwrap();
        assert_eq!(slug.as_str(), "test-note");
    }

    #[test]
    fn blank_field_means_derived() {
        assert_eq!(slug_origin(""), SlugOrigin::Derived);
        assert_eq!(slug_origin("   "), SlugOrigin::Derived);
        assert_eq!(slug_origin("given"), SlugOrigin::Explicit);
    }

    #[test]
    fn editing_note_may_keep_its_slug() {
        let (store, id) = store_with_note("keep");
        let slug = assign_slug(&store, "keep", "Test Note", Some(&id)).unwrap();
        assert_eq!(slug.as_str(), "keep");
    }

    #[test]
    fn malformed_candidate_is_invalid() {
        let (store, _) = store_with_note("1");
        let err = assign_slug(&store, "has space", "t", None).unwrap_err();
        assert!(matches!(
            err,
            SlugError::Invalid(e) if e.kind() == ParseSlugErrorKind::InvalidCharacters
        ));
    }

    #[test]
    fn uniqueness_ignores_who_is_asking() {
        // assign_slug has no notion of the requesting user: a slug held by
        // anyone blocks everyone
        let (store, _) = store_with_note("shared");
        assert!(matches!(
            assign_slug(&store, "shared", "t", None),
            Err(SlugError::DuplicateSlug(_))
        ));
    }
}

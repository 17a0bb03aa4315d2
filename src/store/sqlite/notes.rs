//! NoteRepository implementation for SqliteStore.

use super::SqliteStore;
use super::connection::is_unique_violation;
use crate::domain::{Note, NoteDraft, NoteId, Slug, SlugOrigin, UserId};
use crate::store::{NoteRepository, StoreError, StoreResult};
use rusqlite::{Connection, OptionalExtension, Row, params};

const NOTE_COLUMNS: &str = "id, title, text, slug, author_id";

const SLUG_TAKEN: &str =
    "SELECT EXISTS(SELECT 1 FROM notes WHERE slug = ?1 AND (?2 IS NULL OR id != ?2))";

/// Raw column values of one `notes` row.
struct NoteRow {
    id: String,
    title: String,
    text: String,
    slug: String,
    author_id: i64,
}

impl NoteRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            text: row.get(2)?,
            slug: row.get(3)?,
            author_id: row.get(4)?,
        })
    }

    fn into_note(self) -> StoreResult<Note> {
        let invalid = |reason: String| StoreError::InvalidRow {
            table: "notes",
            reason,
        };
        let id: NoteId = self.id.parse().map_err(|e| invalid(format!("{e}")))?;
        let slug = Slug::new(&self.slug).map_err(|e| invalid(format!("{e}")))?;
        Ok(Note::new(
            id,
            self.title,
            self.text,
            slug,
            UserId::new(self.author_id),
        ))
    }
}

fn slug_in_use(conn: &Connection, slug: &Slug, exclude: Option<&str>) -> StoreResult<bool> {
    Ok(conn.query_row(SLUG_TAKEN, params![slug.as_str(), exclude], |row| row.get(0))?)
}

/// Settles the slug `draft` is written under. Must run inside the write
/// transaction.
///
/// An explicit slug held by another note is a [`StoreError::DuplicateSlug`];
/// a derived one moves on to the first free `-N` suffix.
fn claim_slug(
    conn: &Connection,
    draft: &NoteDraft,
    exclude: Option<&NoteId>,
) -> StoreResult<Slug> {
    let exclude = exclude.map(|id| id.to_string());
    let exclude = exclude.as_deref();
    match draft.slug_origin {
        SlugOrigin::Derived => draft.slug.first_free(|slug| slug_in_use(conn, slug, exclude)),
        SlugOrigin::Explicit => {
            if slug_in_use(conn, &draft.slug, exclude)? {
                return Err(StoreError::DuplicateSlug {
                    slug: draft.slug.to_string(),
                });
            }
            Ok(draft.slug.clone())
        }
    }
}

/// Maps a UNIQUE violation on `notes.slug` to `DuplicateSlug`.
fn slug_conflict(err: rusqlite::Error, slug: &Slug) -> StoreError {
    if is_unique_violation(&err, "notes.slug") {
        StoreError::DuplicateSlug {
            slug: slug.to_string(),
        }
    } else {
        StoreError::Database(err)
    }
}

impl SqliteStore {
    fn query_notes(&self, sql: &str, params: impl rusqlite::Params) -> StoreResult<Vec<Note>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, NoteRow::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows.into_iter().map(NoteRow::into_note).collect()
    }

    fn query_note(&self, sql: &str, params: impl rusqlite::Params) -> StoreResult<Option<Note>> {
        self.conn
            .query_row(sql, params, NoteRow::from_row)
            .optional()?
            .map(NoteRow::into_note)
            .transpose()
    }
}

impl NoteRepository for SqliteStore {
    fn insert_note(&mut self, draft: &NoteDraft, author: UserId) -> StoreResult<Note> {
        let tx = self.transaction()?;
        let slug = claim_slug(tx.conn(), draft, None)?;

        let id = NoteId::new();
        tx.conn()
            .execute(
                "INSERT INTO notes (id, title, text, slug, author_id) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    id.to_string(),
                    draft.title,
                    draft.text,
                    slug.as_str(),
                    author.get()
                ],
            )
            .map_err(|e| slug_conflict(e, &slug))?;
        tx.commit()?;

        Ok(Note::new(
            id,
            draft.title.clone(),
            draft.text.clone(),
            slug,
            author,
        ))
    }

    fn update_note(&mut self, id: &NoteId, draft: &NoteDraft) -> StoreResult<Note> {
        let tx = self.transaction()?;
        let slug = claim_slug(tx.conn(), draft, Some(id))?;

        let changed = tx
            .conn()
            .execute(
                "UPDATE notes SET title = ?1, text = ?2, slug = ?3 WHERE id = ?4",
                params![draft.title, draft.text, slug.as_str(), id.to_string()],
            )
            .map_err(|e| slug_conflict(e, &slug))?;
        if changed == 0 {
            return Err(StoreError::NoteNotFound { id: id.to_string() });
        }

        let author: i64 = tx.conn().query_row(
            "SELECT author_id FROM notes WHERE id = ?1",
            [id.to_string()],
            |row| row.get(0),
        )?;
        tx.commit()?;

        Ok(Note::new(
            id.clone(),
            draft.title.clone(),
            draft.text.clone(),
            slug,
            UserId::new(author),
        ))
    }

    fn delete_note(&mut self, id: &NoteId) -> StoreResult<()> {
        let removed = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?1", [id.to_string()])?;
        if removed == 0 {
            return Err(StoreError::NoteNotFound { id: id.to_string() });
        }
        Ok(())
    }

    fn find_by_slug(&self, slug: &str) -> StoreResult<Option<Note>> {
        self.query_note(
            &format!("SELECT {NOTE_COLUMNS} FROM notes WHERE slug = ?1"),
            [slug],
        )
    }

    fn list_by_author(&self, author: UserId) -> StoreResult<Vec<Note>> {
        self.query_notes(
            &format!("SELECT {NOTE_COLUMNS} FROM notes WHERE author_id = ?1 ORDER BY rowid"),
            [author.get()],
        )
    }

    fn slug_taken(&self, slug: &Slug, exclude: Option<&NoteId>) -> StoreResult<bool> {
        let exclude = exclude.map(|id| id.to_string());
        slug_in_use(&self.conn, slug, exclude.as_deref())
    }

    fn count_notes(&self) -> StoreResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))?;
        Ok(u64::try_from(count).unwrap_or_default())
    }
}

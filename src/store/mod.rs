//! SQLite-backed store for users and notes

mod repository;
mod schema;
mod sqlite;

pub use repository::{NoteRepository, StoreError, StoreResult, UserRepository};
pub use schema::{SCHEMA_VERSION, create_schema, get_schema_version};
pub use sqlite::{SqliteStore, Transaction};

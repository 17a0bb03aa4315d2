//! SQLite-backed store implementation.

mod connection;
mod notes;
mod transaction;
mod users;


use rusqlite::Connection;

pub use transaction::Transaction;

// ===========================================
// SqliteStore Struct
// ===========================================

/// SQLite-backed store for users and notes.
///
/// Owns a single connection. Callers that share it across requests wrap it
/// in a mutex; each operation runs to completion while the lock is held.
pub struct SqliteStore {
    pub(crate) conn: Connection,
}

//! Command handlers for the CLI.

mod add_user;
mod serve;

use anyhow::{Context, Result};
use std::path::Path;

use crate::store::SqliteStore;

pub use add_user::handle_add_user;
pub use serve::handle_serve;

// ===========================================
// Shared Utilities
// ===========================================

/// Opens (creating if needed) the database at `path`.
pub(crate) fn open_store(path: &Path) -> Result<SqliteStore> {
    SqliteStore::open(path).with_context(|| format!("failed to open database at {}", path.display()))
}

//! Isolated test environment with temp directory.

use super::NotesCommand;
use notes::store::SqliteStore;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with a temporary directory for the database
/// and config file.
///
/// The directory is removed when the TestEnv is dropped.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    root: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the database the CLI is pointed at.
    pub fn db_path(&self) -> PathBuf {
        self.root.join("notes.db")
    }

    /// Path of the config file the CLI is pointed at.
    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    /// Writes a config file using the cheapest hash costs and this env's db.
    pub fn write_config(&self) -> PathBuf {
        let path = self.config_path();
        let contents = format!(
            "[database]\npath = {:?}\n\n[auth]\nhash_memory_kib = 8\nhash_iterations = 1\n",
            self.db_path().to_string_lossy()
        );
        std::fs::write(&path, contents).expect("Failed to write config");
        path
    }

    /// Opens the database directly.
    pub fn open_store(&self) -> SqliteStore {
        SqliteStore::open(&self.db_path()).expect("Failed to open store")
    }

    /// Creates a NotesCommand using this environment's config file.
    pub fn cmd(&self) -> NotesCommand {
        NotesCommand::new().config(&self.write_config())
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

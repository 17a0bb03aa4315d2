//! Fluent wrapper around assert_cmd::Command.

// Allow dead code since this is a test utility
#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;

/// Fluent wrapper around `assert_cmd::Command` for the `notes` binary.
pub struct NotesCommand {
    args: Vec<String>,
    env: Vec<(String, String)>,
}

impl NotesCommand {
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            env: Vec::new(),
        }
    }

    /// Sets the `--config` option.
    pub fn config(mut self, path: &Path) -> Self {
        self.args.push("--config".to_string());
        self.args.push(path.to_string_lossy().to_string());
        self
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Sets an environment variable for the child process.
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.env.push((key.to_string(), value.to_string()));
        self
    }

    /// `add-user <username>`
    pub fn add_user(self, username: &str) -> Self {
        self.args(["add-user", username])
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("notes").expect("Failed to find notes binary");
        cmd.args(&self.args);
        cmd.env_remove("NOTES_PASSWORD");
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        cmd.assert()
    }
}

impl Default for NotesCommand {
    fn default() -> Self {
        Self::new()
    }
}

//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::infra::PasswordHasher;

/// Address used when neither the CLI nor the config file names one.
pub const DEFAULT_BIND: ([u8; 4], u16) = ([127, 0, 0, 1], 8000);

/// Database file used when neither the CLI nor the config file names one.
pub const DEFAULT_DB: &str = "notes.db";

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

/// `[server]` section.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub bind: Option<SocketAddr>,
}

/// `[database]` section.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite file, relative to the working directory
    pub path: Option<PathBuf>,
}

/// `[auth]` section.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AuthConfig {
    /// Argon2 memory cost in KiB
    pub hash_memory_kib: Option<u32>,

    /// Argon2 passes
    pub hash_iterations: Option<u32>,

    /// Send the session cookie only over HTTPS
    pub session_secure: bool,
}

impl Config {
    /// Load configuration from `path`, or from the default location.
    ///
    /// A missing file at the default location yields the default config; a
    /// missing file given explicitly is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (config_path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::config_path(), false),
        };

        if !explicit && !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/notes/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("notes")
            .join("config.toml")
    }

    /// Resolve the listen address.
    ///
    /// Precedence order:
    /// 1. CLI `--bind` argument
    /// 2. Config file `server.bind`
    /// 3. [`DEFAULT_BIND`]
    pub fn bind_addr(&self, cli_bind: Option<SocketAddr>) -> SocketAddr {
        cli_bind
            .or(self.server.bind)
            .unwrap_or_else(|| SocketAddr::from(DEFAULT_BIND))
    }

    /// Resolve the database file, CLI `--db` first, then config, then `notes.db`.
    pub fn db_path(&self, cli_db: Option<&PathBuf>) -> PathBuf {
        cli_db
            .cloned()
            .or_else(|| self.database.path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB))
    }

    /// Builds the password hasher from the `[auth]` costs.
    pub fn password_hasher(&self) -> Result<PasswordHasher> {
        let defaults = argon2::Params::default();
        let memory = self.auth.hash_memory_kib.unwrap_or(defaults.m_cost());
        let iterations = self.auth.hash_iterations.unwrap_or(defaults.t_cost());
        PasswordHasher::new(memory, iterations).context("invalid [auth] hash settings")
    }
}

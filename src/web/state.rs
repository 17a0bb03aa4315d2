//! Shared application state handed to every handler.

use std::sync::{Arc, Mutex};

use crate::infra::PasswordHasher;
use crate::store::SqliteStore;
use crate::web::error::WebError;
use crate::web::templates::Templates;

/// Store, templates and password hasher shared across requests.
///
/// Cloning is cheap; all clones point at the same store.
#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<SqliteStore>>,
    templates: Arc<Templates>,
    hasher: Arc<PasswordHasher>,
}

impl AppState {
    /// Wraps an open store. Fails only if a built-in template does not parse.
    pub fn new(store: SqliteStore, hasher: PasswordHasher) -> Result<Self, minijinja::Error> {
        Ok(Self {
            store: Arc::new(Mutex::new(store)),
            templates: Arc::new(Templates::new()?),
            hasher: Arc::new(hasher),
        })
    }

    /// Runs `f` with exclusive access to the store.
    ///
    /// The lock is released before this returns; never call it across an
    /// `.await`.
    pub fn with_store<T, E>(
        &self,
        f: impl FnOnce(&mut SqliteStore) -> Result<T, E>,
    ) -> Result<T, WebError>
    where
        WebError: From<E>,
    {
        let mut store = self.store.lock().map_err(|_| WebError::Poisoned)?;
        Ok(f(&mut store)?)
    }

    /// Runs `f` with exclusive access to the store on the blocking pool.
    ///
    /// Handlers go through this so SQLite I/O and lock waits stay off the
    /// async workers.
    pub async fn store_task<T, E, F>(&self, f: F) -> Result<T, WebError>
    where
        F: FnOnce(&mut SqliteStore) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        WebError: From<E>,
    {
        let state = self.clone();
        tokio::task::spawn_blocking(move || state.with_store(f)).await?
    }

    pub fn templates(&self) -> &Templates {
        &self.templates
    }

    pub fn hasher(&self) -> &PasswordHasher {
        &self.hasher
    }
}

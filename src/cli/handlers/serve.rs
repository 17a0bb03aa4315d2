//! serve command handler.

use anyhow::{Context, Result};

use super::open_store;
use crate::cli::ServeArgs;
use crate::cli::config::Config;
use crate::web::{self, AppState, SessionOptions};

pub fn handle_serve(args: &ServeArgs, config: &Config) -> Result<()> {
    let addr = config.bind_addr(args.bind);
    let db_path = config.db_path(args.db.as_ref());

    let store = open_store(&db_path)?;
    let hasher = config.password_hasher()?;
    let state = AppState::new(store, hasher).context("failed to load templates")?;
    let app = web::router(
        state,
        SessionOptions {
            secure: config.auth.session_secure,
        },
    );

    tracing::info!(db = %db_path.display(), "starting server");

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime
        .block_on(web::serve(addr, app))
        .with_context(|| format!("server on {addr} failed"))
}

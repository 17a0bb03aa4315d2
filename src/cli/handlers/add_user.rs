//! add-user command handler.

use anyhow::{Context, Result, bail};

use super::open_store;
use crate::accounts::{AccountError, create_account};
use crate::cli::AddUserArgs;
use crate::cli::config::Config;
use crate::domain::Username;
use crate::store::StoreError;

pub fn handle_add_user(args: &AddUserArgs, config: &Config) -> Result<()> {
    let username = Username::new(&args.username).context("invalid username")?;
    if args.password.is_empty() {
        bail!("password must not be empty");
    }

    let db_path = config.db_path(args.db.as_ref());
    let mut store = open_store(&db_path)?;
    let hasher = config.password_hasher()?;

    match create_account(&mut store, &hasher, &username, &args.password) {
        Ok(user) => {
            tracing::info!(username = %user.username(), id = %user.id(), "account created");
            println!("Created user {} (id {})", user.username(), user.id());
            Ok(())
        }
        Err(AccountError::Store(StoreError::DuplicateUsername { username })) => {
            bail!("user '{username}' already exists")
        }
        Err(e) => Err(e).context("failed to create user"),
    }
}

//! UserRepository implementation for SqliteStore.

use super::SqliteStore;
use super::connection::is_unique_violation;
use crate::domain::{User, UserId, Username};
use crate::store::{StoreError, StoreResult, UserRepository};
use chrono::{DateTime, Utc};
use rusqlite::{OptionalExtension, Row, params};

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<(i64, String, String, String)> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn into_user((id, username, hash, joined): (i64, String, String, String)) -> StoreResult<User> {
    let invalid = |reason: String| StoreError::InvalidRow {
        table: "users",
        reason,
    };
    let username = Username::new(&username).map_err(|e| invalid(e.to_string()))?;
    let date_joined = DateTime::parse_from_rfc3339(&joined)
        .map_err(|e| invalid(format!("invalid date_joined: {e}")))?
        .with_timezone(&Utc);
    Ok(User::new(UserId::new(id), username, hash, date_joined))
}

impl SqliteStore {
    fn query_user(&self, sql: &str, params: impl rusqlite::Params) -> StoreResult<Option<User>> {
        self.conn
            .query_row(sql, params, user_from_row)
            .optional()?
            .map(into_user)
            .transpose()
    }
}

impl UserRepository for SqliteStore {
    fn create_user(&mut self, username: &Username, password_hash: &str) -> StoreResult<User> {
        let date_joined = Utc::now();
        self.conn
            .execute(
                "INSERT INTO users (username, password_hash, date_joined) VALUES (?1, ?2, ?3)",
                params![username.as_str(), password_hash, date_joined.to_rfc3339()],
            )
            .map_err(|e| {
                if is_unique_violation(&e, "users.username") {
                    StoreError::DuplicateUsername {
                        username: username.to_string(),
                    }
                } else {
                    StoreError::Database(e)
                }
            })?;

        Ok(User::new(
            UserId::new(self.conn.last_insert_rowid()),
            username.clone(),
            password_hash,
            date_joined,
        ))
    }

    fn get_user(&self, id: UserId) -> StoreResult<Option<User>> {
        self.query_user(
            "SELECT id, username, password_hash, date_joined FROM users WHERE id = ?1",
            [id.get()],
        )
    }

    fn find_user(&self, username: &str) -> StoreResult<Option<User>> {
        self.query_user(
            "SELECT id, username, password_hash, date_joined FROM users WHERE username = ?1",
            [username],
        )
    }
}

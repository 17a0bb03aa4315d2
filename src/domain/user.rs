//! Accounts that own notes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of characters in a username.
pub const USERNAME_MAX_LENGTH: usize = 150;

/// Store-assigned numeric user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wraps a raw store identifier.
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw store identifier.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated login name.
///
/// Usernames may contain letters (any script), digits and `@`, `.`, `+`,
/// `-`, `_`. Surrounding whitespace is trimmed; case is preserved.
///
/// ```
/// use notes::domain::Username;
///
/// assert!(Username::new("user1").is_ok());
/// assert!(Username::new("no spaces").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

/// Error returned when a username fails validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseUsernameError {
    Empty,
    TooLong { length: usize },
    InvalidCharacters(String),
}

impl fmt::Display for ParseUsernameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "username cannot be empty"),
            Self::TooLong { length } => write!(
                f,
                "username is {} characters long (max {})",
                length, USERNAME_MAX_LENGTH
            ),
            Self::InvalidCharacters(value) => write!(
                f,
                "invalid username '{}': only letters, digits and @/./+/-/_ are allowed",
                value
            ),
        }
    }
}

impl std::error::Error for ParseUsernameError {}

impl Username {
    /// Validates and wraps a username.
    pub fn new(s: &str) -> Result<Self, ParseUsernameError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseUsernameError::Empty);
        }

        let length = trimmed.chars().count();
        if length > USERNAME_MAX_LENGTH {
            return Err(ParseUsernameError::TooLong { length });
        }

        if !trimmed
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
        {
            return Err(ParseUsernameError::InvalidCharacters(trimmed.to_string()));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Returns the username as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Username(\"{}\")", self.0)
    }
}

impl Serialize for Username {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

/// A registered account.
///
/// The password hash is never serialized, so a `User` can be handed to
/// templates directly.
#[derive(Clone, PartialEq, Serialize)]
pub struct User {
    id: UserId,
    username: Username,
    #[serde(skip)]
    password_hash: String,
    date_joined: DateTime<Utc>,
}

impl User {
    /// Assembles a user from stored fields.
    pub fn new(
        id: UserId,
        username: Username,
        password_hash: impl Into<String>,
        date_joined: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            password_hash: password_hash.into(),
            date_joined,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the argon2 PHC string for this account.
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn date_joined(&self) -> DateTime<Utc> {
        self.date_joined
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("date_joined", &self.date_joined)
            .finish_non_exhaustive()
    }
}

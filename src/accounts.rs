//! Login and signup form validation and credential checks.

use crate::domain::{ParseUsernameError, USERNAME_MAX_LENGTH, User, Username};
use crate::forms::{FieldErrors, REQUIRED, max_length_message};
use crate::infra::{PasswordError, PasswordHasher};
use crate::store::{StoreError, UserRepository};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Non-field error for an unknown username or wrong password.
pub const INVALID_LOGIN: &str = "Пожалуйста, введите правильные имя пользователя и пароль.";

/// Signup error for a username that is already registered.
pub const DUPLICATE_USERNAME: &str = "Пользователь с таким именем уже существует.";

/// Signup error when the confirmation differs from the password.
pub const PASSWORD_MISMATCH: &str = "Введенные пароли не совпадают.";

/// Signup error for a username with disallowed characters.
pub const INVALID_USERNAME: &str = "Введите правильное имя пользователя. Оно может содержать только буквы, цифры и знаки @/./+/-/_.";

/// Errors from account operations that are not validation failures.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Password(#[from] PasswordError),
}

/// Submitted login fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginFormData {
    pub username: String,
    pub password: String,
    pub next: String,
}

/// Submitted signup fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SignupFormData {
    pub username: String,
    pub password1: String,
    pub password2: String,
}

/// Login or signup form as handed to templates.
///
/// Only the username is echoed back; passwords never reach a template.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AccountForm {
    username: String,
    errors: FieldErrors,
}

impl AccountForm {
    pub fn blank() -> Self {
        Self::default()
    }

    fn with_errors(username: &str, errors: FieldErrors) -> Self {
        Self {
            username: username.trim().to_string(),
            errors,
        }
    }

    /// The login form after a failed authentication.
    pub fn invalid_login(username: &str) -> Self {
        let mut errors = FieldErrors::new();
        errors.add_non_field(INVALID_LOGIN);
        Self::with_errors(username, errors)
    }

    /// The signup form after hitting an existing username.
    pub fn duplicate_username(username: &str) -> Self {
        let mut errors = FieldErrors::new();
        errors.add("username", DUPLICATE_USERNAME);
        Self::with_errors(username, errors)
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }
}

/// Checks that both login fields are filled in.
///
/// Returns the trimmed username and the password as typed.
pub fn clean_login(data: &LoginFormData) -> Result<(String, String), AccountForm> {
    let mut errors = FieldErrors::new();
    let username = data.username.trim();
    if username.is_empty() {
        errors.add("username", REQUIRED);
    }
    if data.password.is_empty() {
        errors.add("password", REQUIRED);
    }

    if errors.is_empty() {
        Ok((username.to_string(), data.password.clone()))
    } else {
        Err(AccountForm::with_errors(username, errors))
    }
}

/// Validates a signup submission short of the uniqueness check.
pub fn clean_signup(data: &SignupFormData) -> Result<(Username, String), AccountForm> {
    let mut errors = FieldErrors::new();

    let username = match Username::new(&data.username) {
        Ok(username) => Some(username),
        Err(ParseUsernameError::Empty) => {
            errors.add("username", REQUIRED);
            None
        }
        Err(ParseUsernameError::TooLong { length }) => {
            errors.add("username", max_length_message(USERNAME_MAX_LENGTH, length));
            None
        }
        Err(ParseUsernameError::InvalidCharacters(_)) => {
            errors.add("username", INVALID_USERNAME);
            None
        }
    };

    if data.password1.is_empty() {
        errors.add("password1", REQUIRED);
    }
    if data.password2.is_empty() {
        errors.add("password2", REQUIRED);
    } else if !data.password1.is_empty() && data.password1 != data.password2 {
        errors.add("password2", PASSWORD_MISMATCH);
    }

    match username {
        Some(username) if errors.is_empty() => Ok((username, data.password1.clone())),
        _ => Err(AccountForm::with_errors(&data.username, errors)),
    }
}

/// Returns `user` if `password` matches its stored hash.
///
/// Takes the already looked-up account so the slow hash check can run
/// without holding the store.
pub fn check_password(
    hasher: &PasswordHasher,
    user: Option<User>,
    password: &str,
) -> Result<Option<User>, PasswordError> {
    match user {
        Some(user) if hasher.verify(password, user.password_hash())? => Ok(Some(user)),
        _ => Ok(None),
    }
}

/// Hashes `password` and registers a new account.
///
/// Fails with [`StoreError::DuplicateUsername`] if the name is taken.
pub fn create_account<R>(
    store: &mut R,
    hasher: &PasswordHasher,
    username: &Username,
    password: &str,
) -> Result<User, AccountError>
where
    R: UserRepository + ?Sized,
{
    let hash = hasher.hash(password)?;
    Ok(store.create_user(username, &hash)?)
}

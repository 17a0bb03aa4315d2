//! Request-level errors and the pages they render as.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

use crate::accounts::AccountError;
use crate::infra::PasswordError;
use crate::notes::AccessError;
use crate::store::StoreError;

const NOT_FOUND_PAGE: &str = r#"<!DOCTYPE html>
<html lang="ru">
<head><meta charset="utf-8"><title>404</title></head>
<body><h1>Страница не найдена</h1><p><a href="/">На главную</a></p></body>
</html>"#;

const SERVER_ERROR_PAGE: &str = r#"<!DOCTYPE html>
<html lang="ru">
<head><meta charset="utf-8"><title>500</title></head>
<body><h1>Ошибка сервера</h1></body>
</html>"#;

/// Anything that stops a handler from producing its normal response.
#[derive(Debug, Error)]
pub enum WebError {
    /// Unknown route, unknown slug, or a note owned by someone else.
    #[error("not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// A handler panicked while holding the store lock.
    #[error("store lock poisoned")]
    Poisoned,
}

impl From<AccessError> for WebError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::NotFound => Self::NotFound,
            AccessError::Store(e) => Self::Store(e),
        }
    }
}

impl From<AccountError> for WebError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::Store(e) => Self::Store(e),
            AccountError::Password(e) => Self::Password(e),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE)).into_response(),
            err => {
                tracing::error!(error = %err, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, Html(SERVER_ERROR_PAGE)).into_response()
            }
        }
    }
}

/// Fallback for paths no route matches.
pub async fn not_found() -> WebError {
    WebError::NotFound
}

//! Session-based login requirement for note routes.

use axum::extract::{Request, State};
use axum::http::{StatusCode, Uri, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tower_sessions::Session;

use crate::domain::{User, UserId};
use crate::store::UserRepository;
use crate::web::error::WebError;
use crate::web::state::AppState;

/// Session key holding the logged-in user's id.
pub const SESSION_USER_KEY: &str = "_auth_user_id";

/// Path of the login page.
pub const LOGIN_URL: &str = "/auth/login/";

// Characters left unescaped in the `next` parameter
const NEXT_PATH: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// The authenticated user, inserted into request extensions by
/// [`require_login`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// A `302 Found` pointing at `location`.
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

/// Login page URL that returns to `next` afterwards.
///
/// ```
/// use notes::web::login_url;
///
/// assert_eq!(login_url("/notes/"), "/auth/login/?next=/notes/");
/// assert_eq!(login_url("/note/a b/"), "/auth/login/?next=/note/a%20b/");
/// ```
pub fn login_url(next: &str) -> String {
    format!("{LOGIN_URL}?next={}", utf8_percent_encode(next, NEXT_PATH))
}

/// Loads the user recorded in `session`, if any.
///
/// A session pointing at a deleted account counts as anonymous.
pub async fn current_user(state: &AppState, session: &Session) -> Result<Option<User>, WebError> {
    let Some(id) = session.get::<i64>(SESSION_USER_KEY).await? else {
        return Ok(None);
    };
    state
        .store_task(move |store| store.get_user(UserId::new(id)))
        .await
}

fn full_path(uri: &Uri) -> &str {
    uri.path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path())
}

/// Middleware: passes logged-in requests through with a [`CurrentUser`]
/// extension and redirects everyone else to the login page.
pub async fn require_login(
    State(state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, WebError> {
    match current_user(&state, &session).await? {
        Some(user) => {
            request.extensions_mut().insert(CurrentUser(user));
            Ok(next.run(request).await)
        }
        None => {
            let path = full_path(request.uri());
            tracing::debug!(path, "anonymous request, redirecting to login");
            Ok(found(&login_url(path)))
        }
    }
}

/// Accepts `next` only if it is a path on this site.
pub fn safe_next(next: &str) -> Option<&str> {
    let is_local = next.starts_with('/') && !next.starts_with("//") && !next.contains('\\');
    is_local.then_some(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn login_url_keeps_slashes() {
        assert_eq!(login_url("/add/"), "/auth/login/?next=/add/");
        assert_eq!(
            login_url("/edit/test-note/"),
            "/auth/login/?next=/edit/test-note/"
        );
    }

    #[test]
    fn login_url_escapes_query_and_unicode() {
        assert_eq!(login_url("/notes/?a=1"), "/auth/login/?next=/notes/%3Fa%3D1");
        assert_eq!(login_url("/note/я/"), "/auth/login/?next=/note/%D1%8F/");
    }

    #[test]
    fn found_is_302_with_location() {
        let response = found("/done/");
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], "/done/");
    }

    #[test]
    fn safe_next_rejects_other_hosts() {
        assert_eq!(safe_next("/notes/"), Some("/notes/"));
        assert_eq!(safe_next("//evil.example/"), None);
        assert_eq!(safe_next("https://evil.example/"), None);
        assert_eq!(safe_next("/\\evil.example"), None);
        assert_eq!(safe_next(""), None);
    }

    #[test]
    fn full_path_includes_query() {
        let uri: Uri = "/notes/?page=2".parse().unwrap();
        assert_eq!(full_path(&uri), "/notes/?page=2");
    }
}

//! In-process application driven through `tower::ServiceExt::oneshot`.

// Allow dead code since not every test file uses every helper
#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use notes::accounts::create_account;
use notes::domain::{Note, User, Username};
use notes::infra::PasswordHasher;
use notes::notes::{FormOutcome, NoteFormData, create_note};
use notes::store::{NoteRepository, SqliteStore, StoreError};
use notes::web::{self, AppState, RenderedTemplate, SessionOptions};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::Value;
use tower::ServiceExt;

/// The application over an in-memory store, plus direct store access for
/// arranging and checking test data.
pub struct TestApp {
    state: AppState,
    router: Router,
}

impl TestApp {
    /// Creates an application with an empty in-memory database.
    pub fn new() -> Self {
        let store = SqliteStore::open_in_memory().expect("Failed to open in-memory store");
        let state = AppState::new(store, PasswordHasher::insecure_fast())
            .expect("Failed to build app state");
        let router = web::router(state.clone(), SessionOptions::default());
        Self { state, router }
    }

    /// Registers an account directly in the store.
    pub fn create_user(&self, username: &str, password: &str) -> User {
        let username = Username::new(username).expect("Invalid test username");
        self.state
            .with_store(|store| create_account(store, self.state.hasher(), &username, password))
            .expect("Failed to create user")
    }

    /// Creates a note for `author` as if submitted through the form.
    ///
    /// An empty `slug` lets the slug be derived from the title.
    pub fn create_note(&self, author: &User, title: &str, text: &str, slug: &str) -> Note {
        let data = NoteFormData {
            title: title.to_string(),
            text: text.to_string(),
            slug: slug.to_string(),
        };
        match self
            .state
            .with_store(|store| create_note(store, author, data))
            .expect("Failed to create note")
        {
            FormOutcome::Persisted(note) => note,
            FormOutcome::Rejected(form) => panic!("Note rejected: {:?}", form.errors()),
        }
    }

    /// Removes an account behind the application's back.
    pub fn delete_user(&self, username: &str) {
        self.state
            .with_store(|store| {
                store
                    .conn()
                    .execute("DELETE FROM users WHERE username = ?1", [username])
                    .map_err(StoreError::from)
            })
            .expect("Failed to delete user");
    }

    pub fn note_count(&self) -> u64 {
        self.state
            .with_store(|store| store.count_notes())
            .expect("Failed to count notes")
    }

    pub fn find_note(&self, slug: &str) -> Option<Note> {
        self.state
            .with_store(|store| store.find_by_slug(slug))
            .expect("Failed to look up note")
    }

    /// A client with no session.
    pub fn client(&self) -> TestClient {
        TestClient {
            router: self.router.clone(),
            cookie: None,
        }
    }

    /// A client already logged in as `username`.
    pub async fn login(&self, username: &str, password: &str) -> TestClient {
        let mut client = self.client();
        let response = client.login(username, password).await;
        assert_eq!(
            response.status,
            StatusCode::FOUND,
            "login as {username} failed"
        );
        client
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// A browser-like client that carries the session cookie between requests.
pub struct TestClient {
    router: Router,
    cookie: Option<String>,
}

impl TestClient {
    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = self.request(Method::GET, uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    /// POSTs `fields` as `application/x-www-form-urlencoded`.
    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = fields
            .iter()
            .map(|(k, v)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(k, NON_ALPHANUMERIC),
                    utf8_percent_encode(v, NON_ALPHANUMERIC)
                )
            })
            .collect::<Vec<_>>()
            .join("&");
        let request = self
            .request(Method::POST, uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    /// Submits the login form.
    pub async fn login(&mut self, username: &str, password: &str) -> TestResponse {
        self.post_form(
            "/auth/login/",
            &[("username", username), ("password", password)],
        )
        .await
    }

    pub fn has_session(&self) -> bool {
        self.cookie.is_some()
    }

    fn request(&self, method: Method, uri: &str) -> axum::http::request::Builder {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder
    }

    async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        self.store_cookies(response.headers());

        let status = response.status();
        let headers = response.headers().clone();
        let rendered = response.extensions().get::<RenderedTemplate>().cloned();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");

        TestResponse {
            status,
            headers,
            template: rendered.as_ref().map(|r| r.name),
            context: rendered
                .map(|r| serde_json::to_value(&r.context).expect("Context is not JSON"))
                .unwrap_or(Value::Null),
            body: String::from_utf8(bytes.to_vec()).expect("Body was not valid UTF-8"),
        }
    }

    fn store_cookies(&mut self, headers: &HeaderMap) {
        for value in headers.get_all(header::SET_COOKIE) {
            let raw = value.to_str().expect("Set-Cookie was not ASCII");
            let pair = raw.split(';').next().unwrap_or_default().trim();
            let removed = pair.ends_with('=') || raw.to_ascii_lowercase().contains("max-age=0");
            self.cookie = if removed { None } else { Some(pair.to_string()) };
        }
    }
}

/// Everything a test may want to assert about a response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Name of the template that rendered the page, if any.
    pub template: Option<&'static str>,
    /// Template context as JSON, `Null` if no template was rendered.
    pub context: Value,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header of a redirect.
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    /// Asserts a `302 Found` to exactly `location`.
    pub fn assert_redirects(&self, location: &str) {
        assert_eq!(self.status, StatusCode::FOUND, "body: {}", self.body);
        assert_eq!(self.location(), Some(location));
    }

    /// Asserts a 200 rendered with `template`.
    pub fn assert_template(&self, template: &str) {
        assert_eq!(self.status, StatusCode::OK, "body: {}", self.body);
        assert_eq!(self.template, Some(template));
    }

    /// Errors recorded for `field` on the `form` in the context.
    pub fn form_errors(&self, field: &str) -> Vec<String> {
        match &self.context["form"]["errors"][field] {
            Value::Array(items) => items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }
}

//! Login, logout and signup pages.

use axum::extract::{Form, Query, State};
use axum::response::Response;
use minijinja::context;
use serde::Deserialize;
use tower_sessions::Session;

use crate::accounts::{
    AccountForm, LoginFormData, SignupFormData, check_password, clean_login, clean_signup,
};
use crate::store::{StoreError, UserRepository};
use crate::web::auth_gate::{LOGIN_URL, SESSION_USER_KEY, current_user, found, safe_next};
use crate::web::error::WebError;
use crate::web::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NextQuery {
    next: String,
}

fn render_login(state: &AppState, form: AccountForm, next: &str) -> Result<Response, WebError> {
    Ok(state.templates().render(
        "registration/login.html",
        context! { user => (), form, next },
    )?)
}

fn render_signup(state: &AppState, form: AccountForm) -> Result<Response, WebError> {
    Ok(state
        .templates()
        .render("registration/signup.html", context! { user => (), form })?)
}

pub async fn login_form(
    State(state): State<AppState>,
    Query(query): Query<NextQuery>,
) -> Result<Response, WebError> {
    render_login(&state, AccountForm::blank(), &query.next)
}

pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<NextQuery>,
    Form(data): Form<LoginFormData>,
) -> Result<Response, WebError> {
    let next = if data.next.is_empty() {
        query.next
    } else {
        data.next.clone()
    };

    let (username, password) = match clean_login(&data) {
        Ok(fields) => fields,
        Err(form) => return render_login(&state, form, &next),
    };

    let name = username.clone();
    let account = state
        .store_task(move |store| store.find_user(&name))
        .await?;
    let worker = state.clone();
    let user = tokio::task::spawn_blocking(move || {
        check_password(worker.hasher(), account, &password)
    })
    .await??;

    let Some(user) = user else {
        tracing::warn!(username = %username, "failed login");
        return render_login(&state, AccountForm::invalid_login(&username), &next);
    };

    session.cycle_id().await?;
    session.insert(SESSION_USER_KEY, user.id().get()).await?;
    tracing::info!(username = %username, "user logged in");

    Ok(found(safe_next(&next).unwrap_or("/")))
}

pub async fn logout(State(state): State<AppState>, session: Session) -> Result<Response, WebError> {
    if let Some(user) = current_user(&state, &session).await? {
        tracing::info!(username = %user.username(), "user logged out");
    }
    session.flush().await?;
    Ok(state
        .templates()
        .render("registration/logout.html", context! { user => () })?)
}

pub async fn signup_form(State(state): State<AppState>) -> Result<Response, WebError> {
    render_signup(&state, AccountForm::blank())
}

pub async fn signup(
    State(state): State<AppState>,
    Form(data): Form<SignupFormData>,
) -> Result<Response, WebError> {
    let (username, password) = match clean_signup(&data) {
        Ok(fields) => fields,
        Err(form) => return render_signup(&state, form),
    };

    let name = username.clone();
    if state
        .store_task(move |store| store.find_user(name.as_str()))
        .await?
        .is_some()
    {
        return render_signup(&state, AccountForm::duplicate_username(username.as_str()));
    }

    let worker = state.clone();
    let hash = tokio::task::spawn_blocking(move || worker.hasher().hash(&password)).await??;

    let name = username.clone();
    let created = state
        .store_task(move |store| Ok::<_, WebError>(store.create_user(&name, &hash)))
        .await?;
    match created {
        Ok(user) => {
            tracing::info!(username = %user.username(), "account created");
            Ok(found(LOGIN_URL))
        }
        Err(StoreError::DuplicateUsername { .. }) => {
            render_signup(&state, AccountForm::duplicate_username(username.as_str()))
        }
        Err(e) => Err(e.into()),
    }
}

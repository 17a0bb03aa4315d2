//! Note pages: home, list, create, detail, edit, delete.

use axum::Extension;
use axum::extract::{Form, Path, State};
use axum::response::Response;
use minijinja::{Value, context};
use tower_sessions::Session;

use crate::domain::{Note, User};
use crate::infra::markdown_to_html;
use crate::notes::{
    AccessError, FormOutcome, NoteForm, NoteFormData, create_note, edit_note, get_note_for,
    list_notes_for,
};
use crate::store::NoteRepository;
use crate::web::auth_gate::{CurrentUser, current_user, found};
use crate::web::error::WebError;
use crate::web::state::AppState;

/// Where every successful write lands.
pub const SUCCESS_URL: &str = "/done/";

pub async fn home(State(state): State<AppState>, session: Session) -> Result<Response, WebError> {
    let user = current_user(&state, &session).await?;
    Ok(state
        .templates()
        .render("notes/home.html", context! { user })?)
}

pub async fn list(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Response, WebError> {
    let owner = user.clone();
    let notes = state
        .store_task(move |store| list_notes_for(store, &owner))
        .await?;
    Ok(state.templates().render(
        "notes/list.html",
        context! { user, object_list => notes },
    )?)
}

async fn owned_note(state: &AppState, user: &User, slug: String) -> Result<Note, WebError> {
    let owner = user.clone();
    state
        .store_task(move |store| get_note_for(store, &owner, &slug))
        .await
}

fn render_form(state: &AppState, user: &User, form: NoteForm) -> Result<Response, WebError> {
    Ok(state
        .templates()
        .render("notes/form.html", context! { user, form })?)
}

pub async fn add_form(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Response, WebError> {
    render_form(&state, &user, NoteForm::blank())
}

pub async fn add(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Form(data): Form<NoteFormData>,
) -> Result<Response, WebError> {
    let author = user.clone();
    let outcome = state
        .store_task(move |store| create_note(store, &author, data))
        .await?;
    match outcome {
        FormOutcome::Persisted(note) => {
            tracing::info!(slug = %note.slug(), author = %user.id(), "note created");
            Ok(found(SUCCESS_URL))
        }
        FormOutcome::Rejected(form) => render_form(&state, &user, form),
    }
}

pub async fn done(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Response, WebError> {
    Ok(state
        .templates()
        .render("notes/success.html", context! { user })?)
}

pub async fn detail(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(slug): Path<String>,
) -> Result<Response, WebError> {
    let note = owned_note(&state, &user, slug).await?;
    let text_html = Value::from_safe_string(markdown_to_html(note.text()));
    Ok(state.templates().render(
        "notes/detail.html",
        context! { user, note, text_html },
    )?)
}

pub async fn edit_form(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(slug): Path<String>,
) -> Result<Response, WebError> {
    let note = owned_note(&state, &user, slug).await?;
    render_form(&state, &user, NoteForm::for_note(&note))
}

pub async fn edit(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(slug): Path<String>,
    Form(data): Form<NoteFormData>,
) -> Result<Response, WebError> {
    let owner = user.clone();
    let outcome = state
        .store_task(move |store| {
            let note = get_note_for(store, &owner, &slug)?;
            Ok::<_, AccessError>(edit_note(store, note, data)?)
        })
        .await?;

    match outcome {
        FormOutcome::Persisted(note) => {
            tracing::info!(slug = %note.slug(), "note updated");
            Ok(found(SUCCESS_URL))
        }
        FormOutcome::Rejected(form) => render_form(&state, &user, form),
    }
}

pub async fn delete_confirm(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(slug): Path<String>,
) -> Result<Response, WebError> {
    let note = owned_note(&state, &user, slug).await?;
    Ok(state
        .templates()
        .render("notes/delete.html", context! { user, note })?)
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(slug): Path<String>,
) -> Result<Response, WebError> {
    let note = state
        .store_task(move |store| {
            let note = get_note_for(store, &user, &slug)?;
            store.delete_note(note.id())?;
            Ok::<_, AccessError>(note)
        })
        .await?;
    tracing::info!(slug = %note.slug(), "note deleted");
    Ok(found(SUCCESS_URL))
}

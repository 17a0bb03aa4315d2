//! HTTP layer: routes, session handling and page rendering.

mod accounts;
mod auth_gate;
mod error;
mod state;
mod templates;
mod views;

pub use auth_gate::{CurrentUser, LOGIN_URL, SESSION_USER_KEY, login_url, safe_next};
pub use error::WebError;
pub use state::AppState;
pub use templates::{RenderedTemplate, Templates};
pub use views::SUCCESS_URL;

use std::net::SocketAddr;

use axum::Router;
use axum::middleware;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::SameSite;
use tower_sessions::{MemoryStore, SessionManagerLayer};

/// Options for the session cookie.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    /// Mark the cookie `Secure` (HTTPS only).
    pub secure: bool,
}

/// Builds the full application router.
///
/// Note routes sit behind [`auth_gate::require_login`]; home and the auth
/// pages are public. Unmatched paths render the 404 page.
pub fn router(state: AppState, options: SessionOptions) -> Router {
    let sessions = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(options.secure)
        .with_same_site(SameSite::Lax);

    let gated = Router::new()
        .route("/notes/", get(views::list))
        .route("/add/", get(views::add_form).post(views::add))
        .route("/done/", get(views::done))
        .route("/note/{slug}/", get(views::detail))
        .route("/edit/{slug}/", get(views::edit_form).post(views::edit))
        .route(
            "/delete/{slug}/",
            get(views::delete_confirm).post(views::delete),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_gate::require_login,
        ));

    Router::new()
        .route("/", get(views::home))
        .route(
            "/auth/login/",
            get(accounts::login_form).post(accounts::login),
        )
        .route("/auth/logout/", get(accounts::logout).post(accounts::logout))
        .route(
            "/auth/signup/",
            get(accounts::signup_form).post(accounts::signup),
        )
        .merge(gated)
        .fallback(error::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(sessions),
        )
        .with_state(state)
}

/// Serves `app` on `addr` until Ctrl-C.
pub async fn serve(addr: SocketAddr, app: Router) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

use axum::{
    Form, Router,
    extract::{Request, State},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header::COOKIE},
    middleware::Next,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use tracing::{debug, info};

use crate::AppState;
use crate::auth::{AuthContext, AuthState, HttpAuthProvider};
use crate::backend::{Credentials, HttpBackend, Role};
use crate::config::AppConfig;
use crate::home::{AdminAction, FETCH_USERS_FAILED, HomeController, View};
use crate::session::{HomeSession, SessionStore};
use crate::ui::home::{ask_fragment, home_page, main_fragment};
use crate::ui::shell::html_shell;

/// Event name the shell script turns into a blocking alert.
pub const USERS_FETCH_FAILED_EVENT: &str = "users-fetch-failed";

const HX_TRIGGER: HeaderName = HeaderName::from_static("hx-trigger");

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    let backend = HttpBackend::new(&config.backend)?;
    info!(
        name: "backend.config.loaded",
        api_base = %backend.api_base(),
        auth_url = ?config.backend.auth_url,
        top_k = config.backend.top_k,
        "Backend configuration loaded"
    );
    let auth = HttpAuthProvider::new(&config.backend)?;

    // Session store
    let sessions =
        SessionStore::with_timeout(Duration::from_secs(config.session.idle_timeout_secs));
    spawn_session_sweeper(
        sessions.clone(),
        Duration::from_secs(config.session.sweep_interval_secs),
    );

    let state = AppState {
        controller: Arc::new(HomeController::new(
            Arc::new(backend),
            config.backend.top_k,
        )),
        auth: Arc::new(auth),
        sessions,
        config: Arc::clone(&config),
    };

    let app = router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        "Server started"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

/// Build the application router over `state`.
pub fn router(state: AppState) -> Router {
    let timeout_duration = Duration::from_secs(state.config.server.request_timeout_secs);
    let static_dir = state.config.ui.static_dir.clone();

    Router::new()
        // Full page
        .route("/", get(index))
        // Fragments swapped in by HTMX
        .route("/fragments/ask", get(ask_section))
        .route("/fragments/main", get(main_section))
        .route("/view", post(select_view))
        .route("/ask", post(ask))
        .route("/admin/users/delete", post(delete_user))
        .route("/admin/users/role", post(set_role))
        // Static assets
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(axum::middleware::from_fn(
            move |req: Request, next: Next| async move {
                match tokio::time::timeout(timeout_duration, next.run(req)).await {
                    Ok(res) => res,
                    Err(_) => (StatusCode::REQUEST_TIMEOUT, "Request timed out").into_response(),
                }
            },
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn spawn_session_sweeper(sessions: SessionStore, every: Duration) {
    // interval() panics on a zero period
    let every = every.max(Duration::from_secs(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            let removed = sessions.cleanup_expired();
            if removed > 0 {
                debug!(name: "session.swept", removed, "Expired sessions removed");
            }
        }
    });
}

// ─────────────────────────────────────────────────────────────────────────────
// Request plumbing
// ─────────────────────────────────────────────────────────────────────────────

/// The browser's session, created (and the cookie set) when it has none
/// or its old one expired.
fn session(state: &AppState, jar: CookieJar) -> (HomeSession, CookieJar) {
    let name = &state.config.session.cookie_name;
    if let Some(session) = jar
        .get(name)
        .and_then(|cookie| state.sessions.get(cookie.value()))
    {
        return (session, jar);
    }

    let session = state.sessions.create();
    debug!(name: "session.created", session_id = %session.id(), "Session created");
    let cookie = Cookie::build((name.clone(), session.id().to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    (session, jar.add(cookie))
}

/// The browser's cookies, forwarded to the backend as-is.
fn credentials(headers: &HeaderMap) -> Credentials {
    headers
        .get(COOKIE)
        .and_then(|value| value.to_str().ok())
        .map_or_else(Credentials::none, Credentials::from_cookie)
}

fn auth_context(state: &AppState, auth: AuthState) -> AuthContext {
    AuthContext {
        auth,
        api_base: state.config.backend.api_base.clone(),
    }
}

/// `HX-Trigger` payload raising the fetch-failed alert.
fn fetch_failed_trigger() -> Option<HeaderValue> {
    let mut payload = serde_json::Map::new();
    payload.insert(USERS_FETCH_FAILED_EVENT.to_string(), FETCH_USERS_FAILED.into());
    HeaderValue::from_str(&serde_json::Value::Object(payload).to_string()).ok()
}

// ─────────────────────────────────────────────────────────────────────────────
// HTML Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// GET / - Full page. Loads the user list; auth resolves in fragments.
async fn index(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let (session, jar) = session(&state, jar);
    let alert = state
        .controller
        .fetch_users(&session)
        .await
        .err()
        .map(|_| FETCH_USERS_FAILED);

    let ui = &state.config.ui;
    let body = home_page(
        ui.title.clone(),
        ui.subtitle.clone(),
        session.snapshot(),
        auth_context(&state, AuthState::Loading),
    );
    (jar, Html(html_shell(&ui.title, &ui.htmx_src, &body, alert)))
}

/// GET /fragments/ask - Ask section once auth is known.
async fn ask_section(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
) -> impl IntoResponse {
    let (session, jar) = session(&state, jar);
    let auth = state.auth.resolve(&credentials(&headers)).await;
    (jar, Html(ask_fragment(auth, session.snapshot())))
}

/// GET /fragments/main - Main section once auth is known.
async fn main_section(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
) -> impl IntoResponse {
    let (session, jar) = session(&state, jar);
    let auth = state.auth.resolve(&credentials(&headers)).await;
    (
        jar,
        Html(main_fragment(auth_context(&state, auth), session.snapshot())),
    )
}

#[derive(Debug, Deserialize)]
struct ViewForm {
    view: View,
}

/// POST /view - Select the user or admin section.
async fn select_view(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Form(form): Form<ViewForm>,
) -> impl IntoResponse {
    let (session, jar) = session(&state, jar);
    session.update(|home| home.select_view(form.view));
    let auth = match form.view {
        View::Admin => state.auth.resolve(&credentials(&headers)).await,
        // Only the admin section is gated
        View::User | View::Unselected => AuthState::Anonymous,
    };
    (
        jar,
        Html(main_fragment(auth_context(&state, auth), session.snapshot())),
    )
}

#[derive(Debug, Deserialize)]
struct AskForm {
    #[serde(default)]
    question: String,
}

/// POST /ask - Submit a question. Signed-out browsers get the login prompt
/// back and nothing is sent.
async fn ask(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Form(form): Form<AskForm>,
) -> impl IntoResponse {
    let (session, jar) = session(&state, jar);
    let credentials = credentials(&headers);
    let auth = state.auth.resolve(&credentials).await;
    if auth.user().is_some() {
        let submission = state
            .controller
            .ask_ai(&session, &form.question, &credentials)
            .await;
        debug!(name: "ask.submitted", session_id = %session.id(), ?submission, "Ask form handled");
    }
    (jar, Html(ask_fragment(auth, session.snapshot())))
}

#[derive(Debug, Deserialize)]
struct DeleteForm {
    id: String,
}

/// POST /admin/users/delete - Delete a user, then refresh the list.
async fn delete_user(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Form(form): Form<DeleteForm>,
) -> Response {
    admin_action(state, jar, headers, AdminAction::Delete { id: form.id }).await
}

#[derive(Debug, Deserialize)]
struct RoleForm {
    id: String,
    role: Role,
}

/// POST /admin/users/role - Change a user's role, then refresh the list.
async fn set_role(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Form(form): Form<RoleForm>,
) -> Response {
    if form.role == Role::Unknown {
        return (StatusCode::UNPROCESSABLE_ENTITY, "Unknown role").into_response();
    }
    let action = AdminAction::SetRole {
        id: form.id,
        role: form.role,
    };
    admin_action(state, jar, headers, action).await
}

/// Runs an admin action for a signed-in browser and answers with the main
/// section. A failed refresh raises the fetch-failed alert via `HX-Trigger`.
async fn admin_action(
    state: AppState,
    jar: CookieJar,
    headers: HeaderMap,
    action: AdminAction,
) -> Response {
    let (session, jar) = session(&state, jar);
    let credentials = credentials(&headers);
    let auth = state.auth.resolve(&credentials).await;

    let refresh_failed = if auth.user().is_some() {
        state
            .controller
            .apply_admin_action(&session, action, &credentials)
            .await
            .refresh_failed
    } else {
        false
    };

    let html = main_fragment(auth_context(&state, auth), session.snapshot());
    let mut response = (jar, Html(html)).into_response();
    if refresh_failed && let Some(trigger) = fetch_failed_trigger() {
        response.headers_mut().insert(HX_TRIGGER, trigger);
    }
    response
}

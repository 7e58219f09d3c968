use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use user_console::AppState;
use user_console::auth::{AuthProvider, AuthState};
use user_console::backend::{AskRequest, AskResult, BackendError, Credentials, Role, User, UserBackend};
use user_console::config::AppConfig;
use user_console::home::HomeController;
use user_console::server::router;
use user_console::session::SessionStore;

fn user(id: &str, name: &str, role: Role) -> User {
    User {
        id: id.into(),
        username: name.into(),
        email: format!("{name}@example.com"),
        role,
    }
}

/// In-memory stand-in for the users backend.
#[derive(Debug, Default)]
struct FakeBackend {
    users: Mutex<Vec<User>>,
    fail_list: AtomicBool,
    ask_reply: Mutex<Option<Result<Option<AskResult>, BackendError>>>,
    ask_calls: AtomicUsize,
    list_calls: AtomicUsize,
    ask_delay: Mutex<Option<Duration>>,
}

impl FakeBackend {
    fn with_users(users: Vec<User>) -> Arc<Self> {
        Arc::new(Self {
            users: Mutex::new(users),
            ..Self::default()
        })
    }

    fn reply_to_ask(&self, reply: Result<Option<AskResult>, BackendError>) {
        *self.ask_reply.lock().unwrap() = Some(reply);
    }
}

#[async_trait]
impl UserBackend for FakeBackend {
    async fn list_users(&self) -> Result<Vec<User>, BackendError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(BackendError::Status {
                status: 503,
                body: None,
            });
        }
        Ok(self.users.lock().unwrap().clone())
    }

    async fn ask(
        &self,
        _request: &AskRequest,
        _credentials: &Credentials,
    ) -> Result<Option<AskResult>, BackendError> {
        self.ask_calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.ask_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.ask_reply.lock().unwrap().take().unwrap_or(Ok(None))
    }

    async fn delete_user(&self, id: &str, _credentials: &Credentials) -> Result<(), BackendError> {
        self.users.lock().unwrap().retain(|user| user.id != id);
        Ok(())
    }

    async fn update_role(
        &self,
        id: &str,
        role: Role,
        _credentials: &Credentials,
    ) -> Result<(), BackendError> {
        for user in self.users.lock().unwrap().iter_mut() {
            if user.id == id {
                user.role = role;
            }
        }
        Ok(())
    }
}

/// Every browser resolves to the same auth state.
#[derive(Debug)]
struct FixedAuth(AuthState);

#[async_trait]
impl AuthProvider for FixedAuth {
    async fn resolve(&self, _credentials: &Credentials) -> AuthState {
        self.0.clone()
    }
}

fn signed_in() -> AuthState {
    AuthState::SignedIn(user("me", "root", Role::Admin))
}

fn test_server(backend: &Arc<FakeBackend>, auth: AuthState) -> TestServer {
    let config = AppConfig::load_from_args(["user-console"]).expect("default config");
    test_server_with(backend, auth, config)
}

fn test_server_with(backend: &Arc<FakeBackend>, auth: AuthState, config: AppConfig) -> TestServer {
    let backend: Arc<dyn UserBackend> = Arc::clone(backend) as Arc<dyn UserBackend>;
    let state = AppState {
        controller: Arc::new(HomeController::new(backend, config.backend.top_k)),
        auth: Arc::new(FixedAuth(auth)),
        sessions: SessionStore::new(),
        config: Arc::new(config),
    };
    TestServer::builder()
        .save_cookies()
        .build(router(state))
        .expect("test server")
}

fn two_users() -> Vec<User> {
    vec![user("1", "ada", Role::Admin), user("2", "bob", Role::User)]
}

#[tokio::test]
async fn test_mount_sets_session_and_shows_neither_section() {
    let backend = FakeBackend::with_users(two_users());
    let server = test_server(&backend, signed_in());

    let response = server.get("/").await;
    response.assert_status_ok();

    let cookie = response.header("set-cookie");
    let cookie = cookie.to_str().unwrap();
    assert!(cookie.starts_with("uc_session="));
    assert!(cookie.contains("HttpOnly"));

    let html = response.text();
    assert!(html.contains("Generation Thailand"));
    assert!(html.contains("Checking login..."));
    assert!(!html.contains("data-section"));
    assert!(!html.contains("window.alert(\"Failed"));
    assert_eq!(backend.list_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_mount_fetch_failure_embeds_alert() {
    let backend = FakeBackend::with_users(two_users());
    backend.fail_list.store(true, Ordering::SeqCst);
    let server = test_server(&backend, signed_in());

    let html = server.get("/").await.text();
    assert!(html.contains(r#"window.alert("Failed to fetch users")"#));
}

#[tokio::test]
async fn test_toggling_sections_shows_exactly_one() {
    let backend = FakeBackend::with_users(two_users());
    let server = test_server(&backend, signed_in());
    server.get("/").await.assert_status_ok();

    let html = server.post("/view").form(&[("view", "user")]).await.text();
    assert!(html.contains(r#"data-section="user""#));
    assert!(!html.contains(r#"data-section="admin""#));
    assert!(html.contains("bob@example.com"));

    let html = server.post("/view").form(&[("view", "admin")]).await.text();
    assert!(html.contains(r#"data-section="admin""#));
    assert!(!html.contains(r#"data-section="user""#));
    assert!(html.contains(r#"data-table="admin""#));
}

#[tokio::test]
async fn test_selection_survives_reload() {
    let backend = FakeBackend::with_users(two_users());
    let server = test_server(&backend, signed_in());
    server.get("/").await.assert_status_ok();
    server.post("/view").form(&[("view", "admin")]).await.assert_status_ok();

    // Admin gate resolves again after a full load
    let html = server.get("/").await.text();
    assert!(html.contains("Checking user auth..."));

    let html = server.get("/fragments/main").await.text();
    assert!(html.contains(r#"data-table="admin""#));
}

#[tokio::test]
async fn test_signed_out_gets_login_prompts() {
    let backend = FakeBackend::with_users(two_users());
    let server = test_server(&backend, AuthState::Anonymous);
    server.get("/").await.assert_status_ok();

    let html = server.get("/fragments/ask").await.text();
    assert!(html.contains("Please login to use the AI feature"));
    assert!(!html.contains("<form"));

    let html = server.post("/view").form(&[("view", "admin")]).await.text();
    assert!(html.contains("Please login to access Admin Section"));
    assert!(!html.contains("<table"));

    let html = server
        .post("/ask")
        .form(&[("question", "Who are admins?")])
        .await
        .text();
    assert!(html.contains("Please login to use the AI feature"));
    assert_eq!(backend.ask_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_blank_question_sends_nothing() {
    let backend = FakeBackend::with_users(two_users());
    let server = test_server(&backend, signed_in());

    let html = server.post("/ask").form(&[("question", "   ")]).await.text();
    assert!(html.contains("<form"));
    assert!(!html.contains("ask-error"));
    assert!(!html.contains("answer-block"));
    assert_eq!(backend.ask_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_answer_without_sources() {
    let backend = FakeBackend::with_users(two_users());
    backend.reply_to_ask(Ok(Some(AskResult {
        answer: "X".into(),
        sources: vec![],
    })));
    let server = test_server(&backend, signed_in());

    let html = server
        .post("/ask")
        .form(&[("question", "Who are admins?")])
        .await
        .text();
    assert!(html.contains(">X</div>"));
    assert!(html.contains("No sources found."));
    assert_eq!(backend.ask_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_answer_lists_each_source() {
    let backend = FakeBackend::with_users(two_users());
    backend.reply_to_ask(Ok(Some(AskResult {
        answer: "Two users".into(),
        sources: two_users(),
    })));
    let server = test_server(&backend, signed_in());

    let html = server.post("/ask").form(&[("question", "all")]).await.text();
    assert_eq!(html.matches("<li").count(), 2);
    assert!(html.contains("ada (admin) - ada@example.com"));
}

#[tokio::test]
async fn test_ask_error_messages() {
    let backend = FakeBackend::with_users(two_users());
    let server = test_server(&backend, signed_in());

    backend.reply_to_ask(Err(BackendError::Status {
        status: 400,
        body: Some(json!({ "message": "bad input" })),
    }));
    let html = server.post("/ask").form(&[("question", "q")]).await.text();
    assert!(html.contains(">bad input</div>"));

    backend.reply_to_ask(Err(BackendError::Status {
        status: 500,
        body: Some(json!({})),
    }));
    let html = server.post("/ask").form(&[("question", "q")]).await.text();
    assert!(html.contains(">failed to ask AI</div>"));
}

/// Only `disabled` attributes count, not `disabled:` classes or `hx-disabled-elt`.
fn has_disabled_attr(html: &str) -> bool {
    html.replace("disabled:", "")
        .replace("hx-disabled-elt", "")
        .contains("disabled")
}

#[tokio::test]
async fn test_timed_out_ask_leaves_form_usable() {
    let backend = FakeBackend::with_users(two_users());
    *backend.ask_delay.lock().unwrap() = Some(Duration::from_secs(3));
    let mut config = AppConfig::load_from_args(["user-console"]).expect("default config");
    config.server.request_timeout_secs = 1;
    let server = test_server_with(&backend, signed_in(), config);
    server.get("/").await.assert_status_ok();

    let response = server
        .post("/ask")
        .form(&[("question", "Who are admins?")])
        .expect_failure()
        .await;
    response.assert_status(StatusCode::REQUEST_TIMEOUT);
    assert_eq!(backend.ask_calls.load(Ordering::SeqCst), 1);

    let html = server.get("/fragments/ask").await.text();
    assert!(html.contains("<form"));
    assert!(!html.contains("Asking..."));
    assert!(!has_disabled_attr(&html));

    // The next ask goes through normally
    *backend.ask_delay.lock().unwrap() = None;
    backend.reply_to_ask(Ok(Some(AskResult {
        answer: "X".into(),
        sources: vec![],
    })));
    let html = server.post("/ask").form(&[("question", "again")]).await.text();
    assert!(html.contains(">X</div>"));
    assert_eq!(backend.ask_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_admin_delete_removes_row_and_refreshes() {
    let backend = FakeBackend::with_users(two_users());
    let server = test_server(&backend, signed_in());
    server.get("/").await.assert_status_ok();
    server.post("/view").form(&[("view", "admin")]).await.assert_status_ok();

    let response = server
        .post("/admin/users/delete")
        .form(&[("id", "2")])
        .await;
    response.assert_status_ok();
    assert!(response.headers().get("hx-trigger").is_none());

    let html = response.text();
    assert!(html.contains(r#"data-id="1""#));
    assert!(!html.contains(r#"data-id="2""#));
    // mount + refresh after the delete
    assert_eq!(backend.list_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_admin_refresh_failure_raises_alert() {
    let backend = FakeBackend::with_users(two_users());
    let server = test_server(&backend, signed_in());
    server.get("/").await.assert_status_ok();
    server.post("/view").form(&[("view", "admin")]).await.assert_status_ok();
    backend.fail_list.store(true, Ordering::SeqCst);

    let response = server
        .post("/admin/users/delete")
        .form(&[("id", "2")])
        .await;
    response.assert_status_ok();

    let trigger = response
        .headers()
        .get("hx-trigger")
        .expect("alert trigger header");
    let payload: serde_json::Value = serde_json::from_str(trigger.to_str().unwrap()).unwrap();
    assert_eq!(payload["users-fetch-failed"], "Failed to fetch users");
    // The confirmed delete still shows
    assert!(!response.text().contains(r#"data-id="2""#));
}

#[tokio::test]
async fn test_admin_role_change() {
    let backend = FakeBackend::with_users(two_users());
    let server = test_server(&backend, signed_in());
    server.get("/").await.assert_status_ok();
    server.post("/view").form(&[("view", "admin")]).await.assert_status_ok();

    let html = server
        .post("/admin/users/role")
        .form(&[("id", "2"), ("role", "admin")])
        .await
        .text();
    assert!(!html.contains("Make admin"));
    assert_eq!(html.matches("Make user").count(), 2);
}

#[tokio::test]
async fn test_unknown_role_is_rejected() {
    let backend = FakeBackend::with_users(two_users());
    let server = test_server(&backend, signed_in());

    let response = server
        .post("/admin/users/role")
        .form(&[("id", "2"), ("role", "owner")])
        .expect_failure()
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(backend.users.lock().unwrap()[1].role, Role::User);
}

#[tokio::test]
async fn test_signed_out_admin_action_is_not_sent() {
    let backend = FakeBackend::with_users(two_users());
    let server = test_server(&backend, AuthState::Anonymous);

    let html = server
        .post("/admin/users/delete")
        .form(&[("id", "2")])
        .await
        .text();
    assert_eq!(backend.users.lock().unwrap().len(), 2);
    assert!(!html.contains("<table"));
}

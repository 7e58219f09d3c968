//! Read-only view of the external authentication provider.
//!
//! The console never signs anyone in or out. It forwards the browser's
//! cookie to an endpoint that reports who is signed in, and gates the ask
//! form and the admin table on the answer.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::COOKIE;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::backend::{BackendError, Credentials, User};
use crate::config::BackendConfig;

/// Where the auth check for a render currently stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthState {
    /// The check hasn't completed yet.
    #[default]
    Loading,
    /// Nobody is signed in.
    Anonymous,
    /// A user is signed in.
    SignedIn(User),
}

impl AuthState {
    /// Whether the check is still running.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The signed-in user, if any.
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::SignedIn(user) => Some(user),
            Self::Loading | Self::Anonymous => None,
        }
    }
}

/// Auth state plus the backend base the admin table is pointed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    /// Resolved (or pending) auth state.
    pub auth: AuthState,
    /// Users collection URL.
    pub api_base: String,
}

/// Resolves browser credentials to an [`AuthState`].
///
/// Implementations never return [`AuthState::Loading`]; failures resolve
/// to [`AuthState::Anonymous`].
#[async_trait]
pub trait AuthProvider: Send + Sync + std::fmt::Debug {
    /// Who, if anyone, the credentials belong to.
    async fn resolve(&self, credentials: &Credentials) -> AuthState;
}

/// Shape of the "who am I" response. Both `{data: user}` and `{user: user}`
/// are accepted.
#[derive(Debug, Deserialize)]
struct WhoAmI {
    #[serde(default)]
    data: Option<User>,
    #[serde(default)]
    user: Option<User>,
}

/// Asks an HTTP endpoint who the forwarded cookie belongs to.
#[derive(Debug, Clone)]
pub struct HttpAuthProvider {
    http: reqwest::Client,
    auth_url: Option<Url>,
}

impl HttpAuthProvider {
    /// Build a provider from the backend configuration.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let auth_url = config
            .auth_url
            .as_deref()
            .map(|raw| {
                Url::parse(raw).map_err(|e| BackendError::InvalidUrl(format!("{raw}: {e}")))
            })
            .transpose()?;
        Ok(Self { http, auth_url })
    }

    async fn who_am_i(&self, url: Url, cookie: &str) -> Result<Option<User>, BackendError> {
        let response = self.http.get(url).header(COOKIE, cookie).send().await?;
        let status = response.status();
        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(BackendError::Status {
                status: status.as_u16(),
                body: None,
            });
        }
        let body: WhoAmI = serde_json::from_slice(&response.bytes().await?)?;
        Ok(body.data.or(body.user))
    }
}

#[async_trait]
impl AuthProvider for HttpAuthProvider {
    async fn resolve(&self, credentials: &Credentials) -> AuthState {
        let (Some(url), Some(cookie)) = (self.auth_url.clone(), credentials.cookie()) else {
            return AuthState::Anonymous;
        };

        match self.who_am_i(url, cookie).await {
            Ok(Some(user)) => {
                debug!(name: "auth.resolved", user_id = %user.id, "Signed-in user resolved");
                AuthState::SignedIn(user)
            }
            Ok(None) => AuthState::Anonymous,
            Err(e) => {
                warn!(name: "auth.check.failed", error = %e, "Auth check failed, treating as anonymous");
                AuthState::Anonymous
            }
        }
    }
}

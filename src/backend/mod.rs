//! Client for the users backend.
//!
//! The backend owns the user records and the question answering. This
//! module only speaks its HTTP contract:
//!
//! - `GET {api_base}` → `{ data: User[] }`
//! - `POST {ask_url}` `{ question, topK }` → `{ data: { answer, sources } }`
//! - `DELETE {api_base}/{id}` and `PATCH {api_base}/{id}` `{ role }`
//!
//! # Structure
//!
//! - [`UserBackend`]: the seam the view controller talks to
//! - [`HttpBackend`]: `reqwest` implementation
//! - [`BackendError`]: failures and the user-facing message policy

mod client;
mod error;
mod types;

use async_trait::async_trait;

pub use client::HttpBackend;
pub use error::{ADMIN_ACTION_FAILED, ASK_FAILED, BackendError};
pub use types::{AskRequest, AskResult, DataEnvelope, Role, RoleUpdate, User};

/// Browser credentials forwarded to the backend on credentialed calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    cookie: Option<String>,
}

impl Credentials {
    /// No credentials.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Credentials carried by a raw `Cookie` header value.
    #[must_use]
    pub fn from_cookie(cookie: impl Into<String>) -> Self {
        let cookie = cookie.into();
        Self {
            cookie: (!cookie.trim().is_empty()).then_some(cookie),
        }
    }

    /// The `Cookie` header to forward, if any.
    #[must_use]
    pub fn cookie(&self) -> Option<&str> {
        self.cookie.as_deref()
    }

    /// Whether there is anything to forward.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cookie.is_none()
    }
}

/// Operations the home view needs from the users backend.
#[async_trait]
pub trait UserBackend: Send + Sync + std::fmt::Debug {
    /// Fetch every user record.
    async fn list_users(&self) -> Result<Vec<User>, BackendError>;

    /// Ask a question about the users. `Ok(None)` means the backend
    /// answered without a payload.
    async fn ask(
        &self,
        request: &AskRequest,
        credentials: &Credentials,
    ) -> Result<Option<AskResult>, BackendError>;

    /// Delete one user record.
    async fn delete_user(&self, id: &str, credentials: &Credentials) -> Result<(), BackendError>;

    /// Change the role of one user record.
    async fn update_role(
        &self,
        id: &str,
        role: Role,
        credentials: &Credentials,
    ) -> Result<(), BackendError>;
}

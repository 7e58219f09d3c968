//! Backend-facing side of the home view.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{AdminAction, FETCH_USERS_FAILED, HomeState};
use crate::backend::{
    ADMIN_ACTION_FAILED, ASK_FAILED, AskRequest, BackendError, Credentials, UserBackend,
};
use crate::session::HomeSession;

/// What happened to an ask form submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AskSubmission {
    /// The question was blank; nothing was sent.
    Skipped,
    /// The backend answered (possibly without a payload).
    Answered,
    /// The request failed; the session holds the message.
    Failed,
}

/// What happened to an admin action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminOutcome {
    /// The backend accepted the mutation.
    pub applied: bool,
    /// The follow-up list refresh failed and the alert should be raised.
    pub refresh_failed: bool,
}

/// Puts a session's ask back to `Idle` when the ask future is dropped
/// mid-request (inbound timeout, client gone).
struct PendingAsk<'a> {
    session: &'a HomeSession,
    finished: bool,
}

impl Drop for PendingAsk<'_> {
    fn drop(&mut self) {
        if !self.finished {
            warn!(name: "ask.abandoned", session_id = %self.session.id(), "Ask dropped before completion");
            self.session.update(HomeState::abandon_ask);
        }
    }
}

/// Issues the home view's backend requests and records their outcomes in
/// the session.
#[derive(Debug, Clone)]
pub struct HomeController {
    backend: Arc<dyn UserBackend>,
    top_k: u32,
}

impl HomeController {
    /// Create a controller over `backend`, asking for `top_k` sources.
    #[must_use]
    pub fn new(backend: Arc<dyn UserBackend>, top_k: u32) -> Self {
        Self { backend, top_k }
    }

    /// Replace the session's cached user list with a fresh one.
    ///
    /// On failure the cached list is left as it was and the caller raises
    /// the [`FETCH_USERS_FAILED`] alert.
    pub async fn fetch_users(&self, session: &HomeSession) -> Result<usize, BackendError> {
        match self.backend.list_users().await {
            Ok(users) => {
                let count = users.len();
                session.update(|state| state.set_users(users));
                debug!(name: "users.fetch.completed", session_id = %session.id(), count, "User list refreshed");
                Ok(count)
            }
            Err(e) => {
                warn!(
                    name: "users.fetch.failed",
                    session_id = %session.id(),
                    status = ?e.status(),
                    error = %e,
                    "{FETCH_USERS_FAILED}"
                );
                Err(e)
            }
        }
    }

    /// Submit the ask form.
    ///
    /// Blank questions are ignored. Otherwise the session goes `Pending`
    /// while the request runs and ends `Answered`, `Idle` (no payload) or
    /// `Failed` with the extracted message.
    pub async fn ask_ai(
        &self,
        session: &HomeSession,
        raw_question: &str,
        credentials: &Credentials,
    ) -> AskSubmission {
        let Some(question) = session.update(|state| state.begin_ask(raw_question)) else {
            return AskSubmission::Skipped;
        };

        let mut pending = PendingAsk {
            session,
            finished: false,
        };

        let request = AskRequest {
            question,
            top_k: self.top_k,
        };
        info!(
            name: "ask.started",
            session_id = %session.id(),
            question_len = request.question.len(),
            top_k = request.top_k,
            "Asking backend about users"
        );

        let (outcome, submission) = match self.backend.ask(&request, credentials).await {
            Ok(result) => {
                info!(
                    name: "ask.completed",
                    session_id = %session.id(),
                    sources = result.as_ref().map_or(0, |r| r.sources.len()),
                    "Ask answered"
                );
                (Ok(result), AskSubmission::Answered)
            }
            Err(e) => {
                warn!(
                    name: "ask.failed",
                    session_id = %session.id(),
                    status = ?e.status(),
                    error = %e,
                    "Ask failed"
                );
                (Err(e.message_or(ASK_FAILED)), AskSubmission::Failed)
            }
        };

        session.update(|state| state.finish_ask(outcome));
        pending.finished = true;
        submission
    }

    /// Run an admin table mutation, then refresh the cached list.
    ///
    /// A confirmed mutation is applied to the cached list straight away so
    /// the table stays right even when the refresh fails.
    pub async fn apply_admin_action(
        &self,
        session: &HomeSession,
        action: AdminAction,
        credentials: &Credentials,
    ) -> AdminOutcome {
        let result = match &action {
            AdminAction::Delete { id } => self.backend.delete_user(id, credentials).await,
            AdminAction::SetRole { id, role } => {
                self.backend.update_role(id, *role, credentials).await
            }
        };

        if let Err(e) = result {
            warn!(
                name: "admin.action.failed",
                session_id = %session.id(),
                user_id = %action.user_id(),
                status = ?e.status(),
                error = %e,
                "Admin action rejected"
            );
            let notice = e.message_or(ADMIN_ACTION_FAILED);
            session.update(|state| state.admin_notice = Some(notice));
            return AdminOutcome {
                applied: false,
                refresh_failed: false,
            };
        }

        info!(
            name: "admin.action.applied",
            session_id = %session.id(),
            user_id = %action.user_id(),
            "Admin action applied"
        );
        session.update(|state| {
            state.admin_notice = None;
            state.apply_admin_action(&action);
        });

        AdminOutcome {
            applied: true,
            refresh_failed: self.fetch_users(session).await.is_err(),
        }
    }
}

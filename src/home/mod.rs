//! The home view controller.
//!
//! [`HomeState`] is everything one browser's home page knows: which section
//! is selected, the cached user list, and where the ask form stands. The
//! state transitions are plain synchronous methods; [`HomeController`]
//! wraps them around the backend calls.

mod controller;

use serde::Deserialize;

use crate::backend::{AskResult, Role, User};

pub use controller::{AdminOutcome, AskSubmission, HomeController};

/// Alert text for a failed user list fetch.
pub const FETCH_USERS_FAILED: &str = "Failed to fetch users";

/// Which main section is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// Neither section; the initial state.
    #[default]
    Unselected,
    /// Read-only user table.
    User,
    /// Admin table with mutation controls.
    Admin,
}

/// Where the ask form stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AskStatus {
    /// Nothing asked yet, or the last answer had no payload.
    #[default]
    Idle,
    /// A question is in flight.
    Pending,
    /// The last question was answered.
    Answered(AskResult),
    /// The last question failed with this message.
    Failed(String),
}

impl AskStatus {
    /// Whether a question is in flight.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// A change the admin table asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminAction {
    /// Delete the user with this id.
    Delete {
        /// Backend id.
        id: String,
    },
    /// Give the user with this id a new role.
    SetRole {
        /// Backend id.
        id: String,
        /// Role to assign.
        role: Role,
    },
}

impl AdminAction {
    /// Id of the user the action targets.
    #[must_use]
    pub fn user_id(&self) -> &str {
        match self {
            Self::Delete { id } | Self::SetRole { id, .. } => id,
        }
    }
}

/// View controller state for one browser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomeState {
    /// Selected main section.
    pub view: View,
    /// Cached copy of the backend's user list.
    pub users: Vec<User>,
    /// Last text typed into the ask form.
    pub question: String,
    /// Ask form status.
    pub ask: AskStatus,
    /// Message from the last failed admin action, shown above the admin table.
    pub admin_notice: Option<String>,
}

impl HomeState {
    /// Select the main section.
    pub fn select_view(&mut self, view: View) {
        self.view = view;
    }

    /// Replace the cached user list.
    pub fn set_users(&mut self, users: Vec<User>) {
        self.users = users;
    }

    /// Start an ask with the raw form text.
    ///
    /// Returns the trimmed question to send, or `None` when it is blank, in
    /// which case the ask status is left alone.
    pub fn begin_ask(&mut self, raw: &str) -> Option<String> {
        raw.clone_into(&mut self.question);
        let question = raw.trim();
        if question.is_empty() {
            return None;
        }
        self.ask = AskStatus::Pending;
        Some(question.to_string())
    }

    /// Record how an ask ended.
    pub fn finish_ask(&mut self, outcome: Result<Option<AskResult>, String>) {
        self.ask = match outcome {
            Ok(Some(result)) => AskStatus::Answered(result),
            Ok(None) => AskStatus::Idle,
            Err(message) => AskStatus::Failed(message),
        };
    }

    /// Drop a `Pending` status whose request will never finish.
    pub fn abandon_ask(&mut self) {
        if self.ask.is_pending() {
            self.ask = AskStatus::Idle;
        }
    }

    /// Apply a confirmed admin action to the cached list.
    pub fn apply_admin_action(&mut self, action: &AdminAction) {
        match action {
            AdminAction::Delete { id } => self.users.retain(|user| &user.id != id),
            AdminAction::SetRole { id, role } => {
                if let Some(user) = self.users.iter_mut().find(|user| &user.id == id) {
                    user.role = *role;
                }
            }
        }
    }
}

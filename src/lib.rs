//! User Console
//!
//! A server-rendered home page over a users backend: pick the user or admin
//! section, browse the user list, run admin mutations, and ask an AI
//! endpoint questions about the users.
//!
//! # Architecture
//!
//! - **Server**: Axum router serving the page and the HTMX fragments
//! - **Home controller**: per-browser view state plus the backend calls that drive it
//! - **Backend client**: typed HTTP client for the users API
//! - **UI**: Leptos SSR components + HTMX
//!
//! # Modules
//!
//! - [`auth`]: Signed-in user resolution
//! - [`backend`]: Users API client, wire types and errors
//! - [`config`]: Layered configuration (defaults, file, env, CLI)
//! - [`home`]: View state and the controller operations
//! - [`server`]: Router, handlers and startup
//! - [`session`]: Per-browser session store
//! - [`ui`]: Page and fragment rendering

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::implicit_hasher)]
#![allow(clippy::assigning_clones)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::default_trait_access)]
#![allow(clippy::unused_async)]

pub mod auth;
pub mod backend;
pub mod config;
pub mod home;
pub mod server;
pub mod session;
pub mod telemetry;
pub mod ui;

use std::sync::Arc;

use crate::auth::AuthProvider;
use crate::config::AppConfig;
use crate::home::HomeController;
use crate::session::SessionStore;

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Backend calls behind the home view.
    pub controller: Arc<HomeController>,
    /// Resolves the browser's cookie to a signed-in user.
    pub auth: Arc<dyn AuthProvider>,
    /// Per-browser view state.
    pub sessions: SessionStore,
    /// Global Configuration
    pub config: Arc<AppConfig>,
}

//! Per-browser home view sessions.
//!
//! This module provides in-memory storage for the view controller state of
//! each browser. Sessions are identified by a UUID carried in a cookie and
//! hold the selected section, the cached user list and the ask form state.
//!
//! # Architecture
//!
//! - [`HomeSession`]: one browser's controller state
//! - [`SessionStore`]: thread-safe store for all active sessions
//!
//! # Example
//!
//! ```rust
//! use user_console::home::View;
//! use user_console::session::SessionStore;
//!
//! let store = SessionStore::new();
//! let session = store.create();
//! session.update(|state| state.select_view(View::User));
//!
//! assert_eq!(session.snapshot().view, View::User);
//! ```

mod store;

pub use store::{HomeSession, SessionStore};

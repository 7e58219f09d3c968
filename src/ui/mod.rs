//! UI components and layouts.
//!
//! Leptos SSR components rendered to strings on every request; HTMX swaps
//! the fragments in place. Nothing here touches the network or session
//! state, every component is a pure function of its props.
//!
//! # Structure
//!
//! - [`components`]: Reusable ShadCN-style UI components
//! - [`home`]: The home page and the fragments HTMX swaps
//! - [`shell`]: The document wrapped around the page body

pub mod components;
pub mod home;
pub mod shell;

use leptos::prelude::*;
use leptos::reactive::owner::Owner;

/// Renders a view to an HTML string.
///
/// Components are built under a fresh reactive owner, so this works outside
/// any Leptos runtime (handlers and tests alike).
pub fn render<F, V>(f: F) -> String
where
    F: FnOnce() -> V,
    V: IntoView,
{
    Owner::new().with(|| f().to_html())
}

//! SVG icon components.
//!
//! Icons are rendered inline as SVG elements so they pick up the text
//! colour of whatever they sit in. Every icon is a 24x24 stroke drawing
//! wrapped by [`IconFrame`].

use leptos::prelude::*;

/// Size classes every icon starts from.
const ICON_SIZE: &str = "h-4 w-4 shrink-0";

/// Shared `<svg>` element for the stroke icons below.
#[component]
fn IconFrame(
    /// Extra classes from the caller.
    class: &'static str,
    /// Rotate continuously.
    #[prop(optional)]
    spin: bool,
    /// The icon's shapes.
    children: Children,
) -> impl IntoView {
    let spin = if spin { " animate-spin" } else { "" };
    let classes = format!("{ICON_SIZE}{spin} {class}");

    view! {
        <svg
            xmlns="http://www.w3.org/2000/svg"
            viewBox="0 0 24 24"
            fill="none"
            stroke="currentColor"
            stroke-width="2"
            stroke-linecap="round"
            stroke-linejoin="round"
            aria-hidden="true"
            class=classes
        >
            {children()}
        </svg>
    }
}

/// Spinner shown while auth is being checked.
#[component]
pub fn LoaderIcon(#[prop(default = "")] class: &'static str) -> impl IntoView {
    view! {
        <IconFrame class=class spin=true>
            <path d="M21 12a9 9 0 1 1-6.219-8.56" />
        </IconFrame>
    }
}

/// Person, for the user section button.
#[component]
pub fn UserIcon(#[prop(default = "")] class: &'static str) -> impl IntoView {
    view! {
        <IconFrame class=class>
            <path d="M19 21v-2a4 4 0 0 0-4-4H9a4 4 0 0 0-4 4v2" />
            <circle cx="12" cy="7" r="4" />
        </IconFrame>
    }
}

/// Shield, for the admin section and role controls.
#[component]
pub fn ShieldIcon(#[prop(default = "")] class: &'static str) -> impl IntoView {
    view! {
        <IconFrame class=class>
            <path d="M20 13c0 5-3.5 7.5-7.66 8.95a1 1 0 0 1-.67-.01C7.5 20.5 4 18 4 13V6a1 1 0 0 1 1-1c2 0 4.5-1.2 6.24-2.72a1.17 1.17 0 0 1 1.52 0C14.51 3.81 17 5 19 5a1 1 0 0 1 1 1z" />
        </IconFrame>
    }
}

#[component]
pub fn TrashIcon(#[prop(default = "")] class: &'static str) -> impl IntoView {
    view! {
        <IconFrame class=class>
            <path d="M3 6h18" />
            <path d="M19 6v14c0 1-1 2-2 2H7c-1 0-2-1-2-2V6" />
            <path d="M8 6V4c0-1 1-2 2-2h4c1 0 2 1 2 2v2" />
        </IconFrame>
    }
}

/// Sparkles, next to the ask heading.
#[component]
pub fn SparklesIcon(#[prop(default = "")] class: &'static str) -> impl IntoView {
    view! {
        <IconFrame class=class>
            <path d="m12 3-1.912 5.813a2 2 0 0 1-1.275 1.275L3 12l5.813 1.912a2 2 0 0 1 1.275 1.275L12 21l1.912-5.813a2 2 0 0 1 1.275-1.275L21 12l-5.813-1.912a2 2 0 0 1-1.275-1.275L12 3Z" />
            <path d="M5 3v4" />
            <path d="M19 17v4" />
            <path d="M3 5h4" />
            <path d="M17 19h4" />
        </IconFrame>
    }
}

//! Card surfaces.
//!
//! ```rust,ignore
//! view! {
//!     <Card class="answer-block">
//!         <CardHeader>"Answer"</CardHeader>
//!         <CardContent>"Two users are admins."</CardContent>
//!     </Card>
//! }
//! ```

use leptos::prelude::*;

const CARD_CLASSES: &str = "rounded-xl border border-panelBorder bg-panel text-textPrimary shadow-sm";
const HEADER_CLASSES: &str = "flex flex-col space-y-1.5 p-6";
const CONTENT_CLASSES: &str = "p-6 pt-0";

/// Bordered panel grouping related content.
#[component]
pub fn Card(
    /// Extra classes, also used as a hook by tests and scripts.
    #[prop(default = "")]
    class: &'static str,
    children: Children,
) -> impl IntoView {
    view! { <div class={format!("{CARD_CLASSES} {class}")}>{children()}</div> }
}

/// Title row of a [`Card`].
#[component]
pub fn CardHeader(#[prop(default = "")] class: &'static str, children: Children) -> impl IntoView {
    view! { <div class={format!("{HEADER_CLASSES} {class}")}>{children()}</div> }
}

/// Body of a [`Card`], flush with the header above it.
#[component]
pub fn CardContent(#[prop(default = "")] class: &'static str, children: Children) -> impl IntoView {
    view! { <div class={format!("{CONTENT_CLASSES} {class}")}>{children()}</div> }
}

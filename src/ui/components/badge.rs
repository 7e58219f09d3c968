//! Role tag shown in the user tables.

use leptos::prelude::*;

use crate::backend::Role;

const BASE_CLASSES: &str = "inline-flex items-center rounded-full px-2.5 py-0.5 text-xs font-semibold";

/// Colour scheme for each role.
fn tone(role: Role) -> &'static str {
    match role {
        Role::Admin => "bg-warning text-black",
        Role::User => "bg-panel text-textPrimary border border-panelBorder",
        Role::Unknown => "border border-dashed border-panelBorder text-textMuted",
    }
}

/// Pill with the role name, e.g. `admin`.
#[component]
pub fn RoleBadge(role: Role) -> impl IntoView {
    let classes = format!("{BASE_CLASSES} {}", tone(role));

    view! {
        <span class=classes data-role={role.as_str()}>
            {role.as_str()}
        </span>
    }
}

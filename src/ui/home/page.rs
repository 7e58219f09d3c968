//! Page body: hero, navigation, ask section and main section.

use leptos::prelude::*;
use serde_json::json;

use super::ask::AskSection;
use super::main_section::MainSection;
use crate::auth::AuthContext;
use crate::home::HomeState;
use crate::ui::components::{ButtonSize, ButtonVariant, ShieldIcon, UserIcon, button_classes};

/// Everything inside `<main>` on the home page.
#[component]
pub fn HomePage(
    /// First hero line.
    title: String,
    /// Second hero line.
    subtitle: String,
    /// The session's controller state.
    state: HomeState,
    /// Auth state and backend base.
    context: AuthContext,
) -> impl IntoView {
    let HomeState {
        view: section,
        users,
        question,
        ask,
        admin_notice,
    } = state;
    let auth = context.auth.clone();

    view! {
        <div class="min-h-screen p-6 gap-y-6 flex flex-col justify-start w-full">
            <section class="mt-20 text-5xl font-extrabold text-center">
                <h1>{title}</h1>
                <h1>{subtitle}</h1>
            </section>
            <nav class="flex justify-center gap-x-3">
                <NavButton section="user" variant=ButtonVariant::Sky>
                    <UserIcon />
                    "User Section"
                </NavButton>
                <NavButton section="admin" variant=ButtonVariant::Rose>
                    <ShieldIcon />
                    "Admin Section"
                </NavButton>
            </nav>
            <AskSection auth=auth question=question status=ask />
            <MainSection section=section context=context users=users notice=admin_notice />
        </div>
    }
}

/// Selects a main section via `POST /view`.
#[component]
fn NavButton(section: &'static str, variant: ButtonVariant, children: Children) -> impl IntoView {
    let vals = json!({ "view": section }).to_string();

    view! {
        <button
            type="button"
            class={button_classes(variant, ButtonSize::Lg, "flex")}
            hx-post="/view"
            hx-vals=vals
            hx-target="#main-section"
            hx-swap="outerHTML"
        >
            {children()}
        </button>
    }
}

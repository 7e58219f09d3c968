//! The switchable main section.

use leptos::prelude::*;

use super::tables::{AdminTable, UserTable};
use crate::auth::{AuthContext, AuthState};
use crate::backend::User;
use crate::home::View;
use crate::ui::components::LoaderIcon;

/// Shows nothing, the user table, or the auth-gated admin table.
///
/// Swapped as a whole by `/view`, `/fragments/main` and the admin actions.
#[component]
pub fn MainSection(
    /// Selected section.
    section: View,
    /// Auth state and backend base.
    context: AuthContext,
    /// Cached user list.
    users: Vec<User>,
    /// Message from the last rejected admin action.
    notice: Option<String>,
) -> impl IntoView {
    let body = match section {
        View::Unselected => ().into_any(),
        View::User => view! {
            <section class="p-5 flex" data-section="user">
                <UserTable users=users />
            </section>
        }
        .into_any(),
        View::Admin => {
            let gate = match context.auth {
                AuthState::Loading => view! {
                    <div
                        class="flex items-center gap-2 text-textMuted"
                        hx-get="/fragments/main"
                        hx-trigger="load"
                        hx-target="#main-section"
                        hx-swap="outerHTML"
                    >
                        <LoaderIcon />
                        "Checking user auth..."
                    </div>
                }
                .into_any(),
                AuthState::SignedIn(_) => view! {
                    <AdminTable users=users notice=notice api_base={context.api_base} />
                }
                .into_any(),
                AuthState::Anonymous => view! {
                    <div class="text-textMuted">"Please login to access Admin Section"</div>
                }
                .into_any(),
            };
            view! {
                <section class="p-5 flex" data-section="admin">
                    {gate}
                </section>
            }
            .into_any()
        }
    };

    view! {
        <section id="main-section" class="w-full flex justify-center gap-x-3">
            {body}
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Role;
    use crate::ui::render;

    fn context(auth: AuthState) -> AuthContext {
        AuthContext {
            auth,
            api_base: "http://backend/api/users".into(),
        }
    }

    fn users() -> Vec<User> {
        vec![User {
            id: "1".into(),
            username: "ada".into(),
            email: "ada@example.com".into(),
            role: Role::Admin,
        }]
    }

    fn main_html(section: View, auth: AuthState) -> String {
        let users = users();
        let context = context(auth);
        render(move || {
            view! { <MainSection section=section context=context users=users notice=None /> }
        })
    }

    fn signed_in() -> AuthState {
        AuthState::SignedIn(users().remove(0))
    }

    #[test]
    fn test_unselected_shows_neither() {
        let html = main_html(View::Unselected, signed_in());
        assert!(html.contains(r#"id="main-section""#));
        assert!(!html.contains("data-section"));
        assert!(!html.contains("<table"));
    }

    #[test]
    fn test_exactly_one_section() {
        let html = main_html(View::User, signed_in());
        assert!(html.contains(r#"data-section="user""#));
        assert!(!html.contains(r#"data-section="admin""#));
        assert!(html.contains(r#"data-table="users""#));

        let html = main_html(View::Admin, signed_in());
        assert!(html.contains(r#"data-section="admin""#));
        assert!(!html.contains(r#"data-section="user""#));
        assert!(html.contains(r#"data-table="admin""#));
    }

    #[test]
    fn test_admin_gate() {
        let html = main_html(View::Admin, AuthState::Loading);
        assert!(html.contains("Checking user auth..."));
        assert!(html.contains(r#"hx-get="/fragments/main""#));

        let html = main_html(View::Admin, AuthState::Anonymous);
        assert!(html.contains("Please login to access Admin Section"));
        assert!(!html.contains("<table"));
    }

    #[test]
    fn test_user_section_ignores_auth() {
        let html = main_html(View::User, AuthState::Anonymous);
        assert!(html.contains(r#"data-table="users""#));
        assert!(!html.contains("Please login"));
    }
}

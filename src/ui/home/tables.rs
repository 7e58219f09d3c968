//! User and admin tables.

use leptos::prelude::*;
use serde_json::json;

use crate::backend::User;
use crate::ui::components::{
    ButtonSize, ButtonVariant, RoleBadge, ShieldIcon, TrashIcon, button_classes,
};

const TABLE_CLASSES: &str = "min-w-[36rem] text-sm border border-panelBorder rounded-xl overflow-hidden";
const CELL_CLASSES: &str = "px-4 py-2 text-left";

/// Read-only table of the cached users.
#[component]
pub fn UserTable(
    /// Users to list.
    users: Vec<User>,
) -> impl IntoView {
    if users.is_empty() {
        return view! { <p class="text-textMuted">"No users found."</p> }.into_any();
    }

    view! {
        <table class=TABLE_CLASSES data-table="users">
            <thead class="bg-panel">
                <tr>
                    <th class=CELL_CLASSES>"Username"</th>
                    <th class=CELL_CLASSES>"Email"</th>
                    <th class=CELL_CLASSES>"Role"</th>
                </tr>
            </thead>
            <tbody>
                {users
                    .into_iter()
                    .map(|user| {
                        view! {
                            <tr data-id={user.id.clone()}>
                                <td class=CELL_CLASSES>{user.username}</td>
                                <td class=CELL_CLASSES>{user.email}</td>
                                <td class=CELL_CLASSES>
                                    <RoleBadge role=user.role />
                                </td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
    .into_any()
}

/// Users with delete and role controls.
///
/// Every control posts back to the console, which runs the mutation
/// against the backend, updates the cached list and refreshes it. The
/// response replaces the whole main section.
#[component]
pub fn AdminTable(
    /// Users to manage.
    users: Vec<User>,
    /// Message from the last rejected action.
    notice: Option<String>,
    /// Backend the mutations go to.
    api_base: String,
) -> impl IntoView {
    let notice = notice.map(|message| {
        view! { <div role="alert" class="admin-notice text-danger mb-3">{message}</div> }
    });

    let rows = users
        .into_iter()
        .map(|user| {
            let next_role = user.role.toggled();
            let role_label = format!("Make {next_role}");
            let role_vals = json!({ "id": user.id, "role": next_role.as_str() }).to_string();
            let delete_vals = json!({ "id": user.id }).to_string();
            let confirm = format!("Delete {}?", user.username);

            view! {
                <tr data-id={user.id.clone()}>
                    <td class=CELL_CLASSES>{user.username}</td>
                    <td class=CELL_CLASSES>{user.email}</td>
                    <td class=CELL_CLASSES>
                        <RoleBadge role=user.role />
                    </td>
                    <td class=CELL_CLASSES>
                        <div class="flex gap-2">
                            <button
                                type="button"
                                class={button_classes(ButtonVariant::Outline, ButtonSize::Sm, "")}
                                hx-post="/admin/users/role"
                                hx-vals=role_vals
                                hx-target="#main-section"
                                hx-swap="outerHTML"
                            >
                                <ShieldIcon />
                                {role_label}
                            </button>
                            <button
                                type="button"
                                class={button_classes(ButtonVariant::Destructive, ButtonSize::Sm, "")}
                                hx-post="/admin/users/delete"
                                hx-vals=delete_vals
                                hx-confirm=confirm
                                hx-target="#main-section"
                                hx-swap="outerHTML"
                            >
                                <TrashIcon />
                                "Delete"
                            </button>
                        </div>
                    </td>
                </tr>
            }
        })
        .collect_view();

    view! {
        <div class="space-y-2">
            {notice}
            <p class="text-xs text-textMuted">"Backend: " {api_base}</p>
            <table class=TABLE_CLASSES data-table="admin">
                <thead class="bg-panel">
                    <tr>
                        <th class=CELL_CLASSES>"Username"</th>
                        <th class=CELL_CLASSES>"Email"</th>
                        <th class=CELL_CLASSES>"Role"</th>
                        <th class=CELL_CLASSES>"Actions"</th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Role;
    use crate::ui::render;

    fn users() -> Vec<User> {
        vec![
            User {
                id: "1".into(),
                username: "ada".into(),
                email: "ada@example.com".into(),
                role: Role::Admin,
            },
            User {
                id: "2".into(),
                username: "bob".into(),
                email: "bob@example.com".into(),
                role: Role::User,
            },
        ]
    }

    #[test]
    fn test_user_table_rows() {
        let users = users();
        let html = render(move || view! { <UserTable users=users /> });

        assert!(html.contains(r#"data-table="users""#));
        assert_eq!(html.matches("<tr data-id=").count(), 2);
        assert!(html.contains("ada@example.com"));
        assert!(!html.contains("hx-post"));
    }

    #[test]
    fn test_user_table_empty() {
        let html = render(|| view! { <UserTable users={Vec::new()} /> });
        assert!(html.contains("No users found."));
    }

    #[test]
    fn test_admin_table_controls() {
        let users = users();
        let html = render(move || {
            view! {
                <AdminTable
                    users=users
                    notice=None
                    api_base={"http://backend/api/users".to_string()}
                />
            }
        });

        assert!(html.contains(r#"data-table="admin""#));
        assert_eq!(html.matches(r#"hx-post="/admin/users/delete""#).count(), 2);
        assert!(html.contains("Make user"));
        assert!(html.contains("Make admin"));
        assert!(html.contains("http://backend/api/users"));
        assert!(!html.contains("admin-notice"));
    }

    #[test]
    fn test_admin_table_notice() {
        let html = render(|| {
            view! {
                <AdminTable
                    users={Vec::new()}
                    notice={Some("Forbidden".to_string())}
                    api_base={String::new()}
                />
            }
        });
        assert!(html.contains("admin-notice"));
        assert!(html.contains("Forbidden"));
    }
}

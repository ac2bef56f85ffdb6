use dioxus::prelude::*;

use crate::access::nav_items_for;
use crate::auth::{use_auth, LogoutButton};

/// Navigation frame around every signed-in page.
///
/// Platform packages pass the current path and route clicks through
/// `on_navigate`.
#[component]
pub fn Shell(
    /// Path of the page being shown, used to highlight its entry.
    current_path: String,
    on_navigate: EventHandler<String>,
    children: Element,
) -> Element {
    let auth = use_auth();
    let mut menu_open = use_signal(|| false);

    let session = auth();
    let items = nav_items_for(&session);
    let school_name = session
        .school
        .as_ref()
        .map(|s| s.name.clone())
        .unwrap_or_default();
    let (user_name, role, initial) = match &session.user {
        Some(user) => (
            user.display_name().to_string(),
            user.role.to_string(),
            user.display_name()
                .chars()
                .next()
                .map(|c| c.to_uppercase().to_string())
                .unwrap_or_default(),
        ),
        None => Default::default(),
    };

    rsx! {
        div {
            class: "shell",
            header {
                class: "shell-mobile-header",
                span { class: "brand", "Scholify" }
                button {
                    class: "btn btn-ghost",
                    onclick: move |_| menu_open.toggle(),
                    "☰"
                }
            }
            aside {
                class: if menu_open() { "shell-sidebar open" } else { "shell-sidebar" },
                div {
                    class: "shell-brand",
                    h1 { "Scholify" }
                    p { class: "muted", "{school_name}" }
                }
                nav {
                    class: "shell-nav",
                    for item in items {
                        a {
                            key: "{item.path}",
                            class: if item.is_active(&current_path) { "nav-item active" } else { "nav-item" },
                            href: "{item.path}",
                            onclick: move |evt: Event<MouseData>| {
                                evt.prevent_default();
                                menu_open.set(false);
                                on_navigate.call(item.path.to_string());
                            },
                            "{item.label}"
                        }
                    }
                }
                div {
                    class: "shell-user",
                    div { class: "avatar", "{initial}" }
                    div {
                        p { class: "user-name", "{user_name}" }
                        p { class: "muted capitalize", "{role}" }
                    }
                    LogoutButton { class: "btn btn-outline w-full" }
                }
            }
            main {
                class: "shell-main",
                {children}
            }
        }
    }
}

use dioxus::prelude::*;

use crate::auth::{sign_in, use_auth, use_client};
use crate::components::Field;
use crate::forms::{begin_action, LoginDraft};
use crate::toast::use_feedback;

/// Email and password sign-in.
#[component]
pub fn LoginView(on_signed_in: EventHandler<()>, on_register: EventHandler<()>) -> Element {
    let client = use_client();
    let mut auth = use_auth();
    let feedback = use_feedback();
    let mut draft = use_signal(LoginDraft::default);
    let mut submitting = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        let current = draft.read().clone();
        if !begin_action(&mut submitting.write()) {
            return;
        }
        spawn(async move {
            match sign_in(&client, &mut auth, &current).await {
                Ok(()) => {
                    feedback.success("Welcome back!");
                    on_signed_in.call(());
                }
                Err(e) => feedback.failure(&e, "Login failed"),
            }
            submitting.set(false);
        });
    };

    rsx! {
        div {
            class: "auth-page",
            div {
                class: "card auth-card",
                h1 { class: "auth-title", "Scholify" }
                p { class: "muted", "Sign in to manage your school" }
                form {
                    onsubmit: onsubmit,
                    Field {
                        label: "Email",
                        required: true,
                        input {
                            class: "input",
                            r#type: "email",
                            value: "{draft.read().email}",
                            oninput: move |evt| draft.write().email = evt.value(),
                        }
                    }
                    Field {
                        label: "Password",
                        required: true,
                        input {
                            class: "input",
                            r#type: "password",
                            value: "{draft.read().password}",
                            oninput: move |evt| draft.write().password = evt.value(),
                        }
                    }
                    button {
                        class: "btn btn-primary w-full",
                        r#type: "submit",
                        disabled: submitting(),
                        if submitting() { "Signing in..." } else { "Sign In" }
                    }
                }
                p {
                    class: "auth-switch",
                    "New school? "
                    a {
                        href: "/register",
                        onclick: move |evt: Event<MouseData>| {
                            evt.prevent_default();
                            on_register.call(());
                        },
                        "Register here"
                    }
                }
            }
        }
    }
}

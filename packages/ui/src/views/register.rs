use dioxus::prelude::*;

use crate::auth::{register, use_auth, use_client};
use crate::components::Field;
use crate::forms::{begin_action, RegistrationDraft, RegistrationStep};
use crate::toast::use_feedback;

/// Two-step school registration: school details, then the principal account.
#[component]
pub fn RegisterView(on_registered: EventHandler<()>, on_login: EventHandler<()>) -> Element {
    let client = use_client();
    let mut auth = use_auth();
    let feedback = use_feedback();
    let mut draft = use_signal(RegistrationDraft::default);
    let mut submitting = use_signal(|| false);

    let next = move |evt: FormEvent| {
        evt.prevent_default();
        if let Err(e) = draft.write().advance() {
            feedback.failure(&e, "Please enter the school name");
        }
    };

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let request = match draft.read().validate() {
            Ok(request) => request,
            Err(e) => {
                feedback.failure(&e, "Registration failed");
                return;
            }
        };
        let client = client.clone();
        if !begin_action(&mut submitting.write()) {
            return;
        }
        spawn(async move {
            match register(&client, &mut auth, &request).await {
                Ok(()) => {
                    feedback.success("School registered successfully!");
                    on_registered.call(());
                }
                Err(e) => feedback.failure(&e, "Registration failed"),
            }
            submitting.set(false);
        });
    };

    let step = draft.read().step;

    rsx! {
        div {
            class: "auth-page",
            div {
                class: "card auth-card",
                h1 { class: "auth-title", "Register your school" }
                div {
                    class: "steps",
                    span { class: if step == RegistrationStep::School { "step active" } else { "step" }, "1. School" }
                    span { class: if step == RegistrationStep::Principal { "step active" } else { "step" }, "2. Principal" }
                }
                match step {
                    RegistrationStep::School => rsx! {
                        form {
                            onsubmit: next,
                            Field {
                                label: "School name",
                                required: true,
                                input {
                                    class: "input",
                                    value: "{draft.read().school_name}",
                                    oninput: move |evt| draft.write().school_name = evt.value(),
                                }
                            }
                            Field {
                                label: "Address",
                                input {
                                    class: "input",
                                    value: "{draft.read().school_address}",
                                    oninput: move |evt| draft.write().school_address = evt.value(),
                                }
                            }
                            Field {
                                label: "Phone",
                                input {
                                    class: "input",
                                    value: "{draft.read().school_phone}",
                                    oninput: move |evt| draft.write().school_phone = evt.value(),
                                }
                            }
                            Field {
                                label: "School email",
                                input {
                                    class: "input",
                                    r#type: "email",
                                    value: "{draft.read().school_email}",
                                    oninput: move |evt| draft.write().school_email = evt.value(),
                                }
                            }
                            button { class: "btn btn-primary w-full", r#type: "submit", "Continue" }
                        }
                    },
                    RegistrationStep::Principal => rsx! {
                        form {
                            onsubmit: submit,
                            Field {
                                label: "Your name",
                                required: true,
                                input {
                                    class: "input",
                                    value: "{draft.read().name}",
                                    oninput: move |evt| draft.write().name = evt.value(),
                                }
                            }
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
                            Field {
                                label: "Confirm password",
                                required: true,
                                input {
                                    class: "input",
                                    r#type: "password",
                                    value: "{draft.read().confirm_password}",
                                    oninput: move |evt| draft.write().confirm_password = evt.value(),
                                }
                            }
                            div {
                                class: "form-actions",
                                button {
                                    class: "btn btn-outline",
                                    r#type: "button",
                                    onclick: move |_| draft.write().back(),
                                    "Back"
                                }
                                button {
                                    class: "btn btn-primary",
                                    r#type: "submit",
                                    disabled: submitting(),
                                    if submitting() { "Registering..." } else { "Register School" }
                                }
                            }
                        }
                    },
                }
                p {
                    class: "auth-switch",
                    "Already registered? "
                    a {
                        href: "/login",
                        onclick: move |evt: Event<MouseData>| {
                            evt.prevent_default();
                            on_login.call(());
                        },
                        "Sign in"
                    }
                }
            }
        }
    }
}

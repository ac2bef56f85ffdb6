use chrono::Local;
use dioxus::prelude::*;

use crate::auth::use_client;
use crate::components::{ClassSelect, Field, TextField};
use crate::forms::{begin_action, StudentDraft};
use crate::students::admit;
use crate::toast::use_feedback;

/// New student admission form.
#[component]
pub fn AdmissionView(on_done: EventHandler<String>, on_cancel: EventHandler<()>) -> Element {
    let client = use_client();
    let feedback = use_feedback();
    let today = Local::now().date_naive();
    let mut draft = use_signal(|| StudentDraft::new(today));
    let mut classes = use_signal(Vec::<String>::new);
    let mut submitting = use_signal(|| false);

    let classes_client = client.clone();
    let _classes = use_resource(move || {
        let client = classes_client.clone();
        async move {
            match client.classes().await {
                Ok(loaded) => classes.set(loaded),
                Err(e) => feedback.failure(&e, "Failed to load classes"),
            }
        }
    });

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        let current = draft.read().clone();
        if !begin_action(&mut submitting.write()) {
            return;
        }
        spawn(async move {
            let result = admit(&client, &current).await;
            submitting.set(false);
            match result {
                Ok(student) => {
                    feedback.success(format!("{} admitted to {}", student.name, student.class_name));
                    on_done.call(student.id);
                }
                Err(e) => feedback.failure(&e, "Failed to admit student"),
            }
        });
    };

    let d = draft.read().clone();

    rsx! {
        div {
            class: "page",
            div {
                class: "page-header",
                h1 { "Student Admission" }
                p { class: "muted", "Register a new student" }
            }
            form {
                class: "card form-grid",
                onsubmit: onsubmit,
                h2 { class: "span-2", "Student" }
                TextField {
                    label: "Admission number",
                    required: true,
                    value: d.admission_number,
                    on_input: move |v| draft.write().admission_number = v,
                }
                TextField {
                    label: "Full name",
                    required: true,
                    value: d.name,
                    on_input: move |v| draft.write().name = v,
                }
                Field {
                    label: "Class",
                    required: true,
                    ClassSelect {
                        classes: classes(),
                        value: d.class_name,
                        on_change: move |v| draft.write().class_name = v,
                    }
                }
                Field {
                    label: "Gender",
                    select {
                        class: "input",
                        value: "{d.gender}",
                        onchange: move |evt| draft.write().gender = evt.value(),
                        option { value: "", "Select" }
                        option { value: "Male", "Male" }
                        option { value: "Female", "Female" }
                        option { value: "Other", "Other" }
                    }
                }
                TextField {
                    label: "Date of birth",
                    kind: "date",
                    max: today.format("%Y-%m-%d").to_string(),
                    value: d.date_of_birth,
                    on_input: move |v| draft.write().date_of_birth = v,
                }
                TextField {
                    label: "Date of admission",
                    kind: "date",
                    required: true,
                    value: d.date_of_admission,
                    on_input: move |v| draft.write().date_of_admission = v,
                }
                h2 { class: "span-2", "Parents" }
                TextField {
                    label: "Father's name",
                    value: d.father_name,
                    on_input: move |v| draft.write().father_name = v,
                }
                TextField {
                    label: "Mother's name",
                    value: d.mother_name,
                    on_input: move |v| draft.write().mother_name = v,
                }
                TextField {
                    label: "Parent contact",
                    kind: "tel",
                    required: true,
                    placeholder: "Used for WhatsApp notifications",
                    value: d.parent_contact,
                    on_input: move |v| draft.write().parent_contact = v,
                }
                TextField {
                    label: "Parent email",
                    kind: "email",
                    value: d.parent_email,
                    on_input: move |v| draft.write().parent_email = v,
                }
                div {
                    class: "span-2",
                    TextField {
                        label: "Address",
                        value: d.address,
                        on_input: move |v| draft.write().address = v,
                    }
                }
                div {
                    class: "form-actions span-2",
                    button {
                        class: "btn btn-outline",
                        r#type: "button",
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: submitting(),
                        if submitting() { "Saving..." } else { "Admit Student" }
                    }
                }
            }
        }
    }
}

use api::Student;
use dioxus::prelude::*;

use crate::auth::use_client;
use crate::components::{ClassSelect, ConfirmDialog, EmptyState, Spinner};
use crate::forms::begin_action;
use crate::students::{group_by_class, roster_query};
use crate::toast::use_feedback;

/// Student roster with search, class filter and removal.
#[component]
pub fn StudentsView(on_open: EventHandler<String>, on_admit: EventHandler<()>) -> Element {
    let client = use_client();
    let feedback = use_feedback();
    let mut students = use_signal(Vec::<Student>::new);
    let mut classes = use_signal(Vec::<String>::new);
    let mut loading = use_signal(|| true);
    let mut search = use_signal(String::new);
    let mut class_filter = use_signal(String::new);
    let mut pending_delete = use_signal(|| Option::<Student>::None);
    let mut deleting = use_signal(|| false);
    let mut reload = use_signal(|| 0u32);

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

    // Re-runs on every filter change; the previous request is dropped with it
    let roster_client = client.clone();
    let _roster = use_resource(move || {
        let client = roster_client.clone();
        let query = roster_query(&class_filter(), &search());
        let _ = reload();
        async move {
            loading.set(true);
            match client.students(&query).await {
                Ok(loaded) => students.set(loaded),
                Err(e) => feedback.failure(&e, "Failed to load students"),
            }
            loading.set(false);
        }
    });

    let confirm_delete = move |_| {
        let Some(student) = pending_delete() else {
            return;
        };
        let client = client.clone();
        if !begin_action(&mut deleting.write()) {
            return;
        }
        spawn(async move {
            match client.delete_student(&student.id).await {
                Ok(()) => {
                    tracing::info!("removed student {}", student.admission_number);
                    feedback.success("Student removed");
                    pending_delete.set(None);
                    *reload.write() += 1;
                }
                Err(e) => feedback.failure(&e, "Failed to remove student"),
            }
            deleting.set(false);
        });
    };

    let filtered = !class_filter().is_empty();
    let groups = if filtered {
        vec![(class_filter(), students())]
    } else {
        group_by_class(&students.read())
    };

    rsx! {
        div {
            class: "page",
            div {
                class: "page-header row",
                div {
                    h1 { "Students" }
                    p { class: "muted", "{students.read().len()} students" }
                }
                button {
                    class: "btn btn-primary",
                    onclick: move |_| on_admit.call(()),
                    "Admit Student"
                }
            }
            div {
                class: "card toolbar",
                input {
                    class: "input",
                    r#type: "search",
                    placeholder: "Search by name or admission number",
                    value: "{search}",
                    oninput: move |evt| search.set(evt.value()),
                }
                ClassSelect {
                    classes: classes(),
                    value: class_filter(),
                    any_label: "All classes".to_string(),
                    on_change: move |value| class_filter.set(value),
                }
            }
            if loading() {
                Spinner {}
            } else if students.read().is_empty() {
                EmptyState {
                    title: "No students found",
                    message: "Try a different search or admit a new student.",
                }
            } else {
                for (class_name, members) in groups {
                    div {
                        key: "{class_name}",
                        class: "card",
                        h2 { class: "group-title", "{class_name} ({members.len()})" }
                        table {
                            class: "table",
                            thead {
                                tr {
                                    th { "Adm. No" }
                                    th { "Name" }
                                    th { "Father" }
                                    th { "Contact" }
                                    th {}
                                }
                            }
                            tbody {
                                for student in members {
                                    StudentRow {
                                        key: "{student.id}",
                                        student: student.clone(),
                                        on_open: move |id| on_open.call(id),
                                        on_delete: move |student| pending_delete.set(Some(student)),
                                    }
                                }
                            }
                        }
                    }
                }
            }
            if let Some(student) = pending_delete() {
                ConfirmDialog {
                    title: "Remove student",
                    message: format!("Remove {} ({}) from the roster?", student.name, student.admission_number),
                    confirm_label: "Remove",
                    danger: true,
                    busy: deleting(),
                    on_confirm: confirm_delete,
                    on_cancel: move |_| pending_delete.set(None),
                }
            }
        }
    }
}

#[component]
fn StudentRow(
    student: Student,
    on_open: EventHandler<String>,
    on_delete: EventHandler<Student>,
) -> Element {
    let father = student.father_name.clone().unwrap_or_else(|| "-".to_string());
    let id = student.id.clone();
    let removed = student.clone();
    rsx! {
        tr {
            class: "clickable",
            onclick: move |_| on_open.call(id.clone()),
            td { "{student.admission_number}" }
            td { class: "strong", "{student.name}" }
            td { "{father}" }
            td { "{student.parent_contact}" }
            td {
                button {
                    class: "btn btn-ghost btn-danger-text",
                    onclick: move |evt: Event<MouseData>| {
                        evt.stop_propagation();
                        on_delete.call(removed.clone());
                    },
                    "Remove"
                }
            }
        }
    }
}

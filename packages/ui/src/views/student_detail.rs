use dioxus::prelude::*;

use crate::auth::{use_auth, use_client};
use crate::components::{EmptyState, Spinner, StatCard, TextField};
use crate::fees::format_amount;
use crate::forms::{begin_action, ContactEdit};
use crate::students::{load_profile, save_contact, StudentProfile, HISTORY_DAYS};
use crate::toast::use_feedback;

/// One student's details, fees and recent attendance.
#[component]
pub fn StudentDetailView(id: String, on_back: EventHandler<()>) -> Element {
    let client = use_client();
    let auth = use_auth();
    let feedback = use_feedback();

    // Track the id in a signal so the loader re-runs when the route param changes
    let mut id_signal = use_signal(|| id.clone());
    if *id_signal.peek() != id {
        id_signal.set(id.clone());
    }

    let mut profile = use_signal(|| Option::<StudentProfile>::None);
    let mut loading = use_signal(|| true);
    let mut editing = use_signal(|| Option::<ContactEdit>::None);
    let mut saving = use_signal(|| false);

    let loader_client = client.clone();
    let _loader = use_resource(move || {
        let client = loader_client.clone();
        let id = id_signal();
        async move {
            loading.set(true);
            editing.set(None);
            match load_profile(&client, &id).await {
                Ok(loaded) => profile.set(Some(loaded)),
                Err(e) => {
                    profile.set(None);
                    feedback.failure(&e, "Failed to load student");
                }
            }
            loading.set(false);
        }
    });

    let save = move |_| {
        let (Some(current), Some(edit)) = (profile(), editing()) else {
            return;
        };
        let client = client.clone();
        if !begin_action(&mut saving.write()) {
            return;
        }
        spawn(async move {
            match save_contact(&client, &current.student, &edit).await {
                Ok(student) => {
                    profile.set(Some(StudentProfile { student, ..current }));
                    editing.set(None);
                    feedback.success("Student details updated");
                }
                Err(e) => feedback.failure(&e, "Failed to update student"),
            }
            saving.set(false);
        });
    };

    if loading() {
        return rsx! { Spinner {} };
    }
    let Some(current) = profile() else {
        return rsx! {
            EmptyState { title: "Student not found", message: "The student may have been removed." }
        };
    };

    let can_edit = auth().is_principal();
    let student = &current.student;
    let attendance = current.attendance_summary();
    let fees = current.fee_summary();
    let dob = student
        .date_of_birth
        .map(|d| d.format("%d %b %Y").to_string())
        .unwrap_or_else(|| "-".to_string());
    let admitted = student.date_of_admission.format("%d %b %Y").to_string();
    let text = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
    let fee_rows: Vec<_> = current
        .fees
        .iter()
        .map(|fee| {
            (
                fee.id.clone(),
                fee.fee_bill_name.clone().unwrap_or_default(),
                format_amount(fee.amount),
                fee.is_paid(),
                fee.status.as_str(),
            )
        })
        .collect();
    let chips: Vec<_> = current
        .attendance
        .iter()
        .map(|record| {
            let label = record.status.label();
            (
                record.id.clone(),
                record.date.format("%d %b").to_string(),
                format!("chip chip-{}", label.to_lowercase()),
                format!("{} · {label}", record.date),
            )
        })
        .collect();

    rsx! {
        div {
            class: "page",
            div {
                class: "page-header row",
                div {
                    button { class: "btn btn-ghost", onclick: move |_| on_back.call(()), "← Back" }
                    h1 { "{student.name}" }
                    p { class: "muted", "{student.class_name} · Adm. No {student.admission_number}" }
                }
                if can_edit && editing().is_none() {
                    button {
                        class: "btn btn-outline",
                        onclick: {
                            let edit = ContactEdit::from_student(student);
                            move |_| editing.set(Some(edit.clone()))
                        },
                        "Edit Details"
                    }
                }
            }
            div {
                class: "stat-grid",
                StatCard {
                    label: "Attendance",
                    value: format!("{}%", attendance.rate),
                    hint: format!("{} of {} days present (last {HISTORY_DAYS} days)", attendance.present, attendance.total),
                    tone: "stat-green",
                }
                StatCard {
                    label: "Fees Paid",
                    value: format!("\u{20b9}{}", format_amount(fees.paid_amount)),
                    hint: format!("{} of {} bills", fees.paid, fees.total),
                    tone: "stat-blue",
                }
                StatCard {
                    label: "Fees Due",
                    value: format!("\u{20b9}{}", format_amount(fees.due_amount())),
                    hint: format!("{} unpaid", fees.unpaid),
                    tone: "stat-orange",
                }
            }
            if let Some(edit) = editing() {
                div {
                    class: "card form-grid",
                    h2 { class: "span-2", "Edit Details" }
                    TextField {
                        label: "Full name",
                        required: true,
                        value: edit.name,
                        on_input: move |v| if let Some(e) = editing.write().as_mut() { e.name = v },
                    }
                    TextField {
                        label: "Parent contact",
                        kind: "tel",
                        required: true,
                        value: edit.parent_contact,
                        on_input: move |v| if let Some(e) = editing.write().as_mut() { e.parent_contact = v },
                    }
                    TextField {
                        label: "Father's name",
                        value: edit.father_name,
                        on_input: move |v| if let Some(e) = editing.write().as_mut() { e.father_name = v },
                    }
                    TextField {
                        label: "Mother's name",
                        value: edit.mother_name,
                        on_input: move |v| if let Some(e) = editing.write().as_mut() { e.mother_name = v },
                    }
                    TextField {
                        label: "Parent email",
                        kind: "email",
                        value: edit.parent_email,
                        on_input: move |v| if let Some(e) = editing.write().as_mut() { e.parent_email = v },
                    }
                    TextField {
                        label: "Address",
                        value: edit.address,
                        on_input: move |v| if let Some(e) = editing.write().as_mut() { e.address = v },
                    }
                    div {
                        class: "form-actions span-2",
                        button {
                            class: "btn btn-outline",
                            disabled: saving(),
                            onclick: move |_| editing.set(None),
                            "Cancel"
                        }
                        button {
                            class: "btn btn-primary",
                            disabled: saving(),
                            onclick: save,
                            if saving() { "Saving..." } else { "Save" }
                        }
                    }
                }
            } else {
                div {
                    class: "card detail-grid",
                    Detail { label: "Father", value: text(&student.father_name) }
                    Detail { label: "Mother", value: text(&student.mother_name) }
                    Detail { label: "Gender", value: text(&student.gender) }
                    Detail { label: "Date of birth", value: dob }
                    Detail { label: "Admitted", value: admitted }
                    Detail { label: "Parent contact", value: student.parent_contact.clone() }
                    Detail { label: "Parent email", value: text(&student.parent_email) }
                    Detail { label: "Address", value: text(&student.address) }
                }
            }
            div {
                class: "card",
                h2 { "Fees" }
                if current.fees.is_empty() {
                    p { class: "muted", "No fee bills yet." }
                } else {
                    table {
                        class: "table",
                        thead { tr { th { "Bill" } th { "Amount" } th { "Status" } } }
                        tbody {
                            for (fee_id, bill, amount, paid, status) in fee_rows {
                                tr {
                                    key: "{fee_id}",
                                    td { "{bill}" }
                                    td { "\u{20b9}{amount}" }
                                    td {
                                        span {
                                            class: if paid { "badge badge-green" } else { "badge badge-orange" },
                                            "{status}"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
            div {
                class: "card",
                h2 { "Recent Attendance" }
                if current.attendance.is_empty() {
                    p { class: "muted", "No attendance recorded in the last {HISTORY_DAYS} days." }
                } else {
                    div {
                        class: "attendance-strip",
                        for (record_id, day, chip, label) in chips {
                            span { key: "{record_id}", class: "{chip}", title: "{label}", "{day}" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn Detail(label: String, value: String) -> Element {
    rsx! {
        div {
            class: "detail",
            p { class: "muted", "{label}" }
            p { "{value}" }
        }
    }
}

use api::AttendanceStatus;
use chrono::{Local, NaiveDate};
use dioxus::prelude::*;

use crate::attendance::{load_sheet, submit_sheet, AttendanceQuery, AttendanceSheet};
use crate::auth::use_client;
use crate::components::{ClassSelect, EmptyState, Field, Spinner, StatCard};
use crate::forms::begin_action;
use crate::toast::use_feedback;

/// Daily attendance for one class.
#[component]
pub fn AttendanceView() -> Element {
    let client = use_client();
    let feedback = use_feedback();
    let today = Local::now().date_naive();
    let today_value = today.format("%Y-%m-%d").to_string();

    let mut classes = use_signal(Vec::<String>::new);
    let mut class_name = use_signal(String::new);
    let mut date_value = use_signal(|| today_value.clone());
    let mut sheet = use_signal(|| Option::<AttendanceSheet>::None);
    let mut loading = use_signal(|| false);
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

    let query = NaiveDate::parse_from_str(&date_value(), "%Y-%m-%d")
        .ok()
        .and_then(|date| AttendanceQuery::new(&class_name(), date, today).ok());

    // Changing class or date drops any in-flight load for the old selection
    let sheet_client = client.clone();
    let _sheet = use_resource(move || {
        let client = sheet_client.clone();
        let selected = class_name();
        let raw_date = date_value();
        async move {
            sheet.set(None);
            if selected.is_empty() {
                return;
            }
            let query = match NaiveDate::parse_from_str(&raw_date, "%Y-%m-%d")
                .map_err(|_| api::ApiError::validation("Please pick a valid date"))
                .and_then(|date| AttendanceQuery::new(&selected, date, today))
            {
                Ok(query) => query,
                Err(e) => return feedback.failure(&e, "Invalid selection"),
            };
            loading.set(true);
            match load_sheet(&client, &query).await {
                Ok(loaded) => sheet.set(Some(loaded)),
                Err(e) => feedback.failure(&e, "Failed to load attendance"),
            }
            loading.set(false);
        }
    });

    let submit = move |_| {
        let (Some(current), Some(query)) = (sheet(), query.clone()) else {
            return;
        };
        let client = client.clone();
        if !begin_action(&mut submitting.write()) {
            return;
        }
        spawn(async move {
            match submit_sheet(&client, &current, query.date).await {
                Ok(saved) => feedback.success(format!(
                    "Attendance saved for {saved} students of {}",
                    query.class_name
                )),
                Err(e) => feedback.failure(&e, "Failed to save attendance"),
            }
            submitting.set(false);
        });
    };

    let current = sheet();
    let tally = current.as_ref().map(|s| s.tally()).unwrap_or_default();
    let can_submit = current.as_ref().is_some_and(|s| s.can_submit()) && !submitting();
    let rows: Vec<(String, String, String, Option<AttendanceStatus>)> = current
        .as_ref()
        .map(|s| {
            s.roster()
                .iter()
                .map(|st| (st.id.clone(), st.admission_number.clone(), st.name.clone(), s.status_of(&st.id)))
                .collect()
        })
        .unwrap_or_default();

    rsx! {
        div {
            class: "page",
            div {
                class: "page-header",
                h1 { "Attendance" }
                p { class: "muted", "Mark daily attendance for a class" }
            }
            div {
                class: "card toolbar",
                Field {
                    label: "Class",
                    ClassSelect {
                        classes: classes(),
                        value: class_name(),
                        on_change: move |v| class_name.set(v),
                    }
                }
                Field {
                    label: "Date",
                    input {
                        class: "input",
                        r#type: "date",
                        max: "{today_value}",
                        value: "{date_value}",
                        oninput: move |evt| date_value.set(evt.value()),
                    }
                }
            }
            if class_name().is_empty() {
                EmptyState { title: "Select a class", message: "Choose a class to start taking attendance." }
            } else if loading() {
                Spinner {}
            } else if let Some(current) = current {
                if current.is_empty() {
                    EmptyState { title: "No students", message: "This class has no active students." }
                } else {
                    div {
                        class: "stat-grid",
                        StatCard { label: "Students", value: tally.total.to_string() }
                        StatCard { label: "Present", value: tally.present.to_string(), tone: "stat-green" }
                        StatCard { label: "Absent", value: tally.absent.to_string(), tone: "stat-orange" }
                        StatCard { label: "Unmarked", value: (tally.total - tally.marked).to_string(), tone: "stat-purple" }
                    }
                    div {
                        class: "card",
                        div {
                            class: "toolbar",
                            button {
                                class: "btn btn-outline",
                                onclick: move |_| if let Some(s) = sheet.write().as_mut() { s.mark_all(AttendanceStatus::Present) },
                                "All Present"
                            }
                            button {
                                class: "btn btn-outline",
                                onclick: move |_| if let Some(s) = sheet.write().as_mut() { s.mark_all(AttendanceStatus::Absent) },
                                "All Absent"
                            }
                        }
                        table {
                            class: "table",
                            thead { tr { th { "Adm. No" } th { "Name" } th { "Status" } } }
                            tbody {
                                for (id, admission_number, name, status) in rows {
                                    MarkRow {
                                        key: "{id}",
                                        admission_number,
                                        name,
                                        status,
                                        on_mark: {
                                            let id = id.clone();
                                            move |status| {
                                                if let Some(s) = sheet.write().as_mut() {
                                                    s.mark(&id, status);
                                                }
                                            }
                                        },
                                    }
                                }
                            }
                        }
                        div {
                            class: "form-actions",
                            if !current.can_submit() {
                                span { class: "muted", "Mark every student to submit" }
                            }
                            button {
                                class: "btn btn-primary",
                                disabled: !can_submit,
                                onclick: submit,
                                if submitting() { "Saving..." } else { "Submit Attendance" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn MarkRow(
    admission_number: String,
    name: String,
    status: Option<AttendanceStatus>,
    on_mark: EventHandler<AttendanceStatus>,
) -> Element {
    let button_class = |target: AttendanceStatus| {
        let tone = match target {
            AttendanceStatus::Present => "btn-present",
            AttendanceStatus::Absent => "btn-absent",
        };
        if status == Some(target) {
            format!("btn {tone} selected")
        } else {
            "btn btn-outline".to_string()
        }
    };
    rsx! {
        tr {
            td { "{admission_number}" }
            td { class: "strong", "{name}" }
            td {
                div {
                    class: "mark-buttons",
                    button {
                        class: button_class(AttendanceStatus::Present),
                        onclick: move |_| on_mark.call(AttendanceStatus::Present),
                        "Present"
                    }
                    button {
                        class: button_class(AttendanceStatus::Absent),
                        onclick: move |_| on_mark.call(AttendanceStatus::Absent),
                        "Absent"
                    }
                }
            }
        }
    }
}

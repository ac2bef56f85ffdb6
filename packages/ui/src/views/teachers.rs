use api::{SalaryPayment, UserInfo};
use dioxus::prelude::*;

use crate::auth::use_client;
use crate::components::{ConfirmDialog, EmptyState, Field, ModalOverlay, Spinner, TextField};
use crate::fees::format_amount;
use crate::forms::{begin_action, SalaryDraft, TeacherDraft};
use crate::toast::use_feedback;

/// Which teacher dialog is open.
#[derive(Clone, PartialEq)]
enum Dialog {
    Create,
    Salary(UserInfo),
    History(UserInfo),
    Delete(UserInfo),
}

/// Teacher accounts, salary payments and removal.
#[component]
pub fn TeachersView() -> Element {
    let client = use_client();
    let feedback = use_feedback();
    let mut teachers = use_signal(Vec::<UserInfo>::new);
    let mut classes = use_signal(Vec::<String>::new);
    let mut loading = use_signal(|| true);
    let mut dialog = use_signal(|| Option::<Dialog>::None);
    let mut reload = use_signal(|| 0u32);

    let _loader = use_resource(move || {
        let client = client.clone();
        let _ = reload();
        async move {
            match futures::future::try_join(client.teachers(), client.classes()).await {
                Ok((loaded, class_list)) => {
                    teachers.set(loaded);
                    classes.set(class_list);
                }
                Err(e) => feedback.failure(&e, "Failed to load teachers"),
            }
            loading.set(false);
        }
    });

    let refresh = move |_| {
        dialog.set(None);
        *reload.write() += 1;
    };

    rsx! {
        div {
            class: "page",
            div {
                class: "page-header row",
                div {
                    h1 { "Teachers" }
                    p { class: "muted", "{teachers.read().len()} teachers" }
                }
                button {
                    class: "btn btn-primary",
                    onclick: move |_| dialog.set(Some(Dialog::Create)),
                    "Add Teacher"
                }
            }
            if loading() {
                Spinner {}
            } else if teachers.read().is_empty() {
                EmptyState { title: "No teachers yet", message: "Add a teacher and assign their classes." }
            } else {
                div {
                    class: "card-grid",
                    for teacher in teachers() {
                        TeacherCard {
                            key: "{teacher.id}",
                            teacher: teacher.clone(),
                            on_pay: move |t| dialog.set(Some(Dialog::Salary(t))),
                            on_history: move |t| dialog.set(Some(Dialog::History(t))),
                            on_delete: move |t| dialog.set(Some(Dialog::Delete(t))),
                        }
                    }
                }
            }
            match dialog() {
                Some(Dialog::Create) => rsx! {
                    CreateTeacherDialog {
                        classes: classes(),
                        on_created: refresh,
                        on_close: move |_| dialog.set(None),
                    }
                },
                Some(Dialog::Salary(teacher)) => rsx! {
                    SalaryDialog { teacher, on_close: move |_| dialog.set(None) }
                },
                Some(Dialog::History(teacher)) => rsx! {
                    SalaryHistoryDialog { teacher, on_close: move |_| dialog.set(None) }
                },
                Some(Dialog::Delete(teacher)) => rsx! {
                    DeleteTeacherDialog { teacher, on_deleted: refresh, on_close: move |_| dialog.set(None) }
                },
                None => rsx! {},
            }
        }
    }
}

#[component]
fn TeacherCard(
    teacher: UserInfo,
    on_pay: EventHandler<UserInfo>,
    on_history: EventHandler<UserInfo>,
    on_delete: EventHandler<UserInfo>,
) -> Element {
    let classes = teacher.assigned_class_list();
    let phone = teacher.phone.clone().unwrap_or_else(|| "-".to_string());
    let (pay, history, delete) = (teacher.clone(), teacher.clone(), teacher.clone());
    rsx! {
        div {
            class: "card teacher-card",
            h3 { "{teacher.display_name()}" }
            p { class: "muted", "{teacher.email}" }
            p { class: "muted", "Phone: {phone}" }
            div {
                class: "chips",
                for class_name in classes {
                    span { key: "{class_name}", class: "chip", "{class_name}" }
                }
            }
            div {
                class: "card-actions",
                button { class: "btn btn-outline", onclick: move |_| on_pay.call(pay.clone()), "Pay Salary" }
                button { class: "btn btn-ghost", onclick: move |_| on_history.call(history.clone()), "History" }
                button {
                    class: "btn btn-ghost btn-danger-text",
                    onclick: move |_| on_delete.call(delete.clone()),
                    "Remove"
                }
            }
        }
    }
}

#[component]
fn CreateTeacherDialog(
    classes: Vec<String>,
    on_created: EventHandler<()>,
    on_close: EventHandler<()>,
) -> Element {
    let client = use_client();
    let feedback = use_feedback();
    let mut draft = use_signal(TeacherDraft::default);
    let mut saving = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let teacher = match draft.read().validate() {
            Ok(teacher) => teacher,
            Err(e) => return feedback.failure(&e, "Failed to add teacher"),
        };
        let client = client.clone();
        if !begin_action(&mut saving.write()) {
            return;
        }
        spawn(async move {
            match client.create_teacher(&teacher).await {
                Ok(created) => {
                    tracing::info!("added teacher {}", created.email);
                    feedback.success("Teacher added");
                    on_created.call(());
                }
                Err(e) => feedback.failure(&e, "Failed to add teacher"),
            }
            saving.set(false);
        });
    };

    let d = draft.read().clone();

    rsx! {
        ModalOverlay {
            on_close: move |_| on_close.call(()),
            h2 { class: "modal-title", "Add Teacher" }
            form {
                onsubmit: onsubmit,
                TextField { label: "Name", required: true, value: d.name, on_input: move |v| draft.write().name = v }
                TextField {
                    label: "Email",
                    kind: "email",
                    required: true,
                    value: d.email,
                    on_input: move |v| draft.write().email = v,
                }
                TextField {
                    label: "Password",
                    kind: "password",
                    required: true,
                    value: d.password,
                    on_input: move |v| draft.write().password = v,
                }
                TextField { label: "Phone", kind: "tel", value: d.phone, on_input: move |v| draft.write().phone = v }
                TextField { label: "Address", value: d.address, on_input: move |v| draft.write().address = v }
                Field {
                    label: "Assigned classes",
                    required: true,
                    div {
                        class: "chips",
                        for class_name in classes {
                            button {
                                key: "{class_name}",
                                r#type: "button",
                                class: if d.assigned_classes.contains(&class_name) { "chip chip-selected" } else { "chip" },
                                onclick: {
                                    let class_name = class_name.clone();
                                    move |_| draft.write().toggle_class(&class_name)
                                },
                                "{class_name}"
                            }
                        }
                    }
                }
                div {
                    class: "modal-actions",
                    button { class: "btn btn-outline", r#type: "button", onclick: move |_| on_close.call(()), "Cancel" }
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: saving(),
                        if saving() { "Saving..." } else { "Add Teacher" }
                    }
                }
            }
        }
    }
}

#[component]
fn SalaryDialog(teacher: UserInfo, on_close: EventHandler<()>) -> Element {
    let client = use_client();
    let feedback = use_feedback();
    let mut draft = use_signal(SalaryDraft::default);
    let mut saving = use_signal(|| false);
    let teacher_id = teacher.id.clone();

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let payment = match draft.read().validate(&teacher_id) {
            Ok(payment) => payment,
            Err(e) => return feedback.failure(&e, "Failed to record salary"),
        };
        let client = client.clone();
        if !begin_action(&mut saving.write()) {
            return;
        }
        spawn(async move {
            match client.pay_salary(&payment).await {
                Ok(paid) => {
                    tracing::info!("paid salary {} to {}", paid.amount, paid.teacher_id);
                    feedback.success("Salary payment recorded");
                    on_close.call(());
                }
                Err(e) => feedback.failure(&e, "Failed to record salary"),
            }
            saving.set(false);
        });
    };

    let d = draft.read().clone();

    rsx! {
        ModalOverlay {
            on_close: move |_| on_close.call(()),
            h2 { class: "modal-title", "Pay Salary" }
            p { class: "muted", "{teacher.display_name()}" }
            form {
                onsubmit: onsubmit,
                TextField {
                    label: "Amount",
                    kind: "number",
                    required: true,
                    value: d.amount,
                    on_input: move |v| draft.write().amount = v,
                }
                TextField {
                    label: "Remark",
                    placeholder: "e.g. June salary",
                    value: d.remark,
                    on_input: move |v| draft.write().remark = v,
                }
                div {
                    class: "modal-actions",
                    button { class: "btn btn-outline", r#type: "button", onclick: move |_| on_close.call(()), "Cancel" }
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: saving(),
                        if saving() { "Saving..." } else { "Record Payment" }
                    }
                }
            }
        }
    }
}

#[component]
fn SalaryHistoryDialog(teacher: UserInfo, on_close: EventHandler<()>) -> Element {
    let client = use_client();
    let feedback = use_feedback();
    let mut history = use_signal(|| Option::<Vec<SalaryPayment>>::None);
    let teacher_id = teacher.id.clone();

    let _loader = use_resource(move || {
        let client = client.clone();
        let teacher_id = teacher_id.clone();
        async move {
            match client.salary_history(&teacher_id).await {
                Ok(payments) => history.set(Some(payments)),
                Err(e) => {
                    history.set(Some(Vec::new()));
                    feedback.failure(&e, "Failed to load salary history");
                }
            }
        }
    });

    let rows: Vec<(String, String, String, String)> = history()
        .unwrap_or_default()
        .into_iter()
        .map(|p| {
            (
                p.id,
                p.paid_at.format("%d %b %Y").to_string(),
                format_amount(p.amount),
                p.remark.unwrap_or_default(),
            )
        })
        .collect();

    rsx! {
        ModalOverlay {
            on_close: move |_| on_close.call(()),
            h2 { class: "modal-title", "Salary History" }
            p { class: "muted", "{teacher.display_name()}" }
            if history().is_none() {
                Spinner {}
            } else if rows.is_empty() {
                p { class: "muted", "No payments recorded." }
            } else {
                table {
                    class: "table",
                    thead { tr { th { "Date" } th { "Amount" } th { "Remark" } } }
                    tbody {
                        for (id, date, amount, remark) in rows {
                            tr { key: "{id}", td { "{date}" } td { "\u{20b9}{amount}" } td { "{remark}" } }
                        }
                    }
                }
            }
            div {
                class: "modal-actions",
                button { class: "btn btn-outline", onclick: move |_| on_close.call(()), "Close" }
            }
        }
    }
}

#[component]
fn DeleteTeacherDialog(
    teacher: UserInfo,
    on_deleted: EventHandler<()>,
    on_close: EventHandler<()>,
) -> Element {
    let client = use_client();
    let feedback = use_feedback();
    let mut deleting = use_signal(|| false);
    let teacher_id = teacher.id.clone();

    let confirm = move |_| {
        let client = client.clone();
        let teacher_id = teacher_id.clone();
        if !begin_action(&mut deleting.write()) {
            return;
        }
        spawn(async move {
            match client.delete_user(&teacher_id).await {
                Ok(()) => {
                    tracing::info!("removed teacher {teacher_id}");
                    feedback.success("Teacher removed");
                    on_deleted.call(());
                }
                Err(e) => feedback.failure(&e, "Failed to remove teacher"),
            }
            deleting.set(false);
        });
    };

    rsx! {
        ConfirmDialog {
            title: "Remove teacher",
            message: format!("Remove {} and revoke their access?", teacher.display_name()),
            confirm_label: "Remove",
            danger: true,
            busy: deleting(),
            on_confirm: confirm,
            on_cancel: move |_| on_close.call(()),
        }
    }
}

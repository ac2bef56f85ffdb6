use api::{FeeBill, StudentFee};
use dioxus::prelude::*;

use crate::auth::use_client;
use crate::components::{ClassSelect, ConfirmDialog, EmptyState, Field, ModalOverlay, Spinner, StatCard, TextField};
use crate::fees::{
    create_fee_bill, format_amount, load_fee_overview, load_ledger, settle_fee, ClassFilter,
    FeeBillDraft, FeeLedger, PaymentConfirmation, FEE_TYPES,
};
use crate::forms::begin_action;
use crate::toast::use_feedback;

/// Fee bills, and the per-student ledger of the selected bill.
#[component]
pub fn FeesView() -> Element {
    let client = use_client();
    let feedback = use_feedback();
    let mut bills = use_signal(Vec::<FeeBill>::new);
    let mut classes = use_signal(Vec::<String>::new);
    let mut loading = use_signal(|| true);
    let mut creating = use_signal(|| false);
    let mut selected = use_signal(|| Option::<FeeBill>::None);
    let mut reload = use_signal(|| 0u32);

    let _loader = use_resource(move || {
        let client = client.clone();
        let _ = reload();
        async move {
            match load_fee_overview(&client).await {
                Ok((loaded, class_list)) => {
                    bills.set(loaded);
                    classes.set(class_list);
                }
                Err(e) => feedback.failure(&e, "Failed to load fee bills"),
            }
            loading.set(false);
        }
    });

    if let Some(bill) = selected() {
        return rsx! {
            LedgerPanel { bill, on_back: move |_| selected.set(None) }
        };
    }

    rsx! {
        div {
            class: "page",
            div {
                class: "page-header row",
                div {
                    h1 { "Fee Management" }
                    p { class: "muted", "Create bills and track payments" }
                }
                button {
                    class: "btn btn-primary",
                    onclick: move |_| creating.set(true),
                    "Create Fee Bill"
                }
            }
            if loading() {
                Spinner {}
            } else if bills.read().is_empty() {
                EmptyState { title: "No fee bills yet", message: "Create a bill to charge students." }
            } else {
                div {
                    class: "card-grid",
                    for bill in bills() {
                        BillCard { key: "{bill.id}", bill: bill.clone(), on_open: move |b| selected.set(Some(b)) }
                    }
                }
            }
            if creating() {
                CreateBillDialog {
                    classes: classes(),
                    on_created: move |_| {
                        creating.set(false);
                        *reload.write() += 1;
                    },
                    on_close: move |_| creating.set(false),
                }
            }
        }
    }
}

#[component]
fn BillCard(bill: FeeBill, on_open: EventHandler<FeeBill>) -> Element {
    let amount = format_amount(bill.amount);
    let due = bill
        .due_date
        .map(|d| format!("Due {}", d.format("%d %b %Y")))
        .unwrap_or_else(|| "No due date".to_string());
    let target = bill.target_label().to_string();
    let opened = bill.clone();
    rsx! {
        div {
            class: "card bill-card clickable",
            onclick: move |_| on_open.call(opened.clone()),
            h3 { "{bill.name}" }
            p { class: "stat-value", "\u{20b9}{amount}" }
            p { class: "muted", "{target} · {due}" }
            if let Some(description) = bill.description.clone() {
                p { class: "muted", "{description}" }
            }
        }
    }
}

#[component]
fn CreateBillDialog(
    classes: Vec<String>,
    on_created: EventHandler<()>,
    on_close: EventHandler<()>,
) -> Element {
    let client = use_client();
    let feedback = use_feedback();
    let mut draft = use_signal(FeeBillDraft::default);
    let mut saving = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        let current = draft.read().clone();
        if !begin_action(&mut saving.write()) {
            return;
        }
        spawn(async move {
            match create_fee_bill(&client, &current).await {
                Ok(bill) => {
                    feedback.success(format!("{} created for {}", bill.name, bill.target_label()));
                    on_created.call(());
                }
                Err(e) => feedback.failure(&e, "Failed to create fee bill"),
            }
            saving.set(false);
        });
    };

    let d = draft.read().clone();

    rsx! {
        ModalOverlay {
            on_close: move |_| on_close.call(()),
            h2 { class: "modal-title", "Create Fee Bill" }
            form {
                onsubmit: onsubmit,
                Field {
                    label: "Fee type",
                    required: true,
                    select {
                        class: "input",
                        value: "{d.name}",
                        onchange: move |evt| draft.write().name = evt.value(),
                        option { value: "", disabled: true, "Choose a fee type" }
                        for fee_type in FEE_TYPES {
                            option { key: "{fee_type}", value: "{fee_type}", "{fee_type}" }
                        }
                    }
                }
                TextField {
                    label: "Amount",
                    kind: "number",
                    required: true,
                    value: d.amount,
                    on_input: move |v| draft.write().amount = v,
                }
                Field {
                    label: "Class",
                    ClassSelect {
                        classes,
                        value: d.target_class,
                        any_label: "All classes".to_string(),
                        on_change: move |v| draft.write().target_class = v,
                    }
                }
                TextField {
                    label: "Due date",
                    kind: "date",
                    value: d.due_date,
                    on_input: move |v| draft.write().due_date = v,
                }
                TextField {
                    label: "Description",
                    value: d.description,
                    on_input: move |v| draft.write().description = v,
                }
                p { class: "muted", "A bill is created for every active student of the selected class." }
                div {
                    class: "modal-actions",
                    button { class: "btn btn-outline", r#type: "button", onclick: move |_| on_close.call(()), "Cancel" }
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: saving(),
                        if saving() { "Creating..." } else { "Create Bill" }
                    }
                }
            }
        }
    }
}

/// Obligations of one bill, with class tabs and settlement.
#[component]
fn LedgerPanel(bill: FeeBill, on_back: EventHandler<()>) -> Element {
    let client = use_client();
    let feedback = use_feedback();
    let mut ledger = use_signal(|| Option::<FeeLedger>::None);
    let mut pending = use_signal(|| Option::<PaymentConfirmation>::None);
    let mut settling = use_signal(|| false);
    let bill_id = bill.id.clone();

    let loader_client = client.clone();
    let _loader = use_resource(move || {
        let client = loader_client.clone();
        let bill_id = bill_id.clone();
        async move {
            match load_ledger(&client, &bill_id).await {
                Ok(loaded) => ledger.set(Some(loaded)),
                Err(e) => {
                    ledger.set(Some(FeeLedger::default()));
                    feedback.failure(&e, "Failed to load fee details");
                }
            }
        }
    });

    let confirm = move |_| {
        let (Some(confirmation), Some(mut working)) = (pending(), ledger()) else {
            return;
        };
        let client = client.clone();
        if !begin_action(&mut settling.write()) {
            return;
        }
        spawn(async move {
            let fee_id = confirmation.fee.id.clone();
            match settle_fee(&client, &mut working, &fee_id).await {
                Ok(settled) => {
                    if let Some(live) = ledger.write().as_mut() {
                        live.record_payment(&fee_id, settled.paid_at);
                    }
                    feedback.success("Fee marked as paid");
                }
                Err(e) => feedback.failure(&e, "Failed to mark fee as paid"),
            }
            pending.set(None);
            settling.set(false);
        });
    };

    let Some(current) = ledger() else {
        return rsx! { Spinner {} };
    };
    let filter_value = current.filter().value().to_string();
    let class_tabs = current.classes();
    let unpaid: Vec<StudentFee> = current.unpaid().into_iter().cloned().collect();
    let paid: Vec<StudentFee> = current.paid().into_iter().cloned().collect();
    let outstanding = format_amount(current.outstanding());
    let bill_amount = format_amount(bill.amount);
    let target = bill.target_label().to_string();

    rsx! {
        div {
            class: "page",
            div {
                class: "page-header",
                button { class: "btn btn-ghost", onclick: move |_| on_back.call(()), "← All bills" }
                h1 { "{bill.name}" }
                p { class: "muted", "\u{20b9}{bill_amount} · {target}" }
            }
            div {
                class: "stat-grid",
                StatCard { label: "Students", value: current.len().to_string() }
                StatCard { label: "Unpaid", value: unpaid.len().to_string(), tone: "stat-orange" }
                StatCard { label: "Paid", value: paid.len().to_string(), tone: "stat-green" }
                StatCard { label: "Outstanding", value: format!("\u{20b9}{outstanding}"), tone: "stat-purple" }
            }
            div {
                class: "tabs",
                button {
                    class: if filter_value == "all" { "tab active" } else { "tab" },
                    onclick: move |_| if let Some(l) = ledger.write().as_mut() { l.set_filter(ClassFilter::All) },
                    "All"
                }
                for class_name in class_tabs {
                    button {
                        key: "{class_name}",
                        class: if filter_value == class_name { "tab active" } else { "tab" },
                        onclick: {
                            let class_name = class_name.clone();
                            move |_| {
                                if let Some(l) = ledger.write().as_mut() {
                                    l.set_filter(ClassFilter::from_value(&class_name));
                                }
                            }
                        },
                        "{class_name}"
                    }
                }
            }
            if current.is_empty() {
                EmptyState { title: "No students billed", message: "No active students matched this bill." }
            } else {
                FeeTable {
                    title: "Unpaid",
                    fees: unpaid,
                    on_settle: move |fee| pending.set(Some(PaymentConfirmation::new(fee))),
                }
                FeeTable { title: "Paid", fees: paid }
            }
            if let Some(confirmation) = pending() {
                ConfirmDialog {
                    title: confirmation.title(),
                    message: confirmation.message(),
                    confirm_label: "Mark as Paid",
                    busy: settling(),
                    on_confirm: confirm,
                    on_cancel: move |_| pending.set(None),
                }
            }
        }
    }
}

#[component]
fn FeeTable(
    title: String,
    fees: Vec<StudentFee>,
    /// Offered on unpaid rows only.
    #[props(default)]
    on_settle: Option<EventHandler<StudentFee>>,
) -> Element {
    rsx! {
        div {
            class: "card",
            h2 { "{title} ({fees.len()})" }
            if fees.is_empty() {
                p { class: "muted", "Nothing here." }
            } else {
                table {
                    class: "table",
                    thead { tr { th { "Student" } th { "Class" } th { "Amount" } th { "Paid on" } th {} } }
                    tbody {
                        for fee in fees {
                            FeeRow { key: "{fee.id}", fee: fee.clone(), on_settle }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn FeeRow(fee: StudentFee, on_settle: Option<EventHandler<StudentFee>>) -> Element {
    let student = fee.student_name.clone().unwrap_or_default();
    let class_name = fee.student_class.clone().unwrap_or_default();
    let amount = format_amount(fee.amount);
    let paid_on = fee
        .paid_at
        .map(|at| at.format("%d %b %Y").to_string())
        .unwrap_or_else(|| "-".to_string());
    let settle = (!fee.is_paid()).then_some(on_settle).flatten();
    rsx! {
        tr {
            td { class: "strong", "{student}" }
            td { "{class_name}" }
            td { "\u{20b9}{amount}" }
            td { "{paid_on}" }
            td {
                if let Some(settle) = settle {
                    button {
                        class: "btn btn-primary btn-small",
                        onclick: move |_| settle.call(fee.clone()),
                        "Mark Paid"
                    }
                }
            }
        }
    }
}

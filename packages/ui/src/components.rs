//! Small presentational building blocks shared by the views.

use dioxus::prelude::*;

/// Centered loading indicator.
#[component]
pub fn Spinner() -> Element {
    rsx! {
        div { class: "spinner-wrap", div { class: "spinner" } }
    }
}

/// A full-screen overlay that centers its children in a modal card.
/// Clicking outside the card triggers `on_close`.
#[component]
pub fn ModalOverlay(on_close: EventHandler<()>, children: Element) -> Element {
    rsx! {
        div {
            class: "modal-backdrop",
            onclick: move |_| on_close.call(()),
            div {
                class: "modal-card",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                {children}
            }
        }
    }
}

/// Modal asking to confirm an action.
#[component]
pub fn ConfirmDialog(
    title: String,
    message: String,
    #[props(default = "Confirm".to_string())] confirm_label: String,
    /// Disables both buttons while the action runs.
    #[props(default)]
    busy: bool,
    #[props(default)] danger: bool,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    let confirm_class = if danger { "btn btn-danger" } else { "btn btn-primary" };
    rsx! {
        ModalOverlay {
            on_close: move |_| {
                if !busy {
                    on_cancel.call(());
                }
            },
            h2 { class: "modal-title", "{title}" }
            p { class: "modal-message", "{message}" }
            div {
                class: "modal-actions",
                button {
                    class: "btn btn-outline",
                    disabled: busy,
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
                button {
                    class: confirm_class,
                    disabled: busy,
                    onclick: move |_| on_confirm.call(()),
                    if busy { "Working..." } else { "{confirm_label}" }
                }
            }
        }
    }
}

/// Headline number on the dashboard and detail pages.
#[component]
pub fn StatCard(
    label: String,
    value: String,
    #[props(default)] hint: Option<String>,
    #[props(default = "stat-blue".to_string())] tone: String,
) -> Element {
    rsx! {
        div {
            class: "stat-card {tone}",
            p { class: "stat-label", "{label}" }
            p { class: "stat-value", "{value}" }
            if let Some(hint) = hint {
                p { class: "stat-hint", "{hint}" }
            }
        }
    }
}

/// Class picker fed by `GET /classes`.
#[component]
pub fn ClassSelect(
    classes: Vec<String>,
    value: String,
    on_change: EventHandler<String>,
    /// Label of the "no class" option; omitted when `None`.
    #[props(default)]
    any_label: Option<String>,
    #[props(default = "Choose a class".to_string())] placeholder: String,
) -> Element {
    rsx! {
        select {
            class: "input",
            value: "{value}",
            onchange: move |evt| on_change.call(evt.value()),
            if let Some(any) = any_label {
                option { value: "", "{any}" }
            } else {
                option { value: "", disabled: true, "{placeholder}" }
            }
            for class_name in classes {
                option { key: "{class_name}", value: "{class_name}", "{class_name}" }
            }
        }
    }
}

/// Placeholder shown when a list has nothing to show.
#[component]
pub fn EmptyState(title: String, message: String) -> Element {
    rsx! {
        div {
            class: "card empty-state",
            h3 { "{title}" }
            p { "{message}" }
        }
    }
}

/// Labelled form field wrapper.
#[component]
pub fn Field(label: String, #[props(default)] required: bool, children: Element) -> Element {
    rsx! {
        label {
            class: "field",
            span {
                class: "field-label",
                "{label}"
                if required { span { class: "field-required", " *" } }
            }
            {children}
        }
    }
}

/// Single-line input inside a [`Field`].
#[component]
pub fn TextField(
    label: String,
    value: String,
    on_input: EventHandler<String>,
    #[props(default)] required: bool,
    #[props(default = "text".to_string())] kind: String,
    #[props(default)] placeholder: String,
    /// Upper bound for date inputs.
    #[props(default)]
    max: Option<String>,
) -> Element {
    rsx! {
        Field {
            label,
            required,
            input {
                class: "input",
                r#type: "{kind}",
                placeholder: "{placeholder}",
                max: max,
                value: "{value}",
                oninput: move |evt| on_input.call(evt.value()),
            }
        }
    }
}

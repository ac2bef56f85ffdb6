use api::{Contact, Notification};
use dioxus::prelude::*;

use crate::auth::use_client;
use crate::components::{ClassSelect, EmptyState, Field, ModalOverlay, Spinner, TextField};
use crate::forms::{begin_action, NotificationDraft};
use crate::toast::use_feedback;

/// Parent notifications and their WhatsApp contact lists.
#[component]
pub fn NotificationsView() -> Element {
    let client = use_client();
    let feedback = use_feedback();
    let mut notifications = use_signal(Vec::<Notification>::new);
    let mut classes = use_signal(Vec::<String>::new);
    let mut loading = use_signal(|| true);
    let mut creating = use_signal(|| false);
    let mut contacts_for = use_signal(|| Option::<Notification>::None);
    let mut reload = use_signal(|| 0u32);

    let _loader = use_resource(move || {
        let client = client.clone();
        let _ = reload();
        async move {
            match futures::future::try_join(client.notifications(), client.classes()).await {
                Ok((loaded, class_list)) => {
                    notifications.set(loaded);
                    classes.set(class_list);
                }
                Err(e) => feedback.failure(&e, "Failed to load notifications"),
            }
            loading.set(false);
        }
    });

    rsx! {
        div {
            class: "page",
            div {
                class: "page-header row",
                div {
                    h1 { "Notifications" }
                    p { class: "muted", "Message parents over WhatsApp" }
                }
                button {
                    class: "btn btn-primary",
                    onclick: move |_| creating.set(true),
                    "New Notification"
                }
            }
            if loading() {
                Spinner {}
            } else if notifications.read().is_empty() {
                EmptyState { title: "No notifications yet", message: "Create one to reach parents." }
            } else {
                div {
                    class: "stack",
                    for notification in notifications() {
                        NotificationCard {
                            key: "{notification.id}",
                            notification: notification.clone(),
                            on_contacts: move |n| contacts_for.set(Some(n)),
                        }
                    }
                }
            }
            if creating() {
                CreateNotificationDialog {
                    classes: classes(),
                    on_created: move |created: Notification| {
                        creating.set(false);
                        contacts_for.set(Some(created));
                        *reload.write() += 1;
                    },
                    on_close: move |_| creating.set(false),
                }
            }
            if let Some(notification) = contacts_for() {
                ContactsDialog { notification, on_close: move |_| contacts_for.set(None) }
            }
        }
    }
}

#[component]
fn NotificationCard(notification: Notification, on_contacts: EventHandler<Notification>) -> Element {
    let target = notification
        .target_class
        .clone()
        .unwrap_or_else(|| "All classes".to_string());
    let sent = notification.created_at.format("%d %b %Y, %H:%M").to_string();
    let opened = notification.clone();
    rsx! {
        div {
            class: "card",
            div {
                class: "row",
                h3 { "{notification.title}" }
                span { class: "badge", "{target}" }
            }
            p { "{notification.message}" }
            div {
                class: "row",
                span { class: "muted", "{sent}" }
                button {
                    class: "btn btn-outline",
                    onclick: move |_| on_contacts.call(opened.clone()),
                    "Send via WhatsApp"
                }
            }
        }
    }
}

#[component]
fn CreateNotificationDialog(
    classes: Vec<String>,
    on_created: EventHandler<Notification>,
    on_close: EventHandler<()>,
) -> Element {
    let client = use_client();
    let feedback = use_feedback();
    let mut draft = use_signal(NotificationDraft::default);
    let mut saving = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let notification = match draft.read().validate() {
            Ok(notification) => notification,
            Err(e) => return feedback.failure(&e, "Failed to create notification"),
        };
        let client = client.clone();
        if !begin_action(&mut saving.write()) {
            return;
        }
        spawn(async move {
            match client.create_notification(&notification).await {
                Ok(created) => {
                    tracing::info!("created notification {}", created.id);
                    feedback.success("Notification created");
                    on_created.call(created);
                }
                Err(e) => feedback.failure(&e, "Failed to create notification"),
            }
            saving.set(false);
        });
    };

    let d = draft.read().clone();

    rsx! {
        ModalOverlay {
            on_close: move |_| on_close.call(()),
            h2 { class: "modal-title", "New Notification" }
            form {
                onsubmit: onsubmit,
                TextField { label: "Title", required: true, value: d.title, on_input: move |v| draft.write().title = v }
                Field {
                    label: "Message",
                    required: true,
                    textarea {
                        class: "input",
                        rows: "5",
                        value: "{d.message}",
                        oninput: move |evt| draft.write().message = evt.value(),
                    }
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
                div {
                    class: "modal-actions",
                    button { class: "btn btn-outline", r#type: "button", onclick: move |_| on_close.call(()), "Cancel" }
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: saving(),
                        if saving() { "Saving..." } else { "Create" }
                    }
                }
            }
        }
    }
}

#[component]
fn ContactsDialog(notification: Notification, on_close: EventHandler<()>) -> Element {
    let client = use_client();
    let feedback = use_feedback();
    let mut contacts = use_signal(|| Option::<Vec<Contact>>::None);
    let notification_id = notification.id.clone();

    let _loader = use_resource(move || {
        let client = client.clone();
        let notification_id = notification_id.clone();
        async move {
            match client.notification_contacts(&notification_id).await {
                Ok(loaded) => contacts.set(Some(loaded)),
                Err(e) => {
                    contacts.set(Some(Vec::new()));
                    feedback.failure(&e, "Failed to load contacts");
                }
            }
        }
    });

    let list = contacts();

    rsx! {
        ModalOverlay {
            on_close: move |_| on_close.call(()),
            h2 { class: "modal-title", "{notification.title}" }
            p { class: "muted", "Open a chat to send this message to each parent." }
            match list {
                None => rsx! { Spinner {} },
                Some(list) if list.is_empty() => rsx! {
                    p { class: "muted", "No parent contacts for this notification." }
                },
                Some(list) => rsx! {
                    ul {
                        class: "contact-list",
                        for (i, contact) in list.into_iter().enumerate() {
                            li {
                                key: "{i}",
                                div {
                                    p { class: "strong", "{contact.student_name}" }
                                    p { class: "muted", "{contact.parent_contact}" }
                                }
                                a {
                                    class: "btn btn-whatsapp",
                                    href: "{contact.whatsapp_link}",
                                    target: "_blank",
                                    rel: "noopener noreferrer",
                                    "WhatsApp"
                                }
                            }
                        }
                    }
                },
            }
            div {
                class: "modal-actions",
                button { class: "btn btn-outline", onclick: move |_| on_close.call(()), "Close" }
            }
        }
    }
}

//! Transient notifications: one per finished action.

use std::time::Duration;

use api::ApiError;
use dioxus::prelude::*;

use crate::auth::AuthState;

/// Expiry sweep interval.
const TICK: Duration = Duration::from_millis(500);
/// A toast stays up for this many ticks.
const TOAST_TICKS: u32 = 8;
/// Oldest toasts are dropped beyond this.
const MAX_TOASTS: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    fn class(self) -> &'static str {
        match self {
            Self::Success => "toast toast-success",
            Self::Error => "toast toast-error",
            Self::Info => "toast toast-info",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
    ticks_left: u32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToastQueue {
    next_id: u64,
    items: Vec<Toast>,
}

impl ToastQueue {
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        self.items.push(Toast {
            id: self.next_id,
            kind,
            message: message.into(),
            ticks_left: TOAST_TICKS,
        });
        if self.items.len() > MAX_TOASTS {
            self.items.remove(0);
        }
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }

    /// Age every toast by one tick and drop the expired ones.
    pub fn tick(&mut self) {
        for toast in &mut self.items {
            toast.ticks_left = toast.ticks_left.saturating_sub(1);
        }
        self.items.retain(|t| t.ticks_left > 0);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }
}

pub fn use_toasts() -> Signal<ToastQueue> {
    use_context::<Signal<ToastQueue>>()
}

async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

/// Show a toast. The provider's sweep dismisses it after a few seconds,
/// even if the calling view has already unmounted.
pub fn notify(toasts: &mut Signal<ToastQueue>, kind: ToastKind, message: impl Into<String>) {
    toasts.write().push(kind, message);
}

/// Reports the outcome of user actions.
#[derive(Clone, Copy, PartialEq)]
pub struct Feedback {
    toasts: Signal<ToastQueue>,
    auth: Signal<AuthState>,
}

pub fn use_feedback() -> Feedback {
    Feedback {
        toasts: use_toasts(),
        auth: crate::auth::use_auth(),
    }
}

impl Feedback {
    pub fn success(mut self, message: impl Into<String>) {
        notify(&mut self.toasts, ToastKind::Success, message);
    }

    pub fn error(mut self, message: impl Into<String>) {
        notify(&mut self.toasts, ToastKind::Error, message);
    }

    pub fn info(mut self, message: impl Into<String>) {
        notify(&mut self.toasts, ToastKind::Info, message);
    }

    /// Toast a failed action. A 401 has already ended the session, so the
    /// auth state is cleared and the route guard takes over.
    pub fn failure(mut self, err: &ApiError, fallback: &str) {
        tracing::warn!("{fallback}: {err}");
        if err.is_unauthorized() {
            self.auth.set(AuthState::default());
        }
        self.error(err.user_message(fallback));
    }
}

/// Provides the toast queue and renders it above the app.
#[component]
pub fn ToastProvider(children: Element) -> Element {
    let mut toasts = use_context_provider(|| Signal::new(ToastQueue::default()));
    let _sweep = use_future(move || async move {
        loop {
            sleep(TICK).await;
            if !toasts.peek().is_empty() {
                toasts.write().tick();
            }
        }
    });
    let items = toasts.read().items().to_vec();

    rsx! {
        {children}
        div {
            class: "toast-stack",
            for Toast { id, kind, message, .. } in items {
                div {
                    key: "{id}",
                    class: kind.class(),
                    role: "status",
                    span { "{message}" }
                    button {
                        class: "toast-close",
                        onclick: move |_| toasts.write().dismiss(id),
                        "×"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_caps_and_dismisses() {
        let mut queue = ToastQueue::default();
        let first = queue.push(ToastKind::Info, "one");
        for n in 0..MAX_TOASTS {
            queue.push(ToastKind::Success, format!("more {n}"));
        }
        assert_eq!(queue.items().len(), MAX_TOASTS);
        assert!(queue.items().iter().all(|t| t.id != first));

        let last = queue.items()[MAX_TOASTS - 1].id;
        queue.dismiss(last);
        assert_eq!(queue.items().len(), MAX_TOASTS - 1);
    }

    #[test]
    fn test_toasts_expire_after_their_ticks() {
        let mut queue = ToastQueue::default();
        queue.push(ToastKind::Success, "Welcome back!");
        for _ in 0..TOAST_TICKS - 1 {
            queue.tick();
        }
        queue.push(ToastKind::Info, "later");
        assert_eq!(queue.items().len(), 2);

        queue.tick();
        assert_eq!(queue.items().len(), 1);
        assert_eq!(queue.items()[0].message, "later");

        for _ in 0..TOAST_TICKS {
            queue.tick();
        }
        assert!(queue.is_empty());
    }
}

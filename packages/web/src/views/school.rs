//! Signed-in pages, bound to the router.

use dioxus::prelude::*;
use ui::views::{
    AdmissionView, AttendanceView, DashboardView, FeesView, NotificationsView, StudentDetailView,
    StudentsView, TeachersView,
};

use crate::{route_for, Route};

#[component]
pub fn Dashboard() -> Element {
    let nav = use_navigator();
    rsx! {
        DashboardView {
            on_navigate: move |path: String| {
                nav.push(route_for(&path));
            },
        }
    }
}

#[component]
pub fn Students() -> Element {
    let nav = use_navigator();
    rsx! {
        StudentsView {
            on_open: move |id| {
                nav.push(Route::StudentDetail { id });
            },
            on_admit: move |_| {
                nav.push(Route::Admission {});
            },
        }
    }
}

#[component]
pub fn Admission() -> Element {
    let nav = use_navigator();
    rsx! {
        AdmissionView {
            on_done: move |id| {
                nav.replace(Route::StudentDetail { id });
            },
            on_cancel: move |_| {
                nav.push(Route::Students {});
            },
        }
    }
}

#[component]
pub fn StudentDetail(id: String) -> Element {
    let nav = use_navigator();
    rsx! {
        StudentDetailView {
            id,
            on_back: move |_| nav.go_back(),
        }
    }
}

#[component]
pub fn Teachers() -> Element {
    rsx! { TeachersView {} }
}

#[component]
pub fn Fees() -> Element {
    rsx! { FeesView {} }
}

#[component]
pub fn Attendance() -> Element {
    rsx! { AttendanceView {} }
}

#[component]
pub fn Notifications() -> Element {
    rsx! { NotificationsView {} }
}

/// Unknown paths go to the dashboard.
#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let nav = use_navigator();
    tracing::debug!("unknown path /{}", segments.join("/"));
    nav.replace(Route::Dashboard {});
    rsx! {}
}

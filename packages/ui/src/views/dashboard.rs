use api::DashboardStats;
use dioxus::prelude::*;

use crate::auth::{use_auth, use_client};
use crate::components::{Spinner, StatCard};
use crate::toast::use_feedback;

/// Shortcuts offered to principals below the stats.
const QUICK_ACTIONS: [(&str, &str); 4] = [
    ("Add Student", "/students/new"),
    ("Create Fee Bill", "/fees"),
    ("Take Attendance", "/attendance"),
    ("Send Notification", "/notifications"),
];

/// Landing page: school headline numbers.
#[component]
pub fn DashboardView(on_navigate: EventHandler<String>) -> Element {
    let client = use_client();
    let auth = use_auth();
    let feedback = use_feedback();
    let mut stats = use_signal(|| Option::<DashboardStats>::None);
    let mut loading = use_signal(|| true);

    let _loader = use_resource(move || {
        let client = client.clone();
        async move {
            match client.dashboard_stats().await {
                Ok(loaded) => stats.set(Some(loaded)),
                Err(e) => feedback.failure(&e, "Failed to load dashboard"),
            }
            loading.set(false);
        }
    });

    let session = auth();
    let greeting = session
        .user
        .as_ref()
        .map(|u| u.display_name().to_string())
        .unwrap_or_default();
    let is_principal = session.is_principal();

    if loading() {
        return rsx! { Spinner {} };
    }

    let stats = stats().unwrap_or_default();
    let attendance = format!("{:.0}%", stats.today_attendance_rate);

    rsx! {
        div {
            class: "page",
            div {
                class: "page-header",
                h1 { "Welcome, {greeting}" }
                p { class: "muted", "Here is what is happening at your school today." }
            }
            div {
                class: "stat-grid",
                StatCard { label: "Total Students", value: stats.total_students.to_string(), tone: "stat-blue" }
                StatCard { label: "Classes", value: stats.total_classes.to_string(), tone: "stat-purple" }
                StatCard {
                    label: "Pending Fees",
                    value: stats.pending_fees.to_string(),
                    hint: "Unpaid obligations".to_string(),
                    tone: "stat-orange",
                }
                StatCard { label: "Today's Attendance", value: attendance, tone: "stat-green" }
                StatCard {
                    label: "Recent Admissions",
                    value: stats.recent_admissions.to_string(),
                    hint: "Last 30 days".to_string(),
                    tone: "stat-teal",
                }
            }
            if is_principal {
                div {
                    class: "card",
                    h2 { "Quick Actions" }
                    div {
                        class: "quick-actions",
                        for (label, path) in QUICK_ACTIONS {
                            button {
                                key: "{path}{label}",
                                class: "btn btn-outline",
                                onclick: move |_| on_navigate.call(path.to_string()),
                                "{label}"
                            }
                        }
                    }
                }
            }
        }
    }
}

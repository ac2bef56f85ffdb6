use dioxus::prelude::*;

use ui::access::Access;
use ui::{AuthProvider, ToastProvider};
use views::{
    Admission, Attendance, Dashboard, Fees, Login, NotFound, Notifications, Register,
    StudentDetail, Students, Teachers,
};

mod guard;
mod views;

use guard::Guard;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Guard)]
        #[route("/login")]
        Login {},
        #[route("/register")]
        Register {},
        #[route("/")]
        Dashboard {},
        #[route("/students")]
        Students {},
        #[route("/students/new")]
        Admission {},
        #[route("/students/:id")]
        StudentDetail { id: String },
        #[route("/teachers")]
        Teachers {},
        #[route("/fees")]
        Fees {},
        #[route("/attendance")]
        Attendance {},
        #[route("/notifications")]
        Notifications {},
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

impl Route {
    /// Who may open this page.
    fn access(&self) -> Access {
        match self {
            Self::Login {} | Self::Register {} => Access::PublicOnly,
            Self::Dashboard {} | Self::StudentDetail { .. } | Self::Attendance {} => Access::Protected,
            Self::Students {}
            | Self::Admission {}
            | Self::Teachers {}
            | Self::Fees {}
            | Self::Notifications {} => Access::PrincipalOnly,
            // Redirects straight to the dashboard
            Self::NotFound { .. } => Access::Protected,
        }
    }
}

/// Map a path reported by a shared view onto a route. Unknown paths land
/// on the dashboard.
fn route_for(path: &str) -> Route {
    path.parse::<Route>().unwrap_or_else(|_| {
        tracing::warn!("no route for {path}");
        Route::Dashboard {}
    })
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Title { "Scholify" }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AuthProvider {
            ToastProvider {
                Router::<Route> {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_access_levels() {
        assert_eq!(Route::Login {}.access(), Access::PublicOnly);
        assert_eq!(Route::Register {}.access(), Access::PublicOnly);
        assert_eq!(Route::Dashboard {}.access(), Access::Protected);
        assert_eq!(Route::Attendance {}.access(), Access::Protected);
        assert_eq!(
            Route::StudentDetail { id: "s1".to_string() }.access(),
            Access::Protected
        );
        for principal_only in [
            Route::Students {},
            Route::Admission {},
            Route::Teachers {},
            Route::Fees {},
            Route::Notifications {},
        ] {
            assert_eq!(principal_only.access(), Access::PrincipalOnly);
        }
    }

    #[test]
    fn test_route_for_paths() {
        assert_eq!(route_for("/fees"), Route::Fees {});
        assert_eq!(route_for("/students/new"), Route::Admission {});
        assert_eq!(
            route_for("/students/abc"),
            Route::StudentDetail { id: "abc".to_string() }
        );
        assert!(matches!(route_for("/no/such/page"), Route::NotFound { .. }));
    }

    #[test]
    fn test_nav_items_resolve_to_routes() {
        for item in ui::access::NAV_ITEMS {
            let route = route_for(item.path);
            assert!(!matches!(route, Route::NotFound { .. }), "{}", item.path);
            assert_eq!(route.access(), item.access, "{}", item.path);
        }
    }
}

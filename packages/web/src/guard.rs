//! Route guard wrapped around every page.

use dioxus::prelude::*;

use ui::access::Access;
use ui::components::Spinner;
use ui::views::Shell;
use ui::{use_auth, Gate};

use crate::{route_for, Route};

/// Decides per navigation whether the page renders, waits for the session,
/// or redirects. Signed-in pages get the navigation frame.
#[component]
pub fn Guard() -> Element {
    let auth = use_auth();
    let route = use_route::<Route>();
    let nav = use_navigator();
    let access = route.access();

    match Gate::decide(&auth(), access) {
        Gate::Loading => rsx! { Spinner {} },
        Gate::Redirect(destination) => {
            tracing::debug!("redirecting {route} to {}", destination.path());
            nav.replace(route_for(destination.path()));
            rsx! {}
        }
        Gate::Render if access == Access::PublicOnly => rsx! { Outlet::<Route> {} },
        Gate::Render => rsx! {
            Shell {
                current_path: route.to_string(),
                on_navigate: move |path: String| {
                    nav.push(route_for(&path));
                },
                Outlet::<Route> {}
            }
        },
    }
}

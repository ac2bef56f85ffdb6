//! Authentication context and hooks for the UI.

use api::{ApiError, RegisterSchoolRequest, SessionSnapshot};
use dioxus::prelude::*;

use crate::forms::LoginDraft;
use crate::platform::{make_client, AppClient};

/// Authentication state for the application.
///
/// A copy of the session taken after every change; route guards and the
/// navigation frame read it.
pub type AuthState = SessionSnapshot;

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// The gateway client shared by every view.
pub fn use_client() -> AppClient {
    use_context::<AppClient>()
}

/// Provider component that owns the gateway client and the auth state.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let client = use_context_provider(make_client);
    let mut auth_state = use_context_provider(|| {
        Signal::new(AuthState {
            loading: true,
            ..AuthState::default()
        })
    });

    // Revalidate the persisted session once, on mount
    let _ = use_resource(move || {
        let client = client.clone();
        async move {
            client.session().initialize(&client).await;
            auth_state.set(client.session().snapshot());
        }
    });

    rsx! {
        {children}
    }
}

/// Sign in and publish the new session.
pub async fn sign_in(
    client: &AppClient,
    auth: &mut Signal<AuthState>,
    draft: &LoginDraft,
) -> Result<(), ApiError> {
    let request = draft.validate()?;
    client.sign_in(&request.email, &request.password).await?;
    auth.set(client.session().snapshot());
    Ok(())
}

/// Register a school, sign in as its principal and publish the session.
pub async fn register(
    client: &AppClient,
    auth: &mut Signal<AuthState>,
    request: &RegisterSchoolRequest,
) -> Result<(), ApiError> {
    client.register_and_sign_in(request).await?;
    auth.set(client.session().snapshot());
    Ok(())
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Sign Out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let mut auth_state = use_auth();
    let client = use_client();

    let onclick = move |_| {
        client.session().logout();
        tracing::info!("signed out");
        auth_state.set(client.session().snapshot());
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}

//! Authentication context and hooks for the UI.

use dioxus::prelude::*;
use marketplace::{Role, User};

use crate::route::Route;
use crate::sync::use_data_revision;
use crate::toast::{toast_error, toast_success, use_toasts};
use crate::make_market;

/// Authentication state for the application.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
}

impl AuthState {
    /// Resolve the stored session.
    pub fn load() -> Self {
        Self {
            user: make_market().current_user(),
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    pub fn email(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.email.as_str())
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out, in this tab or another.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Where a user lands after logging in or signing up.
pub fn home_route(role: Role) -> Route {
    match role {
        Role::Client => Route::Inspectors { q: String::new() },
        Role::Inspector => Route::RequestsList {},
    }
}

/// Provider component that manages authentication state.
/// Must sit inside [`SyncProvider`](crate::SyncProvider).
#[component]
pub fn AuthProvider(children: Element) -> Element {
    use_hook(|| match make_market().initialize_demo_accounts() {
        Ok(true) => tracing::info!("demo accounts ready"),
        Ok(false) => {}
        Err(e) => tracing::warn!(error = %e, "could not seed demo accounts"),
    });

    let revision = use_data_revision();
    let mut auth_state = use_context_provider(|| Signal::new(AuthState::load()));

    // Another tab may have logged in, logged out or deleted this account
    use_effect(move || {
        revision.track();
        let current = AuthState::load();
        if *auth_state.peek() != current {
            auth_state.set(current);
        }
    });

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Log out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let mut auth_state = use_auth();
    let revision = use_data_revision();
    let mut toasts = use_toasts();
    let nav = use_navigator();

    let onclick = move |_| match make_market().logout() {
        Ok(()) => {
            auth_state.set(AuthState::default());
            revision.bump();
            toast_success(&mut toasts, "Logged out", "See you next time.");
            nav.push(Route::Landing {});
        }
        Err(e) => toast_error(&mut toasts, "Logout failed", &e),
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}

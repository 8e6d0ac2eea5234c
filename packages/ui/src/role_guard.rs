use dioxus::prelude::*;
use marketplace::Role;

use crate::{use_auth, Route};

/// Render `children` only for a logged-in user, optionally of one role.
///
/// Anonymous visitors are sent to the login page and the wrong role to
/// the forbidden page.
#[component]
pub fn RoleGuard(role: Option<Role>, children: Element) -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    let redirect = match (auth().role(), role) {
        (None, _) => Some(Route::Login {}),
        (Some(actual), Some(required)) if actual != required => Some(Route::Forbidden {}),
        _ => None,
    };

    if let Some(target) = redirect {
        nav.replace(target);
        return rsx! {};
    }

    rsx! {
        {children}
    }
}

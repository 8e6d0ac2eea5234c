use dioxus::prelude::*;
use marketplace::{Role, UserUpdate};

use super::ModalOverlay;
use crate::form::TextField;
use crate::{
    make_market, toast_error, toast_success, use_auth, use_data_revision, use_toasts, AuthState,
    RoleGuard, Route,
};

/// Account settings for any logged-in user.
#[component]
pub fn Account() -> Element {
    rsx! {
        RoleGuard { AccountSettings {} }
    }
}

#[component]
fn AccountSettings() -> Element {
    let mut auth = use_auth();
    let revision = use_data_revision();
    let mut toasts = use_toasts();
    let nav = use_navigator();

    let current = auth().user;
    let name = use_signal(|| current.as_ref().and_then(|u| u.name.clone()).unwrap_or_default());
    let phone = use_signal(|| current.as_ref().and_then(|u| u.phone.clone()).unwrap_or_default());
    let mut confirm_delete = use_signal(|| false);

    let Some(user) = current else {
        return rsx! {};
    };

    let user_id = user.id.clone();
    let on_save = move |e: FormEvent| {
        e.prevent_default();
        let update = UserUpdate {
            name: Some(name()),
            phone: Some(phone()),
        };
        match make_market().update_user(&user_id, update) {
            Ok(updated) => {
                auth.set(AuthState { user: Some(updated) });
                revision.bump();
                toast_success(&mut toasts, "Account updated", "Your details were saved.");
            }
            Err(e) => toast_error(&mut toasts, "Could not save account", &e),
        }
    };

    let on_delete = move |_| match make_market().delete_account() {
        Ok(()) => {
            confirm_delete.set(false);
            auth.set(AuthState::default());
            revision.bump();
            toast_success(&mut toasts, "Account deleted", "Your account and its data were removed.");
            nav.push(Route::Landing {});
        }
        Err(e) => toast_error(&mut toasts, "Could not delete account", &e),
    };

    let role_note = match user.role {
        Role::Client => "Deleting removes your account and every request you posted.",
        Role::Inspector => "Deleting removes your account, your public profile and your interest in requests.",
    };

    let signed_in = format!("Signed in as {} ({})", user.email, user.role.as_str());

    rsx! {
        h1 { "Account Settings" }
        form {
            class: "card form-grid",
            onsubmit: on_save,
            p { class: "muted", "{signed_in}" }
            TextField { label: "Full name", value: name }
            TextField { label: "Phone", value: phone, input_type: "tel" }
            button { class: "btn btn--primary", r#type: "submit", "Save Changes" }
        }
        div {
            class: "card card--danger",
            h3 { "Delete Account" }
            p { class: "muted", "{role_note}" }
            button {
                class: "btn btn--danger",
                onclick: move |_| confirm_delete.set(true),
                "Delete Account"
            }
        }
        if confirm_delete() {
            ModalOverlay {
                title: "Delete your account?",
                on_close: move |_| confirm_delete.set(false),
                p { "This cannot be undone." }
                div {
                    class: "form-actions",
                    button {
                        class: "btn btn--ghost",
                        onclick: move |_| confirm_delete.set(false),
                        "Cancel"
                    }
                    button { class: "btn btn--danger", onclick: on_delete, "Delete" }
                }
            }
        }
    }
}

use dioxus::prelude::*;
use marketplace::{Role, SignupData};

use crate::form::{blank_to_none, TextField};
use crate::{
    home_route, make_market, toast_error, toast_success, use_auth, use_data_revision, use_toasts,
    AuthState, Route,
};

#[component]
pub fn Signup() -> Element {
    let mut auth = use_auth();
    let revision = use_data_revision();
    let mut toasts = use_toasts();
    let nav = use_navigator();

    let name = use_signal(String::new);
    let email = use_signal(String::new);
    let phone = use_signal(String::new);
    let password = use_signal(String::new);
    let confirm = use_signal(String::new);
    let mut role = use_signal(|| Role::Client);

    if let Some(current) = auth().role() {
        nav.replace(home_route(current));
        return rsx! {};
    }

    let onsubmit = move |e: FormEvent| {
        e.prevent_default();
        if password() != confirm() {
            crate::push_toast(&mut toasts, crate::ToastKind::Error, "Signup failed", "Passwords don't match");
            return;
        }
        let data = SignupData {
            email: email(),
            password: password(),
            role: role(),
            name: blank_to_none(&name()),
            phone: blank_to_none(&phone()),
        };
        match make_market().signup(data) {
            Ok(user) => {
                let role = user.role;
                auth.set(AuthState { user: Some(user) });
                revision.bump();
                toast_success(&mut toasts, "Account created", "You're signed in.");
                nav.push(home_route(role));
            }
            Err(e) => toast_error(&mut toasts, "Signup failed", &e),
        }
    };

    rsx! {
        div {
            class: "auth-page",
            h2 { "Create your account" }
            form {
                class: "card form-grid",
                onsubmit: onsubmit,
                fieldset {
                    class: "role-choice",
                    legend { "I am a" }
                    for (value, text) in [(Role::Client, "Home buyer or owner"), (Role::Inspector, "Home inspector")] {
                        label {
                            class: if role() == value { "role-option role-option--on" } else { "role-option" },
                            input {
                                r#type: "radio",
                                name: "role",
                                checked: role() == value,
                                onchange: move |_| role.set(value),
                            }
                            "{text}"
                        }
                    }
                }
                TextField { label: "Full name", value: name }
                TextField { label: "Email Address", value: email, input_type: "email", required: true }
                TextField { label: "Phone", value: phone, input_type: "tel" }
                TextField { label: "Password", value: password, input_type: "password", required: true, placeholder: "At least 8 characters" }
                TextField { label: "Confirm password", value: confirm, input_type: "password", required: true }
                button { class: "btn btn--primary", r#type: "submit", "Create Account" }
            }
            p {
                class: "muted",
                "Already have an account? "
                Link { to: Route::Login {}, "Sign in" }
            }
        }
    }
}

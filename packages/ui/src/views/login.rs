//! Login page with demo-account shortcuts.

use dioxus::prelude::*;
use marketplace::{DEMO_CLIENT_EMAIL, DEMO_INSPECTOR_EMAIL};

use crate::form::TextField;
use crate::{
    home_route, make_market, market_config, toast_error, toast_success, use_auth, use_data_revision,
    use_toasts, AuthState, Route,
};

#[component]
pub fn Login() -> Element {
    let mut auth = use_auth();
    let revision = use_data_revision();
    let mut toasts = use_toasts();
    let nav = use_navigator();

    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);

    // Already logged in
    if let Some(role) = auth().role() {
        nav.replace(home_route(role));
        return rsx! {};
    }

    let onsubmit = move |e: FormEvent| {
        e.prevent_default();
        match make_market().login(&email(), &password()) {
            Ok(user) => {
                let role = user.role;
                let greeting = format!("Welcome back, {}", user.display_name());
                auth.set(AuthState { user: Some(user) });
                revision.bump();
                toast_success(&mut toasts, "Logged in", &greeting);
                nav.push(home_route(role));
            }
            Err(e) => toast_error(&mut toasts, "Login failed", &e),
        }
    };

    let mut fill_demo = move |demo_email: &str| {
        email.set(demo_email.to_string());
        password.set(market_config().seed.demo_password.clone());
    };

    rsx! {
        div {
            class: "auth-page",
            h2 { "Welcome back" }
            p { class: "muted", "Sign in to your account" }
            form {
                class: "card form-grid",
                onsubmit: onsubmit,
                TextField { label: "Email Address", value: email, input_type: "email", placeholder: "your@email.com" }
                TextField { label: "Password", value: password, input_type: "password", placeholder: "Enter your password" }
                button { class: "btn btn--primary", r#type: "submit", "Sign In" }
            }
            if market_config().seed.demo_accounts {
                div {
                    class: "card demo-accounts",
                    h3 { "Demo accounts" }
                    p { class: "muted", "Fill in a demo login to look around." }
                    div {
                        class: "form-actions",
                        button {
                            class: "btn btn--outline",
                            onclick: move |_| fill_demo(DEMO_CLIENT_EMAIL),
                            "Demo Client"
                        }
                        button {
                            class: "btn btn--outline",
                            onclick: move |_| fill_demo(DEMO_INSPECTOR_EMAIL),
                            "Demo Inspector"
                        }
                    }
                }
            }
            p {
                class: "muted",
                "Don't have an account? "
                Link { to: Route::Signup {}, "Sign up" }
            }
        }
    }
}

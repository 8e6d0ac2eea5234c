//! The inspector's home: counts, targeted and recent requests, profile and slots.

use dioxus::prelude::*;
use marketplace::{Request, Role, User};

use crate::{
    make_market, toast_error, toast_success, use_auth, use_data_revision, use_market_memo,
    use_toasts, AvailabilityManager, ProfileEditor, RequestCard, RoleGuard, Route,
};

const RECENT_OPEN_REQUESTS: usize = 3;

#[derive(Clone, Debug, Default, PartialEq)]
struct DashboardData {
    targeted: Vec<Request>,
    recent_open: Vec<Request>,
    interests: Vec<Request>,
    open_count: usize,
}

#[component]
pub fn Dashboard() -> Element {
    rsx! {
        RoleGuard {
            role: Role::Inspector,
            DashboardBody {}
        }
    }
}

#[component]
fn DashboardBody() -> Element {
    let auth = use_auth();
    let data = use_market_memo(move || {
        let email = auth().email().unwrap_or_default().to_string();
        let market = make_market();
        let open = market.open_requests();
        DashboardData {
            targeted: market.targeted_requests(&email),
            open_count: open.len(),
            recent_open: open.into_iter().take(RECENT_OPEN_REQUESTS).collect(),
            interests: market.my_interests(&email),
        }
    });
    let profile = use_market_memo(move || {
        let email = auth().email().unwrap_or_default().to_string();
        make_market().get_profile(&email)
    });

    let Some(user) = auth().user else {
        return rsx! {};
    };
    let data = data();
    let base_price = profile().map(|p| p.base_price).unwrap_or_default();
    let greeting = format!("Welcome back, {}", user.display_name());

    rsx! {
        h1 { "Inspector Dashboard" }
        p { class: "muted", "{greeting}" }
        div {
            class: "stats",
            StatCard { label: "Open Requests", value: data.open_count.to_string() }
            StatCard { label: "Client Requests", value: data.targeted.len().to_string() }
            StatCard { label: "My Interests", value: data.interests.len().to_string() }
            StatCard { label: "Base Price", value: format!("${base_price}") }
        }

        RequestSection {
            title: "Client Requests",
            empty: "No clients have booked you directly yet.",
            requests: data.targeted,
        }
        div {
            class: "section-head",
            h2 { "Recent Open Requests" }
            Link { to: Route::RequestsList {}, "View all" }
        }
        RequestSection {
            title: "",
            empty: "No open requests right now.",
            requests: data.recent_open,
        }
        RequestSection {
            title: "My Interests",
            empty: "Mark requests you want so clients can find you.",
            requests: data.interests,
        }

        div {
            class: "grid grid--2",
            if let Some(profile) = profile() {
                ProfileEditor { key: "{profile.email}", profile: profile }
            } else {
                MissingProfile { user: user.clone() }
            }
            AvailabilityManager { email: user.email.clone() }
        }
    }
}

#[component]
fn StatCard(label: String, value: String) -> Element {
    rsx! {
        div {
            class: "card stat",
            span { class: "stat__value", "{value}" }
            span { class: "muted", "{label}" }
        }
    }
}

#[component]
fn RequestSection(title: String, empty: String, requests: Vec<Request>) -> Element {
    rsx! {
        if !title.is_empty() {
            h2 { "{title}" }
        }
        if requests.is_empty() {
            div { class: "card empty", "{empty}" }
        } else {
            div {
                class: "grid",
                for request in requests {
                    RequestCard { key: "{request.id}", request: request }
                }
            }
        }
    }
}

/// Shown when the profile document lost this inspector's entry.
#[component]
fn MissingProfile(user: User) -> Element {
    let revision = use_data_revision();
    let mut toasts = use_toasts();

    let onclick = move |_| {
        let market = make_market();
        let profile = market.default_profile_for(&user);
        match market.upsert_profile(profile) {
            Ok(_) => {
                revision.bump();
                toast_success(&mut toasts, "Profile created", "Fill in your details below.");
            }
            Err(e) => toast_error(&mut toasts, "Could not create profile", &e),
        }
    };

    rsx! {
        div {
            class: "card empty",
            h3 { "No public profile yet" }
            p { class: "muted", "Clients can only find inspectors with a profile." }
            button { class: "btn btn--primary", onclick: onclick, "Create Profile" }
        }
    }
}

use dioxus::prelude::*;

use crate::icons::{FaCircleCheck, FaLock};
use crate::{home_route, use_auth, Icon, Route};

/// Shown after a request is posted or a slot is booked.
#[component]
pub fn Thanks() -> Element {
    let auth = use_auth();
    let next = auth()
        .role()
        .map(home_route)
        .unwrap_or(Route::Landing {});

    rsx! {
        div {
            class: "card status-page",
            Icon { icon: FaCircleCheck, width: 40, height: 40 }
            h1 { "Thank You!" }
            p { "Your inspection request has been submitted successfully." }
            h3 { "What Happens Next" }
            ol {
                li { "Inspectors in your area review your request." }
                li { "Interested inspectors will reach out by email or phone." }
                li { "Compare their profiles and pick the one that fits." }
            }
            div {
                class: "form-actions",
                Link { class: "btn btn--primary", to: Route::MyRequests {}, "View My Requests" }
                Link { class: "btn btn--ghost", to: next, "Continue" }
            }
        }
    }
}

#[component]
pub fn Forbidden() -> Element {
    let auth = use_auth();
    let back = auth()
        .role()
        .map(home_route)
        .unwrap_or(Route::Landing {});

    rsx! {
        div {
            class: "card status-page",
            Icon { icon: FaLock, width: 40, height: 40 }
            h1 { "Access Denied" }
            p { "Your account type can't open this page." }
            Link { class: "btn btn--primary", to: back, "Go to your home page" }
        }
    }
}

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = format!("/{}", segments.join("/"));
    rsx! {
        div {
            class: "card status-page",
            h1 { "Page Not Found" }
            p { class: "muted", "Nothing lives at {path}." }
            Link { class: "btn btn--primary", to: Route::Landing {}, "Back to home" }
        }
    }
}

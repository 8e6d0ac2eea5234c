use dioxus::prelude::*;

use crate::icons::{FaCalendarCheck, FaFileLines, FaMagnifyingGlass, FaShieldHalved};
use crate::{use_auth, Icon, Route};

#[component]
pub fn Landing() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let mut query = use_signal(String::new);

    let post_link = match auth().role() {
        Some(marketplace::Role::Inspector) => Route::RequestsList {},
        _ => Route::PostRequest {},
    };

    rsx! {
        section {
            class: "hero",
            h1 { "Find a licensed home inspector, fast" }
            p { class: "muted", "Search inspectors near you or post a request and let them come to you." }
            form {
                class: "hero__search",
                onsubmit: move |e: FormEvent| {
                    e.prevent_default();
                    nav.push(Route::Inspectors { q: query().trim().to_string() });
                },
                Icon { icon: FaMagnifyingGlass, width: 16, height: 16 }
                input {
                    class: "input",
                    placeholder: "Enter city or ZIP code",
                    value: "{query}",
                    oninput: move |e| query.set(e.value()),
                }
                button { class: "btn btn--primary", r#type: "submit", "Find Inspectors" }
            }
            p {
                class: "muted",
                "Or let inspectors come to you: "
                Link { to: post_link, "post a request" }
            }
        }
        section {
            class: "features",
            div {
                class: "card feature",
                Icon { icon: FaShieldHalved, width: 24, height: 24 }
                h3 { "Licensed Professionals" }
                p { "All inspectors are licensed and certified with years of experience" }
            }
            div {
                class: "card feature",
                Icon { icon: FaCalendarCheck, width: 24, height: 24 }
                h3 { "Fast Scheduling" }
                p { "Book inspections quickly with real-time availability" }
            }
            div {
                class: "card feature",
                Icon { icon: FaFileLines, width: 24, height: 24 }
                h3 { "Detailed Reports" }
                p { "Comprehensive inspection reports with photos and recommendations" }
            }
        }
    }
}

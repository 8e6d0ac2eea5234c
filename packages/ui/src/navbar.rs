use dioxus::prelude::*;
use marketplace::Role;

use crate::icons::FaLocationDot;
use crate::{use_auth, Icon, LogoutButton, Route};

/// Top navigation. Links depend on who is logged in.
#[component]
pub fn Header() -> Element {
    let auth = use_auth();

    let links = match auth().user {
        None => rsx! {
            Link { to: Route::Inspectors { q: String::new() }, "Find Inspectors" }
            Link { to: Route::Login {}, "Log in" }
            Link { class: "btn btn--primary btn--sm", to: Route::Signup {}, "Sign up" }
        },
        Some(user) => {
            let name = user.display_name().to_string();
            rsx! {
                if user.role == Role::Client {
                    Link { to: Route::Inspectors { q: String::new() }, "Find Inspectors" }
                    Link { to: Route::PostRequest {}, "Post Request" }
                    Link { to: Route::MyRequests {}, "My Requests" }
                } else {
                    Link { to: Route::RequestsList {}, "Requests" }
                    Link { to: Route::Dashboard {}, "Dashboard" }
                }
                Link { to: Route::Account {}, "{name}" }
                LogoutButton { class: "btn btn--ghost btn--sm" }
            }
        }
    };

    rsx! {
        header {
            class: "navbar",
            Link {
                class: "navbar__brand",
                to: Route::Landing {},
                Icon { icon: FaLocationDot, width: 20, height: 20 }
                "InspectNow"
            }
            nav {
                class: "navbar__links",
                {links}
            }
        }
    }
}

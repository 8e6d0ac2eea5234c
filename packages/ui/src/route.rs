use dioxus::prelude::*;

use crate::views::*;
use crate::Header;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Shell)]
        #[route("/")]
        Landing {},
        #[route("/login")]
        Login {},
        #[route("/signup")]
        Signup {},
        #[route("/inspectors?:q")]
        Inspectors { q: String },
        #[route("/inspectors/:email")]
        InspectorDetail { email: String },
        #[route("/post")]
        PostRequest {},
        #[route("/my-requests")]
        MyRequests {},
        #[route("/requests")]
        RequestsList {},
        #[route("/requests/:id")]
        RequestDetail { id: String },
        #[route("/dashboard")]
        Dashboard {},
        #[route("/account")]
        Account {},
        #[route("/thanks")]
        Thanks {},
        #[route("/forbidden")]
        Forbidden {},
        #[route("/:..segments")]
        NotFound { segments: Vec<String> },
}

/// Header and page body shared by every route.
#[component]
fn Shell() -> Element {
    rsx! {
        Header {}
        main {
            class: "page",
            Outlet::<Route> {}
        }
    }
}

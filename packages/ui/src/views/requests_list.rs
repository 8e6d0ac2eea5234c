use chrono::NaiveDate;
use dioxus::prelude::*;
use marketplace::{PropertyType, RequestFilter, Role};

use crate::{make_market, use_auth, use_market_memo, RequestCard, RoleGuard};

/// Open requests visible to the logged-in inspector, with filters.
#[component]
pub fn RequestsList() -> Element {
    rsx! {
        RoleGuard {
            role: Role::Inspector,
            VisibleRequests {}
        }
    }
}

#[component]
fn VisibleRequests() -> Element {
    let auth = use_auth();
    let mut city = use_signal(String::new);
    let mut property_type = use_signal(|| Option::<PropertyType>::None);
    let mut earliest = use_signal(String::new);

    let requests = use_market_memo(move || {
        let email = auth().email().unwrap_or_default().to_string();
        let filter = RequestFilter {
            city: Some(city()).filter(|c| !c.trim().is_empty()),
            property_type: property_type(),
            earliest: NaiveDate::parse_from_str(&earliest(), "%Y-%m-%d").ok(),
        };
        make_market().visible_requests(&email, &filter)
    });
    let count = requests.read().len();

    rsx! {
        h1 { "Inspection Requests" }
        div {
            class: "card filters",
            h3 { "Filter Requests" }
            label {
                class: "field",
                span { class: "field__label", "City/ZIP Code" }
                input {
                    class: "input",
                    placeholder: "e.g. Irvine or 92618",
                    value: "{city}",
                    oninput: move |e| city.set(e.value()),
                }
            }
            label {
                class: "field",
                span { class: "field__label", "Property Type" }
                select {
                    class: "input",
                    onchange: move |e| property_type.set(PropertyType::parse(&e.value())),
                    option { value: "", selected: property_type().is_none(), "All property types" }
                    for kind in PropertyType::ALL {
                        option { value: kind.as_str(), selected: property_type() == Some(kind), {kind.as_str()} }
                    }
                }
            }
            label {
                class: "field",
                span { class: "field__label", "Earliest Date" }
                input {
                    class: "input",
                    r#type: "date",
                    value: "{earliest}",
                    oninput: move |e| earliest.set(e.value()),
                }
            }
        }
        p { class: "muted", "{count} request(s)" }
        if count == 0 {
            div { class: "card empty", "No requests match these filters." }
        }
        div {
            class: "grid",
            for request in requests() {
                RequestCard { key: "{request.id}", request: request }
            }
        }
    }
}

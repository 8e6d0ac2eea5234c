use dioxus::prelude::*;
use marketplace::{Request, RequestType, Role};

use crate::icons::{FaArrowLeft, FaEnvelope, FaPhone};
use crate::request_card::{format_preferred, property_summary};
use crate::{make_market, use_market_memo, Icon, InterestButton, RoleGuard, Route};

#[component]
pub fn RequestDetail(id: String) -> Element {
    rsx! {
        RoleGuard {
            role: Role::Inspector,
            RequestDetailBody { key: "{id}", id: id.clone() }
        }
    }
}

#[component]
fn RequestDetailBody(id: String) -> Element {
    let request = use_market_memo(move || make_market().get_request(&id));

    rsx! {
        Link {
            class: "back-link",
            to: Route::RequestsList {},
            Icon { icon: FaArrowLeft, width: 12, height: 12 }
            " Back to requests"
        }
        if let Some(request) = request() {
            RequestDetailCard { request: request }
        } else {
            div {
                class: "card empty",
                h2 { "Request Not Found" }
                p { class: "muted", "This request was removed or never existed." }
            }
        }
    }
}

#[component]
fn RequestDetailCard(request: Request) -> Element {
    let preferred = format_preferred(&request.schedule.preferred_date);
    let alternate = request.schedule.alt_date.as_deref().map(format_preferred);
    let summary = property_summary(&request);
    let kind = match request.kind {
        RequestType::ClientRequest => "Client Request",
        RequestType::OpenRequest => "Open Request",
    };
    let budget = request.budget.map(|b| format!("${b}"));
    let interest = format!("{} inspector(s) interested", request.interest_count);

    rsx! {
        div {
            class: "card",
            div {
                class: "request-card__head",
                h1 { "{request.property.address}" }
                span { class: "badge", "{kind}" }
                span { class: "badge badge--green", {request.status.label()} }
            }
            p { class: "muted", "{request.property.city_zip}" }
            p { "{summary}" }
            h3 { "Schedule" }
            p { "Preferred: {preferred}" }
            if let Some(alternate) = alternate {
                p { "Alternate: {alternate}" }
            }
            if let Some(budget) = budget {
                h3 { "Budget" }
                p { class: "price", "{budget}" }
            }
            if !request.notes.is_empty() {
                h3 { "Notes" }
                p { "{request.notes}" }
            }
            h3 { "Client Contact" }
            p { "{request.client.name}" }
            p {
                Icon { icon: FaEnvelope, width: 12, height: 12 }
                " "
                a { href: "mailto:{request.client.email}", "{request.client.email}" }
            }
            if !request.client.phone.is_empty() {
                p {
                    Icon { icon: FaPhone, width: 12, height: 12 }
                    " {request.client.phone}"
                }
            }
            div {
                class: "form-actions",
                span { class: "muted", "{interest}" }
                InterestButton { request: request.clone() }
            }
        }
    }
}

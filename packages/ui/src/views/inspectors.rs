//! Public inspector directory with free-text search and filters.

use dioxus::prelude::*;
use marketplace::{InspectorProfile, ProfileFilter};

use crate::icons::{FaCircleCheck, FaLocationDot, FaStar};
use crate::{make_market, use_market_memo, Icon, Route};

fn non_empty(text: String) -> Option<String> {
    let text = text.trim().to_string();
    (!text.is_empty()).then_some(text)
}

#[component]
pub fn Inspectors(q: String) -> Element {
    let mut query = use_signal(|| q.clone());
    let mut service_area = use_signal(String::new);
    let mut specialty = use_signal(String::new);

    let all = use_market_memo(|| make_market().profiles());
    let found = use_market_memo(move || {
        make_market().search_profiles(&ProfileFilter {
            query: non_empty(query()),
            service_area: non_empty(service_area()),
            specialty: non_empty(specialty()),
        })
    });

    // Filter choices come from the profiles themselves
    let (areas, specialties) = {
        let profiles = all.read();
        let mut areas: Vec<String> = profiles.iter().flat_map(|p| p.service_areas.clone()).collect();
        let mut specialties: Vec<String> = profiles.iter().flat_map(|p| p.specialties.clone()).collect();
        areas.sort();
        areas.dedup();
        specialties.sort();
        specialties.dedup();
        (areas, specialties)
    };
    let count = found.read().len();

    rsx! {
        h1 { "Find Inspectors" }
        div {
            class: "card filters",
            input {
                class: "input",
                placeholder: "Search by name, city or service area",
                value: "{query}",
                oninput: move |e| query.set(e.value()),
            }
            select {
                class: "input",
                value: "{service_area}",
                onchange: move |e| service_area.set(e.value()),
                option { value: "", "All service areas" }
                for area in areas {
                    option { value: "{area}", "{area}" }
                }
            }
            select {
                class: "input",
                value: "{specialty}",
                onchange: move |e| specialty.set(e.value()),
                option { value: "", "All specialties" }
                for s in specialties {
                    option { value: "{s}", "{s}" }
                }
            }
        }
        p { class: "muted", "{count} inspector(s) found" }
        if count == 0 {
            div { class: "card empty", "No inspectors match your search." }
        }
        div {
            class: "grid",
            for profile in found() {
                InspectorCard { key: "{profile.email}", profile: profile }
            }
        }
    }
}

#[component]
fn InspectorCard(profile: InspectorProfile) -> Element {
    let location = profile.location.clone().unwrap_or_else(|| profile.service_areas.join(", "));
    let rating = profile
        .rating
        .map(|r| format!("{r:.1} ({} reviews)", profile.review_count.unwrap_or(0)))
        .unwrap_or_else(|| "New".to_string());
    let specialties = profile.specialties.join(" • ");

    rsx! {
        div {
            class: "card inspector-card",
            div {
                class: "inspector-card__head",
                h3 { "{profile.display_name}" }
                if profile.verified {
                    span {
                        class: "badge badge--green",
                        title: "Verified",
                        Icon { icon: FaCircleCheck, width: 12, height: 12 }
                        " Verified"
                    }
                }
            }
            p {
                class: "muted",
                Icon { icon: FaLocationDot, width: 12, height: 12 }
                " {location}"
            }
            p {
                Icon { icon: FaStar, width: 12, height: 12 }
                " {rating}"
            }
            if !specialties.is_empty() {
                p { class: "muted", "{specialties}" }
            }
            div {
                class: "inspector-card__foot",
                span { class: "price", "From ${profile.base_price}" }
                Link {
                    class: "btn btn--primary btn--sm",
                    to: Route::InspectorDetail { email: profile.email.clone() },
                    "View Profile"
                }
            }
        }
    }
}

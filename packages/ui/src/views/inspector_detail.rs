//! An inspector's public profile with bookable time slots.

use dioxus::prelude::*;
use marketplace::{format_12_hour, InspectorProfile, KvStore, Marketplace, Role, TimeSlot};

use super::{ModalOverlay, RequestDraft, RequestForm};
use crate::icons::{FaCircleCheck, FaClock, FaEnvelope, FaPhone, FaShieldHalved, FaStar};
use crate::{
    make_market, push_toast, toast_error, toast_success, use_auth, use_data_revision,
    use_market_memo, use_toasts, Icon, Route, ToastKind,
};

/// Price list shown beside the profile, derived from the base price.
fn price_list(base: u32) -> [(&'static str, u32); 3] {
    [
        ("Standard Home (up to 2,500 sq ft)", base),
        ("Large Home (2,500+ sq ft)", base + 125),
        ("Condo/Townhouse", base.saturating_sub(75)),
    ]
}

/// One inspector's profile and open slots.
#[derive(Clone, Debug, Default, PartialEq)]
struct InspectorPageData {
    profile: Option<InspectorProfile>,
    slots: Vec<TimeSlot>,
}

fn load_inspector_page<S: KvStore>(market: &Marketplace<S>, email: &str) -> InspectorPageData {
    InspectorPageData {
        profile: market.get_profile(email),
        slots: market.available_slots(email),
    }
}

/// Keyed by email so moving between profiles rebuilds the page state.
#[component]
pub fn InspectorDetail(email: String) -> Element {
    rsx! {
        InspectorPage { key: "{email}", email: email.clone() }
    }
}

#[component]
fn InspectorPage(email: String) -> Element {
    let page = use_market_memo(move || load_inspector_page(&make_market(), &email));
    let InspectorPageData { profile, slots } = page();

    let Some(profile) = profile else {
        return rsx! {
            div {
                class: "card empty",
                h2 { "Inspector not found" }
                Link { to: Route::Inspectors { q: String::new() }, "Back to Inspectors" }
            }
        };
    };

    rsx! {
        div {
            class: "profile-layout",
            div {
                class: "profile-main",
                ProfileSummary { profile: profile.clone() }
                SlotPicker { inspector_email: profile.email.clone(), slots: slots }
            }
            aside {
                class: "profile-side",
                PricingCard { base_price: profile.base_price }
                ContactCard { profile: profile.clone() }
            }
        }
    }
}

#[component]
fn ProfileSummary(profile: InspectorProfile) -> Element {
    let availability = profile.availability.clone().unwrap_or_default();
    let location = profile.location.clone().unwrap_or_default();
    let experience = profile
        .years_experience
        .map(|y| format!("{y} years experience"))
        .unwrap_or_default();
    let rating = profile
        .rating
        .map(|r| format!("{r:.1} • {} reviews • {} inspections", profile.review_count.unwrap_or(0), profile.completed_inspections.unwrap_or(0)))
        .unwrap_or_default();

    rsx! {
        div {
            class: "card",
            div {
                class: "profile-head",
                if let Some(image) = profile.image.clone() {
                    img { class: "avatar", src: "{image}", alt: "{profile.display_name}" }
                }
                div {
                    h1 { "{profile.display_name}" }
                    p { class: "muted", "{location}" }
                    if !rating.is_empty() {
                        p {
                            Icon { icon: FaStar, width: 12, height: 12 }
                            " {rating}"
                        }
                    }
                    if !experience.is_empty() {
                        p { class: "muted", "{experience}" }
                    }
                }
                if profile.verified {
                    span {
                        class: "badge badge--green",
                        Icon { icon: FaCircleCheck, width: 12, height: 12 }
                        " Verified"
                    }
                }
            }
            if let Some(insurance) = profile.insurance.clone() {
                p {
                    Icon { icon: FaShieldHalved, width: 12, height: 12 }
                    " Insured & Bonded: {insurance}"
                }
            }
            if let Some(bio) = profile.bio.clone() {
                h3 { "About" }
                p { "{bio}" }
            }
            h3 { "Service Areas" }
            div {
                class: "chips",
                for area in profile.service_areas.iter().cloned() {
                    span { class: "chip", "{area}" }
                }
            }
            h3 { "Specialties" }
            div {
                class: "chips",
                for specialty in profile.specialties.iter().cloned() {
                    span { class: "chip", "{specialty}" }
                }
            }
            if !profile.certifications.is_empty() {
                h3 { "Certifications" }
                div {
                    class: "chips",
                    for cert in profile.certifications.iter().cloned() {
                        span { class: "chip", "{cert}" }
                    }
                }
            }
            h3 { "Availability" }
            p {
                Icon { icon: FaClock, width: 12, height: 12 }
                " Next Available: {availability.next_available} • Response Time: {availability.response_time}"
            }
        }
    }
}

/// Slot list. Picking a slot opens the booking form for clients.
#[component]
fn SlotPicker(inspector_email: String, slots: Vec<TimeSlot>) -> Element {
    let auth = use_auth();
    let revision = use_data_revision();
    let mut toasts = use_toasts();
    let nav = use_navigator();
    let mut selected = use_signal(|| Option::<TimeSlot>::None);

    let mut choose = move |slot: TimeSlot| match auth().role() {
        None => push_toast(&mut toasts, ToastKind::Error, "Login Required", "Please log in to book an inspection"),
        Some(Role::Inspector) => push_toast(
            &mut toasts,
            ToastKind::Error,
            "Client Account Required",
            "Only client accounts can book inspections",
        ),
        Some(Role::Client) => selected.set(Some(slot)),
    };

    let book_email = inspector_email.clone();
    let on_book = move |draft: RequestDraft| {
        let Some(slot) = selected() else {
            return;
        };
        match make_market().create_booking_from_time_slot(&slot.id, &book_email, draft.booking()) {
            Ok(_) => {
                revision.bump();
                selected.set(None);
                toast_success(
                    &mut toasts,
                    "Booking Requested!",
                    "Your inspection request has been sent to the inspector.",
                );
                nav.push(Route::Thanks {});
            }
            Err(e) => toast_error(&mut toasts, "Booking Failed", &e),
        }
    };

    let user = auth().user;

    rsx! {
        div {
            class: "card",
            h3 { "Available Time Slots" }
            if slots.is_empty() {
                p { class: "muted", "No open time slots right now. You can still post an open request." }
            } else {
                div {
                    class: "slot-grid",
                    for slot in slots {
                        button {
                            key: "{slot.id}",
                            class: "slot-btn",
                            onclick: {
                                let slot = slot.clone();
                                move |_| choose(slot.clone())
                            },
                            strong { "{slot.date}" }
                            span { {format!("{} - {}", format_12_hour(&slot.start_time), format_12_hour(&slot.end_time))} }
                        }
                    }
                }
            }
        }
        if let Some(slot) = selected() {
            ModalOverlay {
                title: "Request Inspection",
                on_close: move |_| selected.set(None),
                p {
                    class: "muted",
                    {format!("{} {} - {}", slot.date, format_12_hour(&slot.start_time), format_12_hour(&slot.end_time))}
                }
                RequestForm {
                    initial: RequestDraft::for_user(user.as_ref()),
                    submit_label: "Request Inspection",
                    booking: true,
                    on_submit: on_book,
                    on_cancel: move |_| selected.set(None),
                }
            }
        }
    }
}

#[component]
fn PricingCard(base_price: u32) -> Element {
    rsx! {
        div {
            class: "card",
            p { class: "price price--big", "${base_price}" }
            p { class: "muted", "Starting price for standard home inspection" }
            ul {
                class: "price-list",
                for (label, price) in price_list(base_price) {
                    li {
                        span { class: "muted", "{label}" }
                        span { "${price}" }
                    }
                }
            }
            p { class: "muted", "Additional services available" }
        }
    }
}

#[component]
fn ContactCard(profile: InspectorProfile) -> Element {
    let contact = profile.contact.clone().unwrap_or_default();
    let email = if contact.email.is_empty() { profile.email.clone() } else { contact.email };
    let phone = profile.phone.clone().or_else(|| (!contact.phone.is_empty()).then_some(contact.phone));

    rsx! {
        div {
            class: "card",
            h3 { "Contact Information" }
            p {
                Icon { icon: FaEnvelope, width: 12, height: 12 }
                " {email}"
            }
            if let Some(phone) = phone {
                p {
                    Icon { icon: FaPhone, width: 12, height: 12 }
                    " {phone}"
                }
            }
            if let Some(website) = contact.website {
                p {
                    a { href: "{website}", target: "_blank", "{website}" }
                }
            }
        }
    }
}

//! Request summary card and the inspector's interest toggle.

use chrono::{DateTime, Duration, Utc};
use dioxus::prelude::*;
use marketplace::{schedule_datetime, Request, RequestType, Role};

use crate::icons::{FaCalendar, FaDollarSign, FaHeart, FaHouse};
use crate::{make_market, toast_error, toast_success, use_auth, use_data_revision, use_toasts, Icon, Route};

const NOTES_PREVIEW_CHARS: usize = 100;

/// `casey@example.com` becomes `c***@example.com`. Short local parts are left alone.
pub fn obfuscate_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if local.chars().count() > 2 => {
            let first: String = local.chars().take(1).collect();
            format!("{first}***@{domain}")
        }
        _ => email.to_string(),
    }
}

/// Posted within the last 48 hours.
pub fn is_new(created_at: &str, now: DateTime<Utc>) -> bool {
    DateTime::parse_from_rfc3339(created_at)
        .map(|created| now.signed_duration_since(created) <= Duration::hours(48))
        .unwrap_or(false)
}

/// Human-readable preferred date. Booking text is already readable.
pub fn format_preferred(text: &str) -> String {
    if text.contains(" - ") {
        return text.to_string();
    }
    match schedule_datetime(text) {
        Some(when) => when.format("%b %-d, %Y %-I:%M %p").to_string(),
        None => text.to_string(),
    }
}

fn truncate_notes(notes: &str) -> String {
    if notes.chars().count() > NOTES_PREVIEW_CHARS {
        let head: String = notes.chars().take(NOTES_PREVIEW_CHARS).collect();
        format!("{head}...")
    } else {
        notes.to_string()
    }
}

pub fn property_summary(request: &Request) -> String {
    let property = &request.property;
    let mut summary = format!(
        "{} • {}bd/{}ba",
        property.kind.as_str(),
        property.beds,
        property.baths
    );
    if let Some(sqft) = property.sqft {
        summary.push_str(&format!(" • {sqft} sqft"));
    }
    summary
}

#[component]
pub fn RequestCard(request: Request) -> Element {
    let location = request.property.city_zip.clone();
    let client = format!("{} • {}", request.client.name, obfuscate_email(&request.client.email));
    let preferred = format_preferred(&request.schedule.preferred_date);
    let property = property_summary(&request);
    let notes = truncate_notes(&request.notes);
    let fresh = is_new(&request.created_at, Utc::now());
    let (type_class, type_label) = match request.kind {
        RequestType::ClientRequest => ("badge badge--blue", "Client Request"),
        RequestType::OpenRequest => ("badge badge--purple", "Open Request"),
    };

    rsx! {
        div {
            class: "card request-card",
            div {
                class: "request-card__head",
                div {
                    div {
                        class: "request-card__title",
                        h3 { "{location}" }
                        if fresh {
                            span { class: "badge badge--green", "New" }
                        }
                        span { class: type_class, "{type_label}" }
                    }
                    p { class: "muted", "{client}" }
                }
                if let Some(budget) = request.budget {
                    div {
                        class: "request-card__budget",
                        Icon { icon: FaDollarSign, width: 12, height: 12 }
                        "{budget}"
                    }
                }
            }
            div {
                class: "request-card__facts",
                p {
                    Icon { icon: FaCalendar, width: 12, height: 12 }
                    " Preferred: {preferred}"
                }
                p {
                    Icon { icon: FaHouse, width: 12, height: 12 }
                    " {property}"
                }
                if !notes.is_empty() {
                    p {
                        strong { "Notes: " }
                        "{notes}"
                    }
                }
            }
            div {
                class: "request-card__actions",
                Link {
                    class: "btn btn--outline btn--sm",
                    to: Route::RequestDetail { id: request.id.clone() },
                    "View Details"
                }
                InterestButton { request: request.clone() }
            }
        }
    }
}

/// Heart toggle that adds or removes the logged-in inspector from a request's interested set.
#[component]
pub fn InterestButton(request: Request) -> Element {
    let auth = use_auth();
    let revision = use_data_revision();
    let mut toasts = use_toasts();

    let inspector_email = match auth().user {
        Some(user) if user.role == Role::Inspector => Some(user.email),
        _ => None,
    };
    let interested = inspector_email
        .as_deref()
        .is_some_and(|email| request.is_interested(email));
    let count = request.interest_count;
    let request_id = request.id.clone();

    let title = match (&inspector_email, interested) {
        (None, _) => "Sign in as an inspector to express interest",
        (Some(_), true) => "Remove interest",
        (Some(_), false) => "I'm interested",
    };
    let email_for_click = inspector_email.clone();
    let onclick = move |_| {
        let Some(email) = email_for_click.as_deref() else {
            return;
        };
        match make_market().toggle_interest(&request_id, email) {
            Ok(updated) => {
                revision.bump();
                if updated.is_interested(email) {
                    toast_success(&mut toasts, "Interest added", "The client can see you're interested.");
                } else {
                    toast_success(&mut toasts, "Interest removed", "");
                }
            }
            Err(e) => toast_error(&mut toasts, "Could not update interest", &e),
        }
    };

    rsx! {
        button {
            class: if interested { "interest-btn interest-btn--on" } else { "interest-btn" },
            disabled: inspector_email.is_none(),
            title: title,
            onclick: onclick,
            Icon { icon: FaHeart, width: 14, height: 14 }
            span {
                if interested { "Interested" } else { "I'm Interested" }
            }
            span { class: "muted", "({count})" }
        }
    }
}

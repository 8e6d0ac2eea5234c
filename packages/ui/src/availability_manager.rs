//! Inspector-side slot management: add one-off or recurring slots, toggle and remove them.

use chrono::NaiveDate;
use dioxus::prelude::*;
use marketplace::{format_12_hour, Period, Repeat, SlotTemplate, SlotTime, TimeSlot};

use crate::{make_market, push_toast, toast_error, toast_success, use_data_revision, use_market_memo, use_toasts, ToastKind};

fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()
}

#[component]
fn TimeSelect(label: String, hour: Signal<u8>, period: Signal<Period>) -> Element {
    let mut hour = hour;
    let mut period = period;
    rsx! {
        label {
            class: "field",
            span { class: "field__label", "{label}" }
            div {
                class: "field__row",
                select {
                    class: "input",
                    value: "{hour}",
                    onchange: move |e| {
                        if let Ok(h) = e.value().parse() {
                            hour.set(h);
                        }
                    },
                    for h in 1u8..=12 {
                        option { value: "{h}", selected: hour() == h, "{h}:00" }
                    }
                }
                select {
                    class: "input",
                    value: period().as_str(),
                    onchange: move |e| {
                        if let Some(p) = Period::parse(&e.value()) {
                            period.set(p);
                        }
                    },
                    for p in Period::ALL {
                        option { value: p.as_str(), selected: period() == p, {p.as_str()} }
                    }
                }
            }
        }
    }
}

#[component]
pub fn AvailabilityManager(email: String) -> Element {
    let revision = use_data_revision();
    let mut toasts = use_toasts();

    let profile_email = email.clone();
    let slots = use_market_memo(move || {
        let mut slots: Vec<TimeSlot> = make_market()
            .get_profile(&profile_email)
            .map(|p| p.time_slots().to_vec())
            .unwrap_or_default();
        slots.sort_by(|a, b| (&a.date, &a.start_time).cmp(&(&b.date, &b.start_time)));
        slots
    });

    let mut date = use_signal(String::new);
    let start_hour = use_signal(|| 9u8);
    let start_period = use_signal(|| Period::Am);
    let end_hour = use_signal(|| 11u8);
    let end_period = use_signal(|| Period::Am);
    let mut repeat = use_signal(Repeat::default);
    let mut until = use_signal(String::new);

    let add_email = email.clone();
    let on_add = move |e: FormEvent| {
        e.prevent_default();
        let Some(start_date) = parse_date(&date()) else {
            push_toast(&mut toasts, ToastKind::Error, "Pick a date", "Choose the first day for this slot.");
            return;
        };
        let template = SlotTemplate {
            date: start_date,
            start: SlotTime::new(start_hour(), start_period()),
            end: SlotTime::new(end_hour(), end_period()),
            repeat: repeat(),
            until: parse_date(&until()),
        };
        match make_market().add_time_slots(&add_email, template) {
            Ok(added) => {
                revision.bump();
                let title = if added.len() > 1 { "Recurring Time Slots Added" } else { "Time Slot Added" };
                toast_success(&mut toasts, title, &format!("Added {} slot(s) from {}", added.len(), date()));
                date.set(String::new());
                until.set(String::new());
                repeat.set(Repeat::None);
            }
            Err(e) => toast_error(&mut toasts, "Could not add slots", &e),
        }
    };

    rsx! {
        div {
            class: "card",
            h3 { "Manage Your Availability" }
            form {
                class: "form-grid",
                onsubmit: on_add,
                label {
                    class: "field",
                    span { class: "field__label", "Date" }
                    input {
                        class: "input",
                        r#type: "date",
                        value: "{date}",
                        oninput: move |e| date.set(e.value()),
                    }
                }
                TimeSelect { label: "Start", hour: start_hour, period: start_period }
                TimeSelect { label: "End", hour: end_hour, period: end_period }
                label {
                    class: "field",
                    span { class: "field__label", "Repeat" }
                    select {
                        class: "input",
                        value: repeat().as_str(),
                        onchange: move |e| repeat.set(Repeat::parse(&e.value()).unwrap_or_default()),
                        for r in Repeat::ALL {
                            option { value: r.as_str(), selected: repeat() == r, {r.label()} }
                        }
                    }
                }
                if repeat() != Repeat::None {
                    label {
                        class: "field",
                        span { class: "field__label", "Repeat until (defaults to 3 months)" }
                        input {
                            class: "input",
                            r#type: "date",
                            value: "{until}",
                            oninput: move |e| until.set(e.value()),
                        }
                    }
                }
                button { class: "btn btn--primary", r#type: "submit", "Add Time Slot" }
            }

            if slots.read().is_empty() {
                p { class: "muted", "No time slots yet. Add one so clients can book you." }
            } else {
                ul {
                    class: "slot-list",
                    for slot in slots() {
                        SlotRow { key: "{slot.id}", email: email.clone(), slot: slot }
                    }
                }
            }
        }
    }
}

#[component]
fn SlotRow(email: String, slot: TimeSlot) -> Element {
    let revision = use_data_revision();
    let mut toasts = use_toasts();
    let when = format!(
        "{} {} - {}",
        slot.date,
        format_12_hour(&slot.start_time),
        format_12_hour(&slot.end_time)
    );

    let toggle_email = email.clone();
    let toggle_id = slot.id.clone();
    let on_toggle = move |_| match make_market().toggle_slot_availability(&toggle_email, &toggle_id) {
        Ok(updated) => {
            revision.bump();
            let title = if updated.available { "Slot Made Available" } else { "Slot Made Unavailable" };
            toast_success(&mut toasts, title, "");
        }
        Err(e) => toast_error(&mut toasts, "Could not update slot", &e),
    };

    let remove_id = slot.id.clone();
    let on_remove = move |_| match make_market().remove_time_slot(&email, &remove_id) {
        Ok(()) => {
            revision.bump();
            toast_success(&mut toasts, "Time Slot Removed", "");
        }
        Err(e) => toast_error(&mut toasts, "Could not remove slot", &e),
    };

    rsx! {
        li {
            class: if slot.available { "slot" } else { "slot slot--off" },
            span { "{when}" }
            span {
                class: "muted",
                if slot.available { "Available" } else { "Unavailable" }
            }
            button {
                class: "btn btn--outline btn--sm",
                onclick: on_toggle,
                if slot.available { "Mark Unavailable" } else { "Mark Available" }
            }
            button { class: "btn btn--ghost btn--sm", onclick: on_remove, "Remove" }
        }
    }
}

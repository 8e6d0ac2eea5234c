//! The request form used for posting, editing and booking.

use dioxus::prelude::*;
use marketplace::{BookingDetails, ClientContact, Property, PropertyType, Request, RequestUpdate, Schedule, User};

use crate::form::{blank_to_none, parse_f32_or_zero, parse_optional_u32};

/// Raw form values, kept as typed text until submit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city_zip: String,
    pub property_type: PropertyType,
    pub beds: String,
    pub baths: String,
    pub sqft: String,
    pub preferred_date: String,
    pub alt_date: String,
    pub budget: String,
    pub notes: String,
}

impl RequestDraft {
    /// A blank form with the contact fields taken from the account.
    pub fn for_user(user: Option<&User>) -> Self {
        match user {
            Some(user) => Self {
                name: user.name.clone().unwrap_or_default(),
                email: user.email.clone(),
                phone: user.phone.clone().unwrap_or_default(),
                ..Self::default()
            },
            None => Self::default(),
        }
    }

    pub fn from_request(request: &Request) -> Self {
        Self {
            name: request.client.name.clone(),
            email: request.client.email.clone(),
            phone: request.client.phone.clone(),
            address: request.property.address.clone(),
            city_zip: request.property.city_zip.clone(),
            property_type: request.property.kind,
            beds: request.property.beds.to_string(),
            baths: request.property.baths.to_string(),
            sqft: request.property.sqft.map(|s| s.to_string()).unwrap_or_default(),
            preferred_date: request.schedule.preferred_date.clone(),
            alt_date: request.schedule.alt_date.clone().unwrap_or_default(),
            budget: request.budget.map(|b| b.to_string()).unwrap_or_default(),
            notes: request.notes.clone(),
        }
    }

    pub fn client(&self) -> ClientContact {
        ClientContact {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
        }
    }

    pub fn property(&self) -> Property {
        Property {
            address: self.address.trim().to_string(),
            city_zip: self.city_zip.trim().to_string(),
            kind: self.property_type,
            beds: parse_optional_u32(&self.beds).unwrap_or(0),
            baths: parse_f32_or_zero(&self.baths),
            sqft: parse_optional_u32(&self.sqft),
        }
    }

    pub fn schedule(&self) -> Schedule {
        Schedule {
            preferred_date: self.preferred_date.trim().to_string(),
            alt_date: blank_to_none(&self.alt_date),
        }
    }

    pub fn update(&self) -> RequestUpdate {
        RequestUpdate {
            client: self.client(),
            property: self.property(),
            schedule: self.schedule(),
            budget: parse_optional_u32(&self.budget),
            notes: self.notes.trim().to_string(),
        }
    }

    pub fn booking(&self) -> BookingDetails {
        BookingDetails {
            client: self.client(),
            property: self.property(),
            notes: self.notes.trim().to_string(),
        }
    }
}

/// Form over a [`RequestDraft`]. Booking hides the schedule and budget fields.
#[component]
pub fn RequestForm(
    initial: RequestDraft,
    submit_label: String,
    on_submit: EventHandler<RequestDraft>,
    on_cancel: EventHandler<()>,
    #[props(default)] booking: bool,
) -> Element {
    let mut draft = use_signal(|| initial.clone());

    let property_type = draft.read().property_type;
    let text_input = move |label: &'static str, input_type: &'static str, value: String, set: fn(&mut RequestDraft, String)| {
        rsx! {
            label {
                class: "field",
                span { class: "field__label", "{label}" }
                input {
                    class: "input",
                    r#type: input_type,
                    value: "{value}",
                    oninput: move |e| set(&mut draft.write(), e.value()),
                }
            }
        }
    };
    let d = draft.read().clone();

    rsx! {
        form {
            class: "form-grid",
            onsubmit: move |e: FormEvent| {
                e.prevent_default();
                on_submit.call(draft());
            },
            fieldset {
                legend { "Your contact" }
                {text_input("Name *", "text", d.name, |d, v| d.name = v)}
                {text_input("Email *", "email", d.email, |d, v| d.email = v)}
                {text_input("Phone", "tel", d.phone, |d, v| d.phone = v)}
            }
            fieldset {
                legend { "Property" }
                {text_input("Address *", "text", d.address, |d, v| d.address = v)}
                {text_input("City / ZIP *", "text", d.city_zip, |d, v| d.city_zip = v)}
                label {
                    class: "field",
                    span { class: "field__label", "Property type" }
                    select {
                        class: "input",
                        value: property_type.as_str(),
                        onchange: move |e| {
                            if let Some(kind) = PropertyType::parse(&e.value()) {
                                draft.write().property_type = kind;
                            }
                        },
                        for kind in PropertyType::ALL {
                            option { value: kind.as_str(), selected: kind == property_type, {kind.as_str()} }
                        }
                    }
                }
                {text_input("Beds", "number", d.beds, |d, v| d.beds = v)}
                {text_input("Baths", "number", d.baths, |d, v| d.baths = v)}
                {text_input("Square feet", "number", d.sqft, |d, v| d.sqft = v)}
            }
            if !booking {
                fieldset {
                    legend { "Schedule" }
                    {text_input("Preferred date *", "datetime-local", d.preferred_date, |d, v| d.preferred_date = v)}
                    {text_input("Alternate date", "datetime-local", d.alt_date, |d, v| d.alt_date = v)}
                    {text_input("Budget ($)", "number", d.budget, |d, v| d.budget = v)}
                }
            }
            label {
                class: "field",
                span { class: "field__label", "Notes" }
                textarea {
                    class: "input",
                    rows: "4",
                    value: "{d.notes}",
                    oninput: move |e| draft.write().notes = e.value(),
                }
            }
            div {
                class: "form-actions",
                button {
                    class: "btn btn--ghost",
                    r#type: "button",
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
                button { class: "btn btn--primary", r#type: "submit", "{submit_label}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketplace::{Marketplace, MemoryStore, NewRequest, RequestType};

    #[test]
    fn test_draft_parses_numbers_and_blanks() {
        let draft = RequestDraft {
            name: " Casey ".into(),
            email: "casey@example.com".into(),
            address: "1 Main St".into(),
            city_zip: "Irvine 92618".into(),
            property_type: PropertyType::Condo,
            beds: "3".into(),
            baths: "2.5".into(),
            sqft: "".into(),
            preferred_date: "2030-01-10T09:00".into(),
            alt_date: "  ".into(),
            budget: "$450".into(),
            ..RequestDraft::default()
        };

        let update = draft.update();
        assert_eq!(update.client.name, "Casey");
        assert_eq!(update.property.kind, PropertyType::Condo);
        assert_eq!(update.property.beds, 3);
        assert_eq!(update.property.baths, 2.5);
        assert_eq!(update.property.sqft, None);
        assert_eq!(update.schedule.alt_date, None);
        assert_eq!(update.budget, Some(450));
    }

    #[test]
    fn test_draft_from_request_keeps_fields() {
        let market = Marketplace::new(MemoryStore::new());
        let draft = RequestDraft {
            name: "Casey".into(),
            email: "casey@example.com".into(),
            address: "2 Oak Ave".into(),
            city_zip: "Tustin 92780".into(),
            sqft: "1800".into(),
            preferred_date: "2030-02-01T10:00".into(),
            ..RequestDraft::default()
        };
        let update = draft.update();
        let request = market
            .add_request(NewRequest {
                kind: RequestType::OpenRequest,
                target_inspector_email: None,
                client: update.client,
                property: update.property,
                schedule: update.schedule,
                budget: update.budget,
                notes: update.notes,
            })
            .unwrap();

        let reloaded = RequestDraft::from_request(&request);
        assert_eq!(reloaded.city_zip, "Tustin 92780");
        assert_eq!(reloaded.sqft, "1800");
        assert_eq!(reloaded.budget, "");
        assert_eq!(reloaded.update(), draft.update());
    }
}

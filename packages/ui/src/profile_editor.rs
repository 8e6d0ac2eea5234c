use dioxus::prelude::*;
use marketplace::{InspectorProfile, ProfileUpdate};

use crate::form::{parse_optional_u32, split_list, TextArea, TextField};
use crate::{make_market, toast_error, toast_success, use_data_revision, use_toasts};

/// Edit form for an inspector's public profile.
///
/// Fields start from `profile` and are saved as one partial update.
#[component]
pub fn ProfileEditor(profile: InspectorProfile) -> Element {
    let revision = use_data_revision();
    let mut toasts = use_toasts();

    let availability = profile.availability.clone().unwrap_or_default();
    let display_name = use_signal(|| profile.display_name.clone());
    let service_areas = use_signal(|| profile.service_areas.join(", "));
    let specialties = use_signal(|| profile.specialties.join(", "));
    let base_price = use_signal(|| profile.base_price.to_string());
    let phone = use_signal(|| profile.phone.clone().unwrap_or_default());
    let location = use_signal(|| profile.location.clone().unwrap_or_default());
    let bio = use_signal(|| profile.bio.clone().unwrap_or_default());
    let years = use_signal(|| profile.years_experience.map(|y| y.to_string()).unwrap_or_default());
    let certifications = use_signal(|| profile.certifications.join(", "));
    let image = use_signal(|| profile.image.clone().unwrap_or_default());
    let insurance = use_signal(|| profile.insurance.clone().unwrap_or_default());
    let next_available = use_signal(|| availability.next_available.clone());
    let response_time = use_signal(|| availability.response_time.clone());

    let email = profile.email.clone();
    let onsubmit = move |e: FormEvent| {
        e.prevent_default();
        let Some(price) = parse_optional_u32(&base_price()) else {
            push_invalid(&mut toasts, "Base price must be a whole number");
            return;
        };
        let update = ProfileUpdate {
            display_name: Some(display_name()),
            service_areas: Some(split_list(&service_areas())),
            specialties: Some(split_list(&specialties())),
            base_price: Some(price),
            phone: Some(phone()),
            location: Some(location()),
            bio: Some(bio()),
            years_experience: parse_optional_u32(&years()),
            certifications: Some(split_list(&certifications())),
            image: Some(image()),
            insurance: Some(insurance()),
            next_available: Some(next_available()),
            response_time: Some(response_time()),
        };
        match make_market().update_profile(&email, update) {
            Ok(_) => {
                revision.bump();
                toast_success(&mut toasts, "Profile saved", "Clients now see your updated details.");
            }
            Err(e) => toast_error(&mut toasts, "Could not save profile", &e),
        }
    };

    rsx! {
        form {
            class: "card form-grid",
            onsubmit: onsubmit,
            h3 { "Inspector Profile Settings" }
            TextField { label: "Display name", value: display_name, required: true }
            TextField { label: "Service areas", value: service_areas, placeholder: "Irvine, Tustin" }
            TextField { label: "Specialties", value: specialties, placeholder: "Roof, Foundation" }
            TextField { label: "Base price ($)", value: base_price, input_type: "number" }
            TextField { label: "Phone", value: phone, input_type: "tel" }
            TextField { label: "Location", value: location }
            TextField { label: "Years of experience", value: years, input_type: "number" }
            TextField { label: "Certifications", value: certifications, placeholder: "State Licensed, ASHI" }
            TextField { label: "Photo URL", value: image, input_type: "url" }
            TextField { label: "Insurance", value: insurance }
            TextField { label: "Next available", value: next_available }
            TextField { label: "Response time", value: response_time }
            TextArea { label: "Bio", value: bio }
            button { class: "btn btn--primary", r#type: "submit", "Save Profile" }
        }
    }
}

fn push_invalid(toasts: &mut Signal<crate::Toasts>, message: &str) {
    crate::push_toast(toasts, crate::ToastKind::Error, "Check the form", message);
}

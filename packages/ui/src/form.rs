//! Small form helpers shared by the views.

use dioxus::prelude::*;

/// A labelled text input bound to a signal.
#[component]
pub fn TextField(
    label: String,
    value: Signal<String>,
    #[props(default = "text".to_string())] input_type: String,
    #[props(default)] placeholder: String,
    #[props(default)] required: bool,
) -> Element {
    let mut value = value;
    rsx! {
        label {
            class: "field",
            span {
                class: "field__label",
                "{label}"
                if required {
                    span { class: "field__required", " *" }
                }
            }
            input {
                class: "input",
                r#type: "{input_type}",
                placeholder: "{placeholder}",
                value: "{value}",
                oninput: move |e| value.set(e.value()),
            }
        }
    }
}

/// A labelled multi-line input bound to a signal.
#[component]
pub fn TextArea(label: String, value: Signal<String>, #[props(default)] placeholder: String) -> Element {
    let mut value = value;
    rsx! {
        label {
            class: "field",
            span { class: "field__label", "{label}" }
            textarea {
                class: "input",
                rows: "4",
                placeholder: "{placeholder}",
                value: "{value}",
                oninput: move |e| value.set(e.value()),
            }
        }
    }
}

/// Blank is `None`. Anything that is not a whole number is `None` too.
pub fn parse_optional_u32(text: &str) -> Option<u32> {
    let text = text.trim().trim_start_matches('$').replace(',', "");
    text.parse().ok()
}

/// Parse a decimal such as a bathroom count, defaulting to zero.
pub fn parse_f32_or_zero(text: &str) -> f32 {
    text.trim().parse().unwrap_or(0.0)
}

/// Split a comma-separated list, dropping blanks.
pub fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn blank_to_none(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

use dioxus::prelude::*;

/// A full-screen overlay that centers its children in a dialog card.
/// Clicking outside the card triggers `on_close`.
#[component]
pub fn ModalOverlay(title: String, on_close: EventHandler<()>, children: Element) -> Element {
    rsx! {
        div {
            class: "modal-backdrop",
            onclick: move |_| on_close.call(()),
            div {
                class: "modal card",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                div {
                    class: "modal__head",
                    h3 { "{title}" }
                    button {
                        class: "btn btn--ghost btn--sm",
                        title: "Close",
                        onclick: move |_| on_close.call(()),
                        "×"
                    }
                }
                {children}
            }
        }
    }
}

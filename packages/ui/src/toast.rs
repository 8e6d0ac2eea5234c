//! Transient notifications for the outcome of user actions.

use std::time::Duration;

use dioxus::prelude::*;
use marketplace::MarketError;

/// How long a toast stays up before it dismisses itself.
const TOAST_LIFETIME: Duration = Duration::from_secs(4);

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    fn class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast--success",
            ToastKind::Error => "toast toast--error",
            ToastKind::Info => "toast toast--info",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub title: String,
    pub description: String,
}

#[derive(Clone, Debug, Default)]
pub struct Toasts {
    pub entries: Vec<Toast>,
    next_id: u64,
}

impl Toasts {
    /// Append a toast and return its id.
    pub fn push(&mut self, kind: ToastKind, title: &str, description: &str) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Toast {
            id,
            kind,
            title: title.to_string(),
            description: description.to_string(),
        });
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.entries.retain(|t| t.id != id);
    }
}

pub fn use_toasts() -> Signal<Toasts> {
    use_context::<Signal<Toasts>>()
}

pub fn push_toast(toasts: &mut Signal<Toasts>, kind: ToastKind, title: &str, description: &str) {
    let id = toasts.write().push(kind, title, description);

    let mut toasts = *toasts;
    spawn(async move {
        sleep(TOAST_LIFETIME).await;
        toasts.write().dismiss(id);
    });
}

#[cfg(target_arch = "wasm32")]
async fn sleep(duration: Duration) {
    gloo_timers::future::sleep(duration).await;
}

#[cfg(not(target_arch = "wasm32"))]
async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

pub fn toast_success(toasts: &mut Signal<Toasts>, title: &str, description: &str) {
    push_toast(toasts, ToastKind::Success, title, description);
}

/// Report a failed store operation. The error's message is the description.
pub fn toast_error(toasts: &mut Signal<Toasts>, title: &str, error: &MarketError) {
    tracing::warn!(%error, "{title}");
    push_toast(toasts, ToastKind::Error, title, &error.to_string());
}

/// Provides the toast context and renders the stack above `children`.
#[component]
pub fn ToastProvider(children: Element) -> Element {
    let mut toasts = use_context_provider(|| Signal::new(Toasts::default()));

    rsx! {
        {children}
        div {
            class: "toast-stack",
            for toast in toasts.read().entries.iter().cloned() {
                div {
                    key: "{toast.id}",
                    class: toast.kind.class(),
                    div {
                        class: "toast__body",
                        strong { "{toast.title}" }
                        if !toast.description.is_empty() {
                            p { "{toast.description}" }
                        }
                    }
                    button {
                        class: "toast__close",
                        title: "Dismiss",
                        onclick: move |_| toasts.write().dismiss(toast.id),
                        "×"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dismiss_removes_only_that_toast() {
        let mut toasts = Toasts::default();
        let first = toasts.push(ToastKind::Success, "Saved", "");
        let second = toasts.push(ToastKind::Error, "Failed", "Try again");
        assert_ne!(first, second);

        toasts.dismiss(first);
        assert_eq!(toasts.entries.len(), 1);
        assert_eq!(toasts.entries[0].title, "Failed");

        // A timer firing after a manual close is harmless.
        toasts.dismiss(first);
        assert_eq!(toasts.entries.len(), 1);
        assert!(toasts.push(ToastKind::Info, "Hi", "") > second);
    }
}

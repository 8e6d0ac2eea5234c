//! Data revision tracking and cross-tab sync.
//!
//! The store is synchronous and has no change feed, so the UI keeps a single
//! revision counter in context. Any code that writes to the store bumps it,
//! and [`use_market_memo`] re-reads whenever it changes.
//!
//! On the web, browsers fire a `storage` event in every *other* tab after a
//! `localStorage` write. [`SyncProvider`] forwards those events into a
//! coroutine that bumps the same counter, so a login, a new request or a
//! booking made in one tab shows up in the others.

use dioxus::prelude::*;

/// Monotonic counter of local and remote store writes.
#[derive(Clone, Copy, PartialEq)]
pub struct DataRevision(Signal<u64>);

impl DataRevision {
    /// Read the revision, subscribing the current scope to changes.
    pub fn track(&self) -> u64 {
        (self.0)()
    }

    /// Record that the store changed.
    pub fn bump(&self) {
        let mut signal = self.0;
        *signal.write() += 1;
    }
}

pub fn use_data_revision() -> DataRevision {
    use_context::<DataRevision>()
}

/// Memoise a store read, recomputed whenever the data revision changes.
///
/// Signals read inside `read` are tracked too, so filters can live in local
/// signals.
pub fn use_market_memo<T: PartialEq + 'static>(mut read: impl FnMut() -> T + 'static) -> Memo<T> {
    let revision = use_data_revision();
    use_memo(move || {
        revision.track();
        read()
    })
}

/// Provides [`DataRevision`] and, on the web, listens for other tabs' writes.
#[component]
pub fn SyncProvider(children: Element) -> Element {
    let revision = use_context_provider(|| DataRevision(Signal::new(0)));

    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    use_storage_listener(revision);
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    let _ = revision;

    rsx! {
        {children}
    }
}

#[cfg(all(target_arch = "wasm32", feature = "web"))]
fn use_storage_listener(revision: DataRevision) {
    use futures::StreamExt;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;

    // `None` means the other tab cleared the whole storage area.
    let changes = use_coroutine(move |mut rx: UnboundedReceiver<Option<String>>| async move {
        while let Some(key) = rx.next().await {
            let ours = key
                .as_deref()
                .map_or(true, |k| crate::make_market().owns_key(k));
            if ours {
                tracing::debug!(?key, "store changed in another tab");
                revision.bump();
            }
        }
    });

    use_hook(move || {
        let tx = changes.tx();
        let on_storage = Closure::<dyn FnMut(web_sys::StorageEvent)>::new(
            move |event: web_sys::StorageEvent| {
                if tx.unbounded_send(event.key()).is_err() {
                    tracing::warn!("storage listener outlived the app");
                }
            },
        );
        match web_sys::window() {
            Some(window) => {
                if let Err(e) = window
                    .add_event_listener_with_callback("storage", on_storage.as_ref().unchecked_ref())
                {
                    tracing::warn!(error = ?e, "could not listen for storage events");
                }
            }
            None => tracing::warn!("no window, cross-tab sync disabled"),
        }
        // The listener lives as long as the page.
        on_storage.forget();
    });
}

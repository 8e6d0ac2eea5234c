//! # Browser `localStorage` backend
//!
//! [`LocalStorageStore`] is the [`KvStore`] used on the **web platform**. It
//! reads and writes `window.localStorage` through [`web_sys::Storage`], so
//! every tab of the same origin sees the same documents.
//!
//! ## Connection management
//!
//! The store is a zero-size, `Copy` handle that looks up
//! `window.localStorage` on every call. The lookup is cheap and avoids holding
//! a `JsValue` inside UI state.
//!
//! ## Cross-tab changes
//!
//! Browsers fire a `storage` event on *other* tabs after a write. The UI crate
//! listens for it and reloads; this backend itself is stateless.

use crate::error::{MarketError, Result};
use crate::kv::KvStore;
use wasm_bindgen::JsValue;

/// `window.localStorage`-backed KvStore for the web platform.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage(&self) -> Result<web_sys::Storage> {
        let window =
            web_sys::window().ok_or_else(|| MarketError::Storage("no window".to_string()))?;
        window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| MarketError::Storage("localStorage is unavailable".to_string()))
    }
}

fn js_error(value: JsValue) -> MarketError {
    MarketError::Storage(
        value
            .as_string()
            .unwrap_or_else(|| format!("{value:?}")),
    )
}

impl KvStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        let storage = self.storage().ok()?;
        storage.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage()?.set_item(key, value).map_err(js_error)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.storage()?.remove_item(key).map_err(js_error)
    }
}

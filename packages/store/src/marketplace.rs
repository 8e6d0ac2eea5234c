//! # Marketplace: the client-side data layer over a key/value store
//!
//! [`Marketplace`] owns a [`KvStore`] and a [`MarketConfig`] and exposes every
//! accessor and mutator the UI calls. State is split into four JSON documents,
//! each stored under `<key_prefix>_<name>`:
//!
//! | Document | Contents |
//! |----------|----------|
//! | `users` | every [`User`](crate::User) |
//! | `session` | the active [`Session`](crate::Session), or absent |
//! | `shared_requests` | every [`Request`](crate::Request), newest first |
//! | `shared_profiles` | every [`InspectorProfile`](crate::InspectorProfile) |
//!
//! Every mutation is a read-modify-write of a whole document. There is no
//! locking; the last writer wins, which is the expected behaviour for one
//! user clicking around in one or two tabs.
//!
//! The operations themselves are split by area into sibling modules, each
//! adding an `impl` block:
//!
//! - [`crate::accounts`]: signup, login, session, account deletion cascade
//! - [`crate::requests`]: request CRUD, interest toggling, inspector queries
//! - [`crate::profiles`]: inspector directory
//! - [`crate::availability`]: time slots, recurrence, booking
//!
//! ## Lenient reads
//!
//! [`load_list`](Marketplace::load_list) never fails. A missing or corrupt
//! document is an empty list, and a single bad entry is dropped with a
//! warning while the rest load normally.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::MarketConfig;
use crate::error::Result;
use crate::kv::KvStore;

pub(crate) const USERS_DOC: &str = "users";
pub(crate) const SESSION_DOC: &str = "session";
pub(crate) const REQUESTS_DOC: &str = "shared_requests";
pub(crate) const PROFILES_DOC: &str = "shared_profiles";

const ALL_DOCS: [&str; 4] = [USERS_DOC, SESSION_DOC, REQUESTS_DOC, PROFILES_DOC];

/// The marketplace data layer backed by a KvStore.
pub struct Marketplace<S: KvStore> {
    store: S,
    config: MarketConfig,
}

impl<S: KvStore> Marketplace<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, MarketConfig::default())
    }

    pub fn with_config(store: S, config: MarketConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    /// Full storage key for a document name.
    pub fn key(&self, doc: &str) -> String {
        format!("{}_{}", self.config.storage.key_prefix, doc)
    }

    /// Whether a storage key belongs to this marketplace. Used by the UI to
    /// ignore `storage` events from unrelated keys.
    pub fn owns_key(&self, key: &str) -> bool {
        ALL_DOCS.iter().any(|doc| self.key(doc) == key)
    }

    pub(crate) fn load_list<T: DeserializeOwned>(&self, doc: &str) -> Vec<T> {
        let key = self.key(doc);
        let Some(raw) = self.store.get(&key) else {
            return Vec::new();
        };
        let values: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!(%key, error = %e, "ignoring unreadable document");
                return Vec::new();
            }
        };
        values
            .into_iter()
            .filter_map(|value| match serde_json::from_value(value) {
                Ok(item) => Some(item),
                Err(e) => {
                    tracing::warn!(%key, error = %e, "dropping malformed entry");
                    None
                }
            })
            .collect()
    }

    pub(crate) fn save_list<T: Serialize>(&self, doc: &str, items: &[T]) -> Result<()> {
        let key = self.key(doc);
        let raw = serde_json::to_string(items)?;
        tracing::debug!(%key, entries = items.len(), "writing document");
        self.store.set(&key, &raw)
    }

    pub(crate) fn load_value<T: DeserializeOwned>(&self, doc: &str) -> Option<T> {
        let key = self.key(doc);
        let raw = self.store.get(&key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(%key, error = %e, "ignoring unreadable document");
                None
            }
        }
    }

    pub(crate) fn save_value<T: Serialize>(&self, doc: &str, value: &T) -> Result<()> {
        let key = self.key(doc);
        let raw = serde_json::to_string(value)?;
        tracing::debug!(%key, "writing document");
        self.store.set(&key, &raw)
    }

    pub(crate) fn remove_doc(&self, doc: &str) -> Result<()> {
        self.store.remove(&self.key(doc))
    }

    /// Remove every document, including the session.
    pub fn clear_all_data(&self) -> Result<()> {
        for doc in ALL_DOCS {
            self.remove_doc(doc)?;
        }
        tracing::info!("cleared all marketplace data");
        Ok(())
    }
}

/// Current time as an RFC 3339 string with millisecond precision.
///
/// `chrono`'s `wasmbind` feature reads the browser clock on WASM.
pub(crate) fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// A fresh random id such as `req_3f2a...`.
pub(crate) fn new_id(prefix: &str) -> String {
    format!("{prefix}_{}", uuid::Uuid::new_v4().simple())
}

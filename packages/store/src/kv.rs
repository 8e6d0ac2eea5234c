//! # Key/value seam
//!
//! Every document the marketplace keeps is a JSON string stored under a
//! string key. [`KvStore`] is the only thing the data layer needs from a
//! backend, so the same logic runs against browser `localStorage`
//! ([`crate::LocalStorageStore`]), a directory on disk ([`crate::FileStore`])
//! or a plain map in tests ([`crate::MemoryStore`]).
//!
//! Reads return `None` for a missing key and never fail: a backend that
//! cannot read degrades to "no data". Writes report failures (e.g. a full
//! storage quota) so callers can surface them.

use crate::error::Result;

/// Synchronous string key/value storage.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

impl<S: KvStore + ?Sized> KvStore for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

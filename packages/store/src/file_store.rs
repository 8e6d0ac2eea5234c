//! # Filesystem-backed key/value store
//!
//! [`FileStore`] is the [`KvStore`] used by the desktop app. Each key becomes
//! one JSON file so the documents stay readable and editable by hand:
//!
//! ```text
//! <base_dir>/
//! ├── inspect_now_users.json
//! ├── inspect_now_session.json
//! ├── inspect_now_shared_requests.json
//! └── inspect_now_shared_profiles.json
//! ```
//!
//! Use `dirs::data_dir()` (from the UI crate) to pick a platform base such as
//! `~/.local/share/inspectnow/` on Linux.

use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::Result;
use crate::kv::KvStore;

/// Directory-backed KvStore for desktop persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        // Keys are internal constants, but never let one escape the base dir.
        let safe: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
            .collect();
        self.base.join(format!("{safe}.json"))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.key_path(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.base)?;
        std::fs::write(self.key_path(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match std::fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));

        assert!(store.get("inspect_now_users").is_none());

        store.set("inspect_now_users", "[]").unwrap();
        assert_eq!(store.get("inspect_now_users").as_deref(), Some("[]"));
        assert!(dir.path().join("nested/inspect_now_users.json").exists());

        store.remove("inspect_now_users").unwrap();
        assert!(store.get("inspect_now_users").is_none());
        store.remove("inspect_now_users").unwrap();
    }

    #[test]
    fn test_key_cannot_escape_base() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf());

        store.set("../evil", "x").unwrap();
        assert!(dir.path().join("___evil.json").exists());
        assert_eq!(store.get("../evil").as_deref(), Some("x"));
    }
}

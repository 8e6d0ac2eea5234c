//! # Demo password hashing
//!
//! Passwords are stored **base64-encoded**, exactly as the browser app's
//! `btoa(plain)` writes them, so accounts saved there still log in here. This
//! only keeps plaintext from being readable at a glance in `localStorage`. It
//! is reversible and has no real security properties.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Encode a password for storage. Deterministic: equal inputs give equal hashes.
pub fn hash_password(password: &str) -> String {
    STANDARD.encode(password.as_bytes())
}

/// Check a plaintext password against a stored hash.
pub fn verify_password(password: &str, hash: &str) -> bool {
    hash_password(password) == hash
}

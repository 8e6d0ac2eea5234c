//! Error types for the marketplace data layer.
//!
//! The `Display` text of each domain variant is the message the UI shows the
//! user, so keep them short and human.

use thiserror::Error;

/// Errors returned by [`crate::Marketplace`] operations and storage backends.
#[derive(Error, Debug)]
pub enum MarketError {
    #[error("An account with this email already exists")]
    EmailTaken,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("No user logged in")]
    NotLoggedIn,

    #[error("Request not found: {0}")]
    RequestNotFound(String),

    /// The caller is not the client who posted the request.
    #[error("Only the client who posted this request can change it")]
    NotRequestOwner,

    #[error("Inspector profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Time slot not found: {0}")]
    SlotNotFound(String),

    #[error("This time slot is no longer available")]
    SlotUnavailable,

    /// User input failed a form-level check.
    #[error("{0}")]
    Validation(String),

    /// The browser storage backend refused a read or write.
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

impl MarketError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MarketError>;

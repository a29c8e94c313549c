//! Error types for store operations.

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O error during read or write.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The account file could not be parsed or written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Another account already carries this unique attribute value.
    #[error("an account with {attribute}={value} already exists")]
    Conflict {
        /// Unique attribute name.
        attribute: &'static str,
        /// Conflicting value.
        value: String,
    },
    /// The username is already used by another account.
    #[error("username '{0}' is already taken")]
    UsernameTaken(String),
    /// Stored data violates a uniqueness invariant.
    #[error("corrupt account data: {0}")]
    Corrupt(String),
    /// A thread panicked while holding the store lock.
    #[error("store lock poisoned")]
    Poisoned,
}

//! Error types for storage operations.

/// Errors that can occur while reading or writing stored data.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An I/O error occurred while accessing a stored blob.
    #[error("I/O error on stored key {key:?}: {source}")]
    Io {
        /// The key being accessed.
        key: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A stored blob could not be parsed or a value could not be serialized.
    #[error("invalid JSON for stored key {key:?}: {source}")]
    Json {
        /// The key being accessed.
        key: String,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },

    /// Registration with an email that already has an account.
    #[error("Email already registered.")]
    EmailTaken,

    /// Sign-in with an unknown email or a wrong password.
    #[error("Invalid email or password.")]
    InvalidCredentials,
}

/// A specialized Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

//! Configuration errors.

use std::path::PathBuf;

/// Why a configuration could not be loaded, saved or located.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A configuration file exists but could not be read.
    #[error("cannot read {}: {source}", path.display())]
    ReadFile {
        /// File that was read.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The configuration could not be written.
    #[error("cannot write {}: {source}", path.display())]
    WriteFile {
        /// File that was written.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON5, or does not match the expected shape.
    #[error("malformed configuration: {0}")]
    ParseJson5(#[from] serde_json5::Error),

    #[error("cannot serialize configuration: {0}")]
    SerializeJson(#[from] serde_json::Error),

    /// A simulated delay is out of range.
    #[error("invalid delay: {reason}")]
    InvalidDelay {
        /// Which delay, and by how much it overshoots.
        reason: String,
    },

    /// The platform reports no per-user config directory.
    #[error("no user config directory on this platform")]
    NoConfigDirectory,

    /// The platform reports no per-user data directory.
    #[error("no user data directory on this platform")]
    NoDataDirectory,
}

/// Result alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

//! Domain Errors for the DHT
//!
//! Lookups that find nothing are not errors: `get_value` returns `None`,
//! and resolving against an empty directory yields an empty list.

use thiserror::Error;

use super::entities::NodeId;

/// Errors that can occur during DHT operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DhtError {
    /// `set_value` key is not the hash of the value. Nothing was stored.
    #[error("Content address mismatch: key {claimed} but value hashes to {actual}")]
    ContentAddressMismatch {
        /// Key supplied by the caller (hex; may not be 20 bytes)
        claimed: String,
        /// Digest of the supplied value
        actual: NodeId,
    },

    /// Configuration values out of range
    #[error("Invalid DHT config: {0}")]
    InvalidConfig(String),

    /// Config source could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors that can occur during config loading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// File I/O error.
    #[error("Failed to read {path}: {error}")]
    Io {
        /// Path of the file that failed to load.
        path: String,
        /// Error message from the I/O operation.
        error: String,
    },
    /// TOML parsing error.
    #[error("Failed to parse config: {0}")]
    Parse(String),
}

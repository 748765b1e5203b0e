//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// Covers errors from parsing, validation, and file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid URL provided.
    #[error("Invalid URL for {field} '{url}': {reason}")]
    InvalidUrl {
        /// Where the URL came from
        field: &'static str,
        /// The invalid URL string
        url: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Invalid duration value (zero).
    #[error("Invalid duration for {field}: {reason}")]
    InvalidDuration {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Invalid cache file path.
    #[error("Invalid cache file path '{path}': {reason}")]
    InvalidPath {
        /// The path as configured
        path: String,
        /// Reason for invalidity
        reason: &'static str,
    },
}

/// Well-known field names used in error messages.
pub mod field {
    /// API base URL.
    pub const BASE_URL: &str = "api.base_url";
    /// IPv4-only host URL.
    pub const IPV4_URL: &str = "api.ipv4_url";
    /// IPv6-only host URL.
    pub const IPV6_URL: &str = "api.ipv6_url";
    /// Request timeout.
    pub const TIMEOUT: &str = "timeout";
}

use crate::mac::MacParseError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the Leafmap core library.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Malformed MAC address in a switch table row. Fatal for the run; a
    /// silently dropped record would leave a hole in the inventory.
    #[error("malformed MAC address in {table} entry on {interface}: {source}")]
    MacFormat {
        table: &'static str,
        interface: String,
        source: MacParseError,
    },

    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Invalid configuration value
    #[error("Invalid configuration value at {path}: {message}")]
    InvalidConfigValue { path: String, message: String },

    /// Credential env var missing or empty
    #[error("credential environment variable {env} is not set")]
    MissingCredential { env: String },

    /// IO errors
    #[error("IO error: {context}: {source}")]
    Io {
        source: std::io::Error,
        context: String,
    },

    /// TOML deserialization errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Resolver bootstrap errors (system resolv.conf unreadable etc.)
    #[error("failed to initialize DNS resolver: {0}")]
    Resolver(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;

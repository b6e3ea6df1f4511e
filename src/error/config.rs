//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating viewer settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The endpoint is not a `ws://` or `wss://` URL.
    #[error("Invalid WebSocket endpoint '{0}': expected a ws:// or wss:// URL")]
    InvalidEndpoint(String),

    #[error("Metric window must be between one second and one day")]
    InvalidWindow,

    #[error("Could not determine the home directory")]
    NoHomeDirectory,
}

//! Error types for the relay core library.

use thiserror::Error;

/// Core error type for the webhook relay.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Cannot create provider with empty secret")]
    EmptySecret,

    #[error("Failed to read request body: {0}")]
    BodyRead(String),

    #[error("Required header '{0}' not found in request")]
    MissingHeader(String),

    #[error("Cannot redirect with missing hook")]
    NilHook,

    #[error("Invalid upstream URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Result type alias for relay operations.
pub type Result<T> = std::result::Result<T, RelayError>;

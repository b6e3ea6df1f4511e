//! Feed-related error types.
//!
//! These errors describe frames that could not be turned into a record and
//! failures of the underlying socket. None of them is surfaced to the user
//! beyond the status bar; a lost log line is acceptable.

use std::fmt;

/// Feed-specific error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedError {
    /// The frame is not valid JSON, or not a JSON object.
    Decode { message: String },

    /// The frame has no `type` tag, or one this viewer does not know.
    UnknownType { type_tag: Option<String> },

    /// Socket-level failure reported by the transport.
    Connection { message: String },
}

impl FeedError {
    /// Build a decode error from any displayable cause.
    pub fn decode(cause: impl fmt::Display) -> Self {
        FeedError::Decode {
            message: cause.to_string(),
        }
    }

    /// Build a connection error from any displayable cause.
    pub fn connection(cause: impl fmt::Display) -> Self {
        FeedError::Connection {
            message: cause.to_string(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            FeedError::Decode { .. } => "E_FEED_DECODE",
            FeedError::UnknownType { .. } => "E_FEED_TYPE",
            FeedError::Connection { .. } => "E_FEED_CONN",
        }
    }
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Decode { message } => write!(f, "Malformed frame: {}", message),
            FeedError::UnknownType { type_tag } => match type_tag {
                Some(tag) => write!(f, "Unknown record type: {}", tag),
                None => write!(f, "Record has no type tag"),
            },
            FeedError::Connection { message } => write!(f, "Feed connection error: {}", message),
        }
    }
}

impl std::error::Error for FeedError {}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::decode(err)
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for FeedError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        FeedError::connection(err)
    }
}

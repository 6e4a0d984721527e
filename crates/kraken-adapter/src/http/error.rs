/*
[INPUT]:  Error sources (HTTP, API, serialization, WebSocket, frame decoding)
[OUTPUT]: Structured error types with classification helpers
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the Kraken adapter
#[derive(Error, Debug)]
pub enum KrakenError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error (status {code}): {message}")]
    Api { code: i32, message: String },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// WebSocket transport error, fatal to the connection
    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A frame failed to decode; the message names the offending field
    #[error("{0}")]
    Decode(String),

    /// Data frame referenced a channel id with no registered subscription
    #[error("failed to find subscription metadata for channel {channel}")]
    UnknownChannel { channel: i64 },

    /// Data frame arrived on a channel kind this crate does not decode
    #[error("unsupported channel type: {name}")]
    UnsupportedChannel { name: String },
}

impl KrakenError {
    /// Check if the error is a per-message decode error.
    ///
    /// Decode errors are recoverable: the caller may skip the frame and keep
    /// reading from the same connection.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            KrakenError::Decode(_)
                | KrakenError::UnknownChannel { .. }
                | KrakenError::UnsupportedChannel { .. }
                | KrakenError::Serialization(_)
        )
    }

    /// Check if the error is fatal to the underlying connection
    pub fn is_transport_error(&self) -> bool {
        matches!(self, KrakenError::WebSocket(_) | KrakenError::Http(_))
    }

    /// Create an API error from status code and message
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        KrakenError::Api {
            code: status.as_u16() as i32,
            message: message.into(),
        }
    }

    /// Create a decode error naming the offending field or section
    pub fn decode(message: impl Into<String>) -> Self {
        KrakenError::Decode(message.into())
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for KrakenError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        KrakenError::WebSocket(err.to_string())
    }
}

/// Result type alias for Kraken adapter operations
pub type Result<T> = std::result::Result<T, KrakenError>;

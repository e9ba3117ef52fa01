//! Error types for index-auth-rs.

use thiserror::Error;

/// Errors that can occur when composing index URLs or decoding envelopes.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid index URL supplied to the composer.
    #[error("invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// Invalid base64 encoding in an encoded envelope.
    #[error("invalid base64 encoding in credential envelope")]
    InvalidBase64(#[from] base64::DecodeError),

    /// UTF-8 decoding error.
    #[error("invalid UTF-8 in decoded credential envelope")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// Decoded envelope text is not a recognized envelope shape.
    #[error("malformed credential envelope: {0}")]
    MalformedEnvelope(#[from] serde_json::Error),
}

/// Result type alias for index-auth-rs operations.
pub type Result<T> = std::result::Result<T, Error>;

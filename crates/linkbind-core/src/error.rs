//! Error types for linkbind.

use thiserror::Error;

/// Result type alias using linkbind's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Classification of a fetch failure.
///
/// Distinguishes "the source server is broken" (Http) from "the transport
/// could not reach it" (Network), so callers never mistake one for the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// Transport-level failure (DNS, TLS, connection, timeout).
    Network,
    /// The server responded with a non-success HTTP status.
    Http,
    /// Declared or realized payload size exceeds the ceiling.
    TooLarge,
    /// The response body was zero bytes.
    Empty,
}

impl std::fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FetchErrorKind::Network => "network",
            FetchErrorKind::Http => "http",
            FetchErrorKind::TooLarge => "too-large",
            FetchErrorKind::Empty => "empty",
        };
        f.write_str(s)
    }
}

/// Core error type for linkbind operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The URL string did not parse as an absolute http/https URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Fetching the remote content failed.
    #[error("Fetch error ({kind}): {message}")]
    Fetch {
        kind: FetchErrorKind,
        message: String,
    },

    /// The host's binary-upload primitive failed.
    #[error("Upload error: {0}")]
    Upload(String),

    /// Writing the attachment cell back to the host failed.
    #[error("Write error: {0}")]
    Write(String),

    /// A host API call failed (read, listing).
    #[error("Host error: {0}")]
    Host(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Construct a fetch error with the given kind.
    pub fn fetch(kind: FetchErrorKind, message: impl Into<String>) -> Self {
        Error::Fetch {
            kind,
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Fetch {
            kind: FetchErrorKind::Network,
            message: e.to_string(),
        }
    }
}

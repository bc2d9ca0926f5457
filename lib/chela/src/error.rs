//! Error types for chela.

use derive_more::{Display, Error, From};

/// Main error type for chela operations.
///
/// Configuration and handler failures carry a human-readable message and
/// expose the originating operation through [`Error::op`]. Transport failures
/// (`Connection`, `Tls`, `Timeout`, `Canceled`) propagate directly from
/// request execution without passing through the handler chain.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// Response status did not match the expected code.
    #[display("expect code {expected}, got {actual}")]
    #[from(skip)]
    UnexpectedStatus {
        /// Status code the handler was registered with.
        expected: u16,
        /// Status code the response actually carried.
        actual: u16,
    },

    /// Request body serialization failure.
    #[display("body serialization error: {_0}")]
    #[from]
    BodySerialization(serde_json::Error),

    /// JSON decode error with path context.
    #[display("JSON decode error at '{path}': {message}")]
    #[from(skip)]
    Decode {
        /// JSON path to the error (e.g., "user.address.city").
        path: String,
        /// Error message.
        message: String,
    },

    /// Response body is not valid UTF-8.
    #[display("body is not valid UTF-8: {_0}")]
    #[from]
    NonUtf8Body(std::string::FromUtf8Error),

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),

    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// Request canceled through the caller-supplied token.
    #[display("request canceled")]
    #[from(skip)]
    Canceled,
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a JSON decode error with path context.
    #[must_use]
    pub fn decode(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Name of the operation that produced this error.
    ///
    /// Configuration and handler errors are tagged with the builder method
    /// that registered them, so callers can match on the operation without
    /// parsing the message.
    #[must_use]
    pub const fn op(&self) -> &'static str {
        match self {
            Self::UnexpectedStatus { .. } => "expect_code",
            Self::BodySerialization(_) => "body_json",
            Self::Decode { .. } => "decode",
            Self::NonUtf8Body(_) => "to_string",
            Self::InvalidUrl(_) | Self::InvalidRequest(_) => "request",
            Self::Connection(_) | Self::Tls(_) | Self::Timeout => "send",
            Self::Canceled => "cancel",
        }
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns `true` if the request was canceled.
    #[must_use]
    pub const fn is_canceled(&self) -> bool {
        matches!(self, Self::Canceled)
    }
}

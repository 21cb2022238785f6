//! Error types for the CloudApp client.
//!
//! # Design
//! Every failure surfaces as a single `CloudAppError` carrying an HTTP-like
//! status, a message, and an optional cause. Callers that only care about
//! "did the server answer" branch on `status()`; callers that want the exact
//! class of failure match on `kind()`.
//!
//! Local failures (transport, encoding, parsing) always report status 500
//! with a fixed message. The original fault is kept as the `source()` so it
//! shows up in error chains without leaking into the message.

use std::error::Error as StdError;
use std::fmt;

/// Message used for every transport-level failure.
pub const TRANSPORT_FAILURE_MESSAGE: &str =
    "Something went wrong trying to contact the CloudApp API.";

/// Message used when a response body is neither a JSON object nor an array.
pub const PARSE_FAILURE_MESSAGE: &str = "Something went wrong trying to handle JSON.";

/// Message used when an outgoing body cannot be encoded.
pub const ENCODING_FAILURE_MESSAGE: &str = "Could not encode json to string.";

/// Status reported for failures that happened on this side of the wire.
pub const LOCAL_FAILURE_STATUS: u16 = 500;

/// Boxed cause attached to local failures.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Which class of failure produced a `CloudAppError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The remote answered with a status other than the expected one.
    UnexpectedStatus,
    /// The request never produced a response.
    Transport,
    /// The outgoing JSON body could not be encoded.
    Encoding,
    /// The response matched the expected status but was not a JSON object or array.
    Parse,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::UnexpectedStatus => "unexpected status",
            ErrorKind::Transport => "transport",
            ErrorKind::Encoding => "encoding",
            ErrorKind::Parse => "parse",
        };
        f.write_str(name)
    }
}

/// The single error type returned by `CloudAppClient`.
#[derive(Debug, thiserror::Error)]
#[error("CloudApp API error {status}: {message}")]
pub struct CloudAppError {
    kind: ErrorKind,
    status: u16,
    message: String,
    #[source]
    cause: Option<BoxError>,
}

impl CloudAppError {
    /// The remote returned `status` with `body` when something else was expected.
    pub fn unexpected_status(status: u16, body: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::UnexpectedStatus,
            status,
            message: body.into(),
            cause: None,
        }
    }

    pub fn transport(cause: impl Into<BoxError>) -> Self {
        Self::local(ErrorKind::Transport, TRANSPORT_FAILURE_MESSAGE, cause.into())
    }

    pub fn encoding(cause: impl Into<BoxError>) -> Self {
        Self::local(ErrorKind::Encoding, ENCODING_FAILURE_MESSAGE, cause.into())
    }

    pub fn parse(cause: impl Into<BoxError>) -> Self {
        Self::local(ErrorKind::Parse, PARSE_FAILURE_MESSAGE, cause.into())
    }

    fn local(kind: ErrorKind, message: &str, cause: BoxError) -> Self {
        Self {
            kind,
            status: LOCAL_FAILURE_STATUS,
            message: message.to_string(),
            cause: Some(cause),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The remote status for `UnexpectedStatus`, 500 for everything else.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// The raw response body for `UnexpectedStatus`, a fixed message otherwise.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// True when the failure happened before a usable response was obtained.
    pub fn is_local(&self) -> bool {
        self.kind != ErrorKind::UnexpectedStatus
    }
}

/// Errors an `HttpTransport` may return instead of a response.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The ureq agent failed to complete the exchange.
    #[error("HTTP exchange failed: {0}")]
    Ureq(#[from] ureq::Error),

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// Any other transport implementation's failure.
    #[error("{0}")]
    Other(BoxError),
}

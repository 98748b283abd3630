//! Error types and result handling.
//!
//! The pipeline classifies its own failures into two kinds, mirroring the
//! taxonomy callers are expected to branch on:
//!
//! | Kind | Code | Raised by |
//! |------|------|-----------|
//! | [`ErrorKind::Request`] | 1 | Status-code policy and content-type validation |
//! | [`ErrorKind::Parse`] | 2 | Reserved for strict body decoding (see below) |
//!
//! Transport-level failures (connection refused, mid-stream errors) are *not*
//! classified; they propagate through [`Error::Transport`] with the
//! underlying cause untouched.
//!
//! The `Parse` kind is currently never raised: the response normalizer
//! degrades un-parseable JSON bodies to the raw bytes instead of failing.
//! It is kept in the taxonomy for a future strict-decode mode.
//!
//! # Examples
//!
//! ```
//! use reqkit::{Error, ErrorKind};
//!
//! let err = Error::request("response content-type is not application/json");
//! assert_eq!(err.kind(), Some(ErrorKind::Request));
//! assert_eq!(ErrorKind::Request.code(), 1);
//! ```

use std::fmt;

use crate::transport::TransportError;

/// Convenience result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error used to chain an underlying cause.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Classification of pipeline-raised failures.
///
/// Both strict-mode content-type mismatches and status-policy failures
/// surface as [`ErrorKind::Request`] with different messages, so callers
/// distinguish by message or status inspection, not by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Status-code policy failure or response-header validation failure.
    Request,
    /// Body-decoding failure. Reserved; see the module docs.
    Parse,
}

impl ErrorKind {
    /// Stable numeric code for this kind.
    pub fn code(&self) -> u8 {
        match self {
            ErrorKind::Request => 1,
            ErrorKind::Parse => 2,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Request => write!(f, "REQUEST_ERROR"),
            ErrorKind::Parse => write!(f, "PARSE_ERROR"),
        }
    }
}

/// Errors produced while building, dispatching, or settling a request.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A classified request failure: the response status violated the
    /// raise-on-status policy, or strict-mode header validation failed.
    #[error("{message}")]
    Request {
        /// Human-readable description of the failure.
        message: String,
        /// The underlying cause, when the failure was triggered by one.
        #[source]
        source: Option<BoxError>,
    },

    /// A classified body-decoding failure. Never raised by the default
    /// normalizer, which falls back to the raw body instead.
    #[error("{message}")]
    Parse {
        /// Human-readable description of the failure.
        message: String,
        /// The underlying cause, when the failure was triggered by one.
        #[source]
        source: Option<BoxError>,
    },

    /// A transport-level failure, propagated without classification.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The endpoint could not be parsed as a URL.
    #[error("invalid endpoint `{endpoint}`: {source}")]
    InvalidEndpoint {
        /// The endpoint string as supplied by the caller.
        endpoint: String,
        /// The parse failure reported by the URL parser.
        #[source]
        source: url::ParseError,
    },

    /// The resolved scheme has no registered transport.
    #[error("unsupported protocol `{0}`")]
    UnsupportedProtocol(String),

    /// The request payload could not be serialized for transmission.
    #[error("failed to serialize request payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    /// Build a [`Error::Request`] from a plain message, with no cause.
    pub fn request(message: impl Into<String>) -> Self {
        Error::Request {
            message: message.into(),
            source: None,
        }
    }

    /// Build a [`Error::Request`] that chains an underlying cause.
    pub fn request_with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Error::Request {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Build a [`Error::Parse`] from a plain message, with no cause.
    pub fn parse(message: impl Into<String>) -> Self {
        Error::Parse {
            message: message.into(),
            source: None,
        }
    }

    /// Build a [`Error::Parse`] that chains an underlying cause.
    pub fn parse_with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Error::Parse {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// The classification of this error, if it is a pipeline-raised kind.
    ///
    /// Transport, endpoint, and serialization failures are unclassified and
    /// return `None`.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Error::Request { .. } => Some(ErrorKind::Request),
            Error::Parse { .. } => Some(ErrorKind::Parse),
            _ => None,
        }
    }
}

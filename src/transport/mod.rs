//! Transport boundary: the seam between the request pipeline and the wire.
//!
//! A [`Transport`] takes fully resolved request options plus a serialized
//! payload, performs the round-trip, and returns a [`RawResponse`] with the
//! body fully buffered. The pipeline never touches sockets itself, which
//! keeps it deterministic under test: integration tests inject recording
//! or canned transports.
//!
//! The default implementation is [`ReqwestTransport`]; a
//! [`Client`](crate::Client) uses one shared instance for both the plaintext
//! and encrypted protocol slots unless the builder overrides them.
//!
//! # Examples
//!
//! ```
//! use async_trait::async_trait;
//! use bytes::Bytes;
//! use reqkit::{RawResponse, ResolvedOptions, Transport, TransportError};
//!
//! struct Canned(RawResponse);
//!
//! #[async_trait]
//! impl Transport for Canned {
//!     async fn dispatch(
//!         &self,
//!         _options: &ResolvedOptions,
//!         _payload: Bytes,
//!     ) -> Result<RawResponse, TransportError> {
//!         Ok(self.0.clone())
//!     }
//! }
//! ```

mod reqwest;

pub use self::reqwest::ReqwestTransport;

use std::collections::BTreeMap;

use async_trait::async_trait;
use bytes::Bytes;
use http::StatusCode;

use crate::error::BoxError;
use crate::types::ResolvedOptions;

/// A transport failure: connection errors, mid-stream errors, anything the
/// wire reports before a complete response is buffered.
///
/// These propagate through the pipeline without classification; the
/// underlying cause is preserved via [`std::error::Error::source`].
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl TransportError {
    /// Build a transport error from a plain message.
    pub fn new(message: impl Into<String>) -> Self {
        TransportError {
            message: message.into(),
            source: None,
        }
    }

    /// Build a transport error that chains the underlying cause.
    pub fn with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        TransportError {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// The failure message, without the cause chain.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A raw transport response with the body fully buffered.
///
/// Metadata fields are carried verbatim from the wire; the normalizer copies
/// them into the [`NormalizedResponse`](crate::NormalizedResponse) unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    /// Response status.
    pub status: StatusCode,
    /// Status message (reason phrase), when the transport provides one.
    pub status_message: String,
    /// HTTP version of the response, e.g. `"1.1"`.
    pub http_version: String,
    /// Response headers, names as received.
    pub headers: BTreeMap<String, String>,
    /// Alternating name/value header sequence, ordered as received.
    pub raw_headers: Vec<String>,
    /// Whether the response stream ran to completion.
    pub complete: bool,
    /// Whether the response stream was aborted.
    pub aborted: bool,
    /// The buffered response body.
    pub body: Bytes,
}

impl RawResponse {
    /// Build a complete, non-aborted response, the common case for
    /// buffering transports and for tests.
    pub fn complete(status: StatusCode, headers: BTreeMap<String, String>, body: Bytes) -> Self {
        let raw_headers = headers
            .iter()
            .flat_map(|(name, value)| [name.clone(), value.clone()])
            .collect();
        RawResponse {
            status,
            status_message: status.canonical_reason().unwrap_or_default().to_string(),
            http_version: "1.1".to_string(),
            headers,
            raw_headers,
            complete: true,
            aborted: false,
            body,
        }
    }
}

/// An outbound HTTP transport.
///
/// Implementations perform exactly one round-trip per [`dispatch`] call:
/// write the payload, await the response, buffer the full body. Streaming
/// consumption is out of scope for this crate.
///
/// [`dispatch`]: Transport::dispatch
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute the request described by `options`, writing `payload` as the
    /// body, and return the buffered response.
    async fn dispatch(
        &self,
        options: &ResolvedOptions,
        payload: Bytes,
    ) -> Result<RawResponse, TransportError>;
}

#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # Design
//!
//! The crate is a request-building, dispatch, and response-normalization
//! pipeline. A declarative [`CallDescriptor`] resolves into transport-ready
//! options, the payload serializes to bytes, the call dispatches over the
//! transport selected by protocol, and the buffered response normalizes into
//! a stable [`NormalizedResponse`] with a JSON-decoded body (raw fallback).
//!
//! Two orthogonal modes shape the failure policy:
//!
//! - **Strict mode (header)** - per call, via
//!   [`CallDescriptor::with_strict_mode`]: the response content-type must be
//!   exactly `application/json`, or the call rejects before normalization.
//! - **Safe mode (status)** - per client, via [`Client::safe`] or
//!   [`ClientBuilder::raise_on_status`]: suppresses rejection on 4xx/5xx
//!   statuses; only transport and header failures reject.
//!
//! # Module Structure
//!
//! - **[client]** - Orchestrator, options builder, payload serializer,
//!   response normalizer, stateful session
//! - **[error]** - Error taxonomy and result alias
//! - **[protocol]** - Default headers and content-type validation
//! - **[transport]** - The `Transport` seam and the reqwest-backed default
//! - **[types]** - Descriptors, resolved options, normalized responses

pub mod client;
pub mod error;
pub mod protocol;
pub mod transport;
pub mod types;

pub use client::{Client, ClientBuilder, Session};
pub use error::{Error, ErrorKind, Result};
pub use transport::{RawResponse, ReqwestTransport, Transport, TransportError};
pub use types::{
    CallDescriptor, NormalizedResponse, OriginRequest, Payload, Protocol, ResolvedOptions,
    ResponseBody,
};

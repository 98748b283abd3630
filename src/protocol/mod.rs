//! Protocol-level constants and header utilities.
//!
//! Holds the default header set applied to every outbound call and the
//! content-type validation used by strict mode.

pub mod headers;

pub use headers::{find_header, validate_content_type};

use std::collections::BTreeMap;

/// Content types accepted by default, in the order they are advertised.
pub const DEFAULT_CONTENT_TYPES: [&str; 4] = [
    "application/json",
    "text/plain",
    "application/pdf",
    "image/jpg",
];

/// The content type enforced by strict mode and sent by default.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Default headers merged under every caller's headers.
///
/// | Header | Value |
/// |--------|-------|
/// | `Content-Type` | `application/json` |
/// | `Accept` | comma-joined [`DEFAULT_CONTENT_TYPES`] |
///
/// Caller headers with the same (case-sensitive) name override these.
pub fn default_headers() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string()),
        ("Accept".to_string(), DEFAULT_CONTENT_TYPES.join(",")),
    ])
}

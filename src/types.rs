//! Core data types for the request pipeline.
//!
//! # Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`CallDescriptor`] | The caller's declarative request intent |
//! | [`Payload`] | Request body value (bytes, JSON, text, or empty) |
//! | [`Protocol`] | Transport discriminator (`http` / `https`) |
//! | [`ResolvedOptions`] | Transport-ready request options derived from a descriptor |
//! | [`NormalizedResponse`] | Stable, serializable record of a completed call |
//! | [`ResponseBody`] | JSON-decoded body with a raw-bytes fallback |
//! | [`OriginRequest`] | Echo of the resolved call, for retry-by-reconstruction |
//!
//! # Lifecycle
//!
//! A [`CallDescriptor`] is constructed fresh per invocation through its
//! builder methods and never mutated after resolution. [`ResolvedOptions`]
//! is derived once per call and consumed by the transport. A
//! [`NormalizedResponse`] is produced once per completed call and owned by
//! the caller (or retained by a [`Session`](crate::client::Session) as the
//! most recent pair).

use std::collections::{BTreeMap, HashMap};

use bytes::Bytes;
use http::Method;
use serde::{Serialize, Serializer};

/// Wire protocol for a resolved request.
///
/// Selecting the transport by protocol is done with an exhaustive match, so
/// an unrecognized scheme is rejected during resolution rather than reaching
/// dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// Plaintext HTTP.
    Http,
    /// TLS-encrypted HTTP.
    Https,
}

impl Protocol {
    /// The URL scheme for this protocol, without the `://` suffix.
    pub fn scheme(&self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }

    /// Parse a URL scheme into a protocol.
    ///
    /// Returns `None` for anything other than `http` or `https`.
    pub fn from_scheme(scheme: &str) -> Option<Self> {
        match scheme {
            "http" => Some(Protocol::Http),
            "https" => Some(Protocol::Https),
            _ => None,
        }
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.scheme())
    }
}

/// Request body value.
///
/// Serialization rules (applied by the payload serializer before dispatch):
/// byte payloads pass through unchanged, JSON values encode through
/// `serde_json`, text passes through as UTF-8, and `Empty` serializes to
/// zero bytes (an empty write still happens, matching the behavior callers
/// observe for body-less verbs).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    /// No body. The default for `GET` and `DELETE`.
    Empty,
    /// Raw bytes, transmitted verbatim.
    Bytes(Bytes),
    /// A structured value, JSON-encoded at dispatch time.
    Json(serde_json::Value),
    /// Plain text, transmitted as UTF-8.
    Text(String),
}

impl Payload {
    /// JSON-encode any serializable value into a [`Payload::Json`].
    pub fn json<T: Serialize>(value: &T) -> crate::error::Result<Self> {
        Ok(Payload::Json(serde_json::to_value(value)?))
    }

    /// Whether this payload carries no bytes to transmit.
    pub fn is_empty(&self) -> bool {
        matches!(self, Payload::Empty)
    }
}

impl Default for Payload {
    fn default() -> Self {
        Payload::Empty
    }
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        Payload::Json(value)
    }
}

impl From<String> for Payload {
    fn from(value: String) -> Self {
        Payload::Text(value)
    }
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Payload::Text(value.to_string())
    }
}

impl From<Bytes> for Payload {
    fn from(value: Bytes) -> Self {
        Payload::Bytes(value)
    }
}

impl From<Vec<u8>> for Payload {
    fn from(value: Vec<u8>) -> Self {
        Payload::Bytes(Bytes::from(value))
    }
}

/// The caller's declarative request intent.
///
/// Every recognized field is explicit, with documented defaults; there is no
/// dynamic option merging. Construct with [`CallDescriptor::new`] and refine
/// with the `with_*` builder methods.
///
/// # Defaults
///
/// | Field | Default |
/// |-------|---------|
/// | `method` | `GET` |
/// | `path` | empty (falls back to the endpoint's own path) |
/// | `path_params` / `query_params` | empty |
/// | `headers` | empty (merged over the client's default headers) |
/// | `body` | [`Payload::Empty`] |
/// | `strict_mode` | `false` |
///
/// # Examples
///
/// ```
/// use reqkit::CallDescriptor;
/// use http::Method;
///
/// let descriptor = CallDescriptor::new("https://api.example.com")
///     .with_method(Method::POST)
///     .with_path("users/{userId}/contacts")
///     .with_path_param("userId", 42)
///     .with_query_param("page", 2)
///     .with_body(serde_json::json!({ "name": "Ada" }));
/// assert_eq!(descriptor.method, Method::POST);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CallDescriptor {
    /// Target host, with optional scheme, path, and query. A bare host
    /// defaults to plaintext HTTP.
    pub endpoint: String,
    /// HTTP method. Defaults to `GET`.
    pub method: Method,
    /// Path template with `{name}` placeholders. When empty, the endpoint's
    /// own path is used instead.
    pub path: String,
    /// Values substituted into `{name}` placeholders in the path template.
    pub path_params: HashMap<String, String>,
    /// Query parameters, serialized in insertion order. When non-empty they
    /// fully replace any query string embedded in the endpoint.
    pub query_params: Vec<(String, String)>,
    /// Caller headers, merged over the client's defaults. Keys are
    /// case-sensitive for merging purposes.
    pub headers: BTreeMap<String, String>,
    /// Request body.
    pub body: Payload,
    /// When `true`, the response content-type must be `application/json`
    /// or the call rejects before normalization.
    pub strict_mode: bool,
}

impl CallDescriptor {
    /// Create a descriptor for `endpoint` with all other fields defaulted.
    pub fn new(endpoint: impl Into<String>) -> Self {
        CallDescriptor {
            endpoint: endpoint.into(),
            method: Method::GET,
            path: String::new(),
            path_params: HashMap::new(),
            query_params: Vec::new(),
            headers: BTreeMap::new(),
            body: Payload::Empty,
            strict_mode: false,
        }
    }

    /// Set the HTTP method.
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Set the path template.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Add a single path-template substitution.
    pub fn with_path_param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.path_params.insert(name.into(), value.to_string());
        self
    }

    /// Replace all path-template substitutions.
    pub fn with_path_params(mut self, params: HashMap<String, String>) -> Self {
        self.path_params = params;
        self
    }

    /// Append a single query parameter.
    pub fn with_query_param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query_params.push((name.into(), value.to_string()));
        self
    }

    /// Replace all query parameters.
    pub fn with_query_params(mut self, params: Vec<(String, String)>) -> Self {
        self.query_params = params;
        self
    }

    /// Add a single header, overriding the client default of the same name.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Replace all caller headers.
    pub fn with_headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    /// Set the request body.
    pub fn with_body(mut self, body: impl Into<Payload>) -> Self {
        self.body = body.into();
        self
    }

    /// Enable or disable strict content-type validation of the response.
    pub fn with_strict_mode(mut self, strict_mode: bool) -> Self {
        self.strict_mode = strict_mode;
        self
    }
}

impl From<&str> for CallDescriptor {
    fn from(endpoint: &str) -> Self {
        CallDescriptor::new(endpoint)
    }
}

impl From<String> for CallDescriptor {
    fn from(endpoint: String) -> Self {
        CallDescriptor::new(endpoint)
    }
}

/// Transport-ready request options derived from a [`CallDescriptor`].
///
/// Immutable once built; consumed exactly once per call.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOptions {
    /// Wire protocol selected from the endpoint's scheme.
    pub protocol: Protocol,
    /// Hostname, without the port.
    pub host: String,
    /// Explicit port, when the endpoint specified a non-default one.
    pub port: Option<u16>,
    /// HTTP method.
    pub method: Method,
    /// Absolute path, starting with `/`, with a `?`-prefixed query string
    /// appended only when the query is non-empty.
    pub path: String,
    /// Already-merged request headers, passed through unchanged.
    pub headers: BTreeMap<String, String>,
}

impl ResolvedOptions {
    /// Render the full request URL for these options.
    pub fn url(&self) -> String {
        match self.port {
            Some(port) => format!("{}://{}:{}{}", self.protocol, self.host, port, self.path),
            None => format!("{}://{}{}", self.protocol, self.host, self.path),
        }
    }
}

/// Response body after content-type-aware parsing.
///
/// Bodies that parse as JSON decode into [`ResponseBody::Json`]; anything
/// else degrades to the raw bytes unchanged. Decoding never fails the call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    /// The body parsed as JSON.
    Json(serde_json::Value),
    /// The body, unchanged, when it did not parse as JSON.
    Raw(Bytes),
}

impl ResponseBody {
    /// The decoded JSON value, when the body parsed as JSON.
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Raw(_) => None,
        }
    }

    /// The raw bytes, when the body did not parse as JSON.
    pub fn as_raw(&self) -> Option<&Bytes> {
        match self {
            ResponseBody::Json(_) => None,
            ResponseBody::Raw(bytes) => Some(bytes),
        }
    }

    /// Render the body as text: compact JSON for decoded bodies, lossy
    /// UTF-8 for raw ones.
    pub fn to_text(&self) -> String {
        match self {
            ResponseBody::Json(value) => value.to_string(),
            ResponseBody::Raw(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        }
    }
}

fn serialize_method<S: Serializer>(method: &Method, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(method.as_str())
}

/// Echo of the resolved call that produced a response.
///
/// Carries everything needed to reconstruct and re-issue the request without
/// holding a reference to the live transport: the resolved target URL (path
/// and query already substituted), the merged headers, the method, and the
/// original body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginRequest {
    /// HTTP method of the call.
    #[serde(serialize_with = "serialize_method")]
    pub method: Method,
    /// Fully resolved target URL.
    pub endpoint: String,
    /// Merged headers as sent.
    pub headers: BTreeMap<String, String>,
    /// The body as supplied by the caller.
    pub body: Payload,
}

impl OriginRequest {
    /// Rebuild a [`CallDescriptor`] that reproduces this request when passed
    /// back to [`Client::call`](crate::Client::call).
    pub fn to_descriptor(&self) -> CallDescriptor {
        CallDescriptor::new(&self.endpoint)
            .with_method(self.method.clone())
            .with_headers(self.headers.clone())
            .with_body(self.body.clone())
    }
}

/// Stable, serializable record of a completed call.
///
/// Transport metadata is copied verbatim; the body is JSON-decoded when
/// possible and kept raw otherwise, with [`raw_body`](Self::raw_body) always
/// holding the unmodified bytes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedResponse {
    /// Response status code.
    pub status_code: u16,
    /// Response status message (canonical reason phrase).
    pub status_message: String,
    /// HTTP protocol version of the response, e.g. `"1.1"`.
    pub http_version: String,
    /// Response headers, with names as the transport provided them.
    pub headers: BTreeMap<String, String>,
    /// Ordered name/value header sequence, alternating, as received.
    pub raw_headers: Vec<String>,
    /// Whether the transport signalled stream completion.
    pub complete: bool,
    /// Whether the transport signalled the stream was aborted.
    pub aborted: bool,
    /// Parsed body: JSON when the raw body decodes, raw bytes otherwise.
    pub body: ResponseBody,
    /// The unmodified byte sequence received.
    pub raw_body: Bytes,
    /// Echo of the resolved call, for retry-by-reconstruction.
    pub origin_request: OriginRequest,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_scheme_round_trip() {
        assert_eq!(Protocol::from_scheme("http"), Some(Protocol::Http));
        assert_eq!(Protocol::from_scheme("https"), Some(Protocol::Https));
        assert_eq!(Protocol::from_scheme("ftp"), None);
        assert_eq!(Protocol::Https.scheme(), "https");
        assert_eq!(Protocol::Http.to_string(), "http");
    }

    #[test]
    fn test_descriptor_defaults() {
        let descriptor = CallDescriptor::new("test.com");
        assert_eq!(descriptor.endpoint, "test.com");
        assert_eq!(descriptor.method, Method::GET);
        assert!(descriptor.path.is_empty());
        assert!(descriptor.path_params.is_empty());
        assert!(descriptor.query_params.is_empty());
        assert!(descriptor.headers.is_empty());
        assert_eq!(descriptor.body, Payload::Empty);
        assert!(!descriptor.strict_mode);
    }

    #[test]
    fn test_descriptor_builder_is_additive() {
        let descriptor = CallDescriptor::new("test.com")
            .with_query_param("pag", 2)
            .with_query_param("order", "asc")
            .with_path_param("id", 7)
            .with_header("X-Trace", "abc");
        assert_eq!(
            descriptor.query_params,
            vec![
                ("pag".to_string(), "2".to_string()),
                ("order".to_string(), "asc".to_string()),
            ]
        );
        assert_eq!(descriptor.path_params["id"], "7");
        assert_eq!(descriptor.headers["X-Trace"], "abc");
    }

    #[test]
    fn test_payload_conversions() {
        assert_eq!(Payload::from("hi"), Payload::Text("hi".to_string()));
        assert_eq!(
            Payload::from(vec![1u8, 2, 3]),
            Payload::Bytes(Bytes::from_static(&[1, 2, 3]))
        );
        assert_eq!(
            Payload::from(serde_json::json!({"a": 1})),
            Payload::Json(serde_json::json!({"a": 1}))
        );
        assert!(Payload::default().is_empty());
    }

    #[test]
    fn test_resolved_options_url() {
        let options = ResolvedOptions {
            protocol: Protocol::Https,
            host: "test.com".to_string(),
            port: Some(8443),
            method: Method::GET,
            path: "/hello?pag=2".to_string(),
            headers: BTreeMap::new(),
        };
        assert_eq!(options.url(), "https://test.com:8443/hello?pag=2");

        let no_port = ResolvedOptions {
            port: None,
            ..options
        };
        assert_eq!(no_port.url(), "https://test.com/hello?pag=2");
    }

    #[test]
    fn test_response_body_to_text() {
        let json = ResponseBody::Json(serde_json::json!({"message": "ok"}));
        assert_eq!(json.to_text(), r#"{"message":"ok"}"#);
        assert!(json.as_json().is_some());

        let raw = ResponseBody::Raw(Bytes::from_static(b"<h1>test</h1>"));
        assert_eq!(raw.to_text(), "<h1>test</h1>");
        assert!(raw.as_json().is_none());
    }

    #[test]
    fn test_origin_request_reconstructs_descriptor() {
        let origin = OriginRequest {
            method: Method::POST,
            endpoint: "https://test.com/id/2?pag=1".to_string(),
            headers: BTreeMap::from([("Content-Type".to_string(), "application/json".to_string())]),
            body: Payload::Json(serde_json::json!({"test": "test"})),
        };
        let descriptor = origin.to_descriptor();
        assert_eq!(descriptor.endpoint, origin.endpoint);
        assert_eq!(descriptor.method, Method::POST);
        assert_eq!(descriptor.headers, origin.headers);
        assert_eq!(descriptor.body, origin.body);
    }
}

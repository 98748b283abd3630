//! Request orchestrator: the [`Client`] and its call pipeline.
//!
//! Each call runs a short-lived linear pipeline:
//!
//! ```text
//! build options -> select transport -> serialize payload -> dispatch
//!     -> await buffered response -> validate headers (strict only)
//!     -> normalize -> apply status policy -> settle
//! ```
//!
//! Both status modes share this pipeline; only the final policy check
//! differs, controlled by a single `raise_on_status` flag rather than a
//! type hierarchy. Calls are independent: the client holds no per-call
//! state and may be shared freely across tasks.
//!
//! # Examples
//!
//! ## Simple GET request
//!
//! ```ignore
//! use reqkit::Client;
//!
//! #[tokio::main]
//! async fn main() -> reqkit::Result<()> {
//!     let client = Client::new();
//!     let response = client.get("https://example.com/api/data").await?;
//!     println!("status: {}", response.status_code);
//!     Ok(())
//! }
//! ```
//!
//! ## Full descriptor with safe status mode
//!
//! ```ignore
//! use reqkit::{CallDescriptor, Client};
//!
//! #[tokio::main]
//! async fn main() -> reqkit::Result<()> {
//!     let client = Client::safe();
//!     let descriptor = CallDescriptor::new("https://example.com")
//!         .with_path("users/{userId}")
//!         .with_path_param("userId", 42)
//!         .with_query_param("expand", "contacts");
//!     let response = client.call(descriptor).await?;
//!     // Safe mode: a 4xx/5xx status settles successfully.
//!     println!("status: {}", response.status_code);
//!     Ok(())
//! }
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use http::Method;

use crate::client::{options, payload, response};
use crate::error::{Error, Result};
use crate::protocol;
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{CallDescriptor, NormalizedResponse, OriginRequest, Payload, Protocol};

/// Outbound HTTP(S) request client.
///
/// Holds one transport per protocol slot and the raise-on-status policy.
/// [`Client::new`] rejects calls whose status is 400 or above;
/// [`Client::safe`] settles successfully for any status, rejecting only for
/// transport or strict-mode header failures.
#[derive(Clone)]
pub struct Client {
    http: Arc<dyn Transport>,
    https: Arc<dyn Transport>,
    default_headers: BTreeMap<String, String>,
    raise_on_status: bool,
}

impl Client {
    /// Create a client that raises on client/server error statuses.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a client that never rejects based on status code.
    pub fn safe() -> Self {
        Self::builder().raise_on_status(false).build()
    }

    /// Start configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// The default headers merged under every call's headers.
    pub fn default_headers(&self) -> &BTreeMap<String, String> {
        &self.default_headers
    }

    /// Whether this client rejects on status codes of 400 and above.
    pub fn raises_on_status(&self) -> bool {
        self.raise_on_status
    }

    /// Make a GET request.
    ///
    /// Accepts a bare endpoint or a full [`CallDescriptor`] carrying path
    /// templates, query parameters, headers, or strict mode; the method and
    /// an empty body are applied over whatever the descriptor holds.
    pub async fn get(&self, request: impl Into<CallDescriptor>) -> Result<NormalizedResponse> {
        self.call(
            request
                .into()
                .with_method(Method::GET)
                .with_body(Payload::Empty),
        )
        .await
    }

    /// Make a POST request with `body`. Accepts a bare endpoint or a full
    /// [`CallDescriptor`]; the method and body are applied over it.
    pub async fn post(
        &self,
        request: impl Into<CallDescriptor>,
        body: impl Into<Payload>,
    ) -> Result<NormalizedResponse> {
        self.call(request.into().with_method(Method::POST).with_body(body))
            .await
    }

    /// Make a PUT request with `body`. Accepts a bare endpoint or a full
    /// [`CallDescriptor`]; the method and body are applied over it.
    pub async fn put(
        &self,
        request: impl Into<CallDescriptor>,
        body: impl Into<Payload>,
    ) -> Result<NormalizedResponse> {
        self.call(request.into().with_method(Method::PUT).with_body(body))
            .await
    }

    /// Make a PATCH request with `body`. Accepts a bare endpoint or a full
    /// [`CallDescriptor`]; the method and body are applied over it.
    pub async fn patch(
        &self,
        request: impl Into<CallDescriptor>,
        body: impl Into<Payload>,
    ) -> Result<NormalizedResponse> {
        self.call(request.into().with_method(Method::PATCH).with_body(body))
            .await
    }

    /// Make a DELETE request.
    ///
    /// Accepts a bare endpoint or a full [`CallDescriptor`]; the method and
    /// an empty body are applied over it.
    pub async fn delete(&self, request: impl Into<CallDescriptor>) -> Result<NormalizedResponse> {
        self.call(
            request
                .into()
                .with_method(Method::DELETE)
                .with_body(Payload::Empty),
        )
        .await
    }

    /// Execute a fully described call.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidEndpoint`] / [`Error::UnsupportedProtocol`] when the
    ///   endpoint cannot be resolved.
    /// - [`Error::Transport`] for dispatch or mid-stream failures, with the
    ///   underlying cause preserved and unclassified.
    /// - [`Error::Request`] when strict-mode content-type validation fails,
    ///   or when the status is 400+ and this client raises on status. The
    ///   status failure message embeds the normalized response body.
    pub async fn call(&self, descriptor: CallDescriptor) -> Result<NormalizedResponse> {
        let mut merged = self.default_headers.clone();
        merged.extend(
            descriptor
                .headers
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );

        let resolved = options::resolve(&descriptor, merged.clone())?;
        let transport = self.transport_for(resolved.protocol);
        let body = payload::serialize(&descriptor.body)?;

        tracing::debug!(method = %resolved.method, url = %resolved.url(), "dispatching request");
        let raw = transport.dispatch(&resolved, body).await.map_err(|e| {
            tracing::warn!(url = %resolved.url(), error = %e, "transport failure");
            Error::Transport(e)
        })?;

        protocol::validate_content_type(&raw.headers, descriptor.strict_mode)?;

        let origin = OriginRequest {
            method: resolved.method.clone(),
            endpoint: resolved.url(),
            headers: merged,
            body: descriptor.body.clone(),
        };
        let normalized = response::normalize(raw, origin);

        if self.raise_on_status && normalized.status_code >= 400 {
            let message = format!(
                "{} {} failed with status {}: {}",
                normalized.origin_request.method,
                normalized.origin_request.endpoint,
                normalized.status_code,
                normalized.body.to_text()
            );
            tracing::warn!(status = normalized.status_code, "request rejected by status policy");
            return Err(Error::request(message));
        }

        tracing::debug!(status = normalized.status_code, "request settled");
        Ok(normalized)
    }

    fn transport_for(&self, protocol: Protocol) -> &Arc<dyn Transport> {
        match protocol {
            Protocol::Http => &self.http,
            Protocol::Https => &self.https,
        }
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

/// Configures and builds a [`Client`].
///
/// # Examples
///
/// ```
/// use reqkit::Client;
///
/// let client = Client::builder()
///     .raise_on_status(false)
///     .default_header("X-Api-Key", "secret")
///     .build();
/// assert!(!client.raises_on_status());
/// assert_eq!(client.default_headers()["X-Api-Key"], "secret");
/// ```
pub struct ClientBuilder {
    http: Option<Arc<dyn Transport>>,
    https: Option<Arc<dyn Transport>>,
    default_headers: BTreeMap<String, String>,
    raise_on_status: bool,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        ClientBuilder {
            http: None,
            https: None,
            default_headers: protocol::default_headers(),
            raise_on_status: true,
        }
    }
}

impl ClientBuilder {
    /// Override the transport for one protocol slot. Slots left unset share
    /// a single [`ReqwestTransport`].
    pub fn transport(mut self, protocol: Protocol, transport: Arc<dyn Transport>) -> Self {
        match protocol {
            Protocol::Http => self.http = Some(transport),
            Protocol::Https => self.https = Some(transport),
        }
        self
    }

    /// Add or replace a default header.
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    /// Replace the entire default header set.
    pub fn default_headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.default_headers = headers;
        self
    }

    /// Set the status policy: `true` (the default) rejects on 400+.
    pub fn raise_on_status(mut self, raise_on_status: bool) -> Self {
        self.raise_on_status = raise_on_status;
        self
    }

    /// Build the client, filling unset transport slots with a shared
    /// [`ReqwestTransport`].
    pub fn build(self) -> Client {
        let fallback: Arc<dyn Transport> = Arc::new(ReqwestTransport::new());
        Client {
            http: self.http.unwrap_or_else(|| Arc::clone(&fallback)),
            https: self.https.unwrap_or(fallback),
            default_headers: self.default_headers,
            raise_on_status: self.raise_on_status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_defaults() {
        let client = Client::new();
        assert!(client.raises_on_status());
        assert_eq!(client.default_headers()["Content-Type"], "application/json");
        assert_eq!(
            client.default_headers()["Accept"],
            "application/json,text/plain,application/pdf,image/jpg"
        );
    }

    #[test]
    fn test_safe_client_disables_status_policy() {
        assert!(!Client::safe().raises_on_status());
    }

    #[test]
    fn test_builder_overrides_default_header() {
        let client = Client::builder()
            .default_header("Content-Type", "text/plain")
            .build();
        assert_eq!(client.default_headers()["Content-Type"], "text/plain");
        // Unrelated defaults survive.
        assert!(client.default_headers().contains_key("Accept"));
    }
}

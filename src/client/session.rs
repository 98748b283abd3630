//! Stateful session wrapper retaining the most recent request/response pair.
//!
//! A [`Session`] wraps a [`Client`] and records the descriptor and
//! normalized response of the last call that completed normalization. It is
//! deliberately caller-owned and `&mut self`: the caller that wants
//! last-call inspection also owns the serialization of calls, so there is no
//! shared mutable state and no overwrite race between concurrent calls.
//!
//! # Examples
//!
//! ```ignore
//! use reqkit::{Client, Session};
//!
//! #[tokio::main]
//! async fn main() -> reqkit::Result<()> {
//!     let mut session = Session::new(Client::safe());
//!     session.get("https://example.com/api/data").await?;
//!     println!("last status: {:?}", session.status_code());
//!     Ok(())
//! }
//! ```

use http::Method;

use crate::client::Client;
use crate::error::Result;
use crate::types::{CallDescriptor, NormalizedResponse, Payload, ResponseBody};

/// A [`Client`] plus the single most recent request/response pair.
///
/// Each completed call overwrites the pair; this is a last-call cache, not
/// per-call history.
#[derive(Clone)]
pub struct Session {
    client: Client,
    last: Option<(CallDescriptor, NormalizedResponse)>,
}

impl Session {
    /// Wrap a client. The session starts with no recorded call.
    pub fn new(client: Client) -> Self {
        Session { client, last: None }
    }

    /// Convenience constructor over [`Client::safe`], the configuration the
    /// stateful surface is typically used with.
    pub fn safe() -> Self {
        Session::new(Client::safe())
    }

    /// The wrapped client.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Make a GET request. Accepts a bare endpoint or a full
    /// [`CallDescriptor`]; the method and an empty body are applied over it.
    pub async fn get(&mut self, request: impl Into<CallDescriptor>) -> Result<NormalizedResponse> {
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
        &mut self,
        request: impl Into<CallDescriptor>,
        body: impl Into<Payload>,
    ) -> Result<NormalizedResponse> {
        self.call(request.into().with_method(Method::POST).with_body(body))
            .await
    }

    /// Make a PUT request with `body`. Accepts a bare endpoint or a full
    /// [`CallDescriptor`]; the method and body are applied over it.
    pub async fn put(
        &mut self,
        request: impl Into<CallDescriptor>,
        body: impl Into<Payload>,
    ) -> Result<NormalizedResponse> {
        self.call(request.into().with_method(Method::PUT).with_body(body))
            .await
    }

    /// Make a PATCH request with `body`. Accepts a bare endpoint or a full
    /// [`CallDescriptor`]; the method and body are applied over it.
    pub async fn patch(
        &mut self,
        request: impl Into<CallDescriptor>,
        body: impl Into<Payload>,
    ) -> Result<NormalizedResponse> {
        self.call(request.into().with_method(Method::PATCH).with_body(body))
            .await
    }

    /// Make a DELETE request. Accepts a bare endpoint or a full
    /// [`CallDescriptor`]; the method and an empty body are applied over it.
    pub async fn delete(
        &mut self,
        request: impl Into<CallDescriptor>,
    ) -> Result<NormalizedResponse> {
        self.call(
            request
                .into()
                .with_method(Method::DELETE)
                .with_body(Payload::Empty),
        )
        .await
    }

    /// Execute a fully described call, recording the pair on success.
    pub async fn call(&mut self, descriptor: CallDescriptor) -> Result<NormalizedResponse> {
        let result = self.client.call(descriptor.clone()).await;
        if let Ok(response) = &result {
            self.last = Some((descriptor, response.clone()));
        }
        result
    }

    /// The descriptor of the most recent successful call.
    pub fn last_request(&self) -> Option<&CallDescriptor> {
        self.last.as_ref().map(|(descriptor, _)| descriptor)
    }

    /// The normalized response of the most recent successful call.
    pub fn last_response(&self) -> Option<&NormalizedResponse> {
        self.last.as_ref().map(|(_, response)| response)
    }

    /// Status code of the most recent successful call.
    pub fn status_code(&self) -> Option<u16> {
        self.last_response().map(|response| response.status_code)
    }

    /// Parsed body of the most recent successful call.
    pub fn response_body(&self) -> Option<&ResponseBody> {
        self.last_response().map(|response| &response.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_has_no_history() {
        let session = Session::safe();
        assert!(session.last_request().is_none());
        assert!(session.last_response().is_none());
        assert!(session.status_code().is_none());
        assert!(session.response_body().is_none());
    }

    #[test]
    fn test_safe_session_uses_safe_client() {
        assert!(!Session::safe().client().raises_on_status());
    }
}

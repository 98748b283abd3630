//! Default transport backed by `reqwest`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::StreamExt;

use super::{RawResponse, Transport, TransportError};
use crate::types::ResolvedOptions;

/// Buffering transport over a shared [`reqwest::Client`].
///
/// One instance serves both protocol slots of a
/// [`Client`](crate::Client): the scheme in the resolved options decides
/// whether the connection is plaintext or TLS. The response body is
/// accumulated chunk by chunk until the stream signals completion; a
/// mid-stream error fails the dispatch with the underlying cause attached.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with a default `reqwest` client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport over a preconfigured `reqwest` client, for callers
    /// that need timeouts or TLS settings beyond the defaults.
    pub fn with_client(client: reqwest::Client) -> Self {
        ReqwestTransport { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn dispatch(
        &self,
        options: &ResolvedOptions,
        payload: Bytes,
    ) -> Result<RawResponse, TransportError> {
        let url = options.url();
        let mut builder = self.client.request(options.method.clone(), &url);
        for (name, value) in &options.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .body(payload)
            .send()
            .await
            .map_err(|e| TransportError::with_source(format!("request to {url} failed"), e))?;

        let status = response.status();
        let status_message = status.canonical_reason().unwrap_or_default().to_string();
        let http_version = format_version(response.version());

        let mut headers = BTreeMap::new();
        let mut raw_headers = Vec::with_capacity(response.headers().len() * 2);
        for (name, value) in response.headers() {
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            raw_headers.push(name.as_str().to_string());
            raw_headers.push(value.clone());
            headers.insert(name.as_str().to_string(), value);
        }

        let mut body = BytesMut::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk
                .map_err(|e| TransportError::with_source("response stream failed", e))?;
            body.extend_from_slice(&chunk);
        }

        Ok(RawResponse {
            status,
            status_message,
            http_version,
            headers,
            raw_headers,
            complete: true,
            aborted: false,
            body: body.freeze(),
        })
    }
}

/// Render an [`http::Version`] the way response records expose it, without
/// the `HTTP/` prefix.
fn format_version(version: http::Version) -> String {
    match version {
        http::Version::HTTP_09 => "0.9",
        http::Version::HTTP_10 => "1.0",
        http::Version::HTTP_11 => "1.1",
        http::Version::HTTP_2 => "2.0",
        http::Version::HTTP_3 => "3.0",
        _ => "1.1",
    }
    .to_string()
}

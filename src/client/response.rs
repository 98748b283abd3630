//! Response Normalizer: wraps a buffered [`RawResponse`] into a stable
//! [`NormalizedResponse`].
//!
//! Body decoding is graceful by design: a body that parses as JSON becomes a
//! structured value, anything else stays raw. Decode failure is never an
//! error path here; the `PARSE_ERROR` kind is reserved for a future
//! strict-decode mode.

use crate::transport::RawResponse;
use crate::types::{NormalizedResponse, OriginRequest, ResponseBody};

/// Normalize a raw transport response.
///
/// Transport metadata (`complete`, `aborted`, version, headers, status) is
/// copied verbatim; `origin` is attached for retry-by-reconstruction. Given
/// identical input, normalization produces identical output.
pub fn normalize(raw: RawResponse, origin: OriginRequest) -> NormalizedResponse {
    let body = match serde_json::from_slice::<serde_json::Value>(&raw.body) {
        Ok(value) => ResponseBody::Json(value),
        Err(_) => ResponseBody::Raw(raw.body.clone()),
    };

    NormalizedResponse {
        status_code: raw.status.as_u16(),
        status_message: raw.status_message,
        http_version: raw.http_version,
        headers: raw.headers,
        raw_headers: raw.raw_headers,
        complete: raw.complete,
        aborted: raw.aborted,
        body,
        raw_body: raw.body,
        origin_request: origin,
    }
}

//! Payload Serializer: converts a [`Payload`] into transmittable bytes.

use bytes::Bytes;

use crate::error::Result;
use crate::types::Payload;

/// Serialize a request body for transmission.
///
/// Byte payloads pass through unchanged, JSON values encode through
/// `serde_json`, text converts to its UTF-8 bytes, and [`Payload::Empty`]
/// yields zero bytes. The transport still writes the (empty) body, so
/// body-less verbs behave identically to an explicit empty string.
///
/// # Errors
///
/// [`Error::Serialize`](crate::Error::Serialize) when JSON encoding fails.
pub fn serialize(payload: &Payload) -> Result<Bytes> {
    match payload {
        Payload::Empty => Ok(Bytes::new()),
        Payload::Bytes(bytes) => Ok(bytes.clone()),
        Payload::Json(value) => Ok(Bytes::from(serde_json::to_vec(value)?)),
        Payload::Text(text) => Ok(Bytes::copy_from_slice(text.as_bytes())),
    }
}

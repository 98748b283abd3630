//! Case-insensitive response-header lookup and strict-mode validation.
//!
//! Transports are not guaranteed to normalize header-name case, so lookups
//! here always compare names ignoring ASCII case.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::protocol::JSON_CONTENT_TYPE;

/// Look up a header by name, ignoring ASCII case.
///
/// Returns the first value whose name matches; ordering follows the map's
/// iteration order when multiple casings of the same name are present.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use reqkit::protocol::find_header;
///
/// let headers = BTreeMap::from([("Content-Type".to_string(), "text/html".to_string())]);
/// assert_eq!(find_header(&headers, "content-type"), Some("text/html"));
/// assert_eq!(find_header(&headers, "accept"), None);
/// ```
pub fn find_header<'a>(headers: &'a BTreeMap<String, String>, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(header, _)| header.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// Enforce the strict-mode content-type contract.
///
/// No-op when `strict_mode` is `false`. Otherwise the response must carry a
/// content-type header whose value equals `application/json`, compared
/// ignoring ASCII case after trimming. A missing header fails too.
///
/// # Errors
///
/// Returns a `REQUEST_ERROR`-classified [`Error::Request`] on violation;
/// the same kind as a status-policy failure, distinguished by message.
pub fn validate_content_type(headers: &BTreeMap<String, String>, strict_mode: bool) -> Result<()> {
    if !strict_mode {
        return Ok(());
    }

    match find_header(headers, "content-type") {
        None => Err(Error::request(
            "strict mode: response has no content-type header",
        )),
        Some(value) if value.trim().eq_ignore_ascii_case(JSON_CONTENT_TYPE) => Ok(()),
        Some(value) => Err(Error::request(format!(
            "strict mode: expected content-type `{JSON_CONTENT_TYPE}`, got `{value}`"
        ))),
    }
}

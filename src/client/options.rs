//! Options Builder: turns a [`CallDescriptor`] into transport-ready
//! [`ResolvedOptions`].
//!
//! Pure functions, no I/O. Resolution covers four concerns:
//!
//! 1. **Endpoint normalization**: a bare endpoint (no `http://` or
//!    `https://` prefix) defaults to plaintext HTTP before URL parsing.
//! 2. **Path resolution**: the caller-supplied path template wins when
//!    non-empty; otherwise the endpoint's own path (percent-decoded) is
//!    used. Leading slashes are stripped before the final absolute path is
//!    assembled.
//! 3. **Placeholder substitution**: every `{name}` occurrence in the chosen
//!    path is replaced from `path_params`. Placeholders with no matching
//!    entry stay literal in the path.
//! 4. **Query resolution**: non-empty `query_params` serialize to the query
//!    string, fully replacing any query embedded in the endpoint; with no
//!    `query_params`, the endpoint's own query is kept.
//!
//! # Examples
//!
//! ```
//! use reqkit::client::resolve;
//! use reqkit::{CallDescriptor, Protocol};
//! use std::collections::BTreeMap;
//!
//! let descriptor = CallDescriptor::new("test.com");
//! let options = resolve(&descriptor, BTreeMap::new()).unwrap();
//! assert_eq!(options.protocol, Protocol::Http);
//! assert_eq!(options.host, "test.com");
//! assert_eq!(options.path, "/");
//! ```

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use percent_encoding::percent_decode_str;
use regex::{Captures, Regex};
use url::Url;

use crate::error::{Error, Result};
use crate::types::{CallDescriptor, Protocol, ResolvedOptions};

/// Resolve a descriptor plus already-merged headers into transport options.
///
/// Headers are passed through unchanged; merging over defaults is the
/// orchestrator's job, done before resolution.
///
/// # Errors
///
/// [`Error::InvalidEndpoint`] when the (normalized) endpoint does not parse
/// as a URL; [`Error::UnsupportedProtocol`] when its scheme is neither
/// `http` nor `https`.
pub fn resolve(
    descriptor: &CallDescriptor,
    headers: BTreeMap<String, String>,
) -> Result<ResolvedOptions> {
    let formatted = format_endpoint(&descriptor.endpoint);
    let url = Url::parse(&formatted).map_err(|source| Error::InvalidEndpoint {
        endpoint: descriptor.endpoint.clone(),
        source,
    })?;

    let protocol = Protocol::from_scheme(url.scheme())
        .ok_or_else(|| Error::UnsupportedProtocol(url.scheme().to_string()))?;
    let host = url
        .host_str()
        .ok_or_else(|| Error::InvalidEndpoint {
            endpoint: descriptor.endpoint.clone(),
            source: url::ParseError::EmptyHost,
        })?
        .to_string();

    let path = resolve_path(descriptor, &url);

    Ok(ResolvedOptions {
        protocol,
        host,
        port: url.port(),
        method: descriptor.method.clone(),
        path,
        headers,
    })
}

/// Prefix a bare endpoint with the plaintext scheme so it parses as a URL.
fn format_endpoint(endpoint: &str) -> String {
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        endpoint.to_string()
    } else {
        format!("http://{endpoint}")
    }
}

/// Assemble the absolute request path: template substitution plus query.
fn resolve_path(descriptor: &CallDescriptor, url: &Url) -> String {
    let endpoint_path = percent_decode_str(url.path().trim_start_matches('/'))
        .decode_utf8_lossy()
        .into_owned();
    let caller_path = descriptor.path.trim_start_matches('/');

    let template = if caller_path.is_empty() {
        endpoint_path.as_str()
    } else {
        caller_path
    };
    let path = substitute_placeholders(template, &descriptor.path_params);

    let query = if descriptor.query_params.is_empty() {
        url.query().unwrap_or_default().to_string()
    } else {
        serialize_query(&descriptor.query_params)
    };

    if query.is_empty() {
        format!("/{path}")
    } else {
        format!("/{path}?{query}")
    }
}

fn placeholder_pattern() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{([^{}]+)\}").expect("valid pattern"))
}

/// Replace every `{name}` occurrence with its mapped value.
///
/// Any brace-delimited name is a placeholder; names absent from `params`
/// are left literally in the path, so substitution never invents an empty
/// segment.
fn substitute_placeholders(template: &str, params: &HashMap<String, String>) -> String {
    placeholder_pattern()
        .replace_all(template, |caps: &Captures<'_>| match params.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Serialize query parameters in insertion order, form-urlencoded.
fn serialize_query(params: &[(String, String)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .finish()
}

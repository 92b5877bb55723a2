//! Request target assembly.
//!
//! Host and scheme come from headers set by the routing layer, never from
//! the envelope's own fields. The assembled string is validated by
//! [`http::Uri`]; anything it rejects means the envelope was corrupt.

use std::borrow::Cow;

use http::Uri;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::config::BridgeConfig;
use crate::error::{BridgeError, BridgeResult};
use crate::header::HeaderMap;

/// Build the request URL from already-encoded path and query components.
///
/// - scheme: `forwarded_proto_header`, else `default_scheme`
/// - host: `host_header`; when absent the result is origin-form (`/path?query`)
/// - an empty path becomes `/`, and a missing leading slash is added
/// - an empty query adds no `?`
pub fn build_uri(
    config: &BridgeConfig,
    headers: &HeaderMap,
    encoded_path: &str,
    encoded_query: &str,
) -> BridgeResult<Uri> {
    let mut target = String::with_capacity(encoded_path.len() + encoded_query.len() + 32);

    if let Some(host) = non_empty(headers.get(&config.host_header)) {
        let scheme = non_empty(headers.get(&config.forwarded_proto_header))
            .unwrap_or(&config.default_scheme);
        target.push_str(scheme);
        target.push_str("://");
        target.push_str(host);
    }

    if !encoded_path.starts_with('/') {
        target.push('/');
    }
    target.push_str(encoded_path);

    if !encoded_query.is_empty() {
        target.push('?');
        target.push_str(encoded_query);
    }

    Uri::try_from(target.as_str()).map_err(|source| BridgeError::InvalidUri {
        uri: target,
        source,
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Bytes [`Uri`] refuses in a path, plus `?` and `#` which would split it.
/// `%` is absent so existing escapes survive.
const RAW_PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`');

/// Bytes [`Uri`] refuses in a query, plus `#` which would end it.
const RAW_QUERY: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>');

/// Make a caller-supplied, already-encoded path acceptable to [`Uri`].
///
/// Only bytes a request target cannot carry are escaped; a path that is
/// already valid comes back borrowed and unchanged. Non-ASCII is always
/// escaped as UTF-8.
pub fn escape_raw_path(path: &str) -> Cow<'_, str> {
    utf8_percent_encode(path, RAW_PATH).into()
}

/// Query counterpart of [`escape_raw_path`].
pub fn escape_raw_query(query: &str) -> Cow<'_, str> {
    utf8_percent_encode(query, RAW_QUERY).into()
}

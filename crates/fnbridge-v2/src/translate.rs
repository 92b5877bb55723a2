//! Payload v2 translation rules.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use fnbridge_core::target::{build_uri, escape_raw_path, escape_raw_query};
use fnbridge_core::{
    Body, BridgeConfig, BridgeResult, CollectedResponse, HeaderMap, InvocationContext, Request,
    Translator,
};
use tracing::warn;

use crate::envelope::{HttpApiRequest, HttpApiResponse};
use crate::observer::EnvelopeObserver;

/// Header name cookies from the envelope's cookie list are appended under.
const COOKIE: &str = "cookie";

/// Translator for HTTP API (payload format 2.0) envelopes.
#[derive(Clone, Default)]
pub struct HttpApiTranslator {
    config: BridgeConfig,
    observer: Option<Arc<dyn EnvelopeObserver>>,
}

impl HttpApiTranslator {
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            config,
            observer: None,
        }
    }

    /// Attach a hook that sees every raw envelope before translation.
    pub fn with_observer(mut self, observer: Arc<dyn EnvelopeObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }
}

impl fmt::Debug for HttpApiTranslator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpApiTranslator")
            .field("config", &self.config)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl Translator for HttpApiTranslator {
    type Inbound = HttpApiRequest;
    type Outbound = HttpApiResponse;

    fn name(&self) -> &'static str {
        "v2"
    }

    fn parse(&self, inbound: &HttpApiRequest, ctx: &InvocationContext) -> BridgeResult<Request> {
        if let Some(observer) = &self.observer {
            observer.observe(inbound);
        }

        let mut headers = HeaderMap::from_single_valued(&inbound.headers);

        let metadata = &self.config.metadata;
        if metadata.synthetic_headers {
            if ctx.is_empty() {
                warn!("no invocation context; synthetic metadata headers will be empty");
            }
            headers.set(metadata.request_id_header.as_str(), ctx.request_id.as_str());
            headers.set(
                metadata.function_arn_header.as_str(),
                ctx.invoked_function_arn.as_str(),
            );
        }

        for cookie in &inbound.cookies {
            headers.append(COOKIE, cookie.as_str());
        }

        // Path and query arrive encoded; only bytes a request target cannot
        // hold are escaped, existing %XX sequences are left alone.
        let uri = build_uri(
            &self.config,
            &headers,
            &escape_raw_path(&inbound.raw_path),
            &escape_raw_query(&inbound.raw_query_string),
        )?;

        Request::builder()
            .method(inbound.request_context.http.method.as_str())
            .uri(uri)
            .headers(headers)
            .body(Body::from_envelope(&inbound.body, inbound.is_base64_encoded))
            .remote_addr(inbound.request_context.http.source_ip.as_str())
            .extension(ctx.clone())
            .extension(Arc::new(inbound.clone()))
            .build()
    }

    fn serialize(&self, response: CollectedResponse) -> HttpApiResponse {
        let headers: BTreeMap<String, String> = response
            .headers
            .grouped()
            .into_iter()
            .map(|(name, values)| (name.to_string(), values.join(",")))
            .collect();

        HttpApiResponse {
            status_code: response.status,
            headers,
            body: STANDARD.encode(&response.body),
            is_base64_encoded: true,
        }
    }
}

/// The raw v2 envelope a request was built from.
///
/// Only requests produced by [`HttpApiTranslator`] carry one.
pub fn envelope_from_request(req: &Request) -> Option<&HttpApiRequest> {
    req.extensions()
        .get::<Arc<HttpApiRequest>>()
        .map(|envelope| envelope.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(headers: &[(&str, &str)], body: &'static [u8]) -> CollectedResponse {
        CollectedResponse {
            status: 200,
            headers: headers
                .iter()
                .map(|(n, v)| (n.to_string(), v.to_string()))
                .collect(),
            body: body.into(),
        }
    }

    #[test]
    fn repeated_headers_are_joined_with_comma() {
        let out = HttpApiTranslator::default().serialize(response(&[("X", "1"), ("X", "2")], b""));
        assert_eq!(out.headers["X"], "1,2");
        assert_eq!(out.headers.len(), 1);
    }

    #[test]
    fn body_is_always_base64() {
        let out = HttpApiTranslator::default()
            .serialize(response(&[("Content-Type", "text/plain")], b"hi"));
        assert_eq!(out.body, "aGk=");
        assert!(out.is_base64_encoded);
    }

    #[test]
    fn empty_body_is_flagged_base64() {
        let out = HttpApiTranslator::default().serialize(response(&[], b""));
        assert_eq!(out.body, "");
        assert!(out.is_base64_encoded);
    }

    #[test]
    fn debug_reports_observer_presence() {
        let t = HttpApiTranslator::default().with_observer(Arc::new(|_: &HttpApiRequest| {}));
        assert!(format!("{t:?}").contains("observer: true"));
    }
}

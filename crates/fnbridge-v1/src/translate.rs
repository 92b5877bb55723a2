//! Payload v1 translation rules.

use std::collections::{BTreeMap, HashMap};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use fnbridge_core::target::build_uri;
use fnbridge_core::{
    Body, BridgeConfig, BridgeResult, CollectedResponse, HeaderMap, InvocationContext, Request,
    Translator,
};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use tracing::trace;

use crate::envelope::{ProxyRequest, ProxyResponse};

/// Characters escaped when the decoded `path` is turned into a request target.
const PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Translator for REST proxy (payload format 1.0) envelopes.
#[derive(Debug, Clone, Default)]
pub struct ProxyTranslator {
    config: BridgeConfig,
}

impl ProxyTranslator {
    pub fn new(config: BridgeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }
}

impl Translator for ProxyTranslator {
    type Inbound = ProxyRequest;
    type Outbound = ProxyResponse;

    fn name(&self) -> &'static str {
        "v1"
    }

    fn parse(&self, inbound: &ProxyRequest, _ctx: &InvocationContext) -> BridgeResult<Request> {
        let headers = HeaderMap::from_single_valued(&inbound.headers);
        let uri = build_uri(
            &self.config,
            &headers,
            &encode_path(&inbound.path),
            &encode_query(&inbound.query_string_parameters),
        )?;

        Request::builder()
            .method(inbound.http_method.as_str())
            .uri(uri)
            .headers(headers)
            .body(Body::from_envelope(&inbound.body, inbound.is_base64_encoded))
            .remote_addr(inbound.request_context.identity.source_ip.as_str())
            .build()
    }

    fn serialize(&self, response: CollectedResponse) -> ProxyResponse {
        let multi_value_headers: BTreeMap<String, Vec<String>> = response
            .headers
            .grouped()
            .into_iter()
            .map(|(name, values)| {
                (
                    name.to_string(),
                    values.into_iter().map(str::to_string).collect(),
                )
            })
            .collect();

        // Text only when the handler declared a textual type and the bytes
        // are valid UTF-8; anything else must survive as base64.
        let content_type = response.content_type().unwrap_or_default();
        let text = if self.config.is_text_content_type(content_type) {
            std::str::from_utf8(&response.body).ok()
        } else {
            None
        };

        trace!(
            content_type,
            as_text = text.is_some(),
            "encoding v1 response body"
        );

        let (body, is_base64_encoded) = match text {
            Some(text) => (text.to_string(), false),
            None => (STANDARD.encode(&response.body), true),
        };

        ProxyResponse {
            status_code: response.status,
            headers: BTreeMap::new(),
            multi_value_headers,
            body,
            is_base64_encoded,
        }
    }
}

/// Encode query parameters as `application/x-www-form-urlencoded`, keys sorted.
pub fn encode_query(params: &HashMap<String, String>) -> String {
    let sorted: BTreeMap<&str, &str> = params
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();

    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(sorted)
        .finish()
}

/// Percent-encode a decoded path for use in a request target.
pub fn encode_path(path: &str) -> String {
    utf8_percent_encode(path, PATH).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn query_is_sorted_and_joined() {
        assert_eq!(encode_query(&params(&[("b", "2"), ("a", "1")])), "a=1&b=2");
    }

    #[test]
    fn query_values_are_escaped() {
        let q = encode_query(&params(&[("q", "a b&c=d"), ("name", "José")]));
        assert_eq!(q, "name=Jos%C3%A9&q=a+b%26c%3Dd");
    }

    #[test]
    fn empty_query_is_empty() {
        assert_eq!(encode_query(&HashMap::new()), "");
    }

    #[test]
    fn path_keeps_separators() {
        assert_eq!(encode_path("/users/42/posts"), "/users/42/posts");
        assert_eq!(encode_path("/a:b/c;d=e"), "/a:b/c;d=e");
    }

    #[test]
    fn path_escapes_reserved_and_unicode() {
        assert_eq!(encode_path("/hello world"), "/hello%20world");
        assert_eq!(encode_path("/100%/x?y"), "/100%25/x%3Fy");
        assert_eq!(encode_path("/café"), "/caf%C3%A9");
    }

    #[test]
    fn serialize_text_body_from_real_content_type() {
        let mut headers = HeaderMap::new();
        headers.append("Content-Type", "text/plain");
        let out = ProxyTranslator::default().serialize(CollectedResponse {
            status: 200,
            headers,
            body: "hi".into(),
        });
        assert_eq!(out.body, "hi");
        assert!(!out.is_base64_encoded);
    }

    #[test]
    fn serialize_invalid_utf8_text_falls_back_to_base64() {
        let mut headers = HeaderMap::new();
        headers.append("Content-Type", "text/plain");
        let out = ProxyTranslator::default().serialize(CollectedResponse {
            status: 200,
            headers,
            body: vec![0xff, 0xfe].into(),
        });
        assert_eq!(out.body, "//4=");
        assert!(out.is_base64_encoded);
    }
}

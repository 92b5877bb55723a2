//! Adapter entry point.
//!
//! An [`Adapter`] runs one invocation end to end:
//!
//! ```text
//! &Inbound ──parse──▶ Request ──Handler::serve──▶ ResponseCollector ──serialize──▶ Outbound
//! ```
//!
//! Everything that differs between envelope schema versions sits behind
//! [`Translator`]; the pipeline itself is shared.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::context::InvocationContext;
use crate::error::BridgeResult;
use crate::handler::Handler;
use crate::request::Request;
use crate::response::{CollectedResponse, ResponseCollector};

/// Parsing and serialization rules for one envelope schema version.
pub trait Translator {
    /// Envelope delivered by the routing layer.
    type Inbound: DeserializeOwned;
    /// Envelope returned to the routing layer.
    type Outbound: Serialize;

    /// Short name used in logs, e.g. `"v1"`.
    fn name(&self) -> &'static str;

    /// Build the canonical request. Must not mutate the envelope.
    fn parse(&self, inbound: &Self::Inbound, ctx: &InvocationContext) -> BridgeResult<Request>;

    /// Encode a finished response. Total: never fails.
    fn serialize(&self, response: CollectedResponse) -> Self::Outbound;
}

/// Envelope-to-handler bridge for a single schema version.
///
/// Holds no per-invocation state, so one adapter can serve any number of
/// invocations (concurrently, if `T` and `H` are `Sync`).
pub struct Adapter<T, H> {
    translator: T,
    handler: H,
}

impl<T, H> Adapter<T, H>
where
    T: Translator,
    H: Handler,
{
    pub fn new(translator: T, handler: H) -> Self {
        Self {
            translator,
            handler,
        }
    }

    pub fn translator(&self) -> &T {
        &self.translator
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Run one invocation.
    ///
    /// A parse error aborts the invocation before the handler runs; no
    /// partial envelope is ever returned.
    pub fn invoke(
        &self,
        inbound: &T::Inbound,
        ctx: &InvocationContext,
    ) -> BridgeResult<T::Outbound> {
        let request = self.translator.parse(inbound, ctx)?;

        debug!(
            variant = self.translator.name(),
            method = %request.method(),
            uri = %request.uri(),
            remote_addr = request.remote_addr(),
            request_id = %ctx.request_id,
            "translated inbound envelope"
        );

        let mut collector = ResponseCollector::new();
        self.handler.serve(request, &mut collector);
        let response = collector.into_response();

        trace!(
            variant = self.translator.name(),
            status = response.status,
            headers = response.headers.len(),
            body_len = response.body.len(),
            "handler returned"
        );

        Ok(self.translator.serialize(response))
    }

    /// Run one invocation from a raw JSON payload.
    ///
    /// Returns the outbound envelope as JSON. Malformed payloads fail with
    /// [`BridgeError::Envelope`](crate::BridgeError::Envelope).
    pub fn invoke_json(
        &self,
        payload: &[u8],
        ctx: &InvocationContext,
    ) -> BridgeResult<serde_json::Value> {
        let inbound: T::Inbound = serde_json::from_slice(payload)?;
        let outbound = self.invoke(&inbound, ctx)?;
        Ok(serde_json::to_value(outbound)?)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::io::Read;

    use serde::Deserialize;

    use super::*;
    use crate::body::Body;
    use crate::error::BridgeError;
    use crate::header::HeaderMap;
    use crate::target::build_uri;
    use crate::BridgeConfig;

    #[derive(Deserialize)]
    struct TestEnvelope {
        method: String,
        path: String,
        body: String,
    }

    #[derive(Debug, Serialize, PartialEq)]
    struct TestOutbound {
        status: u16,
        body: String,
    }

    struct TestTranslator;

    impl Translator for TestTranslator {
        type Inbound = TestEnvelope;
        type Outbound = TestOutbound;

        fn name(&self) -> &'static str {
            "test"
        }

        fn parse(&self, inbound: &TestEnvelope, ctx: &InvocationContext) -> BridgeResult<Request> {
            let headers = HeaderMap::new();
            let uri = build_uri(&BridgeConfig::default(), &headers, &inbound.path, "")?;
            Request::builder()
                .method(inbound.method.as_str())
                .uri(uri)
                .headers(headers)
                .body(Body::text(inbound.body.clone()))
                .extension(ctx.clone())
                .build()
        }

        fn serialize(&self, response: CollectedResponse) -> TestOutbound {
            TestOutbound {
                status: response.status,
                body: String::from_utf8_lossy(&response.body).into_owned(),
            }
        }
    }

    fn upper(mut req: Request, resp: &mut ResponseCollector) {
        let mut body = String::new();
        req.body_mut().read_to_string(&mut body).unwrap();
        resp.set_status(201);
        resp.write(body.to_uppercase().as_bytes());
    }

    #[test]
    fn invoke_runs_full_pipeline() {
        let adapter = Adapter::new(TestTranslator, upper);
        let inbound = TestEnvelope {
            method: "POST".into(),
            path: "/shout".into(),
            body: "hi".into(),
        };

        let out = adapter.invoke(&inbound, &InvocationContext::default()).unwrap();
        assert_eq!(
            out,
            TestOutbound {
                status: 201,
                body: "HI".into()
            }
        );
    }

    #[test]
    fn default_status_is_200() {
        let adapter = Adapter::new(TestTranslator, |_req: Request, _resp: &mut ResponseCollector| {});
        let inbound = TestEnvelope {
            method: "GET".into(),
            path: "/".into(),
            body: String::new(),
        };
        let out = adapter.invoke(&inbound, &InvocationContext::default()).unwrap();
        assert_eq!(out.status, 200);
    }

    #[test]
    fn parse_failure_skips_handler() {
        let called = Cell::new(false);
        let adapter = Adapter::new(TestTranslator, |_req: Request, _resp: &mut ResponseCollector| {
            called.set(true)
        });
        let inbound = TestEnvelope {
            method: "BAD METHOD".into(),
            path: "/".into(),
            body: String::new(),
        };

        let err = adapter
            .invoke(&inbound, &InvocationContext::default())
            .unwrap_err();
        assert!(matches!(err, BridgeError::InvalidMethod(_)));
        assert!(!called.get());
    }

    #[test]
    fn handler_sees_invocation_context() {
        let seen = Cell::new(false);
        let adapter = Adapter::new(TestTranslator, |req: Request, _resp: &mut ResponseCollector| {
            seen.set(req.invocation().map(|c| c.request_id.as_str()) == Some("req-9"));
        });
        let inbound = TestEnvelope {
            method: "GET".into(),
            path: "/".into(),
            body: String::new(),
        };
        adapter
            .invoke(&inbound, &InvocationContext::new("req-9", "arn"))
            .unwrap();
        assert!(seen.get());
    }

    #[test]
    fn invoke_json_round_trip() {
        let adapter = Adapter::new(TestTranslator, upper);
        let out = adapter
            .invoke_json(
                br#"{"method":"PUT","path":"/x","body":"abc"}"#,
                &InvocationContext::default(),
            )
            .unwrap();
        assert_eq!(out["status"], 201);
        assert_eq!(out["body"], "ABC");
    }

    #[test]
    fn invoke_json_rejects_malformed_payload() {
        let adapter = Adapter::new(TestTranslator, upper);
        let err = adapter
            .invoke_json(b"{not json", &InvocationContext::default())
            .unwrap_err();
        assert!(matches!(err, BridgeError::Envelope(_)));
    }
}

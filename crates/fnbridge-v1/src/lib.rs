//! fnbridge-v1 — REST proxy (payload format 1.0) envelopes.
//!
//! Inbound: method, decoded path, single-valued headers and query
//! parameters, body string with a base64 flag, and the caller's source IP
//! under `requestContext.identity`.
//!
//! Outbound: headers go out multi-valued. The body is literal text when the
//! handler's `Content-Type` is textual and otherwise base64.

pub mod envelope;
pub mod translate;

use fnbridge_core::{Adapter, BridgeConfig, Handler};

pub use envelope::{ProxyRequest, ProxyRequestContext, ProxyResponse, RequestIdentity};
pub use translate::ProxyTranslator;

/// Adapter for v1 envelopes with the default configuration.
pub fn adapter<H: Handler>(handler: H) -> Adapter<ProxyTranslator, H> {
    Adapter::new(ProxyTranslator::default(), handler)
}

/// Adapter for v1 envelopes with an explicit configuration.
pub fn adapter_with_config<H: Handler>(
    config: BridgeConfig,
    handler: H,
) -> Adapter<ProxyTranslator, H> {
    Adapter::new(ProxyTranslator::new(config), handler)
}

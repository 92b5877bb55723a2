//! fnbridge-v2 — HTTP API (payload format 2.0) envelopes.
//!
//! Inbound differences from v1:
//! - the method lives under `requestContext.http`
//! - `rawPath` / `rawQueryString` are passed through as already encoded;
//!   only bytes a request target cannot hold get escaped
//! - cookies arrive as a list and are appended as separate `cookie` headers
//! - the invocation context (request id, function ARN) is propagated as
//!   synthetic headers and as a request extension
//!
//! Outbound, headers are flattened to one comma-joined value per name and
//! the body is always base64.

pub mod envelope;
pub mod observer;
pub mod translate;

use fnbridge_core::{Adapter, BridgeConfig, Handler};

pub use envelope::{HttpApiRequest, HttpApiRequestContext, HttpApiResponse, HttpDescription};
pub use observer::{EnvelopeObserver, TracingObserver};
pub use translate::{HttpApiTranslator, envelope_from_request};

/// Adapter for v2 envelopes with the default configuration and no observer.
pub fn adapter<H: Handler>(handler: H) -> Adapter<HttpApiTranslator, H> {
    Adapter::new(HttpApiTranslator::default(), handler)
}

/// Adapter for v2 envelopes with an explicit configuration.
pub fn adapter_with_config<H: Handler>(
    config: BridgeConfig,
    handler: H,
) -> Adapter<HttpApiTranslator, H> {
    Adapter::new(HttpApiTranslator::new(config), handler)
}

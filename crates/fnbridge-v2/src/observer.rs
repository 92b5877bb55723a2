//! Pre-translation observation hook.
//!
//! An observer sees the raw inbound envelope before it is translated. It is
//! handed to [`HttpApiTranslator::with_observer`](crate::HttpApiTranslator::with_observer)
//! once, at construction, and is only ever read afterwards. It cannot
//! change what the adapter does.

use crate::envelope::HttpApiRequest;

pub trait EnvelopeObserver: Send + Sync {
    fn observe(&self, envelope: &HttpApiRequest);
}

impl<F> EnvelopeObserver for F
where
    F: Fn(&HttpApiRequest) + Send + Sync,
{
    fn observe(&self, envelope: &HttpApiRequest) {
        self(envelope)
    }
}

/// Observer that logs the envelope's routing identity at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl EnvelopeObserver for TracingObserver {
    fn observe(&self, envelope: &HttpApiRequest) {
        tracing::debug!(
            route_key = %envelope.route_key,
            raw_path = %envelope.raw_path,
            request_id = %envelope.request_context.request_id,
            stage = %envelope.request_context.stage,
            cookies = envelope.cookies.len(),
            is_base64_encoded = envelope.is_base64_encoded,
            "inbound v2 envelope"
        );
    }
}

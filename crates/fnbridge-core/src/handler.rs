//! The request-processing contract the adapter drives.

use crate::request::Request;
use crate::response::ResponseCollector;

/// A synchronous request handler.
///
/// The adapter calls [`serve`](Handler::serve) exactly once per invocation.
/// Whatever the handler leaves in the collector when it returns is the
/// response; there is no separate error channel. A handler that fails
/// should set an error status itself.
pub trait Handler {
    fn serve(&self, req: Request, resp: &mut ResponseCollector);
}

impl<F> Handler for F
where
    F: Fn(Request, &mut ResponseCollector),
{
    fn serve(&self, req: Request, resp: &mut ResponseCollector) {
        self(req, resp)
    }
}

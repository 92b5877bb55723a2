//! Built-in handlers for `fnbridge replay`.

use std::io::Read;

use fnbridge_core::{Request, ResponseCollector};
use serde_json::json;
use tracing::warn;

use crate::HandlerKind;

pub type HandlerFn = fn(Request, &mut ResponseCollector);

pub fn select(kind: HandlerKind) -> HandlerFn {
    match kind {
        HandlerKind::Echo => echo,
        HandlerKind::Inspect => inspect,
    }
}

/// Return the request body unchanged, with the request's content type.
pub fn echo(mut req: Request, resp: &mut ResponseCollector) {
    let content_type = req
        .headers()
        .get("Content-Type")
        .unwrap_or("application/octet-stream")
        .to_string();

    let mut body = Vec::new();
    if let Err(e) = req.body_mut().read_to_end(&mut body) {
        warn!(error = %e, "failed to read request body");
        resp.set_status(400);
        resp.headers_mut().set("Content-Type", "text/plain");
        resp.write(format!("unreadable body: {e}").as_bytes());
        return;
    }

    resp.headers_mut().set("Content-Type", content_type);
    resp.write(&body);
}

/// Describe the canonical request as JSON.
pub fn inspect(mut req: Request, resp: &mut ResponseCollector) {
    let headers: Vec<[&str; 2]> = req
        .headers()
        .iter()
        .map(|h| [h.name.as_str(), h.value.as_str()])
        .collect();
    let mut report = json!({
        "method": req.method().as_str(),
        "uri": req.uri().to_string(),
        "remote_addr": req.remote_addr(),
        "headers": headers,
        "invocation": req.invocation(),
    });

    let mut body = Vec::new();
    match req.body_mut().read_to_end(&mut body) {
        Ok(len) => report["body_len"] = json!(len),
        Err(e) => report["body_error"] = json!(e.to_string()),
    }

    resp.headers_mut().set("Content-Type", "application/json");
    resp.write(report.to_string().as_bytes());
}

use std::io;

use bytes::{Bytes, BytesMut};

use crate::header::HeaderMap;

/// The sink a handler writes its response into.
///
/// Starts as `200` with no headers and an empty body. The collector accepts
/// any status and any header value; it validates nothing. Once the handler
/// returns, the adapter consumes it with
/// [`into_response`](ResponseCollector::into_response), so no write can
/// land after serialization.
#[derive(Debug)]
pub struct ResponseCollector {
    status: u16,
    headers: HeaderMap,
    body: BytesMut,
}

impl ResponseCollector {
    pub fn new() -> Self {
        Self {
            status: 200,
            headers: HeaderMap::new(),
            body: BytesMut::new(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn set_status(&mut self, status: u16) {
        self.status = status;
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Append raw bytes to the body.
    pub fn write(&mut self, data: &[u8]) {
        self.body.extend_from_slice(data);
    }

    /// Body bytes written so far.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn into_response(self) -> CollectedResponse {
        CollectedResponse {
            status: self.status,
            headers: self.headers,
            body: self.body.freeze(),
        }
    }
}

impl Default for ResponseCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl io::Write for ResponseCollector {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        ResponseCollector::write(self, buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A finished response, ready for an envelope serializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl CollectedResponse {
    /// The first `Content-Type` value the handler set, if any.
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("Content-Type")
    }
}

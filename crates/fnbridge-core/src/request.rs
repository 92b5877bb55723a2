use http::{Extensions, Method, Uri};

use crate::body::Body;
use crate::context::InvocationContext;
use crate::error::{BridgeError, BridgeResult};
use crate::header::HeaderMap;

/// The canonical, envelope-independent view of one inbound call.
///
/// Built once per invocation by a [`Translator`](crate::Translator) and
/// handed to the handler by value. Per-invocation metadata that does not
/// fit the HTTP model (the invocation context, the raw envelope) travels in
/// typed [`extensions`](Request::extensions).
#[derive(Debug)]
pub struct Request {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Body,
    remote_addr: String,
    extensions: Extensions,
}

impl Request {
    pub fn builder() -> RequestBuilder {
        RequestBuilder::default()
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Source address of the original caller, as reported by the routing layer.
    pub fn remote_addr(&self) -> &str {
        &self.remote_addr
    }

    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    pub fn into_body(self) -> Body {
        self.body
    }

    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    pub fn extensions_mut(&mut self) -> &mut Extensions {
        &mut self.extensions
    }

    /// The invocation context, when the translator propagated one.
    pub fn invocation(&self) -> Option<&InvocationContext> {
        self.extensions.get::<InvocationContext>()
    }
}

/// Builder for [`Request`].
///
/// Method and target errors are deferred to [`build`](RequestBuilder::build).
#[derive(Debug, Default)]
pub struct RequestBuilder {
    method: String,
    uri: Option<Uri>,
    headers: HeaderMap,
    body: Body,
    remote_addr: String,
    extensions: Extensions,
}

impl RequestBuilder {
    /// Request method token. An empty method means `GET`.
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn uri(mut self, uri: Uri) -> Self {
        self.uri = Some(uri);
        self
    }

    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }

    pub fn remote_addr(mut self, remote_addr: impl Into<String>) -> Self {
        self.remote_addr = remote_addr.into();
        self
    }

    pub fn extension<T>(mut self, value: T) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        self.extensions.insert(value);
        self
    }

    pub fn build(self) -> BridgeResult<Request> {
        let method = if self.method.is_empty() {
            Method::GET
        } else {
            Method::from_bytes(self.method.as_bytes())
                .map_err(|_| BridgeError::InvalidMethod(self.method.clone()))?
        };

        Ok(Request {
            method,
            uri: self.uri.unwrap_or_else(|| Uri::from_static("/")),
            headers: self.headers,
            body: self.body,
            remote_addr: self.remote_addr,
            extensions: self.extensions,
        })
    }
}

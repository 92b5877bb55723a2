//! Request body reader.
//!
//! Envelopes carry the body as a string. When the envelope's base64 flag is
//! set the string is decoded on read through [`base64::read::DecoderReader`],
//! so the decoded body is never materialized unless the handler asks for it
//! all at once.

use std::fmt;
use std::io::{self, Cursor, Read};

use base64::engine::GeneralPurpose;
use base64::engine::general_purpose::STANDARD;
use base64::read::DecoderReader;
use bytes::Bytes;

static BASE64: GeneralPurpose = STANDARD;

/// A pull-based request body.
///
/// Implements [`std::io::Read`]. Base64 decode failures surface as
/// [`io::ErrorKind::InvalidData`] from `read`.
pub struct Body {
    inner: BodyInner,
}

enum BodyInner {
    Empty,
    Text(Cursor<Bytes>),
    Base64(DecoderReader<'static, GeneralPurpose, Cursor<Bytes>>),
}

impl Body {
    pub fn empty() -> Self {
        Self {
            inner: BodyInner::Empty,
        }
    }

    /// A body whose bytes are used as-is.
    pub fn text(data: impl Into<Bytes>) -> Self {
        let data = data.into();
        if data.is_empty() {
            return Self::empty();
        }
        Self {
            inner: BodyInner::Text(Cursor::new(data)),
        }
    }

    /// A body holding standard-alphabet base64, decoded lazily on read.
    pub fn base64(encoded: impl Into<Bytes>) -> Self {
        let encoded = encoded.into();
        if encoded.is_empty() {
            return Self::empty();
        }
        Self {
            inner: BodyInner::Base64(DecoderReader::new(Cursor::new(encoded), &BASE64)),
        }
    }

    /// Pick [`Body::base64`] or [`Body::text`] from an envelope's flag.
    pub fn from_envelope(body: &str, is_base64_encoded: bool) -> Self {
        let data = Bytes::copy_from_slice(body.as_bytes());
        if is_base64_encoded {
            Self::base64(data)
        } else {
            Self::text(data)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.inner, BodyInner::Empty)
    }

    pub fn is_base64(&self) -> bool {
        matches!(self.inner, BodyInner::Base64(_))
    }

    /// Read the remainder of the body into one buffer.
    pub fn read_to_bytes(&mut self) -> io::Result<Bytes> {
        let mut buf = Vec::new();
        self.read_to_end(&mut buf)?;
        Ok(Bytes::from(buf))
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::empty()
    }
}

impl Read for Body {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match &mut self.inner {
            BodyInner::Empty => Ok(0),
            BodyInner::Text(cursor) => cursor.read(buf),
            BodyInner::Base64(decoder) => decoder.read(buf),
        }
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.inner {
            BodyInner::Empty => "empty",
            BodyInner::Text(_) => "text",
            BodyInner::Base64(_) => "base64",
        };
        f.debug_struct("Body").field("kind", &kind).finish()
    }
}

//! HTTP responses returned by a transport.
//!
//! The response body is a stream owned by exactly one request attempt.
//! Dropping the [`ResponseBody`] releases the underlying connection, so the
//! body is closed on every exit path of the code that owns it.

use std::collections::HashMap;
use std::fmt;

use bytes::{Bytes, BytesMut};
use futures::stream::{self, BoxStream, Stream, StreamExt};

use crate::clients::errors::TransportError;

/// A streamed response body.
pub struct ResponseBody {
    inner: BoxStream<'static, Result<Bytes, TransportError>>,
}

impl ResponseBody {
    /// Wraps a stream of body chunks.
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<Bytes, TransportError>> + Send + 'static,
    {
        Self {
            inner: stream.boxed(),
        }
    }

    /// Creates a body that yields `bytes` in a single chunk.
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        Self::from_stream(stream::once(futures::future::ready(Ok(bytes.into()))))
    }

    /// Creates a body with no content.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_stream(stream::empty())
    }

    /// Reads the remaining chunks into a single buffer.
    ///
    /// # Errors
    ///
    /// Returns the first [`TransportError`] raised while streaming.
    pub async fn collect(&mut self) -> Result<Bytes, TransportError> {
        let mut buf = BytesMut::new();
        while let Some(chunk) = self.inner.next().await {
            buf.extend_from_slice(&chunk?);
        }
        Ok(buf.freeze())
    }
}

impl fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseBody").finish_non_exhaustive()
    }
}

/// An HTTP response from the ChatAI service.
#[derive(Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub status: u16,
    /// Response headers, lowercased (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The response body stream.
    pub body: ResponseBody,
}

impl HttpResponse {
    /// Creates a response with no headers.
    #[must_use]
    pub fn new(status: u16, body: ResponseBody) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body,
        }
    }

    /// Adds a header value. The name is stored lowercased.
    #[must_use]
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .entry(name.as_ref().to_lowercase())
            .or_default()
            .push(value.into());
        self
    }

    /// Returns the first value of a header, matched case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

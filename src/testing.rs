//! Test doubles for the SDK's capabilities.
//!
//! [`MockTransport`] stands in for a real HTTP client: it answers every
//! request with a programmed status, body or error, records the requests it
//! receives, and counts how many response bodies were closed.
//!
//! # Example
//!
//! ```rust
//! use chatai_sdk::testing::MockTransport;
//! use chatai_sdk::ChatAiConfig;
//!
//! let transport = MockTransport::json(200, r#"{"answer":"y","confidenceScore":1}"#);
//! let _config = ChatAiConfig::builder()
//!     .transport(transport.clone())
//!     .build()
//!     .unwrap();
//! assert_eq!(transport.request_count(), 0);
//! ```

use std::io;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, BoxStream, Stream, StreamExt};

use crate::clients::{HttpRequest, HttpResponse, HttpTransport, ResponseBody, TransportError};

/// One programmed answer of a [`MockTransport`].
#[derive(Clone, Debug)]
pub struct MockResponse {
    status: u16,
    body: Option<String>,
    error: Option<io::ErrorKind>,
    fail_body_read: bool,
    stall_body: bool,
    latency: Option<Duration>,
}

impl MockResponse {
    /// A response with `status` and an empty body.
    #[must_use]
    pub const fn status(status: u16) -> Self {
        Self {
            status,
            body: None,
            error: None,
            fail_body_read: false,
            stall_body: false,
            latency: None,
        }
    }

    /// A response with `status` and `body`.
    #[must_use]
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            ..Self::status(status)
        }
    }

    /// A transport failure raised before any response is received.
    #[must_use]
    pub fn transport_error(kind: io::ErrorKind) -> Self {
        Self {
            error: Some(kind),
            ..Self::status(0)
        }
    }

    /// Makes reading the body fail with a connection reset.
    #[must_use]
    pub const fn with_body_read_failure(mut self) -> Self {
        self.fail_body_read = true;
        self
    }

    /// Makes the body never yield a chunk, like a server that stops sending.
    #[must_use]
    pub const fn with_stalled_body(mut self) -> Self {
        self.stall_body = true;
        self
    }

    /// Delays the response by `latency`.
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }
}

/// A programmable [`HttpTransport`].
///
/// Responses are served in order; the last one repeats once the sequence
/// is used up. Clones share recorded requests and counters.
#[derive(Clone, Debug)]
pub struct MockTransport {
    responses: Arc<Vec<MockResponse>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
    bodies_closed: Arc<AtomicUsize>,
}

impl MockTransport {
    /// Answers every request with `response`.
    #[must_use]
    pub fn new(response: MockResponse) -> Self {
        Self::sequence(vec![response])
    }

    /// Answers every request with `status` and `body`.
    #[must_use]
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self::new(MockResponse::json(status, body))
    }

    /// Answers requests with `responses` in order, repeating the last one.
    ///
    /// An empty sequence answers `200` with an empty body.
    #[must_use]
    pub fn sequence(responses: Vec<MockResponse>) -> Self {
        Self {
            responses: Arc::new(responses),
            requests: Arc::new(Mutex::new(Vec::new())),
            bodies_closed: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Returns how many requests were executed.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests.lock().map_or(0, |requests| requests.len())
    }

    /// Returns the executed requests, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// Returns how many response bodies have been dropped.
    #[must_use]
    pub fn bodies_closed(&self) -> usize {
        self.bodies_closed.load(Ordering::SeqCst)
    }

    fn record(&self, request: HttpRequest) -> usize {
        match self.requests.lock() {
            Ok(mut requests) => {
                requests.push(request);
                requests.len() - 1
            }
            Err(_) => 0,
        }
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let index = self.record(request);
        let response = self
            .responses
            .get(index)
            .or_else(|| self.responses.last())
            .cloned()
            .unwrap_or_else(|| MockResponse::status(200));

        if let Some(latency) = response.latency {
            tokio::time::sleep(latency).await;
        }
        if let Some(kind) = response.error {
            return Err(TransportError::Io(io::Error::new(kind, "mock transport failure")));
        }

        let inner: BoxStream<'static, Result<Bytes, TransportError>> = if response.stall_body {
            stream::pending().boxed()
        } else if response.fail_body_read {
            stream::once(async {
                Err(TransportError::Io(io::Error::new(
                    io::ErrorKind::ConnectionReset,
                    "connection reset while reading body",
                )))
            })
            .boxed()
        } else {
            let chunk = Bytes::from(response.body.unwrap_or_default());
            stream::once(async move { Ok(chunk) }).boxed()
        };
        let body = TrackedStream {
            inner,
            _guard: CloseGuard(Arc::clone(&self.bodies_closed)),
        };

        Ok(HttpResponse::new(response.status, ResponseBody::from_stream(body))
            .with_header("Content-Type", "application/json"))
    }
}

/// Counts a close when dropped.
struct CloseGuard(Arc<AtomicUsize>);

impl Drop for CloseGuard {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

struct TrackedStream {
    inner: BoxStream<'static, Result<Bytes, TransportError>>,
    _guard: CloseGuard,
}

impl Stream for TrackedStream {
    type Item = Result<Bytes, TransportError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.poll_next_unpin(cx)
    }
}

//! Single-attempt request execution.
//!
//! [`Requester`] performs exactly one HTTP round trip per call and
//! classifies the outcome. It never retries; wrap calls in a
//! [`Retryer`](crate::clients::Retryer) for that.

use std::sync::Arc;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::clients::errors::{classify_status, ApiError, Error};
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;
use crate::clients::tracer;
use crate::clients::transport::HttpTransport;
use crate::context::RequestContext;
use crate::logger::Logger;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Executes one HTTP request attempt against the ChatAI service.
///
/// The outcome of an attempt is classified in priority order:
///
/// 1. request body serialization failure: `INVALID_REQUEST_BODY`
/// 2. malformed method or URL: `INVALID_REQUEST_BODY`
/// 3. transport failure or cancellation in flight: `SDK_ERROR`
/// 4. status >= 500: `INTERNAL_SERVER_ERROR`
/// 5. body read failure: `SDK_ERROR`
/// 6. body does not decode into the requested type: `RESPONSE_DESERIALIZATION_ERROR`
/// 7. status 2xx: success
/// 8. status 4xx: `INVALID_REQUEST_BODY`
/// 9. anything else: `UNHANDLED_ERROR`
///
/// # Thread Safety
///
/// `Requester` is `Send + Sync`; concurrent calls share the transport and
/// logger read-only.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use chatai_sdk::clients::{Requester, ReqwestTransport};
/// use chatai_sdk::logger::TracingLogger;
/// use chatai_sdk::RequestContext;
///
/// let requester = Requester::new(Arc::new(ReqwestTransport::new()?), Arc::new(TracingLogger), false);
/// let answer: serde_json::Value = requester
///     .perform(&RequestContext::background(), "POST", "http://localhost:8000/chatai", Some(&body))
///     .await?;
/// ```
#[derive(Clone, Debug)]
pub struct Requester {
    transport: Arc<dyn HttpTransport>,
    logger: Arc<dyn Logger>,
    debug: bool,
    user_agent: String,
}

// Verify Requester is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Requester>();
};

impl Requester {
    /// Creates a requester. When `debug` is set, every request and response
    /// is dumped to `logger`.
    #[must_use]
    pub fn new(transport: Arc<dyn HttpTransport>, logger: Arc<dyn Logger>, debug: bool) -> Self {
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        Self {
            transport,
            logger,
            debug,
            user_agent: format!("ChatAI Rust SDK v{SDK_VERSION} | Rust {rust_version}"),
        }
    }

    /// Returns whether debug tracing is enabled.
    #[must_use]
    pub const fn debug(&self) -> bool {
        self.debug
    }

    /// Performs one request and decodes the response body into `T`.
    ///
    /// `body`, when present, is sent as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] classified as described on [`Requester`].
    pub async fn perform<B, T>(
        &self,
        ctx: &RequestContext,
        method: &str,
        url: &str,
        body: Option<&B>,
    ) -> Result<T, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let (status, bytes) = self.exchange(ctx, method, url, body).await?;
        let target = serde_json::from_slice(&bytes).map_err(ApiError::response_deserialization)?;
        classify_status(status, &bytes)?;
        Ok(target)
    }

    /// Performs one request without decoding the response body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] classified as described on [`Requester`],
    /// without the deserialization step.
    pub async fn perform_without_response<B>(
        &self,
        ctx: &RequestContext,
        method: &str,
        url: &str,
        body: Option<&B>,
    ) -> Result<(), Error>
    where
        B: Serialize + ?Sized,
    {
        let (status, bytes) = self.exchange(ctx, method, url, body).await?;
        classify_status(status, &bytes)?;
        Ok(())
    }

    /// Sends the request and reads the body of any non-5xx response.
    ///
    /// The response body is dropped, and so closed, before this returns.
    async fn exchange<B>(
        &self,
        ctx: &RequestContext,
        method: &str,
        url: &str,
        body: Option<&B>,
    ) -> Result<(u16, Bytes), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let payload = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|e| ApiError::invalid_request_body("serialization failure", e))?
            .map(Bytes::from);

        let request = HttpRequest::new(method, url, payload)
            .map_err(|e| ApiError::invalid_request_body("invalid request", e))?
            .header("Accept", "application/json")
            .header("User-Agent", self.user_agent.as_str());

        if self.debug {
            tracer::trace_request(self.logger.as_ref(), &request);
        }

        let mut response = match ctx.or_done(self.transport.execute(request)).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => return Err(ApiError::sdk("api request failure", e)),
            Err(e) => return Err(ApiError::sdk("api request failure", e)),
        };

        // The dump needs the body, so debug mode buffers it up front. A failed
        // read only skips the dump; the status is still classified first.
        let buffered = if self.debug {
            let read = read_body(ctx, &mut response).await;
            tracer::trace_response(self.logger.as_ref(), &response, &read);
            Some(read)
        } else {
            None
        };

        let status = response.status;
        if status >= 500 {
            return Err(ApiError::internal_server(status));
        }

        let bytes = match buffered {
            Some(read) => read?,
            None => read_body(ctx, &mut response).await?,
        };

        Ok((status, bytes))
    }
}

/// Reads the whole response body, racing the context.
async fn read_body(ctx: &RequestContext, response: &mut HttpResponse) -> Result<Bytes, ApiError> {
    match ctx.or_done(response.body.collect()).await {
        Ok(Ok(bytes)) => Ok(bytes),
        Ok(Err(e)) => Err(ApiError::sdk("failed reading response body", e)),
        Err(e) => Err(ApiError::sdk("failed reading response body", e)),
    }
}

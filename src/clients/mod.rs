//! HTTP plumbing for ChatAI API communication.
//!
//! This module holds the request-execution-with-retry pipeline that every
//! service in the SDK is built on.
//!
//! # Overview
//!
//! - [`HttpTransport`]: the injected capability that performs the network exchange
//! - [`ReqwestTransport`]: the production transport
//! - [`Requester`]: performs exactly one request attempt and classifies the outcome
//! - [`Retryer`] / [`RetryPolicy`]: runs attempts with a constant delay
//! - [`ApiError`] / [`ErrorCode`]: the error taxonomy
//!
//! # Example
//!
//! ```rust,ignore
//! use chatai_sdk::clients::{run_with, Requester, RetryPolicy};
//! use chatai_sdk::RequestContext;
//!
//! let ctx = RequestContext::background();
//! let answer: serde_json::Value = run_with(&RetryPolicy::default(), &ctx, |ctx| {
//!     let requester = &requester;
//!     async move { requester.perform(&ctx, "POST", url, Some(&body)).await }
//! })
//! .await?;
//! ```
//!
//! # Retry Behavior
//!
//! [`RetryPolicy`] retries every error, waiting a fixed delay (2 seconds by
//! default) between attempts, for at most 5 attempts by default. Cancelling
//! the [`RequestContext`](crate::RequestContext) interrupts both an
//! in-flight request and the wait between attempts.

mod errors;
mod http_request;
mod http_response;
mod requester;
mod retry;
pub mod tracer;
mod transport;

pub use errors::{
    classify_status, ApiError, BoxError, Error, ErrorCode, InvalidHttpRequestError,
    TransportError,
};
pub use http_request::{HttpMethod, HttpRequest};
pub use http_response::{HttpResponse, ResponseBody};
pub use requester::{Requester, SDK_VERSION};
pub use retry::{
    run_with, Operation, RetryPolicy, Retryer, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY,
};
pub use transport::{HttpTransport, ReqwestTransport, DEFAULT_HTTP_TIMEOUT};

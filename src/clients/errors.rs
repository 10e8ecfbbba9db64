//! Error taxonomy for ChatAI API calls.
//!
//! Every failure of a single request attempt is classified into an
//! [`ApiError`] carrying one stable [`ErrorCode`]. Codes are what callers
//! match on; messages are for humans and may vary per occurrence.
//!
//! - [`ApiError`]: a classified failure (code, message, optional source)
//! - [`InvalidHttpRequestError`]: a request that could not be constructed
//! - [`TransportError`]: a failure inside the HTTP transport
//! - [`Error`]: unified error type returned by SDK operations
//!
//! # Example
//!
//! ```rust,ignore
//! use chatai_sdk::{Error, ErrorCode};
//!
//! match service.ask_ai("how do I reduce allocations?").await {
//!     Ok(answer) => println!("{}", answer.answer),
//!     Err(Error::Api(e)) if e.code() == &ErrorCode::InternalServerError => {
//!         println!("server failed, try again later");
//!     }
//!     Err(Error::Api(e)) => println!("{}: {}", e.code(), e.message()),
//!     Err(Error::Context(e)) => println!("gave up: {e}"),
//! }
//! ```

use std::fmt;

use thiserror::Error;

use crate::context::ContextError;

/// Boxed error used as the source of an [`ApiError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Stable identifier of an [`ApiError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The outgoing request was malformed, or the server rejected it (4xx).
    InvalidRequestBody,
    /// The request rate limit was exceeded. Never produced by status
    /// classification; reserved for services that report throttling.
    TooManyRequests,
    /// The server failed to process the request (5xx).
    InternalServerError,
    /// A local or transport fault: network errors, body read failures.
    Sdk,
    /// The response body could not be decoded into the expected shape.
    ResponseDeserialization,
    /// A status code outside the recognized 2xx/4xx/5xx bands.
    Unhandled,
    /// A code defined by a specific service, e.g. `INPUT_SIZE_EXCEEDED`.
    Service(&'static str),
}

impl ErrorCode {
    /// Returns the wire form of the code, e.g. `INTERNAL_SERVER_ERROR`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidRequestBody => "INVALID_REQUEST_BODY",
            Self::TooManyRequests => "TOO_MANY_REQUESTS",
            Self::InternalServerError => "INTERNAL_SERVER_ERROR",
            Self::Sdk => "SDK_ERROR",
            Self::ResponseDeserialization => "RESPONSE_DESERIALIZATION_ERROR",
            Self::Unhandled => "UNHANDLED_ERROR",
            Self::Service(code) => code,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified failure of a ChatAI API call.
///
/// A fresh value is built at each point of failure and never mutated after
/// it is returned.
///
/// # Example
///
/// ```rust
/// use chatai_sdk::clients::{ApiError, ErrorCode};
///
/// let first = ApiError::internal_server(500);
/// let second = ApiError::internal_server(503);
///
/// assert_eq!(first.code(), &ErrorCode::InternalServerError);
/// assert!(first.is(&second));
/// assert_eq!(first.to_string(), "INTERNAL_SERVER_ERROR server failed");
/// ```
#[derive(Debug, Error)]
#[error("{code} {message}")]
pub struct ApiError {
    code: ErrorCode,
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl ApiError {
    /// Creates an error with the given code and message and no source.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Attaches the underlying cause.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// The request could not be serialized or constructed.
    #[must_use]
    pub fn invalid_request_body(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::new(ErrorCode::InvalidRequestBody, message).with_source(source)
    }

    /// The server answered with a 4xx status; `body` is the raw response text.
    #[must_use]
    pub fn rejected(status: u16, body: &[u8]) -> Self {
        let body = String::from_utf8_lossy(body).into_owned();
        Self::new(
            ErrorCode::InvalidRequestBody,
            format!("invalid input parameters (status {status})"),
        )
        .with_source(format!("server response: {body}"))
    }

    /// The server answered with a 5xx status.
    #[must_use]
    pub fn internal_server(status: u16) -> Self {
        Self::new(ErrorCode::InternalServerError, "server failed")
            .with_source(format!("status code {status}"))
    }

    /// A local or transport failure.
    #[must_use]
    pub fn sdk(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::new(ErrorCode::Sdk, message).with_source(source)
    }

    /// The response body could not be decoded.
    #[must_use]
    pub fn response_deserialization(source: serde_json::Error) -> Self {
        Self::new(
            ErrorCode::ResponseDeserialization,
            "failed decoding response body",
        )
        .with_source(source)
    }

    /// The server answered with a status outside the recognized bands.
    #[must_use]
    pub fn unhandled(status: u16) -> Self {
        Self::new(ErrorCode::Unhandled, "unhandled status code")
            .with_source(format!("server error {status}"))
    }

    /// Returns the error code.
    #[must_use]
    pub const fn code(&self) -> &ErrorCode {
        &self.code
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns `true` if both errors carry the same code.
    ///
    /// Messages and sources are ignored.
    #[must_use]
    pub fn is(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

/// Maps an HTTP status code onto the error taxonomy.
///
/// The mapping is total: 2xx is success, 4xx is
/// [`ErrorCode::InvalidRequestBody`], 5xx and above is
/// [`ErrorCode::InternalServerError`], anything else is
/// [`ErrorCode::Unhandled`].
///
/// # Errors
///
/// Returns the classified [`ApiError`] for every non-2xx status.
///
/// # Example
///
/// ```rust
/// use chatai_sdk::clients::{classify_status, ErrorCode};
///
/// assert!(classify_status(204, b"").is_ok());
/// let err = classify_status(301, b"").unwrap_err();
/// assert_eq!(err.code(), &ErrorCode::Unhandled);
/// ```
pub fn classify_status(status: u16, body: &[u8]) -> Result<(), ApiError> {
    match status {
        200..=299 => Ok(()),
        400..=499 => Err(ApiError::rejected(status, body)),
        500.. => Err(ApiError::internal_server(status)),
        _ => Err(ApiError::unhandled(status)),
    }
}

/// Error returned when a request cannot be constructed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// The HTTP method is not one of the supported methods.
    #[error("Invalid Http method {method}.")]
    InvalidMethod {
        /// The invalid method that was provided.
        method: String,
    },

    /// The URL could not be parsed.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The URL that was provided.
        url: String,
        /// Why parsing failed.
        reason: String,
    },
}

/// Error raised by an [`HttpTransport`](crate::clients::HttpTransport).
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network or connection error from the HTTP client.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// I/O failure, e.g. a connection reset while streaming the body.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Unified error type for SDK operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A classified API failure.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The caller's context finished before the operation completed.
    #[error(transparent)]
    Context(#[from] ContextError),
}

impl Error {
    /// Returns the error code for classified failures.
    #[must_use]
    pub const fn code(&self) -> Option<&ErrorCode> {
        match self {
            Self::Api(e) => Some(e.code()),
            Self::Context(_) => None,
        }
    }

    /// Returns the classified failure, if this is one.
    #[must_use]
    pub const fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            Self::Context(_) => None,
        }
    }
}

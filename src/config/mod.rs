//! Configuration types for the ChatAI SDK.
//!
//! # Overview
//!
//! - [`ChatAiConfig`]: the configuration shared by every service client
//! - [`ChatAiConfigBuilder`]: a builder for constructing [`ChatAiConfig`] instances
//! - [`Endpoint`]: a validated service base URL
//!
//! # Example
//!
//! ```rust
//! use chatai_sdk::{ChatAiConfig, Endpoint};
//!
//! let config = ChatAiConfig::builder()
//!     .endpoint(Endpoint::new("https://region2.aiservice.com").unwrap())
//!     .max_retries(3)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.endpoint().as_ref(), "https://region2.aiservice.com");
//! assert_eq!(config.max_retries(), Some(3));
//! ```

mod newtypes;

pub use newtypes::{Endpoint, DEFAULT_ENDPOINT};

use std::sync::Arc;
use std::time::Duration;

use crate::clients::{
    HttpTransport, Requester, ReqwestTransport, RetryPolicy, Retryer, DEFAULT_HTTP_TIMEOUT,
};
use crate::error::ConfigError;
use crate::logger::{Logger, TracingLogger};

/// Configuration for the ChatAI SDK.
///
/// Holds the endpoint plus the shared capabilities every request uses: the
/// HTTP transport, the retryer and the logger.
///
/// # Thread Safety
///
/// `ChatAiConfig` is `Clone`, `Send`, and `Sync`. Clones share the same
/// transport, retryer and logger.
///
/// # Example
///
/// ```rust
/// use chatai_sdk::ChatAiConfig;
///
/// let config = ChatAiConfig::builder().debug(true).build().unwrap();
/// assert!(config.is_debug());
/// ```
#[derive(Clone, Debug)]
pub struct ChatAiConfig {
    endpoint: Endpoint,
    transport: Arc<dyn HttpTransport>,
    http_timeout: Duration,
    retryer: Arc<dyn Retryer>,
    max_retries: Option<u32>,
    logger: Arc<dyn Logger>,
    debug: bool,
}

impl ChatAiConfig {
    /// Creates a new builder for constructing a `ChatAiConfig`.
    #[must_use]
    pub fn builder() -> ChatAiConfigBuilder {
        ChatAiConfigBuilder::new()
    }

    /// Returns the service endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Returns the HTTP transport.
    #[must_use]
    pub const fn transport(&self) -> &Arc<dyn HttpTransport> {
        &self.transport
    }

    /// Returns the timeout applied by the default transport.
    ///
    /// Has no effect when a custom transport is configured.
    #[must_use]
    pub const fn http_timeout(&self) -> Duration {
        self.http_timeout
    }

    /// Returns the retryer.
    #[must_use]
    pub fn retryer(&self) -> &dyn Retryer {
        self.retryer.as_ref()
    }

    /// Returns the attempt budget override, if one was set.
    #[must_use]
    pub const fn max_retries(&self) -> Option<u32> {
        self.max_retries
    }

    /// Returns the logger.
    #[must_use]
    pub const fn logger(&self) -> &Arc<dyn Logger> {
        &self.logger
    }

    /// Returns whether request/response tracing is enabled.
    #[must_use]
    pub const fn is_debug(&self) -> bool {
        self.debug
    }

    /// Builds a [`Requester`] sharing this configuration's transport and logger.
    #[must_use]
    pub fn requester(&self) -> Requester {
        Requester::new(
            Arc::clone(&self.transport),
            Arc::clone(&self.logger),
            self.debug,
        )
    }
}

// Verify ChatAiConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ChatAiConfig>();
};

/// Builder for constructing [`ChatAiConfig`] instances.
///
/// Every field is optional.
///
/// # Defaults
///
/// - `endpoint`: [`DEFAULT_ENDPOINT`]
/// - `transport`: [`ReqwestTransport`] with `http_timeout`
/// - `http_timeout`: [`DEFAULT_HTTP_TIMEOUT`]
/// - `retryer`: [`RetryPolicy::default`]
/// - `max_retries`: `None` (the retryer's own budget)
/// - `logger`: [`TracingLogger`]
/// - `debug`: `false`
#[derive(Debug, Default)]
pub struct ChatAiConfigBuilder {
    endpoint: Option<Endpoint>,
    transport: Option<Arc<dyn HttpTransport>>,
    http_timeout: Option<Duration>,
    retryer: Option<Box<dyn Retryer>>,
    max_retries: Option<u32>,
    logger: Option<Arc<dyn Logger>>,
    debug: Option<bool>,
}

impl ChatAiConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the service endpoint, e.g. to use a region closer to you.
    #[must_use]
    pub fn endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Overrides the HTTP transport.
    #[must_use]
    pub fn transport(mut self, transport: impl HttpTransport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Uses an existing `reqwest` client, e.g. one configured with a proxy.
    #[must_use]
    pub fn http_client(self, client: reqwest::Client) -> Self {
        self.transport(ReqwestTransport::from_client(client))
    }

    /// Overrides the timeout of the default transport.
    #[must_use]
    pub const fn http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = Some(timeout);
        self
    }

    /// Overrides the retry behavior.
    #[must_use]
    pub fn retryer(mut self, retryer: impl Retryer + 'static) -> Self {
        self.retryer = Some(Box::new(retryer));
        self
    }

    /// Overrides the retryer's attempt budget. Zero is ignored, so the last
    /// non-zero value wins.
    #[must_use]
    pub const fn max_retries(mut self, n: u32) -> Self {
        if n > 0 {
            self.max_retries = Some(n);
        }
        self
    }

    /// Overrides the log sink used for debug tracing.
    #[must_use]
    pub fn logger(mut self, logger: impl Logger + 'static) -> Self {
        self.logger = Some(Arc::new(logger));
        self
    }

    /// Enables dumping every request and response to the logger.
    #[must_use]
    pub const fn debug(mut self, enabled: bool) -> Self {
        self.debug = Some(enabled);
        self
    }

    /// Builds the [`ChatAiConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TransportInit`] if no transport was supplied
    /// and the default one cannot be created.
    pub fn build(self) -> Result<ChatAiConfig, ConfigError> {
        let http_timeout = self.http_timeout.unwrap_or(DEFAULT_HTTP_TIMEOUT);
        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::with_timeout(http_timeout)?),
        };

        let mut retryer = self
            .retryer
            .unwrap_or_else(|| Box::new(RetryPolicy::default()));
        if let Some(n) = self.max_retries {
            retryer.set_max_retries(n);
        }

        Ok(ChatAiConfig {
            endpoint: self.endpoint.unwrap_or_default(),
            transport,
            http_timeout,
            retryer: Arc::from(retryer),
            max_retries: self.max_retries,
            logger: self.logger.unwrap_or_else(|| Arc::new(TracingLogger)),
            debug: self.debug.unwrap_or(false),
        })
    }
}

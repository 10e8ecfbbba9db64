//! Constant-delay retries.
//!
//! A [`Retryer`] runs an [`Operation`] until it succeeds, the attempt budget
//! is spent, or the caller's [`RequestContext`] finishes. [`RetryPolicy`] is
//! the default implementation: a fixed delay between attempts and a fixed
//! maximum number of attempts.
//!
//! Every error is retried; the policy does not inspect error codes.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use chatai_sdk::clients::{run_with, RetryPolicy};
//! use chatai_sdk::RequestContext;
//!
//! # tokio_test::block_on(async {
//! let policy = RetryPolicy::new(Duration::from_millis(1), 3);
//! let answer = run_with(&policy, &RequestContext::background(), |_ctx| async {
//!     Ok::<_, chatai_sdk::Error>(42)
//! })
//! .await
//! .unwrap();
//! assert_eq!(answer, 42);
//! # });
//! ```

use std::fmt;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::sync::Mutex;

use crate::clients::errors::{ApiError, Error, ErrorCode};
use crate::context::RequestContext;

/// Fixed wait between attempts used by [`RetryPolicy::default`].
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Attempt budget used by [`RetryPolicy::default`].
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// A unit of work run by a [`Retryer`], once per attempt.
pub type Operation<'a> =
    Box<dyn FnMut(RequestContext) -> BoxFuture<'a, Result<(), Error>> + Send + 'a>;

/// Runs an operation with retries.
///
/// Implement this to replace the default retry behavior through
/// [`ChatAiConfigBuilder::retryer`](crate::ChatAiConfigBuilder::retryer).
#[async_trait]
pub trait Retryer: Send + Sync + fmt::Debug {
    /// Runs `operation` until it succeeds or the retryer gives up.
    ///
    /// # Errors
    ///
    /// Returns the last operation error, or a context error if the caller
    /// cancelled while waiting between attempts.
    async fn run(&self, ctx: &RequestContext, operation: Operation<'_>) -> Result<(), Error>;

    /// Overrides the attempt budget. Zero is ignored.
    fn set_max_retries(&mut self, n: u32);
}

/// Retries with a constant delay between attempts.
///
/// At most `max_attempts` attempts run, separated by at most
/// `max_attempts - 1` delays. There is no delay after the final attempt,
/// whether it succeeded or not.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    delay: Duration,
    max_attempts: u32,
}

impl RetryPolicy {
    /// Creates a policy. A `max_attempts` of zero is raised to one.
    #[must_use]
    pub fn new(delay: Duration, max_attempts: u32) -> Self {
        Self {
            delay,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Returns the wait between attempts.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Returns the attempt budget.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_RETRY_DELAY, DEFAULT_MAX_RETRIES)
    }
}

#[async_trait]
impl Retryer for RetryPolicy {
    async fn run(&self, ctx: &RequestContext, mut operation: Operation<'_>) -> Result<(), Error> {
        let mut attempt = 1;
        loop {
            let err = match operation(ctx.clone()).await {
                Ok(()) => return Ok(()),
                Err(err) => err,
            };

            if attempt >= self.max_attempts {
                tracing::warn!(
                    "Giving up after {} attempts, last error: {}",
                    attempt,
                    err
                );
                return Err(err);
            }

            tracing::debug!(
                "Attempt {}/{} failed ({}), retrying in {:?}",
                attempt,
                self.max_attempts,
                err,
                self.delay
            );
            ctx.or_done(tokio::time::sleep(self.delay)).await?;
            attempt += 1;
        }
    }

    fn set_max_retries(&mut self, n: u32) {
        if n > 0 {
            self.max_attempts = n;
        }
    }
}

/// Runs a value-producing operation through a [`Retryer`].
///
/// The value of the successful attempt is returned.
///
/// # Errors
///
/// Returns whatever the retryer returns. If a custom retryer reports success
/// without any attempt having succeeded, an `SDK_ERROR` is returned.
pub async fn run_with<'a, T, F, Fut>(
    retryer: &dyn Retryer,
    ctx: &RequestContext,
    mut operation: F,
) -> Result<T, Error>
where
    T: Send + 'a,
    F: FnMut(RequestContext) -> Fut + Send + 'a,
    Fut: Future<Output = Result<T, Error>> + Send + 'a,
{
    let slot = Mutex::new(None);
    let output = &slot;
    retryer
        .run(
            ctx,
            Box::new(move |ctx| {
                let attempt = operation(ctx);
                async move {
                    let value = attempt.await?;
                    *output.lock().await = Some(value);
                    Ok::<(), Error>(())
                }
                .boxed()
            }),
        )
        .await?;

    slot.into_inner().ok_or_else(|| {
        ApiError::new(
            ErrorCode::Sdk,
            "retryer reported success without a successful attempt",
        )
        .into()
    })
}

// Verify RetryPolicy is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RetryPolicy>();
};

//! Cancellation and deadlines for SDK calls.
//!
//! Every suspending operation in the SDK (the network round trip, reading a
//! response body, the delay between retries) races against a
//! [`RequestContext`]. A context finishes when its [`CancellationToken`] is
//! cancelled or when its deadline passes, whichever happens first.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use chatai_sdk::RequestContext;
//!
//! let ctx = RequestContext::background().with_timeout(Duration::from_secs(10));
//! assert!(ctx.err().is_none());
//!
//! ctx.cancel();
//! assert!(ctx.err().is_some());
//! ```

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Why a [`RequestContext`] finished.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ContextError {
    /// The context's cancellation token was cancelled.
    #[error("context canceled")]
    Cancelled,

    /// The context's deadline passed.
    #[error("context deadline exceeded")]
    DeadlineExceeded,
}

/// A cancellation token paired with an optional deadline.
///
/// Cloning a context is cheap and the clones share cancellation: cancelling
/// any clone cancels all of them.
#[derive(Clone, Debug, Default)]
pub struct RequestContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// Returns a context that never finishes unless cancelled.
    #[must_use]
    pub fn background() -> Self {
        Self::default()
    }

    /// Returns a context driven by an existing cancellation token.
    #[must_use]
    pub const fn with_token(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Returns a copy of this context that also finishes after `timeout`.
    ///
    /// An earlier deadline already set on the context is kept.
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Returns a copy of this context that also finishes at `deadline`.
    ///
    /// An earlier deadline already set on the context is kept.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(self.deadline.map_or(deadline, |d| d.min(deadline)));
        self
    }

    /// Cancels this context and every clone of it.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns the deadline, if one is set.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns why the context finished, or `None` while it is still live.
    #[must_use]
    pub fn err(&self) -> Option<ContextError> {
        if self.token.is_cancelled() {
            return Some(ContextError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(ContextError::DeadlineExceeded),
            _ => None,
        }
    }

    /// Completes when the context finishes.
    pub async fn done(&self) -> ContextError {
        match self.deadline {
            Some(deadline) => tokio::select! {
                () = self.token.cancelled() => ContextError::Cancelled,
                () = tokio::time::sleep_until(deadline) => ContextError::DeadlineExceeded,
            },
            None => {
                self.token.cancelled().await;
                ContextError::Cancelled
            }
        }
    }

    /// Races `future` against the context.
    ///
    /// Returns the future's output if it completes first. If the context is
    /// already finished, or finishes first, the future is dropped without
    /// being polled further.
    ///
    /// # Errors
    ///
    /// Returns the [`ContextError`] describing why the context finished.
    pub async fn or_done<F>(&self, future: F) -> Result<F::Output, ContextError>
    where
        F: Future,
    {
        if let Some(err) = self.err() {
            return Err(err);
        }
        tokio::select! {
            biased;
            err = self.done() => Err(err),
            output = future => Ok(output),
        }
    }
}

// Verify RequestContext is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RequestContext>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_or_done_returns_output_when_future_completes_first() {
        let ctx = RequestContext::background();
        let result = ctx.or_done(async { 42 }).await;
        assert_eq!(result, Ok(42));
    }

    #[tokio::test]
    async fn test_or_done_returns_cancelled_when_already_cancelled() {
        let ctx = RequestContext::background();
        ctx.cancel();

        let result = ctx.or_done(async { 7 }).await;
        assert_eq!(result, Err(ContextError::Cancelled));
    }

    #[tokio::test(start_paused = true)]
    async fn test_or_done_returns_cancelled_when_token_fires_mid_flight() {
        let ctx = RequestContext::background();
        let canceller = ctx.clone();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            canceller.cancel();
        });

        let result = ctx
            .or_done(tokio::time::sleep(Duration::from_secs(60)))
            .await;
        assert_eq!(result, Err(ContextError::Cancelled));
    }

    #[tokio::test(start_paused = true)]
    async fn test_or_done_returns_deadline_exceeded() {
        let ctx = RequestContext::background().with_timeout(Duration::from_millis(50));

        let result = ctx
            .or_done(tokio::time::sleep(Duration::from_secs(60)))
            .await;
        assert_eq!(result, Err(ContextError::DeadlineExceeded));
        assert_eq!(ctx.err(), Some(ContextError::DeadlineExceeded));
    }

    #[test]
    fn test_with_deadline_keeps_earliest() {
        let now = Instant::now();
        let early = now + Duration::from_secs(1);
        let late = now + Duration::from_secs(10);

        let ctx = RequestContext::background()
            .with_deadline(early)
            .with_deadline(late);
        assert_eq!(ctx.deadline(), Some(early));
    }

    #[test]
    fn test_clones_share_cancellation() {
        let ctx = RequestContext::background();
        let clone = ctx.clone();
        clone.cancel();
        assert_eq!(ctx.err(), Some(ContextError::Cancelled));
    }

    #[test]
    fn test_with_token_observes_external_cancellation() {
        let token = CancellationToken::new();
        let ctx = RequestContext::with_token(token.clone());
        assert!(ctx.err().is_none());
        token.cancel();
        assert_eq!(ctx.err(), Some(ContextError::Cancelled));
    }
}

//! The log sink used for debug tracing.
//!
//! The SDK only ever calls [`Logger::log`]; where the message ends up is up
//! to the implementation. The default, [`TracingLogger`], forwards to the
//! `tracing` ecosystem. Override it through
//! [`ChatAiConfigBuilder::logger`](crate::ChatAiConfigBuilder::logger).
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use chatai_sdk::logger::{Logger, LoggerFn};
//!
//! let logger: Arc<dyn Logger> = Arc::new(LoggerFn::new(|message: &str| eprintln!("{message}")));
//! logger.log("hello");
//! ```

use std::fmt;
use std::io::Write;

/// A single-method log sink.
pub trait Logger: Send + Sync + fmt::Debug {
    /// Records one message.
    fn log(&self, message: &str);
}

/// Forwards messages to `tracing` at info level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, message: &str) {
        tracing::info!(target: "chatai_sdk", "{}", message);
    }
}

/// Writes timestamped lines to stdout.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimpleLogger;

impl Logger for SimpleLogger {
    fn log(&self, message: &str) {
        let timestamp = chrono::Local::now().format("%Y/%m/%d %H:%M:%S");
        let mut stdout = std::io::stdout().lock();
        // Write errors are ignored.
        let _ = writeln!(stdout, "{timestamp} {message}");
    }
}

/// Adapts a closure into a [`Logger`].
pub struct LoggerFn<F>(F);

impl<F> LoggerFn<F>
where
    F: Fn(&str) + Send + Sync,
{
    /// Wraps `f`.
    pub const fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> Logger for LoggerFn<F>
where
    F: Fn(&str) + Send + Sync,
{
    fn log(&self, message: &str) {
        (self.0)(message);
    }
}

impl<F> fmt::Debug for LoggerFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LoggerFn")
    }
}

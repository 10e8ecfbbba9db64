//! # ChatAI Rust SDK
//!
//! A Rust SDK for the ChatAI question-answering service, providing type-safe
//! configuration, classified errors, constant-delay retries and optional
//! request/response tracing.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`ChatAiConfig`] and [`ChatAiConfigBuilder`]
//! - A validated [`Endpoint`] newtype for the service base URL
//! - The [`ChatAi`] service client
//! - A single-attempt [`Requester`](clients::Requester) that classifies every outcome
//!   into an [`ErrorCode`]
//! - A constant-delay [`RetryPolicy`](clients::RetryPolicy) that honors
//!   cancellation through [`RequestContext`]
//! - Debug dumps of every request and response via [`logger::Logger`]
//!
//! ## Quick Start
//!
//! ```rust
//! use chatai_sdk::{ChatAi, ChatAiConfig, Endpoint};
//!
//! let config = ChatAiConfig::builder()
//!     .endpoint(Endpoint::new("https://region2.aiservice.com").unwrap())
//!     .max_retries(3)
//!     .build()
//!     .unwrap();
//!
//! let ai = ChatAi::new(config);
//! ```
//!
//! ## Asking a Question
//!
//! ```rust,ignore
//! use chatai_sdk::{ChatAi, ChatAiConfig, ErrorCode};
//!
//! let ai = ChatAi::new(ChatAiConfig::builder().build()?);
//!
//! match ai.ask_ai("tell me one memory optimization technique in Rust").await {
//!     Ok(answer) => println!("{}", answer.answer),
//!     Err(err) if err.code() == Some(&ErrorCode::InternalServerError) => {
//!         eprintln!("service unavailable after retries: {err}");
//!     }
//!     Err(err) => eprintln!("{err}"),
//! }
//! ```
//!
//! ## Cancellation
//!
//! Every operation has a `_with_context` variant taking a [`RequestContext`].
//! Cancelling the context, or letting its deadline pass, interrupts both an
//! in-flight request and the wait between retry attempts:
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use chatai_sdk::RequestContext;
//!
//! let ctx = RequestContext::background().with_timeout(Duration::from_secs(5));
//! let answer = ai.ask_ai_with_context(&ctx, "what is a borrow checker?").await?;
//! ```
//!
//! ## Debug Tracing
//!
//! With [`ChatAiConfigBuilder::debug`] enabled, the full wire form of every
//! request and response is written to the configured logger:
//!
//! ```rust
//! use chatai_sdk::logger::SimpleLogger;
//! use chatai_sdk::ChatAiConfig;
//!
//! let config = ChatAiConfig::builder()
//!     .debug(true)
//!     .logger(SimpleLogger)
//!     .build()
//!     .unwrap();
//! assert!(config.is_debug());
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Injectable capabilities**: Transport, retryer and logger are traits

pub mod clients;
pub mod config;
pub mod context;
pub mod error;
pub mod logger;
pub mod services;
pub mod testing;

// Re-export public types at crate root for convenience
pub use config::{ChatAiConfig, ChatAiConfigBuilder, Endpoint};
pub use context::{ContextError, RequestContext};
pub use error::ConfigError;

// Re-export error types
pub use clients::{ApiError, Error, ErrorCode};

// Re-export the service client
pub use services::chatai::{AiAnswer, AskAi, ChatAi};

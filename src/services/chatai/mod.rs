//! Client for the ChatAI question-answering service.
//!
//! # Example
//!
//! ```rust,ignore
//! use chatai_sdk::services::chatai::ChatAi;
//! use chatai_sdk::ChatAiConfig;
//!
//! let ai = ChatAi::new(ChatAiConfig::builder().build()?);
//! let answer = ai.ask_ai("tell me one memory optimization technique in Rust").await?;
//! println!("{} (confidence {})", answer.answer, answer.confidence_score);
//! ```

mod errors;
mod model;

pub use errors::{input_size_exceeded, INPUT_SIZE_EXCEEDED, MAX_INPUT_LENGTH};
pub use model::AiAnswer;

use async_trait::async_trait;

use crate::clients::{run_with, Error, Requester};
use crate::config::ChatAiConfig;
use crate::context::RequestContext;
use model::Question;

const SERVICE_NAME: &str = "chatai";

/// The ChatAI operations, as a trait so callers can mock the service.
#[async_trait]
pub trait AskAi: Send + Sync {
    /// Asks the service `question`, honoring `ctx` for cancellation.
    ///
    /// # Errors
    ///
    /// See [`ChatAi::ask_ai_with_context`].
    async fn ask_ai_with_context(
        &self,
        ctx: &RequestContext,
        question: &str,
    ) -> Result<AiAnswer, Error>;
}

/// Client for the ChatAI service.
///
/// Requests go through the configured retryer; each attempt is a single
/// `POST {endpoint}/chatai` with body `{"query": question}`.
#[derive(Clone, Debug)]
pub struct ChatAi {
    config: ChatAiConfig,
    requester: Requester,
    url: String,
}

impl ChatAi {
    /// Creates a client from `config`.
    #[must_use]
    pub fn new(config: ChatAiConfig) -> Self {
        let requester = config.requester();
        let url = config.endpoint().join(SERVICE_NAME);
        Self {
            config,
            requester,
            url,
        }
    }

    /// Returns the configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &ChatAiConfig {
        &self.config
    }

    /// Asks the service `question` without a deadline.
    ///
    /// # Errors
    ///
    /// See [`ChatAi::ask_ai_with_context`].
    pub async fn ask_ai(&self, question: &str) -> Result<AiAnswer, Error> {
        self.ask_ai_with_context(&RequestContext::background(), question)
            .await
    }

    /// Asks the service `question`, honoring `ctx` for cancellation.
    ///
    /// An empty question gets an empty answer without contacting the service.
    ///
    /// # Errors
    ///
    /// - [`INPUT_SIZE_EXCEEDED`] if `question` is longer than
    ///   [`MAX_INPUT_LENGTH`] characters; no request is sent
    /// - any classified error of the last attempt once retries are spent
    /// - [`Error::Context`] if `ctx` finishes while waiting between attempts
    pub async fn ask_ai_with_context(
        &self,
        ctx: &RequestContext,
        question: &str,
    ) -> Result<AiAnswer, Error> {
        if question.is_empty() {
            return Ok(AiAnswer::default());
        }
        if question.chars().count() > MAX_INPUT_LENGTH {
            return Err(input_size_exceeded().into());
        }

        let requester = &self.requester;
        let url = self.url.as_str();
        let body = Question { query: question };
        let body = &body;

        run_with(self.config.retryer(), ctx, move |ctx| async move {
            requester.perform(&ctx, "POST", url, Some(body)).await
        })
        .await
    }
}

#[async_trait]
impl AskAi for ChatAi {
    async fn ask_ai_with_context(
        &self,
        ctx: &RequestContext,
        question: &str,
    ) -> Result<AiAnswer, Error> {
        Self::ask_ai_with_context(self, ctx, question).await
    }
}

// Verify ChatAi is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ChatAi>();
};

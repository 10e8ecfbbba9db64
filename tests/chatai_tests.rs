//! End-to-end tests for the ChatAI service client.
//!
//! These tests run the real reqwest transport against a local mock server.

use std::time::Duration;

use chatai_sdk::clients::RetryPolicy;
use chatai_sdk::services::chatai::{AskAi, INPUT_SIZE_EXCEEDED, MAX_INPUT_LENGTH};
use chatai_sdk::{ChatAi, ChatAiConfig, Endpoint, ErrorCode, RequestContext};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a client for `server` retrying up to `attempts` times with a short delay.
fn client(server: &MockServer, attempts: u32) -> ChatAi {
    let config = ChatAiConfig::builder()
        .endpoint(Endpoint::new(server.uri()).unwrap())
        .retryer(RetryPolicy::new(Duration::from_millis(10), attempts))
        .build()
        .unwrap();
    ChatAi::new(config)
}

#[tokio::test]
async fn test_ask_ai_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chatai"))
        .and(header("content-type", "application/json"))
        .and(header("accept", "application/json"))
        .and(body_json(json!({"query": "tell me one memory optimization technique"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "answer": "Prefer stack allocation over heap allocation.",
            "confidenceScore": 0.9
        })))
        .expect(1)
        .mount(&server)
        .await;

    let answer = client(&server, 5)
        .ask_ai("tell me one memory optimization technique")
        .await
        .unwrap();

    assert_eq!(answer.answer, "Prefer stack allocation over heap allocation.");
    assert!((answer.confidence_score - 0.9).abs() < 1e-6);
}

#[tokio::test]
async fn test_server_failure_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chatai"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chatai"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"answer": "y", "confidenceScore": 1})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let answer = tokio_test::assert_ok!(client(&server, 3).ask_ai("x").await);

    assert_eq!(answer.answer, "y");
}

#[tokio::test]
async fn test_persistent_failure_returns_last_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chatai"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let err = tokio_test::assert_err!(client(&server, 3).ask_ai("x").await);

    assert_eq!(err.code(), Some(&ErrorCode::InternalServerError));
}

#[tokio::test]
async fn test_rejection_is_retried_like_any_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chatai"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({"detail": "bad query"})))
        .expect(2)
        .mount(&server)
        .await;

    let err = client(&server, 2).ask_ai("x").await.unwrap_err();

    assert_eq!(err.code(), Some(&ErrorCode::InvalidRequestBody));
}

#[tokio::test]
async fn test_oversized_question_is_rejected_locally() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let question = "q".repeat(MAX_INPUT_LENGTH + 1);
    let err = client(&server, 5).ask_ai(&question).await.unwrap_err();

    assert_eq!(err.code(), Some(&INPUT_SIZE_EXCEEDED));
    assert_eq!(err.code().map(ErrorCode::as_str), Some("INPUT_SIZE_EXCEEDED"));
}

#[tokio::test]
async fn test_empty_question_is_answered_locally() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let answer = client(&server, 5).ask_ai("").await.unwrap();

    assert!(answer.answer.is_empty());
    assert!(answer.confidence_score.abs() < f32::EPSILON);
}

#[tokio::test]
async fn test_cancelled_context_stops_retries() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chatai"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let config = ChatAiConfig::builder()
        .endpoint(Endpoint::new(server.uri()).unwrap())
        .retryer(RetryPolicy::new(Duration::from_secs(60), 5))
        .build()
        .unwrap();
    let ai = ChatAi::new(config);
    let ctx = RequestContext::background().with_timeout(Duration::from_millis(200));

    let err = ai.ask_ai_with_context(&ctx, "x").await.unwrap_err();

    assert!(matches!(
        err,
        chatai_sdk::Error::Context(chatai_sdk::ContextError::DeadlineExceeded)
    ));
}

#[tokio::test]
async fn test_service_is_usable_through_trait_object() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chatai"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"answer": "y", "confidenceScore": 1})),
        )
        .mount(&server)
        .await;

    let ai: Box<dyn AskAi> = Box::new(client(&server, 1));
    let answer = ai
        .ask_ai_with_context(&RequestContext::background(), "x")
        .await
        .unwrap();

    assert_eq!(answer.answer, "y");
}

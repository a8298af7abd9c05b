//! Integration tests for the Ollama judge against a mock endpoint.

use attest_domain::{Confidence, SemanticJudge};
use attest_judge::{JudgeError, OllamaJudge};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_ollama_judge_parses_model_verdict() {
    let server = MockServer::start().await;
    let verdict_json =
        r#"{"matches": false, "confidence": "high", "suggestedExcerpt": null}"#;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "response": verdict_json, "done": true })),
        )
        .mount(&server)
        .await;

    let judge = OllamaJudge::new(server.uri(), "llama2").unwrap();
    let verdict = judge
        .judge("Tool use is available on the Pro tier", "pricing page text")
        .await
        .unwrap();

    assert!(!verdict.matches);
    assert_eq!(verdict.confidence, Confidence::High);
    assert!(verdict.is_contradiction());
}

#[tokio::test]
async fn test_ollama_judge_reports_missing_model() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let judge = OllamaJudge::new(server.uri(), "nope").unwrap();
    let result = judge.judge("claim", "page").await;
    assert!(matches!(result, Err(JudgeError::ModelNotAvailable(_))));
}

#[tokio::test]
async fn test_ollama_judge_retries_transient_errors() {
    let server = MockServer::start().await;
    // Always 500: with max_retries = 2 the mock must see exactly two
    // attempts before the judge gives up.
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let judge = OllamaJudge::new(server.uri(), "llama2")
        .unwrap()
        .with_max_retries(2);
    let result = judge.judge("claim", "page").await;
    assert!(matches!(result, Err(JudgeError::Communication(_))));
}

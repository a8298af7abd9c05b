//! Ollama-backed judge
//!
//! Talks to a local Ollama instance and asks the model for a structured
//! verdict. Communication failures retry with exponential backoff; a
//! response that cannot be parsed as a verdict is returned as an error
//! rather than retried, since the model will usually repeat itself.

use crate::JudgeError;
use attest_domain::{Confidence, SemanticJudge, Verdict};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default timeout for judge requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Semantic judge backed by a local Ollama model.
pub struct OllamaJudge {
    endpoint: String,
    model: String,
    client: reqwest::Client,
    max_retries: u32,
}

#[derive(Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    format: &'static str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Verdict as the model is asked to emit it.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireVerdict {
    matches: bool,
    confidence: String,
    #[serde(default)]
    suggested_excerpt: Option<String>,
}

impl OllamaJudge {
    /// Create a judge against the given endpoint and model.
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, JudgeError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| JudgeError::Communication(e.to_string()))?;
        Ok(Self {
            endpoint: endpoint.into(),
            model: model.into(),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// Create a judge against `http://localhost:11434`.
    pub fn default_endpoint(model: impl Into<String>) -> Result<Self, JudgeError> {
        Self::new(DEFAULT_ENDPOINT, model)
    }

    /// Set the maximum number of retry attempts.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn prompt(claim_text: &str, page_text: &str) -> String {
        // Page text is capped so the prompt stays inside small local
        // model context windows.
        let page: String = page_text.chars().take(6000).collect();
        format!(
            "You verify documentation claims. Given a claim and the text of a \
             cited page, decide whether the page still supports the claim.\n\
             Respond with JSON only, matching this shape:\n\
             {{\"matches\": true|false, \"confidence\": \"low\"|\"medium\"|\"high\", \
             \"suggestedExcerpt\": \"short supporting passage or null\"}}\n\n\
             Claim: {claim_text}\n\nPage text:\n{page}"
        )
    }

    async fn generate(&self, prompt: String) -> Result<String, JudgeError> {
        let url = format!("{}/api/generate", self.endpoint);
        let body = GenerateRequest {
            model: self.model.clone(),
            prompt,
            stream: false,
            format: "json",
        };

        let mut attempts = 0;
        let mut last_error = None;
        while attempts < self.max_retries {
            match self.client.post(&url).json(&body).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return response
                            .json::<GenerateResponse>()
                            .await
                            .map(|r| r.response)
                            .map_err(|e| {
                                JudgeError::InvalidResponse(format!(
                                    "failed to parse response: {}",
                                    e
                                ))
                            });
                    }
                    if status == reqwest::StatusCode::NOT_FOUND {
                        return Err(JudgeError::ModelNotAvailable(self.model.clone()));
                    }
                    let text = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "unknown error".to_string());
                    last_error = Some(JudgeError::Communication(format!(
                        "HTTP {}: {}",
                        status, text
                    )));
                }
                Err(e) => {
                    last_error =
                        Some(JudgeError::Communication(format!("request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                tracing::debug!(attempt = attempts, "judge request failed, backing off");
                tokio::time::sleep(delay).await;
            }
        }
        Err(last_error
            .unwrap_or_else(|| JudgeError::Communication("max retries exceeded".to_string())))
    }

    fn parse_verdict(raw: &str) -> Result<Verdict, JudgeError> {
        let wire: WireVerdict = serde_json::from_str(raw.trim())
            .map_err(|e| JudgeError::InvalidResponse(format!("not a verdict: {}", e)))?;
        let confidence = match wire.confidence.to_lowercase().as_str() {
            "high" => Confidence::High,
            "medium" => Confidence::Medium,
            "low" => Confidence::Low,
            other => {
                return Err(JudgeError::InvalidResponse(format!(
                    "unknown confidence '{}'",
                    other
                )))
            }
        };
        Ok(Verdict {
            matches: wire.matches,
            confidence,
            suggested_excerpt: wire.suggested_excerpt.filter(|e| !e.is_empty()),
        })
    }
}

impl SemanticJudge for OllamaJudge {
    type Error = JudgeError;

    fn judge(
        &self,
        claim_text: &str,
        page_text: &str,
    ) -> impl std::future::Future<Output = Result<Verdict, Self::Error>> + Send {
        let prompt = Self::prompt(claim_text, page_text);
        async move {
            let raw = self.generate(prompt).await?;
            Self::parse_verdict(&raw)
        }
    }
}

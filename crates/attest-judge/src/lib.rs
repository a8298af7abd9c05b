//! Attest Judge
//!
//! Semantic verification: given claim text and page text, does the page
//! still support the claim? Two implementations of the
//! [`SemanticJudge`](attest_domain::SemanticJudge) seam:
//!
//! - [`KeywordJudge`]: deterministic keyword-overlap heuristic, no
//!   external services, the default for CI and tests
//! - [`OllamaJudge`]: local LLM inference over the Ollama API
//!
//! Semantic checks are the expensive tier, so they are gated: a citation
//! is only re-judged when its cached verdict is older than the cache
//! window (see [`due_for_semantic`]).

#![warn(missing_docs)]

mod gate;
mod ollama;

pub use gate::{due_for_semantic, verdict_result, SEMANTIC_CACHE_DAYS};
pub use ollama::OllamaJudge;

use attest_domain::{Confidence, SemanticJudge, Verdict};
use thiserror::Error;

/// Errors from judge implementations
#[derive(Error, Debug)]
pub enum JudgeError {
    /// HTTP communication with the model endpoint failed
    #[error("judge communication error: {0}")]
    Communication(String),

    /// The model returned something that is not a verdict
    #[error("invalid judge response: {0}")]
    InvalidResponse(String),

    /// The configured model is not available at the endpoint
    #[error("model not available: {0}")]
    ModelNotAvailable(String),
}

/// Deterministic judge based on keyword overlap.
///
/// Counts how many distinct claim words (longer than three characters)
/// appear in the page text. Full overlap is a high-confidence match,
/// zero overlap a high-confidence mismatch; the middle is graded down.
#[derive(Debug, Clone, Default)]
pub struct KeywordJudge;

impl KeywordJudge {
    /// Create a keyword judge.
    pub fn new() -> Self {
        Self
    }

    fn verdict(claim_text: &str, page_text: &str) -> Verdict {
        let page = page_text.to_lowercase();
        let words: Vec<String> = claim_text
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| w.len() > 3)
            .map(str::to_string)
            .collect();

        if words.is_empty() {
            return Verdict {
                matches: false,
                confidence: Confidence::Low,
                suggested_excerpt: None,
            };
        }

        let hits = words.iter().filter(|w| page.contains(w.as_str())).count();
        let ratio = hits as f64 / words.len() as f64;

        if ratio >= 0.6 {
            Verdict {
                matches: true,
                confidence: if hits == words.len() {
                    Confidence::High
                } else {
                    Confidence::Medium
                },
                suggested_excerpt: None,
            }
        } else {
            Verdict {
                matches: false,
                confidence: if hits == 0 {
                    Confidence::High
                } else if ratio < 0.3 {
                    Confidence::Medium
                } else {
                    Confidence::Low
                },
                suggested_excerpt: None,
            }
        }
    }
}

impl SemanticJudge for KeywordJudge {
    type Error = JudgeError;

    fn judge(
        &self,
        claim_text: &str,
        page_text: &str,
    ) -> impl std::future::Future<Output = Result<Verdict, Self::Error>> + Send {
        let verdict = Self::verdict(claim_text, page_text);
        async move { Ok(verdict) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_full_overlap_is_high_confidence_match() {
        let judge = KeywordJudge::new();
        let verdict = judge
            .judge(
                "Agents invoke registered tools",
                "Our agents can invoke any of the registered tools in the catalog.",
            )
            .await
            .unwrap();
        assert!(verdict.matches);
        assert_eq!(verdict.confidence, Confidence::High);
    }

    #[tokio::test]
    async fn test_zero_overlap_is_high_confidence_mismatch() {
        let judge = KeywordJudge::new();
        let verdict = judge
            .judge("Agents invoke registered tools", "pricing and billing faq")
            .await
            .unwrap();
        assert!(!verdict.matches);
        assert_eq!(verdict.confidence, Confidence::High);
        assert!(verdict.is_contradiction());
    }

    #[tokio::test]
    async fn test_partial_overlap_grades_down() {
        let judge = KeywordJudge::new();
        let verdict = judge
            .judge(
                "Agents invoke registered tools automatically",
                "agents and tools are mentioned here",
            )
            .await
            .unwrap();
        // 2 of 5 words: mismatch, but not confident enough to call a
        // contradiction.
        assert!(!verdict.matches);
        assert!(!verdict.is_contradiction());
    }

    #[tokio::test]
    async fn test_empty_claim_text_is_low_confidence() {
        let judge = KeywordJudge::new();
        let verdict = judge.judge("a an", "anything").await.unwrap();
        assert!(!verdict.matches);
        assert_eq!(verdict.confidence, Confidence::Low);
    }
}

//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and
//! infrastructure. Implementations live in other crates: the file-backed
//! result store in `attest-store`, the judges in `attest-judge`.

use crate::{Pass, VerificationResult};
use serde::{Deserialize, Serialize};

/// Judge confidence level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// The judge is guessing
    Low,

    /// The judge is fairly sure
    Medium,

    /// The judge is sure
    High,
}

/// Verdict returned by a semantic judge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    /// Whether the page content semantically supports the claim
    pub matches: bool,

    /// How confident the judge is
    pub confidence: Confidence,

    /// A quotable excerpt the judge suggests as tighter evidence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_excerpt: Option<String>,
}

impl Verdict {
    /// A mismatch at medium-or-higher confidence is a contradiction
    /// finding for human review. Never used to flip availability.
    pub fn is_contradiction(&self) -> bool {
        !self.matches && self.confidence >= Confidence::Medium
    }
}

/// Trait for semantic judgment of (claim text, page text) pairs.
///
/// A deterministic keyword judge substitutes for the real judgment
/// service in tests; both live in `attest-judge`.
pub trait SemanticJudge {
    /// Error type for judge operations
    type Error: std::fmt::Display;

    /// Judge whether the page text supports the claim text.
    fn judge(
        &self,
        claim_text: &str,
        page_text: &str,
    ) -> impl std::future::Future<Output = Result<Verdict, Self::Error>> + Send;
}

/// Trait for persisting and re-reading verification results.
///
/// Results are stored per (dataset, pass) and keyed by (url, pass) within
/// a set, so a rerun overwrites rather than appends.
pub trait ResultStore {
    /// Error type for store operations
    type Error;

    /// Load the last persisted result set, empty if none exists.
    fn load(&self, dataset: &str, pass: Pass) -> Result<Vec<VerificationResult>, Self::Error>;

    /// Persist a result set, replacing the previous one atomically.
    fn save(
        &self,
        dataset: &str,
        pass: Pass,
        results: &[VerificationResult],
    ) -> Result<(), Self::Error>;
}

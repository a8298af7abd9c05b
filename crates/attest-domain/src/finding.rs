//! Findings taxonomy - everything the pipeline reports instead of acting on
//!
//! Only inability-to-start is fatal; every finding here is recorded in the
//! run report and never causes silent data loss or auto-correction.
//! Transient network errors are retried inside the checkers and never
//! surface as findings.

use crate::ClaimKey;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed findings taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FindingKind {
    /// URL is broken after retries (4xx, persistent 5xx, TLS, DNS)
    PermanentUnreachable,

    /// Page no longer supports the claim at its declared granularity
    RelevanceMismatch,

    /// Semantic judge reported a confident mismatch
    SemanticContradiction,

    /// Malformed record; isolated per record, never aborts the run
    SchemaViolation,

    /// Last confirmation is older than the staleness bands allow
    StaleVerification,

    /// Same claim key carries divergent categories across datasets
    ReconciliationInconsistency,
}

impl FindingKind {
    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingKind::PermanentUnreachable => "permanent-unreachable",
            FindingKind::RelevanceMismatch => "relevance-mismatch",
            FindingKind::SemanticContradiction => "semantic-contradiction",
            FindingKind::SchemaViolation => "schema-violation",
            FindingKind::StaleVerification => "stale-verification",
            FindingKind::ReconciliationInconsistency => "reconciliation-inconsistency",
        }
    }
}

/// How serious a finding is for the quality metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Counts toward quality metrics, needs eventual attention
    Warning,

    /// Counts toward the run's error total; still never blocks generation
    Error,
}

/// One entry in the structured run report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// Taxonomy category
    pub kind: FindingKind,

    /// Warning or error
    pub severity: Severity,

    /// Dataset the finding belongs to, when applicable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<String>,

    /// Claim the finding belongs to, when applicable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claim: Option<ClaimKey>,

    /// URL the finding belongs to, when applicable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Human-readable description
    pub message: String,
}

impl Finding {
    /// Create a finding with no dataset/claim/url context.
    pub fn new(kind: FindingKind, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity,
            dataset: None,
            claim: None,
            url: None,
            message: message.into(),
        }
    }

    /// Attach a dataset id.
    pub fn with_dataset(mut self, dataset: impl Into<String>) -> Self {
        self.dataset = Some(dataset.into());
        self
    }

    /// Attach a claim key.
    pub fn with_claim(mut self, claim: ClaimKey) -> Self {
        self.claim = Some(claim);
        self
    }

    /// Attach a URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.as_str(), self.message)?;
        if let Some(dataset) = &self.dataset {
            write!(f, " (dataset: {})", dataset)?;
        }
        if let Some(claim) = &self.claim {
            write!(f, " (claim: {})", claim)?;
        }
        if let Some(url) = &self.url {
            write!(f, " ({})", url)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_attaches_context() {
        let finding = Finding::new(
            FindingKind::SchemaViolation,
            Severity::Error,
            "excerpt granularity requires a stored excerpt",
        )
        .with_dataset("acme-assistant")
        .with_claim(ClaimKey::new("chat-assistance"))
        .with_url("https://docs.acme.example/chat");

        assert_eq!(finding.dataset.as_deref(), Some("acme-assistant"));
        assert_eq!(finding.claim.as_ref().unwrap().as_str(), "chat-assistance");
        assert!(finding.to_string().contains("schema-violation"));
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Warning < Severity::Error);
    }
}

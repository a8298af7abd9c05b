//! Verification results - the persisted outcome of each pipeline pass
//!
//! One row per (url, pass) per run. Results are overwritten keyed by that
//! pair, which is what makes reruns idempotent, and re-read on the next
//! run for staleness comparison and semantic gating.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A verification pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pass {
    /// Does the cited URL still resolve?
    Reachability,

    /// Does the page content still support the claim at its tier?
    Relevance,

    /// Does the page semantically match the claim? (cost-gated)
    Semantic,
}

impl Pass {
    /// Get the pass name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Pass::Reachability => "reachability",
            Pass::Relevance => "relevance",
            Pass::Semantic => "semantic",
        }
    }

    /// Parse a pass from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "reachability" => Some(Pass::Reachability),
            "relevance" => Some(Pass::Relevance),
            "semantic" => Some(Pass::Semantic),
            _ => None,
        }
    }
}

/// Outcome of one check.
///
/// `Incomplete` is produced by run-level timeout or cancellation and is
/// never counted as a confirmed failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The check succeeded
    Pass,

    /// The check ran to completion and the URL/content did not hold up
    Fail,

    /// The check was cancelled before completing
    Incomplete,
}

/// Machine-readable reason attached to a non-pass outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReasonCode {
    /// Non-success HTTP status (see `status_code` in the detail)
    HttpError,

    /// The request did not complete in time
    Timeout,

    /// TLS negotiation failed
    Tls,

    /// Could not connect at all (DNS, refused, reset)
    Connect,

    /// Dedicated-tier page no longer mentions the claim (soft miss)
    Unconfirmed,

    /// Section-tier fragment matches no anchor on the page
    AnchorMissing,

    /// Excerpt-tier stored text no longer appears verbatim
    ExcerptMissing,

    /// Semantic judge reported a confident mismatch
    Contradiction,

    /// The run was cancelled before this check finished
    Cancelled,
}

/// Structured detail accompanying a verification result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultDetail {
    /// HTTP status observed, when a response arrived
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,

    /// Redirect target captured as a remediation candidate.
    /// Never applied automatically.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_target: Option<String>,

    /// Reason for a fail or incomplete outcome
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<ReasonCode>,

    /// Free-form context (error text, judge confidence, matched alias)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// The persisted outcome of one pass for one URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    /// The checked URL (base URL for reachability, full URL for relevance)
    pub url: String,

    /// Which pass produced this result
    pub pass: Pass,

    /// When the check completed (or was abandoned)
    pub checked_at: DateTime<Utc>,

    /// Pass / fail / incomplete
    pub outcome: Outcome,

    /// Structured context
    #[serde(default)]
    pub detail: ResultDetail,
}

impl VerificationResult {
    /// Build a passing result with empty detail.
    pub fn pass(url: impl Into<String>, pass: Pass, checked_at: DateTime<Utc>) -> Self {
        Self {
            url: url.into(),
            pass,
            checked_at,
            outcome: Outcome::Pass,
            detail: ResultDetail::default(),
        }
    }

    /// Build a failing result with a reason.
    pub fn fail(
        url: impl Into<String>,
        pass: Pass,
        checked_at: DateTime<Utc>,
        reason: ReasonCode,
    ) -> Self {
        Self {
            url: url.into(),
            pass,
            checked_at,
            outcome: Outcome::Fail,
            detail: ResultDetail {
                reason: Some(reason),
                ..ResultDetail::default()
            },
        }
    }

    /// Build an incomplete result for a cancelled check.
    pub fn incomplete(url: impl Into<String>, pass: Pass, checked_at: DateTime<Utc>) -> Self {
        Self {
            url: url.into(),
            pass,
            checked_at,
            outcome: Outcome::Incomplete,
            detail: ResultDetail {
                reason: Some(ReasonCode::Cancelled),
                ..ResultDetail::default()
            },
        }
    }

    /// The idempotence key for persisted result sets.
    pub fn key(&self) -> (&str, Pass) {
        (&self.url, self.pass)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_round_trip() {
        for pass in [Pass::Reachability, Pass::Relevance, Pass::Semantic] {
            assert_eq!(Pass::parse(pass.as_str()), Some(pass));
        }
    }

    #[test]
    fn test_incomplete_is_distinct_from_fail() {
        let now = Utc::now();
        let cancelled = VerificationResult::incomplete("https://a.example", Pass::Reachability, now);
        let broken = VerificationResult::fail(
            "https://a.example",
            Pass::Reachability,
            now,
            ReasonCode::HttpError,
        );

        assert_ne!(cancelled.outcome, broken.outcome);
        assert_eq!(cancelled.detail.reason, Some(ReasonCode::Cancelled));
    }

    #[test]
    fn test_result_serde_round_trip() {
        let now = Utc::now();
        let mut result = VerificationResult::pass("https://a.example/docs", Pass::Reachability, now);
        result.detail.status_code = Some(301);
        result.detail.redirect_target = Some("https://a.example/docs/new".to_string());

        let json = serde_json::to_string(&result).unwrap();
        let back: VerificationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, back);
    }
}

//! Cost gate for the semantic tier
//!
//! Semantic verdicts are cached in the semantic results file; a citation
//! is only re-judged when its cached verdict has aged out.

use attest_domain::{
    Outcome, Pass, ReasonCode, ResultDetail, Verdict, VerificationResult,
};
use chrono::{DateTime, Utc};

/// How long a semantic verdict stays fresh.
pub const SEMANTIC_CACHE_DAYS: i64 = 30;

/// Whether a citation is due for (re-)judging.
///
/// True when there is no cached verdict, or the cached one is older than
/// [`SEMANTIC_CACHE_DAYS`]. Incomplete results never count as cached.
pub fn due_for_semantic(prior: Option<&VerificationResult>, now: DateTime<Utc>) -> bool {
    match prior {
        None => true,
        Some(result) if result.outcome == Outcome::Incomplete => true,
        Some(result) => (now - result.checked_at).num_days() >= SEMANTIC_CACHE_DAYS,
    }
}

/// Convert a judge verdict into a semantic-pass result for a URL.
///
/// A confident mismatch is a contradiction; a hesitant one is recorded
/// as unconfirmed so it surfaces as a warning rather than an error.
pub fn verdict_result(
    url: impl Into<String>,
    verdict: &Verdict,
    checked_at: DateTime<Utc>,
) -> VerificationResult {
    if verdict.matches {
        return VerificationResult::pass(url, Pass::Semantic, checked_at);
    }
    let reason = if verdict.is_contradiction() {
        ReasonCode::Contradiction
    } else {
        ReasonCode::Unconfirmed
    };
    VerificationResult {
        url: url.into(),
        pass: Pass::Semantic,
        checked_at,
        outcome: Outcome::Fail,
        detail: ResultDetail {
            reason: Some(reason),
            note: verdict
                .suggested_excerpt
                .as_ref()
                .map(|e| format!("suggested excerpt: {}", e)),
            ..ResultDetail::default()
        },
    }
}

//! Mapping persisted verification results onto the findings taxonomy

use attest_domain::{
    Finding, FindingKind, Outcome, Pass, ReasonCode, Severity, VerificationResult,
};

/// Derive findings from one dataset's results for one pass.
///
/// Incomplete results produce nothing: a cancelled check is not
/// evidence. A soft "unconfirmed" relevance miss is a warning; every
/// other fail is an error. Hesitant semantic mismatches are logged by
/// the judge layer but deliberately produce no finding, since the
/// taxonomy reserves SemanticContradiction for confident mismatches.
pub fn findings_from_results(dataset: &str, results: &[VerificationResult]) -> Vec<Finding> {
    let mut findings = Vec::new();
    for result in results {
        if result.outcome != Outcome::Fail {
            continue;
        }
        let (kind, severity) = match (result.pass, result.detail.reason) {
            (Pass::Reachability, _) => (FindingKind::PermanentUnreachable, Severity::Error),
            (Pass::Relevance, Some(ReasonCode::Unconfirmed)) => {
                (FindingKind::RelevanceMismatch, Severity::Warning)
            }
            (Pass::Relevance, _) => (FindingKind::RelevanceMismatch, Severity::Error),
            (Pass::Semantic, Some(ReasonCode::Contradiction)) => {
                (FindingKind::SemanticContradiction, Severity::Error)
            }
            (Pass::Semantic, _) => continue,
        };
        findings.push(
            Finding::new(kind, severity, describe(result))
                .with_dataset(dataset)
                .with_url(&result.url),
        );
    }
    findings
}

fn describe(result: &VerificationResult) -> String {
    let mut message = format!("{} check failed", result.pass.as_str());
    if let Some(code) = result.detail.status_code {
        message.push_str(&format!(" (HTTP {})", code));
    }
    if let Some(reason) = result.detail.reason {
        message.push_str(&format!(" [{:?}]", reason));
    }
    if let Some(note) = &result.detail.note {
        message.push_str(": ");
        message.push_str(note);
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_incomplete_produces_no_finding() {
        let results = vec![VerificationResult::incomplete(
            "https://a.example/x",
            Pass::Reachability,
            Utc::now(),
        )];
        assert!(findings_from_results("acme", &results).is_empty());
    }

    #[test]
    fn test_reachability_fail_is_unreachable_error() {
        let mut result = VerificationResult::fail(
            "https://a.example/x",
            Pass::Reachability,
            Utc::now(),
            ReasonCode::HttpError,
        );
        result.detail.status_code = Some(404);

        let findings = findings_from_results("acme", &[result]);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, FindingKind::PermanentUnreachable);
        assert_eq!(findings[0].severity, Severity::Error);
        assert!(findings[0].message.contains("HTTP 404"));
    }

    #[test]
    fn test_unconfirmed_relevance_is_warning() {
        let soft = VerificationResult::fail(
            "https://a.example/x",
            Pass::Relevance,
            Utc::now(),
            ReasonCode::Unconfirmed,
        );
        let hard = VerificationResult::fail(
            "https://a.example/y",
            Pass::Relevance,
            Utc::now(),
            ReasonCode::ExcerptMissing,
        );

        let findings = findings_from_results("acme", &[soft, hard]);
        assert_eq!(findings[0].severity, Severity::Warning);
        assert_eq!(findings[1].severity, Severity::Error);
    }

    #[test]
    fn test_only_confident_semantic_mismatch_reports() {
        let contradiction = VerificationResult::fail(
            "https://a.example/x",
            Pass::Semantic,
            Utc::now(),
            ReasonCode::Contradiction,
        );
        let hesitant = VerificationResult::fail(
            "https://a.example/y",
            Pass::Semantic,
            Utc::now(),
            ReasonCode::Unconfirmed,
        );

        let findings = findings_from_results("acme", &[contradiction, hesitant]);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, FindingKind::SemanticContradiction);
    }
}

//! Staleness bands and per-dataset quality stats
//!
//! Every citation carries the date it was last confirmed. Confirmation
//! older than the warning band needs re-verification; older than the
//! error band it no longer counts as verified at all. Both bands are
//! strict: a citation verified exactly 30 days ago is still fresh.

use attest_domain::{ClaimRecord, Finding, FindingKind, Severity};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Verification older than this many days draws a warning.
pub const WARN_AFTER_DAYS: i64 = 30;

/// Verification older than this many days is an error.
pub const ERROR_AFTER_DAYS: i64 = 90;

/// Per-dataset quality stats for the exported quality endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualitySummary {
    /// Claims in the dataset
    pub total_claims: usize,

    /// Citations across all claims
    pub total_citations: usize,

    /// Citations confirmed within the warning band
    pub verified_within_30d: usize,

    /// Citations past the warning band but inside the error band
    pub stale_warnings: usize,

    /// Citations past the error band
    pub stale_errors: usize,
}

/// One finding per citation whose confirmation has aged out of a band.
pub fn staleness_findings(dataset: &str, claims: &[ClaimRecord], today: NaiveDate) -> Vec<Finding> {
    let mut findings = Vec::new();
    for claim in claims {
        for citation in &claim.citations {
            let age = (today - citation.verified_date).num_days();
            let severity = if age > ERROR_AFTER_DAYS {
                Severity::Error
            } else if age > WARN_AFTER_DAYS {
                Severity::Warning
            } else {
                continue;
            };
            findings.push(
                Finding::new(
                    FindingKind::StaleVerification,
                    severity,
                    format!("last verified {} days ago", age),
                )
                .with_dataset(dataset)
                .with_claim(claim.effective_key())
                .with_url(&citation.url),
            );
        }
    }
    findings
}

/// Quality stats for one dataset as of `today`.
pub fn dataset_quality(claims: &[ClaimRecord], today: NaiveDate) -> QualitySummary {
    let mut summary = QualitySummary {
        total_claims: claims.len(),
        total_citations: 0,
        verified_within_30d: 0,
        stale_warnings: 0,
        stale_errors: 0,
    };
    for citation in claims.iter().flat_map(|c| &c.citations) {
        summary.total_citations += 1;
        let age = (today - citation.verified_date).num_days();
        if age > ERROR_AFTER_DAYS {
            summary.stale_errors += 1;
        } else if age > WARN_AFTER_DAYS {
            summary.stale_warnings += 1;
        } else {
            summary.verified_within_30d += 1;
        }
    }
    summary
}

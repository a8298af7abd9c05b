//! Run report - the structured output of every pipeline run

use attest_domain::{Finding, FindingKind, Severity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregated outcome of one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run finished
    pub finished_at: Option<DateTime<Utc>>,

    /// Datasets covered by this run
    pub datasets: Vec<String>,

    /// Distinct URLs checked by the network passes
    pub checked_urls: usize,

    /// Citations skipped because their URL fell outside the dataset's
    /// source registry
    pub skipped_out_of_scope: usize,

    /// Checks recorded as incomplete (run-level timeout/cancellation)
    pub incomplete_checks: usize,

    /// Every finding, in the order produced
    pub findings: Vec<Finding>,

    /// Finding counts per taxonomy kind
    pub counts: BTreeMap<String, usize>,
}

impl RunReport {
    /// Start a report at `started_at`.
    pub fn started(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            finished_at: None,
            datasets: Vec::new(),
            checked_urls: 0,
            skipped_out_of_scope: 0,
            incomplete_checks: 0,
            findings: Vec::new(),
            counts: BTreeMap::new(),
        }
    }

    /// Record findings and keep the per-kind counts in sync.
    pub fn add_findings(&mut self, findings: impl IntoIterator<Item = Finding>) {
        for finding in findings {
            *self
                .counts
                .entry(finding.kind.as_str().to_string())
                .or_default() += 1;
            self.findings.push(finding);
        }
    }

    /// Findings of a given kind.
    pub fn count(&self, kind: FindingKind) -> usize {
        self.counts.get(kind.as_str()).copied().unwrap_or(0)
    }

    /// Error-severity findings.
    pub fn error_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
            .count()
    }

    /// Warning-severity findings.
    pub fn warning_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
            .count()
    }

    /// Mark the run finished.
    pub fn finish(&mut self, finished_at: DateTime<Utc>) {
        self.finished_at = Some(finished_at);
    }
}

//! Claim record validation logic

use crate::ValidationConfig;
use attest_domain::{Citation, ClaimRecord, Finding, FindingKind, Granularity, Severity};
use attest_store::DatasetSnapshot;
use std::collections::HashSet;

/// Result of validating one dataset snapshot.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Findings produced, one or more per violating record
    pub findings: Vec<Finding>,
}

impl ValidationReport {
    /// Count of error-severity findings.
    pub fn error_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
            .count()
    }

    /// Count of warning-severity findings.
    pub fn warning_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
            .count()
    }
}

/// The Gatekeeper validates claim records before verification.
pub struct Gatekeeper {
    config: ValidationConfig,
}

impl Gatekeeper {
    /// Create a new Gatekeeper with the given configuration
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Create a Gatekeeper with default configuration
    pub fn default_config() -> Self {
        Self::new(ValidationConfig::default())
    }

    /// Validate every record in a snapshot. Violations accumulate per
    /// record; nothing short-circuits.
    pub fn validate_snapshot(&self, snapshot: &DatasetSnapshot) -> ValidationReport {
        let dataset = &snapshot.info.id;
        let mut report = ValidationReport::default();
        let mut seen_keys = HashSet::new();

        for claim in &snapshot.claims {
            let key = claim.effective_key();

            if key.is_empty() {
                report.findings.push(
                    Finding::new(
                        FindingKind::SchemaViolation,
                        Severity::Error,
                        format!("claim '{}' has no usable identity", claim.name),
                    )
                    .with_dataset(dataset.clone()),
                );
                continue;
            }

            if !seen_keys.insert(key.clone()) {
                report.findings.push(
                    Finding::new(
                        FindingKind::SchemaViolation,
                        Severity::Error,
                        format!("duplicate claim key '{}' within dataset", key),
                    )
                    .with_dataset(dataset.clone())
                    .with_claim(key.clone()),
                );
            }

            self.validate_claim(dataset, claim, &mut report);
        }

        tracing::debug!(
            dataset,
            errors = report.error_count(),
            warnings = report.warning_count(),
            "schema validation finished"
        );
        report
    }

    fn validate_claim(&self, dataset: &str, claim: &ClaimRecord, report: &mut ValidationReport) {
        let key = claim.effective_key();

        if claim.citations.is_empty() {
            if self.config.warn_on_missing_citations {
                report.findings.push(
                    Finding::new(
                        FindingKind::SchemaViolation,
                        Severity::Warning,
                        "claim carries no citations",
                    )
                    .with_dataset(dataset)
                    .with_claim(key),
                );
            }
            return;
        }

        for citation in &claim.citations {
            if let Some(finding) = self.validate_citation(citation) {
                report.findings.push(
                    finding
                        .with_dataset(dataset)
                        .with_claim(key.clone())
                        .with_url(citation.url.clone()),
                );
            }
        }

        let all_excerpt = claim
            .citations
            .iter()
            .all(|c| c.granularity == Granularity::Excerpt);
        if all_excerpt && self.config.warn_on_all_excerpt {
            report.findings.push(
                Finding::new(
                    FindingKind::SchemaViolation,
                    Severity::Warning,
                    "every citation is excerpt-tier; no dedicated or anchored evidence",
                )
                .with_dataset(dataset)
                .with_claim(key),
            );
        }
    }

    fn validate_citation(&self, citation: &Citation) -> Option<Finding> {
        if citation.url.trim().is_empty() {
            return Some(Finding::new(
                FindingKind::SchemaViolation,
                Severity::Error,
                "citation has an empty URL",
            ));
        }

        match citation.granularity {
            Granularity::Section => {
                if citation.fragment().is_none() {
                    return Some(Finding::new(
                        FindingKind::SchemaViolation,
                        Severity::Error,
                        "section granularity requires a URL fragment",
                    ));
                }
            }
            Granularity::Excerpt => match &citation.excerpt {
                None => {
                    return Some(Finding::new(
                        FindingKind::SchemaViolation,
                        Severity::Error,
                        "excerpt granularity requires a stored excerpt",
                    ));
                }
                Some(excerpt) => {
                    let len = excerpt.chars().count();
                    if len < self.config.excerpt_min_chars || len > self.config.excerpt_max_chars {
                        return Some(Finding::new(
                            FindingKind::SchemaViolation,
                            Severity::Error,
                            format!(
                                "stored excerpt is {} chars, outside {}-{}",
                                len, self.config.excerpt_min_chars, self.config.excerpt_max_chars
                            ),
                        ));
                    }
                }
            },
            Granularity::Dedicated => {}
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attest_domain::{AccessTier, Category, DatasetInfo, Maturity, RecordStatus};
    use chrono::NaiveDate;

    fn citation(url: &str, granularity: Granularity, excerpt: Option<&str>) -> Citation {
        Citation {
            url: url.to_string(),
            description: "docs".to_string(),
            published_date: None,
            verified_date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            status: RecordStatus::Active,
            superseded_by: None,
            granularity,
            excerpt: excerpt.map(String::from),
        }
    }

    fn claim(name: &str, citations: Vec<Citation>) -> ClaimRecord {
        ClaimRecord {
            key: None,
            name: name.to_string(),
            category: Category::ChatAssistance,
            description: "a capability".to_string(),
            available: true,
            tier: AccessTier::Free,
            maturity: Maturity::Stable,
            status: RecordStatus::Active,
            deprecated_date: None,
            superseded_by: None,
            aliases: vec![],
            citations,
        }
    }

    fn snapshot(claims: Vec<ClaimRecord>) -> DatasetSnapshot {
        DatasetSnapshot {
            info: DatasetInfo {
                id: "acme".to_string(),
                name: "Acme".to_string(),
                vendor: String::new(),
                version: String::new(),
                last_updated: None,
            },
            claims,
        }
    }

    const LONG_EXCERPT: &str =
        "This capability lets the assistant answer questions about the open workspace in real time.";

    #[test]
    fn test_clean_snapshot_has_no_findings() {
        let gatekeeper = Gatekeeper::default_config();
        let report = gatekeeper.validate_snapshot(&snapshot(vec![claim(
            "Chat Assistance",
            vec![citation("https://docs.example/chat", Granularity::Dedicated, None)],
        )]));

        assert!(report.findings.is_empty());
    }

    #[test]
    fn test_section_without_fragment_is_an_error() {
        let gatekeeper = Gatekeeper::default_config();
        let report = gatekeeper.validate_snapshot(&snapshot(vec![claim(
            "Chat Assistance",
            vec![citation("https://docs.example/chat", Granularity::Section, None)],
        )]));

        assert_eq!(report.error_count(), 1);
        assert!(report.findings[0].message.contains("fragment"));
    }

    #[test]
    fn test_missing_excerpt_emits_one_violation_per_citation() {
        // 22 excerpt-tier citations of one URL, none carrying an excerpt:
        // 22 violations, not a silent pass.
        let citations: Vec<Citation> = (0..22)
            .map(|_| citation("https://docs.example/everything", Granularity::Excerpt, None))
            .collect();
        let claims: Vec<ClaimRecord> = citations
            .into_iter()
            .enumerate()
            .map(|(i, c)| claim(&format!("Capability {}", i), vec![c]))
            .collect();

        let gatekeeper = Gatekeeper::new(ValidationConfig::permissive());
        let report = gatekeeper.validate_snapshot(&snapshot(claims));

        let missing_excerpt = report
            .findings
            .iter()
            .filter(|f| f.kind == FindingKind::SchemaViolation && f.severity == Severity::Error)
            .count();
        assert_eq!(missing_excerpt, 22);
    }

    #[test]
    fn test_excerpt_length_bounds() {
        let gatekeeper = Gatekeeper::default_config();

        let too_short = gatekeeper.validate_snapshot(&snapshot(vec![claim(
            "A",
            vec![citation("https://d.example/a", Granularity::Excerpt, Some("short"))],
        )]));
        assert_eq!(too_short.error_count(), 1);

        let ok = gatekeeper.validate_snapshot(&snapshot(vec![claim(
            "B",
            vec![citation("https://d.example/b", Granularity::Excerpt, Some(LONG_EXCERPT))],
        )]));
        assert_eq!(ok.error_count(), 0);
    }

    #[test]
    fn test_all_excerpt_claim_raises_quality_warning() {
        let gatekeeper = Gatekeeper::default_config();
        let report = gatekeeper.validate_snapshot(&snapshot(vec![claim(
            "Chat Assistance",
            vec![
                citation("https://d.example/1", Granularity::Excerpt, Some(LONG_EXCERPT)),
                citation("https://d.example/2", Granularity::Excerpt, Some(LONG_EXCERPT)),
            ],
        )]));

        assert_eq!(report.error_count(), 0);
        assert_eq!(report.warning_count(), 1);
        assert!(report.findings[0].message.contains("excerpt-tier"));
    }

    #[test]
    fn test_duplicate_keys_within_dataset() {
        let gatekeeper = Gatekeeper::new(ValidationConfig::permissive());
        let report = gatekeeper.validate_snapshot(&snapshot(vec![
            claim("Chat Assistance", vec![]),
            claim("Chat Assistance", vec![]),
        ]));

        assert_eq!(report.error_count(), 1);
        assert!(report.findings[0].message.contains("duplicate"));
    }
}

//! Cross-dataset claim reconciliation
//!
//! Claims are joined across datasets by their stable key, never by
//! display name. The reconciler only reports: it never infers
//! availability for a dataset that does not track a claim, and never
//! corrects divergent data.

use attest_domain::{
    ClaimRecord, ComparisonEntry, DatasetPresence, Finding, FindingKind, Severity,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Headline counts for the comparison artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSummary {
    /// Distinct claim keys across all datasets
    pub total_claims: usize,

    /// Claims tracked per dataset
    pub claims_per_dataset: BTreeMap<String, usize>,

    /// (dataset, claim) pairs per access tier
    pub tier_distribution: BTreeMap<String, usize>,
}

/// The reconciler's full output.
#[derive(Debug, Clone)]
pub struct ReconcileOutput {
    /// One entry per distinct claim key, sorted by category internal
    /// key, then claim key
    pub entries: Vec<ComparisonEntry>,

    /// Inconsistency findings (divergent categories)
    pub findings: Vec<Finding>,

    /// Headline counts
    pub summary: ComparisonSummary,
}

/// Merge claims from every dataset into one comparison.
///
/// `datasets` maps dataset id to its claims; the `BTreeMap` order is the
/// fixed dataset order used for display tie-breaks, so output is fully
/// determined by input.
pub fn reconcile(datasets: &BTreeMap<String, Vec<ClaimRecord>>) -> ReconcileOutput {
    let mut entries: BTreeMap<String, ComparisonEntry> = BTreeMap::new();
    let mut findings = Vec::new();
    let mut summary = ComparisonSummary::default();

    for (dataset_id, claims) in datasets {
        summary
            .claims_per_dataset
            .insert(dataset_id.clone(), claims.len());
        for claim in claims {
            let key = claim.effective_key();
            *summary
                .tier_distribution
                .entry(claim.tier.as_str().to_string())
                .or_default() += 1;

            let presence = DatasetPresence {
                available: claim.available,
                tier: claim.tier,
                maturity: claim.maturity,
                status: claim.status,
            };

            match entries.get_mut(key.as_str()) {
                None => {
                    let mut entry = ComparisonEntry {
                        key: key.clone(),
                        name: claim.name.clone(),
                        category: claim.category,
                        datasets: BTreeMap::new(),
                    };
                    entry.datasets.insert(dataset_id.clone(), presence);
                    entries.insert(key.as_str().to_string(), entry);
                }
                Some(entry) => {
                    // First dataset in fixed order wins for display;
                    // divergence is reported, not resolved.
                    if entry.category != claim.category {
                        tracing::warn!(
                            claim = key.as_str(),
                            dataset = dataset_id.as_str(),
                            "category diverges across datasets"
                        );
                        findings.push(
                            Finding::new(
                                FindingKind::ReconciliationInconsistency,
                                Severity::Warning,
                                format!(
                                    "category '{}' in dataset '{}' diverges from '{}'",
                                    claim.category.as_str(),
                                    dataset_id,
                                    entry.category.as_str()
                                ),
                            )
                            .with_dataset(dataset_id.clone())
                            .with_claim(key.clone()),
                        );
                    }
                    entry.datasets.insert(dataset_id.clone(), presence);
                }
            }
        }
    }

    summary.total_claims = entries.len();

    let mut entries: Vec<ComparisonEntry> = entries.into_values().collect();
    entries.sort_by(|a, b| {
        a.category
            .as_str()
            .cmp(b.category.as_str())
            .then_with(|| a.key.as_str().cmp(b.key.as_str()))
    });

    ReconcileOutput {
        entries,
        findings,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attest_domain::{AccessTier, Category, Maturity, RecordStatus};

    fn claim(name: &str, category: Category, available: bool, tier: AccessTier) -> ClaimRecord {
        ClaimRecord {
            key: None,
            name: name.to_string(),
            category,
            description: String::new(),
            available,
            tier,
            maturity: Maturity::Stable,
            status: RecordStatus::Active,
            deprecated_date: None,
            superseded_by: None,
            aliases: vec![],
            citations: vec![],
        }
    }

    #[test]
    fn test_same_key_merges_into_one_entry() {
        // Two datasets track the same claim under the same key but with
        // different availability; the comparison has exactly one entry
        // with both presences.
        let mut datasets = BTreeMap::new();
        datasets.insert(
            "acme".to_string(),
            vec![claim("Tool Use", Category::WorkflowAutomation, true, AccessTier::Pro)],
        );
        datasets.insert(
            "globex".to_string(),
            vec![claim("Tool Use", Category::WorkflowAutomation, false, AccessTier::Free)],
        );

        let output = reconcile(&datasets);
        assert_eq!(output.entries.len(), 1);
        assert!(output.findings.is_empty());

        let entry = &output.entries[0];
        assert_eq!(entry.key.as_str(), "tool-use");
        assert!(entry.datasets["acme"].available);
        assert!(!entry.datasets["globex"].available);
    }

    #[test]
    fn test_untracked_is_absent_not_unavailable() {
        let mut datasets = BTreeMap::new();
        datasets.insert(
            "acme".to_string(),
            vec![claim("Tool Use", Category::WorkflowAutomation, true, AccessTier::Pro)],
        );
        datasets.insert("globex".to_string(), vec![]);

        let output = reconcile(&datasets);
        let entry = &output.entries[0];
        assert!(entry.datasets.contains_key("acme"));
        assert!(!entry.datasets.contains_key("globex"));
    }

    #[test]
    fn test_divergent_category_reports_and_first_dataset_wins() {
        let mut datasets = BTreeMap::new();
        datasets.insert(
            "acme".to_string(),
            vec![claim("Tool Use", Category::WorkflowAutomation, true, AccessTier::Pro)],
        );
        datasets.insert(
            "globex".to_string(),
            vec![claim("Tool Use", Category::Integrations, true, AccessTier::Pro)],
        );

        let output = reconcile(&datasets);
        assert_eq!(output.entries[0].category, Category::WorkflowAutomation);
        assert_eq!(output.findings.len(), 1);
        assert_eq!(
            output.findings[0].kind,
            FindingKind::ReconciliationInconsistency
        );
        assert_eq!(output.findings[0].dataset.as_deref(), Some("globex"));
    }

    #[test]
    fn test_entries_sorted_by_category_then_key() {
        let mut datasets = BTreeMap::new();
        datasets.insert(
            "acme".to_string(),
            vec![
                claim("Webhooks", Category::Integrations, true, AccessTier::Free),
                claim("Tool Use", Category::WorkflowAutomation, true, AccessTier::Pro),
                claim("Agent Teams", Category::WorkflowAutomation, true, AccessTier::Pro),
            ],
        );

        let output = reconcile(&datasets);
        // "integrations" sorts before "workflow-automation"
        let keys: Vec<&str> = output.entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["webhooks", "agent-teams", "tool-use"]);
    }

    #[test]
    fn test_summary_counts() {
        let mut datasets = BTreeMap::new();
        datasets.insert(
            "acme".to_string(),
            vec![
                claim("Tool Use", Category::WorkflowAutomation, true, AccessTier::Pro),
                claim("Webhooks", Category::Integrations, true, AccessTier::Free),
            ],
        );
        datasets.insert(
            "globex".to_string(),
            vec![claim("Tool Use", Category::WorkflowAutomation, true, AccessTier::Free)],
        );

        let output = reconcile(&datasets);
        assert_eq!(output.summary.total_claims, 2);
        assert_eq!(output.summary.claims_per_dataset["acme"], 2);
        assert_eq!(output.summary.claims_per_dataset["globex"], 1);
        assert_eq!(output.summary.tier_distribution["free"], 2);
        assert_eq!(output.summary.tier_distribution["pro"], 1);
    }
}

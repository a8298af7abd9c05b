//! Explicit remediation - the only path that mutates claim data
//!
//! Redirect targets observed by the reachability pass are collected into
//! a fix plan for human review; applying a reviewed plan rewrites the
//! matching citations with a fresh verified date. Nothing here runs
//! automatically.

use crate::RunnerError;
use attest_domain::traits::ResultStore;
use attest_domain::{Granularity, Pass, RecordStatus};
use attest_store::{FileResultStore, SnapshotStore};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One URL rewrite awaiting (or applied after) human review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixEntry {
    /// Citation URL to replace
    pub old_url: String,

    /// Replacement URL
    pub new_url: String,

    /// Optional granularity override. Moving a citation off the excerpt
    /// tier drops its stored excerpt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granularity: Option<Granularity>,
}

/// A reviewed set of URL rewrites.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixPlan {
    /// The rewrites, applied in order
    pub fixes: Vec<FixEntry>,
}

impl FixPlan {
    /// Read a plan from a JSON file.
    pub fn load(path: &Path) -> Result<Self, RunnerError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| RunnerError::InvalidFixPlan(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&contents)
            .map_err(|e| RunnerError::InvalidFixPlan(format!("{}: {}", path.display(), e)))
    }
}

/// One citation rewrite that happened (or would, under dry-run).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedFix {
    /// Dataset the citation lives in
    pub dataset: String,

    /// Owning claim key
    pub claim: String,

    /// URL before the rewrite
    pub old_url: String,

    /// URL after the rewrite
    pub new_url: String,

    /// Whether a stored excerpt was dropped by a granularity override
    pub dropped_excerpt: bool,
}

/// Outcome of applying a fix plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyOutcome {
    /// Every rewrite performed, in dataset order
    pub changes: Vec<AppliedFix>,

    /// Whether this was a dry run (nothing persisted)
    pub dry_run: bool,
}

/// Apply a reviewed fix plan across all datasets under the store.
///
/// Each matching citation gets the new URL, an active status, and
/// `today` as its verified date. With `dry_run` the rewrites are
/// computed and logged but nothing is written back.
pub fn apply_fixes(
    store: &SnapshotStore,
    plan: &FixPlan,
    dry_run: bool,
    today: NaiveDate,
) -> Result<ApplyOutcome, RunnerError> {
    let mut outcome = ApplyOutcome {
        dry_run,
        ..ApplyOutcome::default()
    };

    for id in store.dataset_ids()? {
        let mut snapshot = store.load(&id)?;
        let mut touched = false;

        for claim in &mut snapshot.claims {
            let claim_key = claim.effective_key();
            for citation in &mut claim.citations {
                // Candidates collected from reachability carry the
                // fragment-stripped base URL, so match on either form.
                let Some(fix) = plan
                    .fixes
                    .iter()
                    .find(|f| f.old_url == citation.url || f.old_url == citation.base_url())
                else {
                    continue;
                };
                let old_url = citation.url.clone();
                let new_url = rewritten_url(citation.fragment(), &fix.new_url);

                let mut dropped_excerpt = false;
                if let Some(granularity) = fix.granularity {
                    if citation.granularity == Granularity::Excerpt
                        && granularity != Granularity::Excerpt
                    {
                        citation.excerpt = None;
                        dropped_excerpt = true;
                    }
                    citation.granularity = granularity;
                }

                tracing::info!(
                    dataset = id.as_str(),
                    claim = claim_key.as_str(),
                    old = old_url.as_str(),
                    new = new_url.as_str(),
                    dropped_excerpt,
                    dry_run,
                    "applying citation fix"
                );

                citation.url = new_url.clone();
                citation.status = RecordStatus::Active;
                citation.verified_date = today;
                touched = true;

                outcome.changes.push(AppliedFix {
                    dataset: id.clone(),
                    claim: claim_key.as_str().to_string(),
                    old_url,
                    new_url,
                    dropped_excerpt,
                });
            }
        }

        if touched && !dry_run {
            store.save(&id, &snapshot)?;
        }
    }

    Ok(outcome)
}

/// The replacement URL, keeping the citation's fragment when the fix
/// does not supply one of its own. Section citations stay anchored.
fn rewritten_url(fragment: Option<&str>, new_url: &str) -> String {
    match fragment {
        Some(fragment) if !new_url.contains('#') => format!("{}#{}", new_url, fragment),
        _ => new_url.to_string(),
    }
}

/// Collect redirect targets from the last reachability run as a
/// ready-to-edit fix plan. Proposals only; nothing is applied.
pub fn redirect_candidates(
    store: &SnapshotStore,
    results: &FileResultStore,
) -> Result<FixPlan, RunnerError> {
    let mut fixes = Vec::new();
    for id in store.dataset_ids()? {
        for result in results.load(&id, Pass::Reachability)? {
            if let Some(target) = &result.detail.redirect_target {
                fixes.push(FixEntry {
                    old_url: result.url.clone(),
                    new_url: target.clone(),
                    granularity: None,
                });
            }
        }
    }
    fixes.sort_by(|a, b| a.old_url.cmp(&b.old_url));
    fixes.dedup();
    Ok(FixPlan { fixes })
}

//! Pipeline orchestration
//!
//! Wires the passes together per dataset: gatekeeper validation,
//! reachability, relevance, the gated semantic tier, staleness, and the
//! cross-dataset reconciliation at the end. Findings accumulate in the
//! run report; the only fatal failures are unreadable input and checker
//! construction.

use crate::{findings_from_results, RunReport, RunnerError};
use attest_domain::{
    source_key, ClaimRecord, Outcome, Pass, SemanticJudge, VerificationResult,
};
use attest_domain::traits::ResultStore;
use attest_export::{DiscoveryDoc, Exporter, ExportInput};
use attest_gatekeeper::Gatekeeper;
use attest_judge::{due_for_semantic, verdict_result};
use attest_reconcile::{
    build_source_index, dataset_quality, reconcile, staleness_findings, QualitySummary,
};
use attest_store::{DatasetSnapshot, FileResultStore, SnapshotStore, StoreError};
use attest_verify::{
    Fetcher, HostLimits, PageText, ReachabilityChecker, RelevanceChecker, VerifyConfig,
};
use chrono::Utc;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// What a run should do.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Restrict the run to one dataset
    pub dataset: Option<String>,

    /// Run the cost-gated semantic tier
    pub semantic: bool,

    /// Check everything but persist nothing
    pub dry_run: bool,

    /// Run-level budget; checks still in flight when it expires are
    /// recorded as incomplete
    pub timeout: Option<Duration>,
}

/// The verification pipeline over one data root.
pub struct Pipeline<J> {
    snapshots: SnapshotStore,
    results: FileResultStore,
    judge: J,
    verify_config: VerifyConfig,
    gatekeeper: Gatekeeper,
}

impl<J: SemanticJudge> Pipeline<J> {
    /// Open a pipeline over `root` with the given judge and config.
    pub fn open(
        root: impl AsRef<Path>,
        judge: J,
        verify_config: VerifyConfig,
    ) -> Result<Self, RunnerError> {
        let root = root.as_ref();
        Ok(Self {
            snapshots: SnapshotStore::open(root)?,
            results: FileResultStore::new(root),
            judge,
            verify_config,
            gatekeeper: Gatekeeper::default_config(),
        })
    }

    /// The full verification run.
    pub async fn run(&self, options: &RunOptions) -> Result<RunReport, RunnerError> {
        let mut report = RunReport::started(Utc::now());
        let run_deadline = options.timeout.map(|budget| Instant::now() + budget);

        let ids = self.selected_ids(options.dataset.as_deref())?;
        report.datasets = ids.clone();

        let fetcher = Arc::new(Fetcher::new(&self.verify_config)?);
        let limits = HostLimits::new(
            self.verify_config.global_concurrency,
            self.verify_config.per_host_concurrency,
        );
        let reachability =
            ReachabilityChecker::new(fetcher.clone(), limits.clone(), self.verify_config.clone());
        let relevance = RelevanceChecker::new(fetcher, limits);

        let mut loaded: BTreeMap<String, DatasetSnapshot> = BTreeMap::new();
        for id in &ids {
            loaded.insert(id.clone(), self.snapshots.load(id)?);
        }

        for id in &ids {
            let snapshot = &loaded[id];
            tracing::info!(dataset = id.as_str(), claims = snapshot.claims.len(), "verifying");

            report.add_findings(self.gatekeeper.validate_snapshot(snapshot).findings);

            let registry = self.snapshots.load_registry(id)?.unwrap_or_default();
            let mut base_urls: BTreeSet<String> = BTreeSet::new();
            for claim in &snapshot.claims {
                for citation in &claim.citations {
                    if registry.in_scope(&citation.url) {
                        base_urls.insert(citation.base_url().to_string());
                    } else {
                        report.skipped_out_of_scope += 1;
                        tracing::info!(
                            dataset = id.as_str(),
                            url = citation.url.as_str(),
                            "outside source registry, skipped"
                        );
                    }
                }
            }
            report.checked_urls += base_urls.len();

            let reach_results = reachability
                .check_all(base_urls.into_iter().collect(), remaining(run_deadline))
                .await;
            report.incomplete_checks += count_incomplete(&reach_results);
            report.add_findings(findings_from_results(id, &reach_results));
            if !options.dry_run {
                self.results
                    .merge_save(id, Pass::Reachability, &reach_results)?;
            }

            let reachable: HashSet<String> = reach_results
                .iter()
                .filter(|r| r.outcome == Outcome::Pass)
                .map(|r| r.url.clone())
                .collect();
            let pages = relevance
                .fetch_pages(reachable.iter().cloned().collect(), remaining(run_deadline))
                .await;
            let relevance_results = relevance.evaluate_all(&snapshot.claims, &reachable, &pages);
            report.incomplete_checks += count_incomplete(&relevance_results);
            report.add_findings(findings_from_results(id, &relevance_results));
            if !options.dry_run {
                self.results
                    .merge_save(id, Pass::Relevance, &relevance_results)?;
            }

            if options.semantic {
                let semantic_results = self
                    .run_semantic(id, snapshot, &relevance_results, &pages)
                    .await?;
                report.incomplete_checks += count_incomplete(&semantic_results);
                report.add_findings(findings_from_results(id, &semantic_results));
                if !options.dry_run {
                    self.results
                        .merge_save(id, Pass::Semantic, &semantic_results)?;
                }
            }

            report.add_findings(staleness_findings(
                id,
                &snapshot.claims,
                Utc::now().date_naive(),
            ));
        }

        let claims_by_dataset = claims_map(&loaded);
        report.add_findings(reconcile(&claims_by_dataset).findings);

        report.finish(Utc::now());
        Ok(report)
    }

    /// The semantic tier for one dataset: only citations whose relevance
    /// check passed this run, and only when the cached verdict aged out.
    async fn run_semantic(
        &self,
        dataset: &str,
        snapshot: &DatasetSnapshot,
        relevance_results: &[VerificationResult],
        pages: &HashMap<String, Option<PageText>>,
    ) -> Result<Vec<VerificationResult>, RunnerError> {
        let prior = self.results.load(dataset, Pass::Semantic)?;
        let prior_by_url: HashMap<&str, &VerificationResult> =
            prior.iter().map(|r| (r.url.as_str(), r)).collect();
        let relevant: HashSet<&str> = relevance_results
            .iter()
            .filter(|r| r.outcome == Outcome::Pass)
            .map(|r| r.url.as_str())
            .collect();

        let now = Utc::now();
        let mut results = Vec::new();
        // Serialized on purpose: the judge is the expensive tier.
        for claim in &snapshot.claims {
            let claim_text = format!("{}: {}", claim.name, claim.description);
            for citation in &claim.citations {
                if !relevant.contains(citation.url.as_str()) {
                    continue;
                }
                if !due_for_semantic(prior_by_url.get(citation.url.as_str()).copied(), now) {
                    tracing::debug!(url = citation.url.as_str(), "semantic verdict still fresh");
                    continue;
                }
                let Some(Some(page)) = pages.get(citation.base_url()) else {
                    continue;
                };
                match self.judge.judge(&claim_text, &page.text).await {
                    Ok(verdict) => {
                        results.push(verdict_result(citation.url.clone(), &verdict, Utc::now()));
                    }
                    Err(error) => {
                        // Judge unavailability is not evidence either way.
                        tracing::warn!(
                            url = citation.url.as_str(),
                            error = %error,
                            "semantic judge failed"
                        );
                        results.push(VerificationResult::incomplete(
                            citation.url.clone(),
                            Pass::Semantic,
                            Utc::now(),
                        ));
                    }
                }
            }
        }
        Ok(results)
    }

    /// Report-only mode: no network, derive findings from the last
    /// persisted results plus the offline passes.
    pub fn report_only(&self, dataset: Option<&str>) -> Result<RunReport, RunnerError> {
        let mut report = RunReport::started(Utc::now());
        let ids = self.selected_ids(dataset)?;
        report.datasets = ids.clone();

        let mut loaded: BTreeMap<String, DatasetSnapshot> = BTreeMap::new();
        for id in &ids {
            loaded.insert(id.clone(), self.snapshots.load(id)?);
        }

        for id in &ids {
            let snapshot = &loaded[id];
            report.add_findings(self.gatekeeper.validate_snapshot(snapshot).findings);
            for pass in [Pass::Reachability, Pass::Relevance, Pass::Semantic] {
                let results = self.results.load(id, pass)?;
                report.incomplete_checks += count_incomplete(&results);
                report.add_findings(findings_from_results(id, &results));
            }
            report.add_findings(staleness_findings(
                id,
                &snapshot.claims,
                Utc::now().date_naive(),
            ));
        }

        let claims_by_dataset = claims_map(&loaded);
        report.add_findings(reconcile(&claims_by_dataset).findings);

        report.finish(Utc::now());
        Ok(report)
    }

    /// Regenerate the static contract from snapshots and persisted
    /// results.
    pub fn export_static(
        &self,
        out_dir: &Path,
        revision: Option<&str>,
    ) -> Result<DiscoveryDoc, RunnerError> {
        let ids = self.selected_ids(None)?;
        let mut loaded: BTreeMap<String, DatasetSnapshot> = BTreeMap::new();
        for id in &ids {
            loaded.insert(id.clone(), self.snapshots.load(id)?);
        }
        let claims_by_dataset = claims_map(&loaded);

        // Latest reachability evidence per normalized URL.
        let mut freshest: HashMap<String, VerificationResult> = HashMap::new();
        for id in &ids {
            for result in self.results.load(id, Pass::Reachability)? {
                let key = source_key(&result.url);
                let newer = freshest
                    .get(&key)
                    .is_none_or(|existing| result.checked_at > existing.checked_at);
                if newer {
                    freshest.insert(key, result);
                }
            }
        }

        let output = reconcile(&claims_by_dataset);
        let sources = build_source_index(&claims_by_dataset, &freshest);
        let today = Utc::now().date_naive();
        let quality: BTreeMap<String, QualitySummary> = claims_by_dataset
            .iter()
            .map(|(id, claims)| (id.clone(), dataset_quality(claims, today)))
            .collect();

        let input = ExportInput {
            comparison: &output.entries,
            comparison_summary: &output.summary,
            sources: &sources,
            quality: &quality,
            datasets: &loaded,
        };
        Ok(Exporter::new(out_dir).export(&input, revision, Utc::now())?)
    }

    /// The snapshot store this pipeline reads from.
    pub fn snapshots(&self) -> &SnapshotStore {
        &self.snapshots
    }

    /// The result store this pipeline persists to.
    pub fn results(&self) -> &FileResultStore {
        &self.results
    }

    fn selected_ids(&self, dataset: Option<&str>) -> Result<Vec<String>, RunnerError> {
        let ids = self.snapshots.dataset_ids()?;
        match dataset {
            None => Ok(ids),
            Some(wanted) if ids.iter().any(|id| id == wanted) => Ok(vec![wanted.to_string()]),
            Some(wanted) => Err(StoreError::DatasetNotFound(wanted.to_string()).into()),
        }
    }
}

fn claims_map(loaded: &BTreeMap<String, DatasetSnapshot>) -> BTreeMap<String, Vec<ClaimRecord>> {
    loaded
        .iter()
        .map(|(id, snapshot)| (id.clone(), snapshot.claims.clone()))
        .collect()
}

fn count_incomplete(results: &[VerificationResult]) -> usize {
    results
        .iter()
        .filter(|r| r.outcome == Outcome::Incomplete)
        .count()
}

fn remaining(deadline: Option<Instant>) -> Option<Duration> {
    deadline.map(|d| d.saturating_duration_since(Instant::now()))
}

//! Attest Export
//!
//! Serializes the derived artifacts as a versioned, read-only static
//! JSON contract: a root discovery document plus per-endpoint files
//! under a version directory. The contract is additive-only within a
//! version; consumers discover endpoints through the root document, so
//! new endpoints never break them.
//!
//! `comparison.json` and `sources.json` carry no timestamps: identical
//! input serializes byte-identically, which keeps diff-based review of
//! regenerated artifacts meaningful. Run metadata lives only in the
//! discovery document.

#![warn(missing_docs)]

use attest_domain::{ComparisonEntry, SourceIndexEntry};
use attest_reconcile::{ComparisonSummary, QualitySummary};
use attest_store::{write_json_atomic, DatasetSnapshot, StoreError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Contract version; bumped only for breaking layout changes.
pub const API_VERSION: &str = "v1";

/// Errors while writing the static contract
#[derive(Error, Debug)]
pub enum ExportError {
    /// Filesystem or serialization failure from the store layer
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Everything the exporter serializes, already derived.
#[derive(Debug, Clone)]
pub struct ExportInput<'a> {
    /// Reconciled cross-dataset comparison entries
    pub comparison: &'a [ComparisonEntry],

    /// Headline comparison counts
    pub comparison_summary: &'a ComparisonSummary,

    /// Deduplicated source index, already in contract order
    pub sources: &'a [SourceIndexEntry],

    /// Per-dataset quality summaries, keyed by dataset id
    pub quality: &'a BTreeMap<String, QualitySummary>,

    /// Per-dataset snapshots, keyed by dataset id
    pub datasets: &'a BTreeMap<String, DatasetSnapshot>,
}

/// Root discovery document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryDoc {
    /// Contract version
    pub version: String,

    /// When this export ran
    pub generated_at: DateTime<Utc>,

    /// Caller-supplied revision id (build number, git sha), when given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,

    /// Headline quality stats, so consumers can judge freshness without
    /// fetching the quality endpoint
    pub quality: QualityOverview,

    /// Endpoint name → path relative to the output root
    pub endpoints: BTreeMap<String, String>,
}

/// Quality stats carried in the discovery document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityOverview {
    /// Stats summed across every dataset
    pub aggregate: QualitySummary,

    /// Stats per dataset id
    pub datasets: BTreeMap<String, QualitySummary>,
}

impl QualityOverview {
    fn from_datasets(datasets: &BTreeMap<String, QualitySummary>) -> Self {
        let mut aggregate = QualitySummary {
            total_claims: 0,
            total_citations: 0,
            verified_within_30d: 0,
            stale_warnings: 0,
            stale_errors: 0,
        };
        for summary in datasets.values() {
            aggregate.total_claims += summary.total_claims;
            aggregate.total_citations += summary.total_citations;
            aggregate.verified_within_30d += summary.verified_within_30d;
            aggregate.stale_warnings += summary.stale_warnings;
            aggregate.stale_errors += summary.stale_errors;
        }
        Self {
            aggregate,
            datasets: datasets.clone(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ComparisonFile<'a> {
    summary: &'a ComparisonSummary,
    entries: &'a [ComparisonEntry],
}

#[derive(Serialize)]
struct SourcesFile<'a> {
    sources: &'a [SourceIndexEntry],
}

#[derive(Serialize)]
struct QualityFile<'a> {
    datasets: &'a BTreeMap<String, QualitySummary>,
}

/// Writes the static contract under an output directory.
#[derive(Debug, Clone)]
pub struct Exporter {
    out_dir: PathBuf,
}

impl Exporter {
    /// Create an exporter rooted at `out_dir`.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// Write every endpoint plus the discovery document.
    ///
    /// Each file is written to a temp file and renamed into place, so a
    /// crashed export never leaves a half-written artifact.
    pub fn export(
        &self,
        input: &ExportInput<'_>,
        revision: Option<&str>,
        generated_at: DateTime<Utc>,
    ) -> Result<DiscoveryDoc, ExportError> {
        let version_dir = self.out_dir.join(API_VERSION);
        let mut endpoints = BTreeMap::new();

        let comparison = ComparisonFile {
            summary: input.comparison_summary,
            entries: input.comparison,
        };
        write_json_atomic(&version_dir.join("comparison.json"), &comparison)?;
        endpoints.insert(
            "comparison".to_string(),
            rel(API_VERSION, "comparison.json"),
        );

        let sources = SourcesFile {
            sources: input.sources,
        };
        write_json_atomic(&version_dir.join("sources.json"), &sources)?;
        endpoints.insert("sources".to_string(), rel(API_VERSION, "sources.json"));

        let quality = QualityFile {
            datasets: input.quality,
        };
        write_json_atomic(&version_dir.join("quality.json"), &quality)?;
        endpoints.insert("quality".to_string(), rel(API_VERSION, "quality.json"));

        for (id, snapshot) in input.datasets {
            let file = format!("datasets/{}.json", id);
            write_json_atomic(&version_dir.join(&file), snapshot)?;
            endpoints.insert(format!("datasets/{}", id), rel(API_VERSION, &file));
        }

        let doc = DiscoveryDoc {
            version: API_VERSION.to_string(),
            generated_at,
            revision: revision.map(str::to_string),
            quality: QualityOverview::from_datasets(input.quality),
            endpoints,
        };
        write_json_atomic(&self.out_dir.join("index.json"), &doc)?;
        tracing::info!(
            out = %self.out_dir.display(),
            endpoints = doc.endpoints.len(),
            "static contract written"
        );
        Ok(doc)
    }

    /// The output directory this exporter writes under.
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }
}

fn rel(version: &str, file: &str) -> String {
    format!("{}/{}", version, file)
}

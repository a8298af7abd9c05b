//! File-backed verification result store
//!
//! One JSON file per (dataset, pass). Within a file, results are keyed
//! by (url, pass): saving replaces any previous row for the same key, so
//! rerunning a pass is idempotent. Files are sorted by URL so identical
//! runs serialize byte-identically.

use crate::{fsutil::write_json_atomic, StoreError};
use attest_domain::traits::ResultStore;
use attest_domain::{Pass, VerificationResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResultFile {
    generated_at: DateTime<Utc>,
    pass: Pass,
    results: Vec<VerificationResult>,
}

/// Verification result store rooted at the data directory.
#[derive(Debug, Clone)]
pub struct FileResultStore {
    root: PathBuf,
}

impl FileResultStore {
    /// Create a store over the same root the snapshots live under.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path(&self, dataset: &str, pass: Pass) -> PathBuf {
        self.root
            .join("datasets")
            .join(dataset)
            .join("verification")
            .join(format!("{}.json", pass.as_str()))
    }

    /// Merge new results over previously persisted ones, keyed by
    /// (url, pass), and save the combined set. Used by partial runs so
    /// a dataset-filtered or timed-out run never drops older evidence.
    pub fn merge_save(
        &self,
        dataset: &str,
        pass: Pass,
        new_results: &[VerificationResult],
    ) -> Result<(), StoreError> {
        let mut merged: BTreeMap<String, VerificationResult> = self
            .load(dataset, pass)?
            .into_iter()
            .map(|r| (r.url.clone(), r))
            .collect();
        for result in new_results {
            merged.insert(result.url.clone(), result.clone());
        }
        let combined: Vec<VerificationResult> = merged.into_values().collect();
        self.save(dataset, pass, &combined)
    }

    /// Path of the result file, for diagnostics.
    pub fn result_path(&self, dataset: &str, pass: Pass) -> PathBuf {
        self.path(dataset, pass)
    }
}

impl ResultStore for FileResultStore {
    type Error = StoreError;

    fn load(&self, dataset: &str, pass: Pass) -> Result<Vec<VerificationResult>, StoreError> {
        let path = self.path(dataset, pass);
        if !path.is_file() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&path)?;
        let file: ResultFile = serde_json::from_str(&contents)?;
        Ok(file.results)
    }

    fn save(
        &self,
        dataset: &str,
        pass: Pass,
        results: &[VerificationResult],
    ) -> Result<(), StoreError> {
        // Deduplicate on the (url, pass) key, last write wins, then sort
        // by URL for reproducible files.
        let mut keyed: BTreeMap<String, VerificationResult> = BTreeMap::new();
        for result in results {
            keyed.insert(result.url.clone(), result.clone());
        }
        let file = ResultFile {
            generated_at: Utc::now(),
            pass,
            results: keyed.into_values().collect(),
        };
        let path = self.path(dataset, pass);
        write_json_atomic(&path, &file)?;
        tracing::debug!(
            dataset,
            pass = pass.as_str(),
            results = file.results.len(),
            path = %path.display(),
            "persisted verification results"
        );
        Ok(())
    }
}

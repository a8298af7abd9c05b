//! Read-only dataset snapshots and source registries
//!
//! Claim data is owned by external collaborators; this core reads a full
//! fresh snapshot per run and never writes it back, with one exception:
//! the explicit, human-approved remediation apply step goes through
//! [`SnapshotStore::save`].

use crate::{fsutil::write_json_atomic, StoreError};
use attest_domain::{ClaimRecord, DatasetInfo};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A full snapshot of one dataset's claims.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSnapshot {
    /// Dataset identity block
    #[serde(rename = "dataset")]
    pub info: DatasetInfo,

    /// All claim records, in file order
    pub claims: Vec<ClaimRecord>,
}

/// Per-dataset registry of in-scope documentation sources.
///
/// Citations whose URL does not start with one of the registered
/// prefixes are skipped by the network passes, not verified. Discovering
/// new claims from these registries is a separate collaborator workflow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceRegistry {
    /// URL prefixes considered in scope for verification
    #[serde(default)]
    pub sources: Vec<String>,
}

impl SourceRegistry {
    /// Whether a URL falls inside the registered scope.
    /// An empty registry places everything in scope.
    pub fn in_scope(&self, url: &str) -> bool {
        self.sources.is_empty() || self.sources.iter().any(|prefix| url.starts_with(prefix))
    }
}

/// Filesystem access to dataset snapshots under a data root.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    root: PathBuf,
}

impl SnapshotStore {
    /// Open a store rooted at `root`. Fails if the root does not exist,
    /// which is the one hard failure the pipeline treats as fatal.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(StoreError::RootNotFound(root));
        }
        Ok(Self { root })
    }

    /// The data root this store reads from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Dataset ids present under the root, sorted. The sorted order is
    /// the fixed dataset ordering used for reconciliation tie-breaks.
    pub fn dataset_ids(&self) -> Result<Vec<String>, StoreError> {
        let datasets_dir = self.root.join("datasets");
        let mut ids = Vec::new();
        if !datasets_dir.is_dir() {
            return Ok(ids);
        }
        for entry in fs::read_dir(&datasets_dir)? {
            let entry = entry?;
            if entry.path().join("claims.json").is_file() {
                ids.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        ids.sort();
        Ok(ids)
    }

    /// Load one dataset snapshot.
    pub fn load(&self, id: &str) -> Result<DatasetSnapshot, StoreError> {
        let path = self.claims_path(id);
        if !path.is_file() {
            return Err(StoreError::DatasetNotFound(id.to_string()));
        }
        let contents = fs::read_to_string(&path)?;
        let snapshot: DatasetSnapshot = serde_json::from_str(&contents)?;
        tracing::debug!(dataset = id, claims = snapshot.claims.len(), "loaded snapshot");
        Ok(snapshot)
    }

    /// Load the source registry for a dataset, if one exists.
    pub fn load_registry(&self, id: &str) -> Result<Option<SourceRegistry>, StoreError> {
        let path = self.dataset_dir(id).join("registry.json");
        if !path.is_file() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&contents)?))
    }

    /// Write a dataset snapshot back, atomically.
    ///
    /// Only the remediation apply step calls this; the verification
    /// passes never mutate claim data.
    pub fn save(&self, id: &str, snapshot: &DatasetSnapshot) -> Result<(), StoreError> {
        write_json_atomic(&self.claims_path(id), snapshot)
    }

    fn dataset_dir(&self, id: &str) -> PathBuf {
        self.root.join("datasets").join(id)
    }

    fn claims_path(&self, id: &str) -> PathBuf {
        self.dataset_dir(id).join("claims.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_root_is_fatal() {
        let err = SnapshotStore::open("/definitely/not/a/real/path").unwrap_err();
        assert!(matches!(err, StoreError::RootNotFound(_)));
    }

    #[test]
    fn test_empty_registry_allows_everything() {
        let registry = SourceRegistry::default();
        assert!(registry.in_scope("https://anything.example/page"));
    }

    #[test]
    fn test_registry_prefix_scoping() {
        let registry = SourceRegistry {
            sources: vec!["https://docs.example.com/".to_string()],
        };
        assert!(registry.in_scope("https://docs.example.com/features"));
        assert!(!registry.in_scope("https://blog.example.com/post"));
    }
}

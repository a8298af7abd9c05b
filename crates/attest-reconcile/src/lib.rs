//! Attest Reconcile
//!
//! The offline, deterministic half of the pipeline: cross-dataset claim
//! reconciliation, the deduplicated source index, and staleness bands.
//! Everything here is a pure derivation from claim snapshots plus
//! persisted verification results; nothing touches the network and
//! nothing mutates source data. Identical input always produces
//! identical output, which is what makes the exported artifacts
//! diffable.

#![warn(missing_docs)]

mod reconciler;
mod source_index;
mod staleness;

pub use reconciler::{reconcile, ComparisonSummary, ReconcileOutput};
pub use source_index::build_source_index;
pub use staleness::{
    dataset_quality, staleness_findings, QualitySummary, ERROR_AFTER_DAYS, WARN_AFTER_DAYS,
};

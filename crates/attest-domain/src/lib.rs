//! Attest Domain Layer
//!
//! This crate contains the core data model for the citation verification
//! and reconciliation pipeline. It defines the fundamental concepts and
//! trait interfaces that all other layers depend upon.
//!
//! ## Key Concepts
//!
//! - **ClaimRecord**: a factual assertion owned by an external dataset,
//!   read-only to this core
//! - **Citation**: a URL plus metadata asserting evidence for a claim,
//!   at a declared granularity tier (dedicated / section / excerpt)
//! - **VerificationResult**: the persisted outcome of one verification
//!   pass for one URL, keyed by (url, pass) for idempotent reruns
//! - **Finding**: an entry in the run report taxonomy; findings are
//!   recorded, never acted on silently
//! - **ComparisonEntry / SourceIndexEntry**: derived artifacts, discarded
//!   and rebuilt every run
//!
//! ## Architecture
//!
//! Infrastructure implementations (result store, HTTP checkers, semantic
//! judges) live in other crates and plug in through the traits defined in
//! [`traits`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod category;
pub mod claim;
pub mod derived;
pub mod finding;
pub mod status;
pub mod tier;
pub mod traits;
pub mod verification;

// Re-exports for convenience
pub use category::Category;
pub use claim::{Citation, ClaimKey, ClaimRecord, DatasetInfo, Granularity};
pub use derived::{source_key, CitingClaim, ComparisonEntry, DatasetPresence, SourceIndexEntry};
pub use finding::{Finding, FindingKind, Severity};
pub use status::RecordStatus;
pub use tier::{AccessTier, Maturity};
pub use traits::{Confidence, ResultStore, SemanticJudge, Verdict};
pub use verification::{Outcome, Pass, ReasonCode, ResultDetail, VerificationResult};

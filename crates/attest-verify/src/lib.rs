//! Attest Verify
//!
//! The network passes of the pipeline: the Reachability Checker and the
//! Relevance Checker. Both are embarrassingly parallel across URLs and
//! run under a bounded global concurrency cap plus a smaller per-host
//! cap so no single documentation site is hammered.
//!
//! Transient failures (timeout, 5xx) are retried with backoff inside the
//! checkers and never surface as findings; 4xx is never retried. A
//! run-level deadline cancels in-flight checks, which are recorded as
//! `incomplete`, distinct from broken.
//!
//! Neither checker ever mutates claim data.

#![warn(missing_docs)]

mod config;
mod fetch;
mod html;
mod limits;
mod reachability;
mod relevance;

pub use config::VerifyConfig;
pub use fetch::Fetcher;
pub use html::{extract_page, normalize_ws, PageText};
pub use limits::HostLimits;
pub use reachability::ReachabilityChecker;
pub use relevance::{evaluate_citation, RelevanceChecker};

use thiserror::Error;

/// Errors that can occur while setting up the checkers
#[derive(Error, Debug)]
pub enum VerifyError {
    /// HTTP client construction failed
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

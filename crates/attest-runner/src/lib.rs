//! Attest Runner
//!
//! Orchestrates the verification pipeline over a data root: gatekeeper
//! validation, the network passes, the gated semantic tier, staleness,
//! reconciliation, explicit remediation, and the static export. Findings
//! accumulate in a structured run report and never fail the run; only
//! unreadable input is fatal.

#![warn(missing_docs)]

mod error;
mod findings;
mod pipeline;
mod remediate;
mod report;

pub use error::RunnerError;
pub use findings::findings_from_results;
pub use pipeline::{Pipeline, RunOptions};
pub use remediate::{
    apply_fixes, redirect_candidates, AppliedFix, ApplyOutcome, FixEntry, FixPlan,
};
pub use report::RunReport;

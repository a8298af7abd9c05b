//! Runner error types

use thiserror::Error;

/// Errors that abort a run before or while it starts.
///
/// Findings are never errors: once input is readable the pipeline runs
/// to completion and reports. Only inability to start lands here.
#[derive(Error, Debug)]
pub enum RunnerError {
    /// Snapshot or result store failure
    #[error(transparent)]
    Store(#[from] attest_store::StoreError),

    /// Checker construction failure (HTTP client)
    #[error(transparent)]
    Verify(#[from] attest_verify::VerifyError),

    /// Static export failure
    #[error(transparent)]
    Export(#[from] attest_export::ExportError),

    /// A remediation plan that cannot be read or parsed
    #[error("invalid fix plan: {0}")]
    InvalidFixPlan(String),
}

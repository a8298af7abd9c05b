//! Error handling for the CLI.

use thiserror::Error;

/// CLI error type.
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration problem
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pipeline failure
    #[error(transparent)]
    Runner(#[from] attest_runner::RunnerError),

    /// Judge construction failure
    #[error(transparent)]
    Judge(#[from] attest_judge::JudgeError),

    /// Store failure outside the pipeline
    #[error(transparent)]
    Store(#[from] attest_store::StoreError),

    /// IO failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file parse failure
    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON output failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Attest CLI - verify and reconcile documentation-backed claims.
#[derive(Debug, Parser)]
#[command(name = "attest")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Data root holding the dataset directories (overrides config)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Human-readable text (default)
    Text,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the verification pipeline
    Verify(VerifyArgs),

    /// Report findings from the last persisted results (no network)
    Report(ReportArgs),

    /// Apply a reviewed fix plan to the claim data
    Apply(ApplyArgs),

    /// Print redirect remediation candidates from the last run
    Candidates,

    /// Regenerate the static JSON contract
    Export(ExportArgs),
}

/// Arguments for the verify command.
#[derive(Debug, Parser)]
pub struct VerifyArgs {
    /// Restrict the run to one dataset
    #[arg(short, long)]
    pub dataset: Option<String>,

    /// Run the cost-gated semantic tier
    #[arg(long)]
    pub semantic: bool,

    /// Check everything but persist nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Run-level budget in seconds; checks still in flight when it
    /// expires are recorded as incomplete
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

/// Arguments for the report command.
#[derive(Debug, Parser)]
pub struct ReportArgs {
    /// Restrict the report to one dataset
    #[arg(short, long)]
    pub dataset: Option<String>,
}

/// Arguments for the apply command.
#[derive(Debug, Parser)]
pub struct ApplyArgs {
    /// JSON fix plan mapping old URLs to new ones
    pub fixes: PathBuf,

    /// Show what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the export command.
#[derive(Debug, Parser)]
pub struct ExportArgs {
    /// Output directory for the static contract
    #[arg(long)]
    pub out: PathBuf,

    /// Revision id recorded in the discovery document
    #[arg(long)]
    pub revision: Option<String>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Text => crate::config::OutputFormat::Text,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_command() {
        let cli = Cli::parse_from(["attest", "verify", "--dataset", "acme", "--semantic"]);
        match cli.command {
            Command::Verify(args) => {
                assert_eq!(args.dataset.as_deref(), Some("acme"));
                assert!(args.semantic);
                assert!(!args.dry_run);
            }
            _ => panic!("Expected Verify command"),
        }
    }

    #[test]
    fn test_apply_command() {
        let cli = Cli::parse_from(["attest", "apply", "fixes.json", "--dry-run"]);
        match cli.command {
            Command::Apply(args) => {
                assert_eq!(args.fixes, PathBuf::from("fixes.json"));
                assert!(args.dry_run);
            }
            _ => panic!("Expected Apply command"),
        }
    }

    #[test]
    fn test_export_requires_out() {
        assert!(Cli::try_parse_from(["attest", "export"]).is_err());
        assert!(Cli::try_parse_from(["attest", "export", "--out", "public/api"]).is_ok());
    }
}

//! Apply command - apply a reviewed fix plan to the claim data.

use crate::cli::ApplyArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use attest_runner::{apply_fixes, FixPlan};
use attest_store::SnapshotStore;
use chrono::Utc;

/// Execute the apply command.
pub fn execute(config: &Config, formatter: &Formatter, args: &ApplyArgs) -> Result<()> {
    let store = SnapshotStore::open(&config.root)?;
    let plan = FixPlan::load(&args.fixes)?;
    let outcome = apply_fixes(&store, &plan, args.dry_run, Utc::now().date_naive())?;
    print!("{}", formatter.format_apply(&outcome)?);
    Ok(())
}

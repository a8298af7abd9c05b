//! Candidates command - redirect remediation proposals from the last run.

use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use attest_runner::redirect_candidates;
use attest_store::{FileResultStore, SnapshotStore};

/// Execute the candidates command.
pub fn execute(config: &Config, formatter: &Formatter) -> Result<()> {
    let store = SnapshotStore::open(&config.root)?;
    let results = FileResultStore::new(&config.root);
    let plan = redirect_candidates(&store, &results)?;

    if plan.fixes.is_empty() {
        println!("{}", formatter.info("No redirect candidates recorded."));
    } else {
        println!("{}", formatter.format_plan(&plan)?);
    }
    Ok(())
}

//! Report command - findings from the last persisted results, no network.

use crate::cli::ReportArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use attest_judge::KeywordJudge;
use attest_runner::Pipeline;

/// Execute the report command.
pub fn execute(config: &Config, formatter: &Formatter, args: &ReportArgs) -> Result<()> {
    let pipeline = Pipeline::open(&config.root, KeywordJudge::new(), config.verify_config())?;
    let report = pipeline.report_only(args.dataset.as_deref())?;
    print!("{}", formatter.format_report(&report)?);
    Ok(())
}

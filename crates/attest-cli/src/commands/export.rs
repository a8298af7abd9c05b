//! Export command - regenerate the static JSON contract.

use crate::cli::ExportArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use attest_judge::KeywordJudge;
use attest_runner::Pipeline;

/// Execute the export command.
pub fn execute(config: &Config, formatter: &Formatter, args: &ExportArgs) -> Result<()> {
    let pipeline = Pipeline::open(&config.root, KeywordJudge::new(), config.verify_config())?;
    let doc = pipeline.export_static(&args.out, args.revision.as_deref())?;
    println!(
        "{}",
        formatter.success(&format!(
            "Exported contract {} ({} endpoints) to {}",
            doc.version,
            doc.endpoints.len(),
            args.out.display()
        ))
    );
    Ok(())
}

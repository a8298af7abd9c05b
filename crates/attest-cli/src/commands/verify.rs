//! Verify command - run the verification pipeline.

use crate::cli::VerifyArgs;
use crate::config::{Config, JudgeProvider};
use crate::error::Result;
use crate::output::Formatter;
use attest_domain::SemanticJudge;
use attest_judge::{KeywordJudge, OllamaJudge};
use attest_runner::{Pipeline, RunOptions, RunReport};
use std::time::Duration;

/// Execute the verify command.
pub async fn execute(config: &Config, formatter: &Formatter, args: &VerifyArgs) -> Result<()> {
    let options = RunOptions {
        dataset: args.dataset.clone(),
        semantic: args.semantic,
        dry_run: args.dry_run,
        timeout: args.timeout_secs.map(Duration::from_secs),
    };

    let report = match config.judge.provider {
        JudgeProvider::Keyword => run_with(config, KeywordJudge::new(), &options).await?,
        JudgeProvider::Ollama => {
            let judge = OllamaJudge::new(&config.judge.endpoint, &config.judge.model)?;
            run_with(config, judge, &options).await?
        }
    };

    print!("{}", formatter.format_report(&report)?);
    Ok(())
}

async fn run_with<J: SemanticJudge>(
    config: &Config,
    judge: J,
    options: &RunOptions,
) -> Result<RunReport> {
    let pipeline = Pipeline::open(&config.root, judge, config.verify_config())?;
    Ok(pipeline.run(options).await?)
}

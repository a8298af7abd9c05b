//! attest - citation verification and reconciliation CLI

use attest_cli::cli::{Cli, Command};
use attest_cli::commands;
use attest_cli::config::Config;
use attest_cli::error::Result;
use attest_cli::output::Formatter;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "attest=debug" } else { "attest=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(error) = run(cli).await {
        eprintln!("Error: {}", error);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load().unwrap_or_else(|error| {
        tracing::warn!(%error, "could not load config, using defaults");
        Config::default()
    });
    if let Some(root) = cli.root {
        config.root = root;
    }

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color = config.settings.color && !cli.no_color;
    let formatter = Formatter::new(format, color);

    match &cli.command {
        Command::Verify(args) => commands::verify::execute(&config, &formatter, args).await,
        Command::Report(args) => commands::report::execute(&config, &formatter, args),
        Command::Apply(args) => commands::apply::execute(&config, &formatter, args),
        Command::Candidates => commands::candidates::execute(&config, &formatter),
        Command::Export(args) => commands::export::execute(&config, &formatter, args),
    }
}

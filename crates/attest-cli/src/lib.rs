//! Attest CLI
//!
//! Command-line interface over the verification pipeline: run the
//! passes, report persisted findings, apply reviewed fix plans, list
//! redirect candidates, and regenerate the static JSON contract.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;

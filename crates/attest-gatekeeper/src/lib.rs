//! Attest Gatekeeper
//!
//! Schema validation for claim records before the network passes run.
//! Violations are isolated per record: a malformed claim is reported as
//! SchemaViolation findings while verification proceeds, and never
//! aborts the run.

#![warn(missing_docs)]

mod config;
mod validator;

pub use config::ValidationConfig;
pub use validator::{Gatekeeper, ValidationReport};

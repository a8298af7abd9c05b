//! Command implementations.

pub mod apply;
pub mod candidates;
pub mod export;
pub mod report;
pub mod verify;

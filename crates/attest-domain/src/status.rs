//! Record status - shared by claims and citations, but orthogonal fields
//!
//! A claim and its citations use the same status vocabulary yet may
//! legitimately diverge (a vendor-stable feature whose documentation
//! changed since last check). Nothing in the pipeline reconciles one
//! onto the other.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a claim or citation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    /// Confirmed and current
    Active,

    /// Explicitly retired upstream
    Deprecated,

    /// Still present but changed since last confirmation
    Modified,

    /// Not yet confirmed either way
    Unknown,
}

impl RecordStatus {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Active => "active",
            RecordStatus::Deprecated => "deprecated",
            RecordStatus::Modified => "modified",
            RecordStatus::Unknown => "unknown",
        }
    }

    /// Parse a status from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "active" => Some(RecordStatus::Active),
            "deprecated" => Some(RecordStatus::Deprecated),
            "modified" => Some(RecordStatus::Modified),
            "unknown" => Some(RecordStatus::Unknown),
            _ => None,
        }
    }
}

impl Default for RecordStatus {
    fn default() -> Self {
        RecordStatus::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        for status in [
            RecordStatus::Active,
            RecordStatus::Deprecated,
            RecordStatus::Modified,
            RecordStatus::Unknown,
        ] {
            assert_eq!(RecordStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_default_is_unknown() {
        assert_eq!(RecordStatus::default(), RecordStatus::Unknown);
    }
}

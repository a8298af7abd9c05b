//! Access tier and maturity enums for claim records

use serde::{Deserialize, Serialize};

/// Access tier a capability is offered at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessTier {
    /// Available on the free plan
    Free,

    /// Requires a paid individual plan
    Pro,

    /// Requires an enterprise plan
    Enterprise,

    /// Bespoke or negotiated availability
    Custom,
}

impl AccessTier {
    /// Get the tier name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessTier::Free => "free",
            AccessTier::Pro => "pro",
            AccessTier::Enterprise => "enterprise",
            AccessTier::Custom => "custom",
        }
    }

    /// Parse a tier from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "free" => Some(AccessTier::Free),
            "pro" => Some(AccessTier::Pro),
            "enterprise" => Some(AccessTier::Enterprise),
            "custom" => Some(AccessTier::Custom),
            _ => None,
        }
    }
}

/// Maturity of a capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Maturity {
    /// Behind a flag or waitlist, may disappear
    Experimental,

    /// Publicly announced preview
    Preview,

    /// Generally available
    Stable,

    /// Still works but no longer developed
    Legacy,
}

impl Maturity {
    /// Get the maturity name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Maturity::Experimental => "experimental",
            Maturity::Preview => "preview",
            Maturity::Stable => "stable",
            Maturity::Legacy => "legacy",
        }
    }

    /// Parse a maturity from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "experimental" => Some(Maturity::Experimental),
            "preview" => Some(Maturity::Preview),
            "stable" => Some(Maturity::Stable),
            "legacy" => Some(Maturity::Legacy),
            _ => None,
        }
    }
}

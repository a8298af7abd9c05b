//! Gatekeeper configuration

use serde::{Deserialize, Serialize};

/// Configuration for validation rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Minimum stored excerpt length, in characters
    pub excerpt_min_chars: usize,

    /// Maximum stored excerpt length, in characters
    pub excerpt_max_chars: usize,

    /// Warn when a claim carries no citations at all
    pub warn_on_missing_citations: bool,

    /// Warn when every citation on a claim is excerpt-tier
    pub warn_on_all_excerpt: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            excerpt_min_chars: 50,
            excerpt_max_chars: 300,
            warn_on_missing_citations: true,
            warn_on_all_excerpt: true,
        }
    }
}

impl ValidationConfig {
    /// A permissive configuration for exploratory datasets: structural
    /// errors still fire, quality warnings do not.
    pub fn permissive() -> Self {
        Self {
            warn_on_missing_citations: false,
            warn_on_all_excerpt: false,
            ..Self::default()
        }
    }
}

//! Category module - the closed set of claim categories

use serde::{Deserialize, Serialize};

/// Claim category.
///
/// This is a closed enum: datasets carrying a category outside this set
/// fail schema validation for that record only. Comparison output groups
/// by the internal key ([`Category::as_str`]), not the display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Generating or completing code
    CodeGeneration,

    /// Conversational assistance
    ChatAssistance,

    /// Reviewing and critiquing code
    CodeReview,

    /// Managing working context (files, memory, sessions)
    ContextManagement,

    /// Third-party and platform integrations
    Integrations,

    /// Model availability and selection
    ModelSupport,

    /// Security and privacy guarantees
    SecurityPrivacy,

    /// Automating multi-step workflows
    WorkflowAutomation,

    /// Anything that fits no other bucket
    Other,
}

impl Category {
    /// All categories, in internal-key order. Used for stable grouping.
    pub const ALL: [Category; 9] = [
        Category::ChatAssistance,
        Category::CodeGeneration,
        Category::CodeReview,
        Category::ContextManagement,
        Category::Integrations,
        Category::ModelSupport,
        Category::Other,
        Category::SecurityPrivacy,
        Category::WorkflowAutomation,
    ];

    /// Get the internal key for this category
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::CodeGeneration => "code-generation",
            Category::ChatAssistance => "chat-assistance",
            Category::CodeReview => "code-review",
            Category::ContextManagement => "context-management",
            Category::Integrations => "integrations",
            Category::ModelSupport => "model-support",
            Category::SecurityPrivacy => "security-privacy",
            Category::WorkflowAutomation => "workflow-automation",
            Category::Other => "other",
        }
    }

    /// Parse a category from its internal key
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "code-generation" => Some(Category::CodeGeneration),
            "chat-assistance" => Some(Category::ChatAssistance),
            "code-review" => Some(Category::CodeReview),
            "context-management" => Some(Category::ContextManagement),
            "integrations" => Some(Category::Integrations),
            "model-support" => Some(Category::ModelSupport),
            "security-privacy" => Some(Category::SecurityPrivacy),
            "workflow-automation" => Some(Category::WorkflowAutomation),
            "other" => Some(Category::Other),
            _ => None,
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid category: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_all() {
        for category in Category::ALL {
            assert_eq!(Category::parse(category.as_str()), Some(category));
        }
    }

    #[test]
    fn test_all_is_sorted_by_internal_key() {
        let keys: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let json = serde_json::to_string(&Category::ChatAssistance).unwrap();
        assert_eq!(json, "\"chat-assistance\"");
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(Category::parse("telepathy").is_none());
    }
}

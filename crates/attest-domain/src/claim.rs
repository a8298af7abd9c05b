//! Claim module - the fundamental unit tracked by the pipeline

use crate::{AccessTier, Category, Maturity, RecordStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier for a claim, decoupled from the mutable display name.
///
/// Datasets are joined across each other by this key, never by string
/// equality on the display name. Datasets that omit an explicit key get
/// one derived from the name via [`ClaimKey::from_name`] at load time.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimKey(String);

impl ClaimKey {
    /// Create a key from an already-normalized slug.
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    /// Derive a key from a display name by slugification.
    ///
    /// # Examples
    ///
    /// ```
    /// use attest_domain::ClaimKey;
    ///
    /// let key = ClaimKey::from_name("Chat Assistance (beta)");
    /// assert_eq!(key.as_str(), "chat-assistance-beta");
    /// ```
    pub fn from_name(name: &str) -> Self {
        let mut slug = String::with_capacity(name.len());
        let mut last_dash = true;
        for ch in name.chars() {
            if ch.is_ascii_alphanumeric() {
                slug.push(ch.to_ascii_lowercase());
                last_dash = false;
            } else if !last_dash {
                slug.push('-');
                last_dash = true;
            }
        }
        while slug.ends_with('-') {
            slug.pop();
        }
        Self(slug)
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the key is empty (a record with no usable identity).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ClaimKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How directly a citation supports a specific claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// A page dedicated to the claimed capability
    Dedicated,

    /// An anchored section of a broader page (URL fragment required)
    Section,

    /// A verbatim excerpt stored alongside the citation (50-300 chars)
    Excerpt,
}

impl Granularity {
    /// Get the granularity name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Dedicated => "dedicated",
            Granularity::Section => "section",
            Granularity::Excerpt => "excerpt",
        }
    }

    /// Parse a granularity from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "dedicated" => Some(Granularity::Dedicated),
            "section" => Some(Granularity::Section),
            "excerpt" => Some(Granularity::Excerpt),
            _ => None,
        }
    }
}

/// A citation - a URL plus metadata asserting evidence for a claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    /// Cited URL, possibly carrying a fragment for section granularity
    pub url: String,

    /// What the source documents
    pub description: String,

    /// Publication date of the source, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<NaiveDate>,

    /// Last date a human or the pipeline confirmed this citation
    pub verified_date: NaiveDate,

    /// Citation status; orthogonal to the owning claim's status
    pub status: RecordStatus,

    /// Replacement URL, when the source was superseded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superseded_by: Option<String>,

    /// Evidence tier declared for this citation
    #[serde(rename = "sourceGranularity")]
    pub granularity: Granularity,

    /// Stored excerpt, required at excerpt granularity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
}

impl Citation {
    /// The URL with any fragment stripped, used for fetching.
    pub fn base_url(&self) -> &str {
        self.url.split('#').next().unwrap_or(&self.url)
    }

    /// The URL fragment, when present.
    pub fn fragment(&self) -> Option<&str> {
        let mut parts = self.url.splitn(2, '#');
        parts.next();
        parts.next().filter(|f| !f.is_empty())
    }
}

/// A claim record - a discrete factual assertion owned by an external
/// dataset. This core treats records as an immutable snapshot per run;
/// the only mutation path is the explicit remediation apply step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRecord {
    /// Stable cross-dataset join key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<ClaimKey>,

    /// Canonical display name
    pub name: String,

    /// Claim category (closed enum)
    pub category: Category,

    /// What is being claimed
    pub description: String,

    /// Whether the capability is available. Upstream data; the pipeline
    /// never infers or corrects this flag.
    pub available: bool,

    /// Access tier the capability is offered at
    pub tier: AccessTier,

    /// Maturity of the capability
    #[serde(rename = "maturityLevel")]
    pub maturity: Maturity,

    /// Claim status; orthogonal to per-citation status
    pub status: RecordStatus,

    /// When the capability was deprecated, if it was
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated_date: Option<NaiveDate>,

    /// Key of the claim that supersedes this one, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superseded_by: Option<ClaimKey>,

    /// Alternate names the dedicated-tier relevance rule accepts
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,

    /// Ordered evidence for the claim
    #[serde(default)]
    pub citations: Vec<Citation>,
}

impl ClaimRecord {
    /// The effective join key: the explicit key when present, otherwise
    /// derived from the display name.
    pub fn effective_key(&self) -> ClaimKey {
        self.key
            .clone()
            .unwrap_or_else(|| ClaimKey::from_name(&self.name))
    }
}

/// Identity block of a dataset file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetInfo {
    /// Dataset identifier (directory name, join-stable)
    pub id: String,

    /// Human-readable dataset name
    pub name: String,

    /// Vendor maintaining the tracked product
    #[serde(default)]
    pub vendor: String,

    /// Version of the tracked product the snapshot describes
    #[serde(default)]
    pub version: String,

    /// When the dataset was last edited upstream
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_from_name_slugifies() {
        assert_eq!(ClaimKey::from_name("Chat Assistance").as_str(), "chat-assistance");
        assert_eq!(ClaimKey::from_name("  MCP / Tool use!  ").as_str(), "mcp-tool-use");
        assert_eq!(ClaimKey::from_name("already-a-slug").as_str(), "already-a-slug");
    }

    #[test]
    fn test_citation_base_url_and_fragment() {
        let citation = Citation {
            url: "https://docs.example.com/features#tool-use".to_string(),
            description: "Tool use docs".to_string(),
            published_date: None,
            verified_date: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
            status: RecordStatus::Active,
            superseded_by: None,
            granularity: Granularity::Section,
            excerpt: None,
        };

        assert_eq!(citation.base_url(), "https://docs.example.com/features");
        assert_eq!(citation.fragment(), Some("tool-use"));
    }

    #[test]
    fn test_citation_without_fragment() {
        let citation = Citation {
            url: "https://docs.example.com/features".to_string(),
            description: String::new(),
            published_date: None,
            verified_date: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
            status: RecordStatus::Active,
            superseded_by: None,
            granularity: Granularity::Dedicated,
            excerpt: None,
        };

        assert_eq!(citation.base_url(), citation.url);
        assert_eq!(citation.fragment(), None);
    }

    #[test]
    fn test_effective_key_prefers_explicit() {
        let record = ClaimRecord {
            key: Some(ClaimKey::new("chat-assist")),
            name: "Chat Assistance".to_string(),
            category: Category::ChatAssistance,
            description: String::new(),
            available: true,
            tier: AccessTier::Free,
            maturity: Maturity::Stable,
            status: RecordStatus::Active,
            deprecated_date: None,
            superseded_by: None,
            aliases: vec![],
            citations: vec![],
        };

        assert_eq!(record.effective_key().as_str(), "chat-assist");

        let mut renamed = record.clone();
        renamed.key = None;
        assert_eq!(renamed.effective_key().as_str(), "chat-assistance");
    }

    #[test]
    fn test_citation_serde_field_names() {
        let json = r#"{
            "url": "https://docs.example.com/a",
            "description": "d",
            "verifiedDate": "2026-02-01",
            "status": "active",
            "sourceGranularity": "excerpt",
            "excerpt": "some stored text"
        }"#;

        let citation: Citation = serde_json::from_str(json).unwrap();
        assert_eq!(citation.granularity, Granularity::Excerpt);
        assert_eq!(citation.excerpt.as_deref(), Some("some stored text"));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: slugification is idempotent
        #[test]
        fn test_slug_idempotent(name in "\\PC{0,64}") {
            let once = ClaimKey::from_name(&name);
            let twice = ClaimKey::from_name(once.as_str());
            prop_assert_eq!(once, twice);
        }

        /// Property: slugs contain only lowercase alphanumerics and dashes
        #[test]
        fn test_slug_alphabet(name in "\\PC{0,64}") {
            let key = ClaimKey::from_name(&name);
            prop_assert!(key
                .as_str()
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        }
    }
}

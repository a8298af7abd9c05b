//! Derived artifacts - rebuilt from scratch every run, never patched
//!
//! [`ComparisonEntry`] and [`SourceIndexEntry`] are pure derivations of
//! the claim snapshot plus persisted verification results. Their sort
//! orders are contracts: identical input must serialize byte-identically
//! so diff-based review works.

use crate::{AccessTier, Category, ClaimKey, Maturity, RecordStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use url::Url;

/// How one dataset tracks a claim.
///
/// Absence of a dataset from [`ComparisonEntry::datasets`] means "not
/// tracked"; presence with `available: false` means "tracked and
/// explicitly unavailable". The two are never conflated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetPresence {
    /// Upstream availability flag, copied verbatim
    pub available: bool,

    /// Access tier in this dataset
    pub tier: AccessTier,

    /// Maturity in this dataset
    pub maturity: Maturity,

    /// Claim status in this dataset
    pub status: RecordStatus,
}

/// One row of the cross-dataset comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonEntry {
    /// Stable join key
    pub key: ClaimKey,

    /// Display name (from the first dataset in fixed dataset order)
    pub name: String,

    /// Category; on cross-dataset divergence the first dataset in fixed
    /// order wins for display and an inconsistency finding is emitted
    pub category: Category,

    /// Per-dataset presence, keyed by dataset id (sorted map for
    /// deterministic serialization)
    pub datasets: BTreeMap<String, DatasetPresence>,
}

/// A (dataset, claim) pair citing a URL.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitingClaim {
    /// Dataset id
    pub dataset: String,

    /// Claim key within that dataset
    pub claim: ClaimKey,
}

/// One deduplicated URL in the source index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceIndexEntry {
    /// The URL as cited (fragment-less representative form)
    pub url: String,

    /// Every (dataset, claim) pair citing this URL, sorted
    pub cited_by: Vec<CitingClaim>,

    /// Freshest status across citations and verification evidence
    pub status: RecordStatus,

    /// Freshest published date across citations, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<NaiveDate>,

    /// Freshest verification date
    pub verified_date: NaiveDate,
}

impl SourceIndexEntry {
    /// The contractual sort order: active entries first, ordered by
    /// published date descending (nulls last), then non-active entries,
    /// tie-break alphabetical by URL ascending.
    pub fn contract_cmp(a: &SourceIndexEntry, b: &SourceIndexEntry) -> Ordering {
        let rank = |entry: &SourceIndexEntry| u8::from(entry.status != RecordStatus::Active);
        rank(a)
            .cmp(&rank(b))
            .then_with(|| match (a.published_date, b.published_date) {
                (Some(da), Some(db)) => db.cmp(&da),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
            .then_with(|| a.url.cmp(&b.url))
    }
}

/// Normalized deduplication key for a cited URL.
///
/// Scheme, host, path and query participate; the fragment never does
/// (it stays on the citation for section-tier checks). Unparseable URLs
/// fall back to the fragment-stripped raw string so they still dedup
/// textually.
///
/// # Examples
///
/// ```
/// use attest_domain::source_key;
///
/// assert_eq!(
///     source_key("HTTPS://Docs.Example.com:443/a#frag"),
///     source_key("https://docs.example.com/a"),
/// );
/// ```
pub fn source_key(url: &str) -> String {
    match Url::parse(url) {
        Ok(mut parsed) => {
            parsed.set_fragment(None);
            parsed.to_string()
        }
        Err(_) => url.split('#').next().unwrap_or(url).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(url: &str, status: RecordStatus, published: Option<(i32, u32, u32)>) -> SourceIndexEntry {
        SourceIndexEntry {
            url: url.to_string(),
            cited_by: vec![],
            status,
            published_date: published.map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap()),
            verified_date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
        }
    }

    #[test]
    fn test_source_key_ignores_fragment_and_case() {
        assert_eq!(
            source_key("https://docs.example.com/features#anchor"),
            source_key("https://docs.example.com/features"),
        );
        assert_eq!(
            source_key("HTTPS://DOCS.EXAMPLE.COM/features"),
            "https://docs.example.com/features",
        );
    }

    #[test]
    fn test_source_key_keeps_query() {
        assert_ne!(
            source_key("https://docs.example.com/a?v=2"),
            source_key("https://docs.example.com/a"),
        );
    }

    #[test]
    fn test_source_key_strips_default_port() {
        assert_eq!(
            source_key("https://docs.example.com:443/a"),
            source_key("https://docs.example.com/a"),
        );
    }

    #[test]
    fn test_contract_order_active_first_then_published_desc() {
        let mut entries = vec![
            entry("https://z.example/old", RecordStatus::Deprecated, Some((2026, 3, 1))),
            entry("https://b.example/no-date", RecordStatus::Active, None),
            entry("https://a.example/new", RecordStatus::Active, Some((2026, 2, 1))),
            entry("https://c.example/newer", RecordStatus::Active, Some((2026, 3, 1))),
        ];
        entries.sort_by(SourceIndexEntry::contract_cmp);

        let urls: Vec<&str> = entries.iter().map(|e| e.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://c.example/newer",
                "https://a.example/new",
                "https://b.example/no-date",
                "https://z.example/old",
            ]
        );
    }

    #[test]
    fn test_contract_order_ties_break_on_url() {
        let mut entries = vec![
            entry("https://b.example/", RecordStatus::Active, Some((2026, 1, 1))),
            entry("https://a.example/", RecordStatus::Active, Some((2026, 1, 1))),
        ];
        entries.sort_by(SourceIndexEntry::contract_cmp);
        assert_eq!(entries[0].url, "https://a.example/");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: normalization is idempotent
        #[test]
        fn test_source_key_idempotent(url in "https?://[a-z]{1,10}\\.example/[a-z0-9/]{0,20}") {
            let once = source_key(&url);
            prop_assert_eq!(source_key(&once), once.clone());
        }
    }
}

//! Relevance Checker - does the page still support the claim?
//!
//! Runs only on URLs that passed reachability. Each granularity tier has
//! its own rule:
//!
//! - `dedicated`: the claim's canonical name or a declared alias must
//!   appear in the page text; absence is a soft "unconfirmed" miss
//! - `section`: the URL fragment must match an anchor in the markup;
//!   absence is a hard fail
//! - `excerpt`: the stored excerpt, whitespace-normalized, must appear
//!   verbatim in the page text; absence is a hard fail. This is the
//!   control that stops one broad page backing dozens of claims with no
//!   real evidence.

use crate::fetch::{Fetcher, Probe};
use crate::html::{extract_page, PageText};
use crate::limits::{host_of, HostLimits};
use attest_domain::{
    Citation, ClaimRecord, Granularity, Outcome, Pass, ReasonCode, ResultDetail,
    VerificationResult,
};
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

/// The relevance pass.
#[derive(Debug, Clone)]
pub struct RelevanceChecker {
    fetcher: Arc<Fetcher>,
    limits: HostLimits,
}

impl RelevanceChecker {
    /// Create a checker sharing the given fetcher and limits.
    pub fn new(fetcher: Arc<Fetcher>, limits: HostLimits) -> Self {
        Self { fetcher, limits }
    }

    /// Fetch and parse each base URL once. URLs that fail at fetch time
    /// map to `None`; citations against them get a fail result carrying
    /// the fetch reason.
    pub async fn fetch_pages(
        &self,
        base_urls: Vec<String>,
        deadline: Option<Duration>,
    ) -> HashMap<String, Option<PageText>> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = JoinSet::new();

        for url in base_urls.iter().cloned() {
            let checker = self.clone();
            let tx = tx.clone();
            tasks.spawn(async move {
                let page = checker.fetch_one(&url).await;
                let _ = tx.send((url, page));
            });
        }
        drop(tx);

        let mut pages = HashMap::with_capacity(base_urls.len());
        let collect = async {
            while let Some((url, page)) = rx.recv().await {
                pages.insert(url, page);
            }
        };
        match deadline {
            Some(budget) => {
                if tokio::time::timeout(budget, collect).await.is_err() {
                    tasks.abort_all();
                    tracing::warn!("relevance page fetches hit deadline");
                }
            }
            None => collect.await,
        }
        while tasks.join_next().await.is_some() {}
        pages
    }

    async fn fetch_one(&self, url: &str) -> Option<PageText> {
        let _permit = self.limits.acquire(&host_of(url)).await?;
        match self.fetcher.fetch_page(url).await {
            Ok(body) => Some(extract_page(&body)),
            Err(Probe::Status { code, .. }) => {
                tracing::debug!(url, code, "page fetch returned non-success");
                None
            }
            Err(Probe::Failed { note, .. }) => {
                tracing::debug!(url, error = %note, "page fetch failed");
                None
            }
        }
    }

    /// Evaluate every citation of the given claims against fetched
    /// pages. Citations whose base URL did not pass reachability are
    /// expected to be absent from `reachable` and are skipped entirely.
    pub fn evaluate_all(
        &self,
        claims: &[ClaimRecord],
        reachable: &HashSet<String>,
        pages: &HashMap<String, Option<PageText>>,
    ) -> Vec<VerificationResult> {
        let mut results = Vec::new();
        for claim in claims {
            for citation in &claim.citations {
                let base = citation.base_url();
                if !reachable.contains(base) {
                    continue;
                }
                let result = match pages.get(base) {
                    Some(Some(page)) => evaluate_citation(claim, citation, page),
                    Some(None) => VerificationResult {
                        url: citation.url.clone(),
                        pass: Pass::Relevance,
                        checked_at: Utc::now(),
                        outcome: Outcome::Fail,
                        detail: ResultDetail {
                            reason: Some(ReasonCode::Connect),
                            note: Some("page fetch failed after reachability passed".to_string()),
                            ..ResultDetail::default()
                        },
                    },
                    // Deadline hit before this page was fetched
                    None => VerificationResult::incomplete(
                        citation.url.clone(),
                        Pass::Relevance,
                        Utc::now(),
                    ),
                };
                results.push(result);
            }
        }
        results
    }
}

/// Pure per-citation relevance rule, exposed for tests and the runner.
pub fn evaluate_citation(
    claim: &ClaimRecord,
    citation: &Citation,
    page: &PageText,
) -> VerificationResult {
    let checked_at = Utc::now();
    let url = citation.url.clone();

    match citation.granularity {
        Granularity::Dedicated => {
            if page.contains(&claim.name) {
                return VerificationResult::pass(url, Pass::Relevance, checked_at);
            }
            if let Some(alias) = claim.aliases.iter().find(|a| page.contains(a)) {
                let mut result = VerificationResult::pass(url, Pass::Relevance, checked_at);
                result.detail.note = Some(format!("matched alias '{}'", alias));
                return result;
            }
            // Soft miss: the page is live but no longer names the claim.
            VerificationResult {
                url,
                pass: Pass::Relevance,
                checked_at,
                outcome: Outcome::Fail,
                detail: ResultDetail {
                    reason: Some(ReasonCode::Unconfirmed),
                    note: Some("claim name not found on dedicated page".to_string()),
                    ..ResultDetail::default()
                },
            }
        }
        Granularity::Section => match citation.fragment() {
            Some(fragment) if page.has_anchor(fragment) => {
                VerificationResult::pass(url, Pass::Relevance, checked_at)
            }
            Some(fragment) => {
                let mut result =
                    VerificationResult::fail(url, Pass::Relevance, checked_at, ReasonCode::AnchorMissing);
                result.detail.note = Some(format!("anchor '#{}' not present", fragment));
                result
            }
            None => VerificationResult::fail(
                url,
                Pass::Relevance,
                checked_at,
                ReasonCode::AnchorMissing,
            ),
        },
        Granularity::Excerpt => match &citation.excerpt {
            Some(excerpt) if page.contains(excerpt) => {
                VerificationResult::pass(url, Pass::Relevance, checked_at)
            }
            _ => VerificationResult::fail(
                url,
                Pass::Relevance,
                checked_at,
                ReasonCode::ExcerptMissing,
            ),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attest_domain::{AccessTier, Category, Maturity, RecordStatus};
    use chrono::NaiveDate;

    fn claim_named(name: &str, aliases: Vec<&str>) -> ClaimRecord {
        ClaimRecord {
            key: None,
            name: name.to_string(),
            category: Category::ChatAssistance,
            description: String::new(),
            available: true,
            tier: AccessTier::Free,
            maturity: Maturity::Stable,
            status: RecordStatus::Active,
            deprecated_date: None,
            superseded_by: None,
            aliases: aliases.into_iter().map(String::from).collect(),
            citations: vec![],
        }
    }

    fn citation(url: &str, granularity: Granularity, excerpt: Option<&str>) -> Citation {
        Citation {
            url: url.to_string(),
            description: String::new(),
            published_date: None,
            verified_date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            status: RecordStatus::Active,
            superseded_by: None,
            granularity,
            excerpt: excerpt.map(String::from),
        }
    }

    fn page(text: &str, anchors: &[&str]) -> PageText {
        PageText {
            text: crate::html::normalize_ws(text).to_lowercase(),
            anchors: anchors.iter().map(|a| a.to_string()).collect(),
        }
    }

    #[test]
    fn test_dedicated_passes_on_name() {
        let claim = claim_named("Chat Assistance", vec![]);
        let citation = citation("https://d.example/chat", Granularity::Dedicated, None);
        let result = evaluate_citation(&claim, &citation, &page("Our chat assistance docs", &[]));
        assert_eq!(result.outcome, Outcome::Pass);
    }

    #[test]
    fn test_dedicated_passes_on_alias() {
        let claim = claim_named("Chat Assistance", vec!["conversational help"]);
        let citation = citation("https://d.example/chat", Granularity::Dedicated, None);
        let result =
            evaluate_citation(&claim, &citation, &page("conversational help for editors", &[]));
        assert_eq!(result.outcome, Outcome::Pass);
        assert!(result.detail.note.as_deref().unwrap().contains("alias"));
    }

    #[test]
    fn test_dedicated_miss_is_soft_unconfirmed() {
        let claim = claim_named("Chat Assistance", vec![]);
        let citation = citation("https://d.example/other", Granularity::Dedicated, None);
        let result = evaluate_citation(&claim, &citation, &page("nothing of note here", &[]));
        assert_eq!(result.outcome, Outcome::Fail);
        assert_eq!(result.detail.reason, Some(ReasonCode::Unconfirmed));
    }

    #[test]
    fn test_section_requires_matching_anchor() {
        let claim = claim_named("Tool Use", vec![]);
        let good = citation("https://d.example/docs#tool-use", Granularity::Section, None);
        let bad = citation("https://d.example/docs#gone", Granularity::Section, None);
        let content = page("docs", &["tool-use"]);

        assert_eq!(evaluate_citation(&claim, &good, &content).outcome, Outcome::Pass);
        let miss = evaluate_citation(&claim, &bad, &content);
        assert_eq!(miss.outcome, Outcome::Fail);
        assert_eq!(miss.detail.reason, Some(ReasonCode::AnchorMissing));
    }

    #[test]
    fn test_excerpt_requires_verbatim_match() {
        let claim = claim_named("Tool Use", vec![]);
        let stored = "agents can  invoke\nregistered tools";
        let cite = citation("https://d.example/docs", Granularity::Excerpt, Some(stored));

        // Whitespace-normalized verbatim match passes
        let found = page("Note: agents can invoke registered tools today.", &[]);
        assert_eq!(evaluate_citation(&claim, &cite, &found).outcome, Outcome::Pass);

        // Similar-but-not-verbatim text never passes
        let reworded = page("agents may invoke registered tools", &[]);
        let miss = evaluate_citation(&claim, &cite, &reworded);
        assert_eq!(miss.outcome, Outcome::Fail);
        assert_eq!(miss.detail.reason, Some(ReasonCode::ExcerptMissing));
    }

    #[test]
    fn test_excerpt_missing_field_fails() {
        let claim = claim_named("Tool Use", vec![]);
        let cite = citation("https://d.example/docs", Granularity::Excerpt, None);
        let result = evaluate_citation(&claim, &cite, &page("anything", &[]));
        assert_eq!(result.outcome, Outcome::Fail);
        assert_eq!(result.detail.reason, Some(ReasonCode::ExcerptMissing));
    }
}

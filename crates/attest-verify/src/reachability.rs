//! Reachability Checker - does every cited URL still resolve?
//!
//! Input is the deduplicated set of citation base URLs. Each URL gets one
//! [`VerificationResult`]: 2xx is reachable, 3xx is reachable-with-redirect
//! (the target is captured as a remediation candidate, never applied),
//! 4xx/5xx/timeout/TLS is broken with a reason code. Transient failures
//! retry up to the configured cap with backoff; 4xx never retries.

use crate::fetch::{Fetcher, Probe};
use crate::limits::{host_of, HostLimits};
use crate::VerifyConfig;
use attest_domain::{Outcome, Pass, ReasonCode, ResultDetail, VerificationResult};
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

/// The reachability pass.
#[derive(Debug, Clone)]
pub struct ReachabilityChecker {
    fetcher: Arc<Fetcher>,
    limits: HostLimits,
    config: Arc<VerifyConfig>,
}

impl ReachabilityChecker {
    /// Create a checker sharing the given fetcher and limits.
    pub fn new(fetcher: Arc<Fetcher>, limits: HostLimits, config: VerifyConfig) -> Self {
        Self {
            fetcher,
            limits,
            config: Arc::new(config),
        }
    }

    /// Check every URL concurrently. With a deadline, in-flight checks
    /// that miss it are aborted and recorded as `incomplete` so a
    /// cancelled run is never mistaken for confirmed failure.
    pub async fn check_all(
        &self,
        urls: Vec<String>,
        deadline: Option<Duration>,
    ) -> Vec<VerificationResult> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = JoinSet::new();

        for url in urls.iter().cloned() {
            let checker = self.clone();
            let tx = tx.clone();
            tasks.spawn(async move {
                let result = checker.check_one(&url).await;
                let _ = tx.send(result);
            });
        }
        drop(tx);

        let mut results = Vec::with_capacity(urls.len());
        let collect = async {
            while let Some(result) = rx.recv().await {
                results.push(result);
            }
        };
        match deadline {
            Some(budget) => {
                if tokio::time::timeout(budget, collect).await.is_err() {
                    tasks.abort_all();
                    tracing::warn!(budget_secs = budget.as_secs(), "reachability run hit deadline");
                }
            }
            None => collect.await,
        }
        while tasks.join_next().await.is_some() {}

        // Anything that never reported is incomplete, not broken.
        let completed: HashSet<&str> = results.iter().map(|r| r.url.as_str()).collect();
        let missing: Vec<String> = urls
            .iter()
            .filter(|u| !completed.contains(u.as_str()))
            .cloned()
            .collect();
        for url in missing {
            results.push(VerificationResult::incomplete(
                url,
                Pass::Reachability,
                Utc::now(),
            ));
        }
        results
    }

    async fn check_one(&self, url: &str) -> VerificationResult {
        let host = host_of(url);
        let Some(_permit) = self.limits.acquire(&host).await else {
            return VerificationResult::incomplete(url, Pass::Reachability, Utc::now());
        };

        let mut attempt: u32 = 0;
        loop {
            let probe = self.fetcher.probe(url).await;
            let retry = match &probe {
                Probe::Status { code, .. } => *code >= 500,
                Probe::Failed { retryable, .. } => *retryable,
            };
            if retry && attempt < self.config.max_retries {
                attempt += 1;
                tracing::debug!(url, attempt, "transient failure, backing off");
                tokio::time::sleep(self.config.backoff(attempt)).await;
                continue;
            }
            return classify(url, probe);
        }
    }
}

fn classify(url: &str, probe: Probe) -> VerificationResult {
    let checked_at = Utc::now();
    match probe {
        Probe::Status { code, location } => match code {
            200..=299 => VerificationResult {
                url: url.to_string(),
                pass: Pass::Reachability,
                checked_at,
                outcome: Outcome::Pass,
                detail: ResultDetail {
                    status_code: Some(code),
                    ..ResultDetail::default()
                },
            },
            300..=399 => VerificationResult {
                url: url.to_string(),
                pass: Pass::Reachability,
                checked_at,
                outcome: Outcome::Pass,
                detail: ResultDetail {
                    status_code: Some(code),
                    redirect_target: location,
                    note: Some("redirect target recorded as remediation candidate".to_string()),
                    ..ResultDetail::default()
                },
            },
            _ => VerificationResult {
                url: url.to_string(),
                pass: Pass::Reachability,
                checked_at,
                outcome: Outcome::Fail,
                detail: ResultDetail {
                    status_code: Some(code),
                    reason: Some(ReasonCode::HttpError),
                    ..ResultDetail::default()
                },
            },
        },
        Probe::Failed { reason, note, .. } => VerificationResult {
            url: url.to_string(),
            pass: Pass::Reachability,
            checked_at,
            outcome: Outcome::Fail,
            detail: ResultDetail {
                reason: Some(reason),
                note: Some(note),
                ..ResultDetail::default()
            },
        },
    }
}

//! Checker configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the network passes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyConfig {
    /// Global cap on concurrent requests across all hosts
    #[serde(default = "default_global_concurrency")]
    pub global_concurrency: usize,

    /// Per-host cap, kept small to stay polite to documentation sites
    #[serde(default = "default_per_host_concurrency")]
    pub per_host_concurrency: usize,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Retries for transient failures (timeout, 5xx). 4xx never retries.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base backoff between retries, in milliseconds (doubles per attempt)
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_global_concurrency() -> usize {
    8
}

fn default_per_host_concurrency() -> usize {
    2
}

fn default_request_timeout_secs() -> u64 {
    15
}

fn default_max_retries() -> u32 {
    2
}

fn default_backoff_ms() -> u64 {
    500
}

fn default_user_agent() -> String {
    "attest/0.1 (citation verification)".to_string()
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            global_concurrency: default_global_concurrency(),
            per_host_concurrency: default_per_host_concurrency(),
            request_timeout_secs: default_request_timeout_secs(),
            max_retries: default_max_retries(),
            backoff_ms: default_backoff_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl VerifyConfig {
    /// Per-request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Backoff before retry `attempt` (1-based), doubling each time.
    pub fn backoff(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.backoff_ms << attempt.min(6))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = VerifyConfig::default();
        assert_eq!(config.global_concurrency, 8);
        assert_eq!(config.per_host_concurrency, 2);
        assert_eq!(config.max_retries, 2);
    }

    #[test]
    fn test_backoff_doubles() {
        let config = VerifyConfig::default();
        assert_eq!(config.backoff(1), Duration::from_millis(1000));
        assert_eq!(config.backoff(2), Duration::from_millis(2000));
    }
}

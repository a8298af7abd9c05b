//! HTTP fetch layer shared by the checkers
//!
//! Two clients: a probe client that never follows redirects (so 3xx can
//! be observed and the target captured as a remediation candidate) and a
//! page client that follows them (relevance wants the content that a
//! reader would actually land on).

use crate::{VerifyConfig, VerifyError};
use attest_domain::ReasonCode;
use reqwest::{redirect, Client, Method, StatusCode};

/// What a single probe attempt observed.
#[derive(Debug, Clone)]
pub(crate) enum Probe {
    /// A response arrived
    Status {
        /// HTTP status code
        code: u16,
        /// Location header, for 3xx responses
        location: Option<String>,
    },

    /// No response; `retryable` decides whether the caller may retry
    Failed {
        /// Classified reason
        reason: ReasonCode,
        /// Error text for the result note
        note: String,
        /// Timeouts and connection resets retry; TLS failures do not
        retryable: bool,
    },
}

/// HTTP access for the checkers.
#[derive(Debug)]
pub struct Fetcher {
    probe_client: Client,
    page_client: Client,
}

impl Fetcher {
    /// Build the two clients from config.
    pub fn new(config: &VerifyConfig) -> Result<Self, VerifyError> {
        let probe_client = Client::builder()
            .redirect(redirect::Policy::none())
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.clone())
            .build()?;
        let page_client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self {
            probe_client,
            page_client,
        })
    }

    /// Lightweight reachability probe: HEAD, falling back to a GET whose
    /// body is never read when the server rejects HEAD outright.
    pub(crate) async fn probe(&self, url: &str) -> Probe {
        match self.probe_once(url, Method::HEAD).await {
            Probe::Status { code, .. }
                if code == StatusCode::METHOD_NOT_ALLOWED.as_u16()
                    || code == StatusCode::NOT_IMPLEMENTED.as_u16() =>
            {
                self.probe_once(url, Method::GET).await
            }
            other => other,
        }
    }

    async fn probe_once(&self, url: &str, method: Method) -> Probe {
        match self.probe_client.request(method, url).send().await {
            Ok(response) => {
                let code = response.status().as_u16();
                let location = response
                    .headers()
                    .get(reqwest::header::LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .map(|target| resolve_location(url, target));
                Probe::Status { code, location }
            }
            Err(error) => classify_error(&error),
        }
    }

    /// Fetch the full page body for relevance checking.
    pub(crate) async fn fetch_page(&self, url: &str) -> Result<String, Probe> {
        match self.page_client.get(url).send().await {
            Ok(response) => {
                let status = response.status();
                if !status.is_success() {
                    return Err(Probe::Status {
                        code: status.as_u16(),
                        location: None,
                    });
                }
                response.text().await.map_err(|e| classify_error(&e))
            }
            Err(error) => Err(classify_error(&error)),
        }
    }
}

/// Resolve a possibly-relative Location header against the request URL.
fn resolve_location(base: &str, target: &str) -> String {
    match url::Url::parse(base).and_then(|b| b.join(target)) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => target.to_string(),
    }
}

fn classify_error(error: &reqwest::Error) -> Probe {
    let note = error.to_string();
    if error.is_timeout() {
        return Probe::Failed {
            reason: ReasonCode::Timeout,
            note,
            retryable: true,
        };
    }
    // reqwest does not expose TLS failures directly; they show up in the
    // error chain text.
    let chain_text = format!("{:?}", error).to_lowercase();
    if chain_text.contains("certificate") || chain_text.contains("tls") {
        return Probe::Failed {
            reason: ReasonCode::Tls,
            note,
            retryable: false,
        };
    }
    Probe::Failed {
        reason: ReasonCode::Connect,
        note,
        retryable: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_location() {
        assert_eq!(
            resolve_location("https://docs.example.com/old/page", "/new/page"),
            "https://docs.example.com/new/page"
        );
        assert_eq!(
            resolve_location("https://docs.example.com/old", "https://other.example.com/x"),
            "https://other.example.com/x"
        );
    }
}

//! Bounded global + per-host concurrency

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedSemaphorePermit, Semaphore};

/// Two-level concurrency limiter: a global cap across all requests and a
/// smaller cap per host. Workers hold both permits for the duration of a
/// request; no other shared mutable state crosses worker boundaries.
#[derive(Debug, Clone)]
pub struct HostLimits {
    global: Arc<Semaphore>,
    per_host: Arc<Mutex<HashMap<String, Arc<Semaphore>>>>,
    per_host_cap: usize,
}

/// Permits held while one request is in flight.
pub struct RequestPermit {
    _global: OwnedSemaphorePermit,
    _host: OwnedSemaphorePermit,
}

impl HostLimits {
    /// Create limits with the given caps.
    pub fn new(global_cap: usize, per_host_cap: usize) -> Self {
        Self {
            global: Arc::new(Semaphore::new(global_cap.max(1))),
            per_host: Arc::new(Mutex::new(HashMap::new())),
            per_host_cap: per_host_cap.max(1),
        }
    }

    /// Wait for both the global and the host slot.
    ///
    /// Returns `None` only if the limiter was torn down mid-run, which a
    /// worker treats as cancellation.
    pub async fn acquire(&self, host: &str) -> Option<RequestPermit> {
        let global = self.global.clone().acquire_owned().await.ok()?;
        let host_sem = {
            let mut hosts = self.per_host.lock().await;
            hosts
                .entry(host.to_string())
                .or_insert_with(|| Arc::new(Semaphore::new(self.per_host_cap)))
                .clone()
        };
        let host = host_sem.acquire_owned().await.ok()?;
        Some(RequestPermit {
            _global: global,
            _host: host,
        })
    }
}

/// Host portion of a URL, used as the per-host limiter key.
pub(crate) fn host_of(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| url.to_string())
}

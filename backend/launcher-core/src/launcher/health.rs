use std::time::Duration;

use log::debug;
use reqwest::StatusCode;
use reqwest::blocking::Client;

/// Answers a single "is the backend ready?" question.
///
/// Every failure is the same failure: the launcher does not care whether the
/// port was closed, the request timed out or the backend answered 503.
pub trait HealthProbe: Send + Sync {
    fn is_healthy(&self, health_url: &str) -> bool;
}

impl<F> HealthProbe for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_healthy(&self, health_url: &str) -> bool {
        self(health_url)
    }
}

/// Derive the health endpoint from a target base URL.
///
/// Trailing slashes are dropped and any path prefix is kept, so
/// `http://127.0.0.1:8000/api/` probes `http://127.0.0.1:8000/api/health`.
pub fn health_url(target_url: &str, health_path: &str) -> String {
    format!("{}{health_path}", target_url.trim_end_matches('/'))
}

/// Blocking HTTP probe: healthy means `GET {health_url}` answered 200.
///
/// Uses `reqwest::blocking`; do not construct, call or drop it on an async
/// runtime thread. Async hosts go through `tokio::task::spawn_blocking`.
pub struct HttpProbe {
    client: Client,
    timeout: Duration,
}

impl HttpProbe {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            timeout,
        }
    }
}

impl HealthProbe for HttpProbe {
    fn is_healthy(&self, health_url: &str) -> bool {
        match self.client.get(health_url).timeout(self.timeout).send() {
            Ok(resp) if resp.status() == StatusCode::OK => {
                debug!("Health probe succeeded for {health_url}");
                true
            }
            Ok(resp) => {
                debug!(
                    "Health probe failed for {health_url}: status={}",
                    resp.status()
                );
                false
            }
            Err(e) => {
                debug!("Health probe failed for {health_url}: {e}");
                false
            }
        }
    }
}

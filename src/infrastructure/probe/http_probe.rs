//! reqwest-backed reachability probe.

use super::service::{ProbeError, ProbeResult, UrlProbe};
use async_trait::async_trait;
use reqwest::{Client, redirect::Policy};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Probes URLs with a `HEAD` request.
///
/// One client is shared for all requests. Redirects are not followed, so a
/// `3xx` answer is reported as is.
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    /// Builds the HTTP client with the given per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::RequestError`] if the TLS backend cannot be initialized.
    pub fn new(timeout: Duration) -> ProbeResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(Policy::none())
            .user_agent(concat!("data-collector/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ProbeError::RequestError(format!("Failed to build HTTP client: {}", e)))?;

        info!("Reachability probe enabled (timeout {}s)", timeout.as_secs());

        Ok(Self { client })
    }
}

#[async_trait]
impl UrlProbe for HttpProbe {
    async fn head(&self, url: &str) -> ProbeResult<u16> {
        match self.client.head(url).send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                debug!("HEAD {} -> {}", url, status);
                Ok(status)
            }
            Err(e) if e.is_timeout() => {
                warn!(url = %url, "Reachability probe timed out");
                Err(ProbeError::Timeout(e.to_string()))
            }
            Err(e) => {
                warn!(url = %url, error = %e, "Reachability probe failed");
                Err(ProbeError::RequestError(e.to_string()))
            }
        }
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

//! Syntax and liveness check run before a URL is saved.

use std::sync::Arc;

use crate::domain::url_pair::{UrlError, check_syntax};
use crate::infrastructure::probe::UrlProbe;

/// Service validating that a submitted URL is well formed and answers `HEAD`.
///
/// Runs on every create and update, never on read. There are no retries and
/// no caching: each call sends at most one request.
pub struct ReachabilityService {
    probe: Arc<dyn UrlProbe>,
}

impl ReachabilityService {
    /// Creates a new reachability service.
    pub fn new(probe: Arc<dyn UrlProbe>) -> Self {
        Self { probe }
    }

    /// Name of the probe in use, for health reporting.
    pub fn probe_name(&self) -> &'static str {
        self.probe.name()
    }

    /// Validates `url`.
    ///
    /// # Errors
    ///
    /// Returns [`UrlError::InvalidSyntax`] if `url` is not an absolute URL
    /// with a host; no request is sent then.
    /// Returns [`UrlError::Unreachable`] if the probe fails or answers with a
    /// status of 400 or above.
    pub async fn validate(&self, url: &str) -> Result<(), UrlError> {
        check_syntax(url)?;

        match self.probe.head(url).await {
            Ok(status) if status < 400 => Ok(()),
            Ok(status) => {
                tracing::warn!(url = %url, status, "URL answered with an error status");
                Err(UrlError::Unreachable {
                    url: url.to_string(),
                })
            }
            Err(_) => Err(UrlError::Unreachable {
                url: url.to_string(),
            }),
        }
    }
}

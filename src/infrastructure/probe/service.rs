//! Reachability probe trait and error types.

use async_trait::async_trait;
use std::fmt;

/// Errors that can occur while probing a URL.
#[derive(Debug)]
pub enum ProbeError {
    Timeout(String),
    RequestError(String),
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Timeout(e) => write!(f, "Probe timed out: {}", e),
            Self::RequestError(e) => write!(f, "Probe request failed: {}", e),
        }
    }
}

impl std::error::Error for ProbeError {}

/// Result type for probe operations.
pub type ProbeResult<T> = Result<T, ProbeError>;

/// Trait for checking that a URL answers over HTTP.
///
/// # Implementations
///
/// - [`crate::infrastructure::probe::HttpProbe`] - `HEAD` request via reqwest
/// - [`crate::infrastructure::probe::NullProbe`] - Always reachable, for disabled probing
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlProbe: Send + Sync {
    /// Sends a `HEAD` request to `url` and returns the response status code.
    ///
    /// Redirects are not followed.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError`] on timeout, connection, DNS or TLS failure.
    async fn head(&self, url: &str) -> ProbeResult<u16>;

    /// Short name reported by the health endpoint.
    fn name(&self) -> &'static str;
}

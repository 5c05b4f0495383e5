//! Outbound reachability checks for submitted URLs.
//!
//! Provides a [`UrlProbe`] trait with two implementations:
//! - [`HttpProbe`] - `HEAD` request with a timeout
//! - [`NullProbe`] - No-op implementation for offline environments and tests

mod http_probe;
mod null_probe;
mod service;

pub use http_probe::HttpProbe;
pub use null_probe::NullProbe;
pub use service::{ProbeError, ProbeResult, UrlProbe};

#[cfg(test)]
pub use service::MockUrlProbe;

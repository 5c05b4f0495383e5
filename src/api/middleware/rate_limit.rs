//! Per-IP rate limiting using the token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Governor layer keyed by the peer socket address.
pub type RateLimitLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Rate limiter for public endpoints (registration, login, web pages).
///
/// # Limits
///
/// - **Rate**: 2 requests per second
/// - **Burst**: 30 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// The server must be started with
/// `into_make_service_with_connect_info::<SocketAddr>()` so the peer
/// address is available.
pub fn layer() -> RateLimitLayer {
    build(2, 30)
}

/// Stricter rate limiter for authenticated API endpoints.
///
/// # Limits
///
/// - **Rate**: 1 request per second
/// - **Burst**: 20 requests
///
/// Every write to `/api/urls` may also send an outbound `HEAD` request, so
/// the budget stays small.
pub fn secure_layer() -> RateLimitLayer {
    build(1, 20)
}

fn build(per_second: u64, burst_size: u32) -> RateLimitLayer {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(per_second)
            .burst_size(burst_size)
            .finish()
            .expect("rate limit period and burst must be non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

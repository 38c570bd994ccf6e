//! Rate limiting middleware using token bucket algorithm.

use axum::Router;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

use crate::state::AppState;

/// How clients are keyed for rate limiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimit {
    /// No limiting. For tests and deployments that limit upstream.
    Disabled,
    /// Per socket peer address.
    PeerIp,
    /// Per client IP from `X-Forwarded-For` / `X-Real-IP`, falling back to
    /// the peer address. Only safe behind a trusted reverse proxy.
    Proxied,
}

impl RateLimit {
    pub fn from_flags(enabled: bool, behind_proxy: bool) -> Self {
        match (enabled, behind_proxy) {
            (false, _) => RateLimit::Disabled,
            (true, false) => RateLimit::PeerIp,
            (true, true) => RateLimit::Proxied,
        }
    }
}

/// Limits for endpoints that accept credentials.
///
/// - **Rate**: 1 request per second
/// - **Burst**: 10 requests
const CREDENTIALS: (u64, u32) = (1, 10);

/// Limits for everything else.
///
/// - **Rate**: 2 requests per second
/// - **Burst**: 100 requests
const GENERAL: (u64, u32) = (2, 100);

/// Applies the credential-endpoint limiter to `router`.
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Example
///
/// ```rust,ignore
/// let auth = rate_limit::secure(auth_routes(), RateLimit::PeerIp);
/// ```
pub fn secure(router: Router<AppState>, mode: RateLimit) -> Router<AppState> {
    apply(router, mode, CREDENTIALS)
}

/// Applies the general limiter to `router`.
pub fn general(router: Router<AppState>, mode: RateLimit) -> Router<AppState> {
    apply(router, mode, GENERAL)
}

fn apply(
    router: Router<AppState>,
    mode: RateLimit,
    (per_second, burst): (u64, u32),
) -> Router<AppState> {
    match mode {
        RateLimit::Disabled => router,
        RateLimit::PeerIp => router.layer(peer_layer(per_second, burst)),
        RateLimit::Proxied => router.layer(proxied_layer(per_second, burst)),
    }
}

fn peer_layer(
    per_second: u64,
    burst: u32,
) -> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(per_second)
            .burst_size(burst)
            .finish()
            .expect("non-zero rate limit"),
    );

    GovernorLayer::new(governor_conf)
}

fn proxied_layer(
    per_second: u64,
    burst: u32,
) -> GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(SmartIpKeyExtractor)
            .per_second(per_second)
            .burst_size(burst)
            .finish()
            .expect("non-zero rate limit"),
    );

    GovernorLayer::new(governor_conf)
}

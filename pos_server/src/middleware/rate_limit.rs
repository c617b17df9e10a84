use actix_governor::{GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor};
use governor::middleware::NoOpMiddleware;
use log::*;

use crate::{config::RateLimitConfig, errors::ServerError};

pub type RateLimiterConfig = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>;

/// Builds the per-client-IP rate limiter. Build it once and share it between workers with
/// [`actix_governor::Governor::new`], otherwise each worker counts requests separately.
///
/// A client may burst up to `max_requests` at once; after that one request is replenished every
/// `window_secs / max_requests`. Requests over the limit get `429 Too Many Requests`.
pub fn rate_limiter_config(limits: &RateLimitConfig) -> Result<RateLimiterConfig, ServerError> {
    if limits.max_requests == 0 || limits.window_secs == 0 {
        return Err(ServerError::ConfigurationError(format!("Invalid rate limit: {limits:?}")));
    }
    let replenish_ms = (limits.window_secs.saturating_mul(1000) / u64::from(limits.max_requests)).max(1);
    debug!("💻️ Rate limiter: burst of {}, one request replenished every {replenish_ms}ms", limits.max_requests);
    GovernorConfigBuilder::default()
        .per_millisecond(replenish_ms)
        .burst_size(limits.max_requests)
        .finish()
        .ok_or_else(|| ServerError::ConfigurationError(format!("Invalid rate limit: {limits:?}")))
}

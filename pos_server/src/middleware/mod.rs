mod auth;
mod cors;
mod rate_limit;

pub use auth::{MerchantAuthFactory, MerchantAuthService};
pub use cors::cors_policy;
pub use rate_limit::{rate_limiter_config, RateLimiterConfig};

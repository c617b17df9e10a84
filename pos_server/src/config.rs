use std::env;

use log::*;
use square_tools::SquareConfig;

const DEFAULT_POS_HOST: &str = "127.0.0.1";
const DEFAULT_POS_PORT: u16 = 3000;
const DEFAULT_DATABASE_URL: &str = "sqlite://data/pos_store.db";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 25;
const DEFAULT_RATE_LIMIT_MAX: u32 = 100;
const DEFAULT_RATE_LIMIT_WINDOW_SECS: u64 = 60;

/// Each client IP may make `max_requests` requests per `window_secs`. The allowance refills gradually, not all at once
/// at the end of the window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self { max_requests: DEFAULT_RATE_LIMIT_MAX, window_secs: DEFAULT_RATE_LIMIT_WINDOW_SECS }
    }
}

impl RateLimitConfig {
    pub fn from_env_or_default() -> Self {
        let max_requests = positive_from_env("POS_RATE_LIMIT_MAX", DEFAULT_RATE_LIMIT_MAX);
        let window_secs = positive_from_env("POS_RATE_LIMIT_WINDOW", DEFAULT_RATE_LIMIT_WINDOW_SECS);
        Self { max_requests, window_secs }
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub rate_limit: RateLimitConfig,
    /// Square Connect API configuration. Access tokens are not part of the configuration; every request brings its own.
    pub square: SquareConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_POS_HOST.to_string(),
            port: DEFAULT_POS_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            rate_limit: RateLimitConfig::default(),
            square: SquareConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("POS_HOST").ok().unwrap_or_else(|| DEFAULT_POS_HOST.into());
        let port = env::var("POS_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for POS_PORT. {e} Using the default, {DEFAULT_POS_PORT}, instead."
                    );
                    DEFAULT_POS_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_POS_PORT);
        let database_url = env::var("POS_DATABASE_URL").unwrap_or_else(|_| {
            info!("🪛️ POS_DATABASE_URL is not set. Using {DEFAULT_DATABASE_URL}");
            DEFAULT_DATABASE_URL.to_string()
        });
        let db_max_connections = positive_from_env("POS_DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS);
        let rate_limit = RateLimitConfig::from_env_or_default();
        info!("🪛️ Rate limit: {} requests per {}s per client", rate_limit.max_requests, rate_limit.window_secs);
        let square = SquareConfig::new_from_env_or_default();
        info!(
            "🪛️ Square {} environment at {} (API version {})",
            square.environment, square.base_url, square.api_version
        );
        Self { host, port, database_url, db_max_connections, rate_limit, square }
    }
}

/// Reads a strictly positive integer from the environment. Missing, malformed and zero values fall back to `default`.
fn positive_from_env<T>(name: &str, default: T) -> T
where
    T: std::str::FromStr + PartialOrd + Default + std::fmt::Display + Copy,
    T::Err: std::fmt::Display,
{
    env::var(name)
        .ok()
        .and_then(|s| {
            s.parse::<T>()
                .map_err(|e| warn!("🪛️ {s} is not a valid value for {name}. {e} Using the default, {default}."))
                .ok()
        })
        .filter(|n| {
            if *n <= T::default() {
                warn!("🪛️ {name} must be at least 1. Using {default}.");
            }
            *n > T::default()
        })
        .unwrap_or(default)
}

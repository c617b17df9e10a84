use std::{fmt::Display, str::FromStr, time::Duration};

use log::*;
use pos_common::DEFAULT_CURRENCY_CODE;

pub const SANDBOX_BASE_URL: &str = "https://connect.squareupsandbox.com";
pub const PRODUCTION_BASE_URL: &str = "https://connect.squareup.com";
pub const DEFAULT_API_VERSION: &str = "2024-07-17";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SquareEnvironment {
    #[default]
    Sandbox,
    Production,
}

impl SquareEnvironment {
    pub fn base_url(&self) -> &'static str {
        match self {
            Self::Sandbox => SANDBOX_BASE_URL,
            Self::Production => PRODUCTION_BASE_URL,
        }
    }
}

impl FromStr for SquareEnvironment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sandbox" => Ok(Self::Sandbox),
            "production" | "prod" => Ok(Self::Production),
            other => Err(format!("'{other}' is not a valid Square environment")),
        }
    }
}

impl Display for SquareEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sandbox => write!(f, "sandbox"),
            Self::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SquareConfig {
    pub environment: SquareEnvironment,
    /// Root of the Connect API. Normally derived from `environment`, but can be overridden (e.g. for a local stub).
    pub base_url: String,
    /// Sent in the `Square-Version` header of every request.
    pub api_version: String,
    /// ISO 4217 code used for every amount sent to Square.
    pub currency: String,
    pub request_timeout: Duration,
}

impl Default for SquareConfig {
    fn default() -> Self {
        let environment = SquareEnvironment::default();
        Self {
            environment,
            base_url: environment.base_url().to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            currency: DEFAULT_CURRENCY_CODE.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl SquareConfig {
    pub fn new_from_env_or_default() -> Self {
        let environment = std::env::var("POS_SQUARE_ENVIRONMENT")
            .map_err(|_| info!("POS_SQUARE_ENVIRONMENT not set, using the sandbox environment"))
            .and_then(|s| s.parse::<SquareEnvironment>().map_err(|e| warn!("{e}. Using the sandbox environment")))
            .unwrap_or_default();
        let base_url = std::env::var("POS_SQUARE_BASE_URL")
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| environment.base_url().to_string());
        let api_version = std::env::var("POS_SQUARE_API_VERSION").unwrap_or_else(|_| {
            info!("POS_SQUARE_API_VERSION not set, using {DEFAULT_API_VERSION} as default");
            DEFAULT_API_VERSION.to_string()
        });
        let currency = std::env::var("POS_CURRENCY").map(|s| s.trim().to_uppercase()).unwrap_or_else(|_| {
            info!("POS_CURRENCY not set, using {DEFAULT_CURRENCY_CODE} as default");
            DEFAULT_CURRENCY_CODE.to_string()
        });
        let request_timeout = std::env::var("POS_GATEWAY_TIMEOUT")
            .ok()
            .and_then(|s| {
                s.parse::<u64>()
                    .map_err(|e| warn!("Invalid configuration value for POS_GATEWAY_TIMEOUT. {e}"))
                    .ok()
            })
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);
        Self { environment, base_url, api_version, currency, request_timeout }
    }
}

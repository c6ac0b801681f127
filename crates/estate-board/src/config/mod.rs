use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::marketplace::promotions::PromotionPricing;
use crate::marketplace::quota::QuotaPolicy;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the marketplace service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub marketplace: MarketplaceConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = parse_env("APP_PORT", 3000u16)?;
        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let marketplace = MarketplaceConfig {
            post_limit: parse_env("APP_POST_LIMIT", QuotaPolicy::DEFAULT_POST_LIMIT)?,
            filter_limit: parse_env("APP_FILTER_LIMIT", QuotaPolicy::DEFAULT_FILTER_LIMIT)?,
            phrase_fee: parse_env("APP_PHRASE_FEE", PromotionPricing::DEFAULT_PHRASE_FEE)?,
            color_fee: parse_env("APP_COLOR_FEE", PromotionPricing::DEFAULT_COLOR_FEE)?,
            sweep_interval_secs: parse_env("APP_SWEEP_INTERVAL_SECS", 86_400u64)?,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                json_output: environment == AppEnvironment::Production,
            },
            marketplace,
        })
    }
}

fn parse_env<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidValue { key, found: raw }),
        Err(_) => Ok(default),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing output controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub json_output: bool,
}

/// Business dials for the marketplace: quota caps for unsubscribed users,
/// promotion add-on fees, and the sweep cadence.
#[derive(Debug, Clone)]
pub struct MarketplaceConfig {
    pub post_limit: u32,
    pub filter_limit: u32,
    pub phrase_fee: f64,
    pub color_fee: f64,
    pub sweep_interval_secs: u64,
}

impl MarketplaceConfig {
    pub fn quota_policy(&self) -> QuotaPolicy {
        QuotaPolicy::new(self.post_limit, self.filter_limit)
    }

    pub fn promotion_pricing(&self) -> PromotionPricing {
        PromotionPricing::new(self.phrase_fee, self.color_fee)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { key: &'static str, found: String },
    InvalidHost { source: std::net::AddrParseError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue { key, found } => {
                write!(f, "{key} could not be parsed (found '{found}')")
            }
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidValue { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

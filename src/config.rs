//! Immutable application configuration, read once at startup.

use std::net::SocketAddr;
use std::time::Duration;

use crate::utils::errors::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:33507";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEV_SESSION_SECRET: &str = "tickerplot-dev-secret";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub base_url: String,
    /// Signing secret for the hosting layer; the chart pipeline never reads it
    pub session_secret: String,
    pub bind_addr: SocketAddr,
    pub request_timeout: Duration,
    pub debug: bool,
}

impl AppConfig {
    /// Load from the process environment (after `.env` has been applied)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get("ALPHA_VANTAGE_KEY").ok_or(ConfigError::Missing("ALPHA_VANTAGE_KEY"))?;
        let base_url = get("ALPHA_VANTAGE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let session_secret = get("SESSION_SECRET").unwrap_or_else(|| DEV_SESSION_SECRET.to_string());

        let bind_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.parse().map_err(|_| ConfigError::Invalid {
            key: "BIND_ADDR",
            value: bind_raw.clone(),
        })?;

        let request_timeout = match get("REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                    key: "REQUEST_TIMEOUT_SECS",
                    value: raw.clone(),
                })?;
                Duration::from_secs(secs.max(1))
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let debug = get("APP_DEBUG")
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            api_key,
            base_url,
            session_secret,
            bind_addr,
            request_timeout,
            debug,
        })
    }

    pub fn uses_dev_secret(&self) -> bool {
        self.session_secret == DEV_SESSION_SECRET
    }
}
